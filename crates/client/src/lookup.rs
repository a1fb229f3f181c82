// ABOUTME: Lookup tables translating Spanish genre and country names to the site's filter codes.
// ABOUTME: Loaded once from embedded JSON; unknown names degrade to the empty "no filter" code.

//! Genre and country code lookup.
//!
//! Voice queries name genres and countries the way people say them
//! ("Ciencia ficción", "Estados Unidos"); the chart endpoint wants the site's
//! short codes (`C-F`, `US`). Unknown names are not an error: they turn into
//! `""`, which the chart treats as no filter.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::model::TopChartQuery;

const GENRES_JSON: &str = include_str!("../data/genres.json");
const COUNTRIES_JSON: &str = include_str!("../data/countries.json");

struct CodeTable {
    exact: HashMap<String, String>,
    folded: HashMap<String, String>,
}

impl CodeTable {
    fn load(json: &str, what: &str) -> Self {
        let exact: HashMap<String, String> = serde_json::from_str(json)
            .unwrap_or_else(|e| panic!("failed to parse builtin {} table: {}", what, e));
        let folded = exact
            .iter()
            .map(|(name, code)| (name.to_lowercase(), code.clone()))
            .collect();
        Self { exact, folded }
    }

    fn code(&self, name: &str) -> &str {
        let name = name.trim();
        self.exact
            .get(name)
            .or_else(|| self.folded.get(&name.to_lowercase()))
            .map(String::as_str)
            .unwrap_or("")
    }
}

static GENRES: Lazy<CodeTable> = Lazy::new(|| CodeTable::load(GENRES_JSON, "genre"));
static COUNTRIES: Lazy<CodeTable> = Lazy::new(|| CodeTable::load(COUNTRIES_JSON, "country"));

/// Site code for a genre name, or `""` when unknown.
pub fn genre_code(name: &str) -> &'static str {
    GENRES.code(name)
}

/// Site code for a country name, or `""` when unknown.
pub fn country_code(name: &str) -> &'static str {
    COUNTRIES.code(name)
}

impl TopChartQuery {
    /// Build a chart query from human-readable names.
    pub fn from_names(
        genre: Option<&str>,
        country: Option<&str>,
        year_from: Option<u16>,
        year_to: Option<u16>,
    ) -> Self {
        Self {
            genre: genre.map(genre_code).unwrap_or_default().to_string(),
            country: country.map(country_code).unwrap_or_default().to_string(),
            year_from,
            year_to,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_genre_codes() {
        assert_eq!(genre_code("Drama"), "DR");
        assert_eq!(genre_code("Ciencia ficción"), "C-F");
        assert_eq!(genre_code("Serie de TV"), "TV_SE");
    }

    #[test]
    fn test_lookup_is_case_insensitive_fallback() {
        assert_eq!(genre_code("ciencia FICCIÓN"), "C-F");
        assert_eq!(country_code(" estados unidos "), "US");
    }

    #[test]
    fn test_country_codes() {
        assert_eq!(country_code("España"), "ES");
        assert_eq!(country_code("Alemania"), "DE");
        assert_eq!(country_code("Todos los países"), "");
    }

    #[test]
    fn test_unknown_names_mean_no_filter() {
        assert_eq!(genre_code("Telenovela"), "");
        assert_eq!(country_code("Atlántida"), "");
        assert_eq!(genre_code(""), "");
    }

    #[test]
    fn test_query_from_names() {
        let q = TopChartQuery::from_names(Some("Western"), Some("Italia"), Some(1960), None);
        assert_eq!(
            q,
            TopChartQuery {
                genre: "WE".to_string(),
                country: "IT".to_string(),
                year_from: Some(1960),
                year_to: None,
            }
        );

        let q = TopChartQuery::from_names(None, None, None, None);
        assert_eq!(q, TopChartQuery::default());
    }
}
