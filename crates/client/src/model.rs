// ABOUTME: Movie, Rating, Awards, SearchResult and TopChartQuery records used by the client.
// ABOUTME: Records are built once per call and never mutated afterwards.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::extractors::numeric::{parse_decimal, parse_grouped_int};

/// Audience rating: average on a 0-10 scale and number of votes.
///
/// `average` is `None` when the site shows no parsable value, which is not the
/// same thing as a rating of zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub average: Option<f64>,
    pub count: u32,
}

impl Rating {
    /// Build a rating from the raw average and vote count texts.
    pub fn from_texts(average: Option<&str>, count: Option<&str>) -> Self {
        Self {
            average: average.and_then(parse_decimal),
            count: count.and_then(parse_grouped_int).unwrap_or(0),
        }
    }
}

/// Awards keyed by year, in the order years first appear on the page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Awards(IndexMap<String, Vec<String>>);

impl Awards {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an award to its year, creating the year on first sight.
    pub fn push(&mut self, year: impl Into<String>, description: impl Into<String>) {
        self.0
            .entry(year.into())
            .or_default()
            .push(description.into());
    }

    pub fn get(&self, year: &str) -> Option<&[String]> {
        self.0.get(year).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A movie as extracted from one of the site's page layouts.
///
/// Detail pages fill every field they expose; list and chart cards leave
/// genres, duration, plot and awards empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: u64,
    pub title: String,
    pub year: Option<u16>,
    pub country: Option<String>,
    pub poster: Option<String>,
    pub rating: Rating,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cast: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genres: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub awards: Option<Awards>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
}

impl Movie {
    /// Case-insensitive comparison used for exact-match disambiguation.
    pub fn title_matches(&self, query: &str) -> bool {
        self.title.trim().to_lowercase() == query.trim().to_lowercase()
    }
}

/// Outcome of a title search.
///
/// `count` is the total the site reported, which can exceed `results.len()`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub count: u32,
    pub results: Vec<Movie>,
}

impl SearchResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn single(movie: Movie) -> Self {
        Self {
            count: 1,
            results: vec![movie],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0 && self.results.is_empty()
    }
}

/// Filters for the top chart, already translated to site codes.
///
/// Empty genre or country means "no filter". Year bounds are inclusive and
/// omitted from the request when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopChartQuery {
    pub genre: String,
    pub country: String,
    pub year_from: Option<u16>,
    pub year_to: Option<u16>,
}
