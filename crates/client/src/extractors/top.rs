// ABOUTME: Extraction of the ranked top chart page into an ordered list of movies.
// ABOUTME: Year comes from the "(YYYY)" annotation in the title text; position from the rank cell.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;

use crate::error::ClientError;
use crate::extractors::fields::{first_text, require_text};
use crate::extractors::list::extract_card;
use crate::extractors::numeric::leading_int;
use crate::extractors::selectors::TOP;
use crate::model::Movie;

const OP: &str = "ExtractTopChart";

static TITLE_YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\((\d{4})\)").unwrap());

/// Extract chart entries in rank order.
///
/// Rows without a movie card (separators, ads) are skipped. The title keeps
/// its year annotation, e.g. `"El padrino (1972)"`.
pub fn extract_top_chart(doc: &Html) -> Result<Vec<Movie>, ClientError> {
    let mut movies = Vec::new();

    for entry in doc.root_element().select(&TOP.entry) {
        let Some(card) = entry.select(&TOP.card).next() else {
            continue;
        };

        let title = require_text(card, &TOP.title, OP, "title")?;
        let year = year_from_title(&title);
        let mut movie = extract_card(card, title, OP)?;
        movie.year = year;
        movie.position = first_text(entry, &TOP.position).and_then(|t| leading_int(&t));
        movies.push(movie);
    }

    Ok(movies)
}

fn year_from_title(title: &str) -> Option<u16> {
    TITLE_YEAR_RE
        .captures(title)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
