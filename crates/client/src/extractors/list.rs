// ABOUTME: Extraction of the search results page into a SearchResult of summary cards.
// ABOUTME: Also hosts the card-level field map shared with the top chart extractor.

use scraper::{ElementRef, Html};

use crate::error::ClientError;
use crate::extractors::fields::{
    all_text, first_attr, first_text, own_attr, parse_id, require_text,
};
use crate::extractors::numeric::{leading_int, parse_grouped_int};
use crate::extractors::selectors::LIST;
use crate::model::{Movie, Rating, SearchResult};

const OP: &str = "ExtractSearchResults";

/// Extract every result card from a search results page.
///
/// The total comes from the active tab counter; when the counter is missing
/// the number of cards is used instead.
pub fn extract_search_results(doc: &Html) -> Result<SearchResult, ClientError> {
    let root = doc.root_element();

    let results = root
        .select(&LIST.card)
        .map(|card| {
            let info = info_container(card);
            let title = require_text(info, &LIST.title, OP, "title")?;
            let mut movie = extract_card(card, title, OP)?;
            movie.year = result_year(card);
            Ok(movie)
        })
        .collect::<Result<Vec<_>, ClientError>>()?;

    let count = first_text(root, &LIST.count)
        .and_then(|t| parse_grouped_int(&t))
        .unwrap_or(results.len() as u32);

    Ok(SearchResult { count, results })
}

/// Fields every summary card carries, in list and chart views alike.
///
/// Year and position depend on the surrounding layout and are left to the caller.
pub(crate) fn extract_card(
    card: ElementRef<'_>,
    title: String,
    op: &str,
) -> Result<Movie, ClientError> {
    let id = parse_id(&own_attr(card, "data-movie-id", op, "id")?, op)?;

    let info = info_container(card);
    let rating = Rating::from_texts(
        first_text(info, &LIST.rating_average).as_deref(),
        first_text(info, &LIST.rating_count).as_deref(),
    );

    Ok(Movie {
        id,
        title,
        poster: first_attr(card, &LIST.poster, "src"),
        country: first_attr(info, &LIST.country, "alt"),
        rating,
        directors: Some(all_text(info, &LIST.directors)),
        cast: Some(all_text(info, &LIST.cast)),
        ..Default::default()
    })
}

fn info_container(card: ElementRef<'_>) -> ElementRef<'_> {
    card.select(&LIST.info).next().unwrap_or(card)
}

/// The year label sits next to the card, inside the enclosing result row.
fn result_year(card: ElementRef<'_>) -> Option<u16> {
    let row = card
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| LIST.item.matches(el))?;
    let text = first_text(row, &LIST.year)?;
    leading_int(&text).and_then(|y| u16::try_from(y).ok())
}
