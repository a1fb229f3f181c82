// ABOUTME: Pre-compiled CSS locators for the three page layouts (list, detail, top chart).
// ABOUTME: Each layout gets one struct of selectors compiled once on first use.

//! Page locators.
//!
//! Locators form a closed set per page kind. Compiling them once keeps the
//! extractors free of selector strings and parse failures.

use once_cell::sync::Lazy;
use scraper::Selector;

fn css(selector: &str) -> Selector {
    Selector::parse(selector).unwrap()
}

/// Search results page.
pub struct ListSelectors {
    pub count: Selector,
    pub card: Selector,
    /// Result row wrapping a card and its year label.
    pub item: Selector,
    pub year: Selector,
    pub info: Selector,
    pub poster: Selector,
    pub title: Selector,
    pub country: Selector,
    pub rating_average: Selector,
    pub rating_count: Selector,
    pub directors: Selector,
    pub cast: Selector,
}

pub static LIST: Lazy<ListSelectors> = Lazy::new(|| ListSelectors {
    count: css(".nav-header > .ntabs > .active > a > .count"),
    card: css(".movie-card"),
    item: css(".se-it"),
    year: css(".ye-w"),
    info: css(".mc-info-container"),
    poster: css(".mc-poster > a > img"),
    title: css(".mc-title > a"),
    country: css(".mc-title > img"),
    rating_average: css(".mr-rating > .avgrat-box"),
    rating_count: css(".mr-rating > .ratcount-box"),
    directors: css(".mc-director > .credits > .nb > a"),
    cast: css(".mc-cast > .credits > .nb > a"),
});

/// Single movie page.
pub struct DetailSelectors {
    pub id: Selector,
    pub year: Selector,
    pub poster: Selector,
    pub title: Selector,
    pub country: Selector,
    pub rating_average: Selector,
    pub rating_count: Selector,
    pub directors: Selector,
    pub cast: Selector,
    pub genres: Selector,
    pub duration: Selector,
    pub plot: Selector,
    pub award_anchor: Selector,
}

pub static DETAIL: Lazy<DetailSelectors> = Lazy::new(|| DetailSelectors {
    id: css("[data-movie-id]"),
    year: css("[itemprop=\"datePublished\"]"),
    poster: css("#movie-main-image-container > a > img"),
    title: css("#main-title > [itemprop=\"name\"]"),
    country: css("#country-img > img"),
    rating_average: css("[itemprop=\"ratingValue\"]"),
    rating_count: css("[itemprop=\"ratingCount\"]"),
    directors: css("[itemprop=\"director\"] > a > [itemprop=\"name\"]"),
    cast: css("[itemprop=\"actor\"] > a > [itemprop=\"name\"]"),
    genres: css("[itemprop=\"genre\"] > a"),
    duration: css("[itemprop=\"duration\"]"),
    plot: css("[itemprop=\"description\"]"),
    award_anchor: css("dd.award .margin-bottom > a:first-child"),
});

/// Ranked chart page. Card fields reuse the list layout.
pub struct TopSelectors {
    pub entry: Selector,
    pub position: Selector,
    pub card: Selector,
    pub title: Selector,
}

pub static TOP: Lazy<TopSelectors> = Lazy::new(|| TopSelectors {
    entry: css("#top-movies > li"),
    position: css(".position"),
    card: css(".movie-card"),
    title: css(".mc-title"),
});
