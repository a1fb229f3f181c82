// ABOUTME: Field extraction for the three page layouts served by the film database.
// ABOUTME: Shared primitives live in `fields` and `numeric`; locators in `selectors`.

//! Field extraction module.
//!
//! Submodules:
//! - `fields`: text and attribute primitives over `scraper` elements.
//! - `numeric`: locale-aware number parsing.
//! - `selectors`: compiled locators, one struct per page kind.
//! - `list`, `detail`, `top`: one extractor per page kind.

pub mod detail;
pub mod fields;
pub mod list;
pub mod numeric;
pub mod selectors;
pub mod top;

pub use detail::extract_movie;
pub use list::extract_search_results;
pub use top::extract_top_chart;
