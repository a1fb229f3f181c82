// ABOUTME: Main library entry point for the FilmAffinity scraping client.
// ABOUTME: Re-exports the public API: Client, ClientBuilder, Movie, SearchResult, Locale and ClientError.

//! filmbot-client - fetch and extract movie data from FilmAffinity pages.
//!
//! The client builds one of three site URLs (title search, movie page, top
//! chart), fetches it, decides which layout came back and extracts typed
//! records from it. Nothing is cached between calls.
//!
//! # Example
//!
//! ```no_run
//! use filmbot_client::{Client, ClientError, Locale};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ClientError> {
//!     let client = Client::builder().build()?;
//!     let found = client.search_movies("El padrino", &Locale::es()).await?;
//!     for movie in &found.results {
//!         println!("{} ({:?})", movie.title, movie.year);
//!     }
//!     Ok(())
//! }
//! ```

pub mod classify;
pub mod client;
pub mod error;
pub mod extractors;
pub mod locale;
pub mod lookup;
pub mod model;
pub mod options;
pub mod resource;

pub use crate::classify::{classify, PageKind};
pub use crate::client::{Client, FetchedPage};
pub use crate::error::{ClientError, ErrorCode};
pub use crate::locale::Locale;
pub use crate::lookup::{country_code, genre_code};
pub use crate::model::{Awards, Movie, Rating, SearchResult, TopChartQuery};
pub use crate::options::{ClientBuilder, Options, DEFAULT_BASE_URL, MOBILE_BASE_URL};
