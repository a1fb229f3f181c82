// ABOUTME: The main Client struct that builds site URLs, fetches pages and runs the extractors.
// ABOUTME: Provides search_movies (with exact-title disambiguation), fetch_by_id and the top chart operations.

use scraper::Html;
use tracing::{debug, info};
use url::Url;

use crate::classify::{classify, PageKind};
use crate::error::ClientError;
use crate::extractors::{extract_movie, extract_search_results, extract_top_chart};
use crate::locale::Locale;
use crate::model::{Movie, SearchResult, TopChartQuery};
use crate::options::{ClientBuilder, Options};
use crate::resource::{fetch, FetchOptions, FetchResult};

/// A fetched page before parsing.
///
/// The body stays a `String` so futures holding a page remain `Send`; parse
/// it with [`FetchedPage::document`] right where it is needed.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub body: String,
    pub final_url: String,
    /// Path and query of the final URL, used to classify the page.
    pub resolved_path: String,
}

impl FetchedPage {
    fn from_fetch(result: FetchResult) -> Self {
        Self {
            body: result.text_utf8(),
            resolved_path: result.resolved_path(),
            final_url: result.final_url,
        }
    }

    /// Parse the body as an HTML document.
    pub fn document(&self) -> Html {
        Html::parse_document(&self.body)
    }
}

/// Client for the film database site.
///
/// Holds no state besides configuration, so one instance can serve any
/// number of concurrent requests.
#[derive(Debug, Clone)]
pub struct Client {
    opts: Options,
    base_url: Url,
    http_client: reqwest::Client,
}

impl Client {
    /// Create a new ClientBuilder for configuring the client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a new Client with the given options.
    pub fn new(opts: Options) -> Result<Self, ClientError> {
        let base_url = parse_base_url(&opts.base_url)?;

        let http_client = match opts.http_client.clone() {
            Some(client) => client,
            None => reqwest::Client::builder()
                .user_agent(&opts.user_agent)
                .timeout(opts.timeout)
                .cookie_store(true)
                .gzip(true)
                .brotli(true)
                .deflate(true)
                .build()
                .map_err(|e| {
                    ClientError::invalid_input(
                        &opts.base_url,
                        "NewClient",
                        Some(anyhow::anyhow!("failed to build HTTP client: {}", e)),
                    )
                })?,
        };

        Ok(Self {
            opts,
            base_url,
            http_client,
        })
    }

    /// URL of the title search for `query`.
    pub fn search_url(&self, query: &str, locale: &Locale) -> Result<Url, ClientError> {
        let mut url = self.endpoint(locale, "search.php")?;
        url.query_pairs_mut()
            .append_pair("stype", "title")
            .append_pair("stext", query);
        Ok(url)
    }

    /// Canonical URL of a movie page.
    pub fn detail_url(&self, id: u64, locale: &Locale) -> Result<Url, ClientError> {
        self.endpoint(locale, &format!("film{}.html", id))
    }

    /// URL of the top chart for `query`.
    ///
    /// Documentaries and TV series are always excluded; absent year bounds are
    /// left out of the query string.
    pub fn top_chart_url(&self, query: &TopChartQuery, locale: &Locale) -> Result<Url, ClientError> {
        let mut url = self.endpoint(locale, "topgen.php")?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("genre", &query.genre);
            if let Some(from) = query.year_from {
                pairs.append_pair("fromyear", &from.to_string());
            }
            if let Some(to) = query.year_to {
                pairs.append_pair("toyear", &to.to_string());
            }
            pairs
                .append_pair("country", &query.country)
                .append_pair("nodoc", "1")
                .append_pair("notvse", "1");
        }
        Ok(url)
    }

    /// Fetch the search page for `query`, following the site's redirects.
    pub async fn search_page(&self, query: &str, locale: &Locale) -> Result<FetchedPage, ClientError> {
        let url = self.search_url(query, locale)?;
        let result = fetch(&self.http_client, &url, &self.fetch_options(), "SearchByTitle").await?;
        Ok(FetchedPage::from_fetch(result))
    }

    /// Search movies by title.
    ///
    /// - A redirect to a movie page yields that movie, fully extracted.
    /// - A result list with a title equal to `query` (ignoring case) is
    ///   replaced by the detail record of that movie, at the cost of one more
    ///   request.
    /// - Otherwise the list is returned as is, with the site's total count.
    /// - Unrecognized pages and blank queries yield an empty result.
    pub async fn search_movies(&self, query: &str, locale: &Locale) -> Result<SearchResult, ClientError> {
        if query.trim().is_empty() {
            return Ok(SearchResult::empty());
        }

        let page = self.search_page(query, locale).await?;
        let kind = classify(&page.resolved_path);
        debug!(query, path = %page.resolved_path, ?kind, "classified search page");

        match kind {
            PageKind::Detail { .. } => {
                let movie = extract_movie(&page.document()).map_err(|e| e.with_url(&page.final_url))?;
                Ok(SearchResult::single(movie))
            }
            PageKind::SearchResults => {
                let listed =
                    extract_search_results(&page.document()).map_err(|e| e.with_url(&page.final_url))?;

                if let Some(exact) = listed.results.iter().find(|m| m.title_matches(query)) {
                    info!(query, id = exact.id, count = listed.count, "exact title match, fetching detail page");
                    let movie = self.fetch_by_id(exact.id, locale).await?;
                    return Ok(SearchResult::single(movie));
                }

                Ok(listed)
            }
            PageKind::Unrecognized => Ok(SearchResult::empty()),
        }
    }

    /// Fetch and extract one movie page.
    pub async fn fetch_by_id(&self, id: u64, locale: &Locale) -> Result<Movie, ClientError> {
        let url = self.detail_url(id, locale)?;
        let result = fetch(&self.http_client, &url, &self.fetch_options(), "FetchById").await?;
        let page = FetchedPage::from_fetch(result);
        extract_movie(&page.document()).map_err(|e| e.with_url(&page.final_url))
    }

    /// Fetch the top chart for filters already expressed as site codes.
    pub async fn fetch_top_chart(
        &self,
        query: &TopChartQuery,
        locale: &Locale,
    ) -> Result<Vec<Movie>, ClientError> {
        let url = self.top_chart_url(query, locale)?;
        let result = fetch(&self.http_client, &url, &self.fetch_options(), "TopChart").await?;
        let page = FetchedPage::from_fetch(result);
        let movies = extract_top_chart(&page.document()).map_err(|e| e.with_url(&page.final_url))?;
        debug!(entries = movies.len(), "extracted top chart");
        Ok(movies)
    }

    /// Fetch the top chart filtering by human-readable genre and country names.
    ///
    /// Unknown names do not filter.
    pub async fn fetch_top_movies(
        &self,
        genre: Option<&str>,
        country: Option<&str>,
        year_from: Option<u16>,
        year_to: Option<u16>,
        locale: &Locale,
    ) -> Result<Vec<Movie>, ClientError> {
        let query = TopChartQuery::from_names(genre, country, year_from, year_to);
        self.fetch_top_chart(&query, locale).await
    }

    fn endpoint(&self, locale: &Locale, page: &str) -> Result<Url, ClientError> {
        let relative = format!("{}/{}", locale, page);
        self.base_url.join(&relative).map_err(|e| {
            ClientError::invalid_input(
                self.base_url.as_str(),
                "BuildUrl",
                Some(anyhow::anyhow!("cannot join {:?}: {}", relative, e)),
            )
        })
    }

    fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            headers: self.opts.headers.clone(),
        }
    }
}

/// Validate the base URL and make sure relative joins land beneath it.
fn parse_base_url(raw: &str) -> Result<Url, ClientError> {
    let mut url = Url::parse(raw).map_err(|e| {
        ClientError::invalid_input(raw, "NewClient", Some(anyhow::anyhow!("invalid base URL: {}", e)))
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ClientError::invalid_input(
            raw,
            "NewClient",
            Some(anyhow::anyhow!("scheme must be http or https")),
        ));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> Client {
        Client::builder().build().unwrap()
    }

    #[test]
    fn test_search_url() {
        let url = client().search_url("el padrino", &Locale::es()).unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.filmaffinity.com/es/search.php?stype=title&stext=el+padrino"
        );
    }

    #[test]
    fn test_detail_url() {
        let url = client()
            .detail_url(809297, &Locale::new("en").unwrap())
            .unwrap();
        assert_eq!(url.as_str(), "https://www.filmaffinity.com/en/film809297.html");
    }

    #[test]
    fn test_top_chart_url_omits_absent_years() {
        let query = TopChartQuery {
            genre: "DR".to_string(),
            ..Default::default()
        };
        let url = client().top_chart_url(&query, &Locale::es()).unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.filmaffinity.com/es/topgen.php?genre=DR&country=&nodoc=1&notvse=1"
        );
    }

    #[test]
    fn test_top_chart_url_with_years() {
        let query = TopChartQuery {
            genre: String::new(),
            country: "ES".to_string(),
            year_from: Some(1990),
            year_to: Some(1999),
        };
        let url = client().top_chart_url(&query, &Locale::es()).unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.filmaffinity.com/es/topgen.php?genre=&fromyear=1990&toyear=1999&country=ES&nodoc=1&notvse=1"
        );
    }

    #[test]
    fn test_base_url_with_path_prefix() {
        let client = Client::builder()
            .base_url("http://localhost:8080/mirror")
            .build()
            .unwrap();
        let url = client.detail_url(1, &Locale::es()).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/mirror/es/film1.html");
    }

    #[tokio::test]
    async fn test_blank_query_is_empty_without_request() {
        // unroutable base: a request would fail
        let client = Client::builder()
            .base_url("http://127.0.0.1:9")
            .build()
            .unwrap();
        let result = client.search_movies("   ", &Locale::es()).await.unwrap();
        assert!(result.is_empty());
    }
}
