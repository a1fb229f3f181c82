// ABOUTME: HTTP fetching of site pages with size limits, status checks and charset decoding.
// ABOUTME: Reports the post-redirect URL and resolved path so callers can classify the page.

use std::collections::HashMap;

use bytes::Bytes;
use tracing::debug;
use url::Url;

use crate::error::ClientError;

/// Maximum allowed content length (10 MB).
pub const MAX_CONTENT_LENGTH: usize = 10 * 1024 * 1024;

/// Options for fetching a resource.
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    pub headers: HashMap<String, String>,
}

/// Result of a successful fetch operation.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub final_url: String,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl FetchResult {
    /// Path plus query string of the final URL, e.g. `/es/search.php?stype=title`.
    pub fn resolved_path(&self) -> String {
        match Url::parse(&self.final_url) {
            Ok(u) => match u.query() {
                Some(q) => format!("{}?{}", u.path(), q),
                None => u.path().to_string(),
            },
            Err(_) => String::new(),
        }
    }

    /// Decode the body as UTF-8 text, using charset hints from content-type header.
    pub fn text_utf8(&self) -> String {
        decode_body(&self.body, self.content_type.as_deref())
    }
}

/// Decode body bytes to a String using charset from content-type header or detection.
fn decode_body(body: &[u8], content_type: Option<&str>) -> String {
    if let Some(ct) = content_type {
        if let Some(charset) = extract_charset(ct) {
            if let Some(encoding) = encoding_rs::Encoding::for_label(charset.as_bytes()) {
                let (decoded, _, _) = encoding.decode(body);
                return decoded.into_owned();
            }
        }
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(body, true);
    let encoding = detector.guess(None, true);
    let (decoded, _, _) = encoding.decode(body);
    decoded.into_owned()
}

/// Extract charset value from Content-Type header.
fn extract_charset(content_type: &str) -> Option<String> {
    let lower = content_type.to_lowercase();
    for part in lower.split(';') {
        let trimmed = part.trim();
        if let Some(charset) = trimmed.strip_prefix("charset=") {
            let charset = charset.trim_matches('"').trim_matches('\'');
            return Some(charset.to_string());
        }
    }
    None
}

fn request_error(url: &str, op: &str, err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        ClientError::timeout(url, op, Some(anyhow::Error::new(err)))
    } else {
        ClientError::fetch(url, op, Some(anyhow::anyhow!("request failed: {}", err)))
    }
}

/// Issue one GET, following redirects, and return the body of a 2xx response.
///
/// `op` names the calling operation in errors. No retries.
pub async fn fetch(
    client: &reqwest::Client,
    url: &Url,
    opts: &FetchOptions,
    op: &str,
) -> Result<FetchResult, ClientError> {
    let url_str = url.as_str();
    debug!(url = %url_str, op, "fetching page");

    let mut request = client.get(url.clone());
    for (key, value) in &opts.headers {
        request = request.header(key, value);
    }

    let response = request
        .send()
        .await
        .map_err(|e| request_error(url_str, op, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ClientError::fetch(
            url_str,
            op,
            Some(anyhow::anyhow!("HTTP status {}", status.as_u16())),
        ));
    }

    if let Some(len) = response.content_length() {
        if len as usize > MAX_CONTENT_LENGTH {
            return Err(ClientError::fetch(
                url_str,
                op,
                Some(anyhow::anyhow!("content too large")),
            ));
        }
    }

    let final_url = response.url().to_string();
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_lowercase());

    let body = response.bytes().await.map_err(|e| {
        if e.is_timeout() {
            request_error(url_str, op, e)
        } else {
            ClientError::fetch(
                url_str,
                op,
                Some(anyhow::anyhow!("failed to read body: {}", e)),
            )
        }
    })?;

    if body.len() > MAX_CONTENT_LENGTH {
        return Err(ClientError::fetch(
            url_str,
            op,
            Some(anyhow::anyhow!("content too large")),
        ));
    }

    debug!(url = %url_str, final_url = %final_url, status = status.as_u16(), bytes = body.len(), "fetched page");

    Ok(FetchResult {
        final_url,
        content_type,
        body,
    })
}
