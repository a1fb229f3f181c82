// ABOUTME: Selector-based text and attribute primitives shared by every page extractor.
// ABOUTME: Whitespace is normalized; required variants turn a missing match into an Extract error.

//! Field extraction primitives.
//!
//! Every extractor reads fields through these helpers, scoped to an element
//! (a card, a chart row, or the document root).
//!
//! Key behaviors:
//! - Text is the concatenation of all descendant text nodes, whitespace collapsed and trimmed.
//! - Empty strings are treated as no match.
//! - `all_text` keeps document order and drops empty entries.

use scraper::{ElementRef, Selector};

use crate::error::ClientError;

/// Collapses runs of whitespace into single spaces and trims.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalized text of an element and all its descendants.
pub fn element_text(el: ElementRef<'_>) -> String {
    normalize_whitespace(&el.text().collect::<String>())
}

/// Text of the first descendant of `scope` matching `selector`.
pub fn first_text(scope: ElementRef<'_>, selector: &Selector) -> Option<String> {
    scope
        .select(selector)
        .next()
        .map(element_text)
        .filter(|t| !t.is_empty())
}

/// Trimmed attribute value of the first descendant matching `selector`.
pub fn first_attr(scope: ElementRef<'_>, selector: &Selector, attr: &str) -> Option<String> {
    scope
        .select(selector)
        .next()
        .and_then(|el| el.value().attr(attr))
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Text of every descendant matching `selector`, in document order.
pub fn all_text(scope: ElementRef<'_>, selector: &Selector) -> Vec<String> {
    scope
        .select(selector)
        .map(element_text)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Like [`first_text`], but a missing match is an error naming `field`.
pub fn require_text(
    scope: ElementRef<'_>,
    selector: &Selector,
    op: &str,
    field: &str,
) -> Result<String, ClientError> {
    first_text(scope, selector).ok_or_else(|| missing(op, field))
}

/// Like [`first_attr`], but a missing match is an error naming `field`.
pub fn require_attr(
    scope: ElementRef<'_>,
    selector: &Selector,
    attr: &str,
    op: &str,
    field: &str,
) -> Result<String, ClientError> {
    first_attr(scope, selector, attr).ok_or_else(|| missing(op, field))
}

/// Trimmed attribute of `el` itself, required.
pub fn own_attr(el: ElementRef<'_>, attr: &str, op: &str, field: &str) -> Result<String, ClientError> {
    el.value()
        .attr(attr)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| missing(op, field))
}

/// Parse a site-assigned movie id.
pub fn parse_id(raw: &str, op: &str) -> Result<u64, ClientError> {
    raw.trim().parse::<u64>().map_err(|e| {
        ClientError::extract(
            "",
            op,
            Some(anyhow::anyhow!("invalid movie id {:?}: {}", raw, e)),
        )
    })
}

fn missing(op: &str, field: &str) -> ClientError {
    ClientError::extract("", op, Some(anyhow::anyhow!("missing required field `{}`", field)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    const SAMPLE_HTML: &str = r#"
        <html>
        <body>
            <div class="card" data-movie-id=" 42 ">
                <span class="title">  The   Matrix </span>
                <img class="flag" src="/flags/US.jpg" alt=" Estados Unidos ">
                <ul class="names">
                    <li><a>Keanu Reeves</a></li>
                    <li><a> </a></li>
                    <li><a>Carrie-Anne <b>Moss</b></a></li>
                </ul>
                <p class="award"><a>1999</a>: Oscar: Mejor montaje.</p>
            </div>
        </body>
        </html>
    "#;

    fn sel(css: &str) -> Selector {
        Selector::parse(css).unwrap()
    }

    #[test]
    fn test_first_text_normalizes_whitespace() {
        let doc = Html::parse_document(SAMPLE_HTML);
        let got = first_text(doc.root_element(), &sel(".title"));
        assert_eq!(got.as_deref(), Some("The Matrix"));
    }

    #[test]
    fn test_first_text_concatenates_inline_nodes() {
        let doc = Html::parse_document(SAMPLE_HTML);
        let got = first_text(doc.root_element(), &sel(".award"));
        assert_eq!(got.as_deref(), Some("1999: Oscar: Mejor montaje."));
    }

    #[test]
    fn test_first_attr_trims() {
        let doc = Html::parse_document(SAMPLE_HTML);
        let root = doc.root_element();
        assert_eq!(first_attr(root, &sel(".flag"), "alt").as_deref(), Some("Estados Unidos"));
        assert_eq!(first_attr(root, &sel(".card"), "data-movie-id").as_deref(), Some("42"));
        assert_eq!(first_attr(root, &sel(".flag"), "title"), None);
    }

    #[test]
    fn test_all_text_keeps_order_and_drops_empty() {
        let doc = Html::parse_document(SAMPLE_HTML);
        let got = all_text(doc.root_element(), &sel(".names a"));
        assert_eq!(got, vec!["Keanu Reeves", "Carrie-Anne Moss"]);
    }

    #[test]
    fn test_require_text_missing_is_extract_error() {
        let doc = Html::parse_document(SAMPLE_HTML);
        let err = require_text(doc.root_element(), &sel(".nope"), "ExtractDetail", "title")
            .unwrap_err();
        assert!(err.is_extract());
        assert!(err.to_string().contains("title"));
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("809297", "X").unwrap(), 809297);
        assert!(parse_id("abc", "X").unwrap_err().is_extract());
    }
}
