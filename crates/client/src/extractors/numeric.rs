// ABOUTME: Locale-aware numeric parsing for values scraped from Spanish-formatted pages.
// ABOUTME: Handles decimal commas ("7,5"), dot thousands separators ("1.234") and leading integer tokens.

//! Locale numeric parsing.
//!
//! The site formats numbers the Spanish way: a comma as decimal separator and
//! a dot to group thousands. Values usually carry trailing noise ("125 min.",
//! "1.234 votos"), so every parser reads the leading numeric token and ignores
//! the rest. Failure is `None`; callers pick the default.

use once_cell::sync::Lazy;
use regex::Regex;

static LEADING_DECIMAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)").unwrap());

static LEADING_INT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+").unwrap());

/// Parse a decimal that may use a comma as decimal separator.
///
/// `"7,5"` -> `Some(7.5)`, `"8"` -> `Some(8.0)`, `"--"` -> `None`.
pub fn parse_decimal(text: &str) -> Option<f64> {
    let normalized = text.trim().replacen(',', ".", 1);
    let token = LEADING_DECIMAL_RE.find(&normalized)?;
    token.as_str().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a non-negative integer grouped with dots as thousands separators.
///
/// `"1.234"` -> `Some(1234)`, `"12.345.678"` -> `Some(12345678)`.
pub fn parse_grouped_int(text: &str) -> Option<u32> {
    let stripped: String = text.trim().chars().filter(|c| *c != '.').collect();
    leading_digits(&stripped)
}

/// Parse the leading integer of the first whitespace-separated token.
///
/// `"125 min."` -> `Some(125)`.
pub fn leading_int(text: &str) -> Option<u32> {
    text.split_whitespace().next().and_then(leading_digits)
}

fn leading_digits(text: &str) -> Option<u32> {
    LEADING_INT_RE.find(text)?.as_str().parse().ok()
}
