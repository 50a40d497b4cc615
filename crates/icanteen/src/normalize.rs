// ABOUTME: Text cleanup for dish descriptions scraped from iCanteen pages.
// ABOUTME: Strips allergen asterisks and normalizes comma spacing and whitespace runs.

use once_cell::sync::Lazy;
use regex::Regex;

static SPACE_BEFORE_COMMA_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+,").unwrap());
static WHITESPACE_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Cleans a raw dish description into a consistent, readable form.
///
/// Removes every `*`, puts exactly one space after each comma and none before it,
/// collapses whitespace runs to a single space and trims the ends. The result is
/// stable under repeated application.
pub fn normalize_description(raw: &str) -> String {
    let text = raw.replace('*', "");
    let text = text.replace(',', ", ");
    let text = SPACE_BEFORE_COMMA_RE.replace_all(&text, ",");
    let text = WHITESPACE_RUN_RE.replace_all(&text, " ");
    text.trim().to_string()
}
