//! Text cleaning for extracted headline and body elements.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::warn;

use crate::markup::XmlElement;

lazy_static! {
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").unwrap();
    static ref QUOTE_RE: Regex = Regex::new(r"(''|``)").unwrap();
}

/// Reduce a body element to plain text.
///
/// Uses the element's own leading text, or the `P` children joined by spaces
/// when the element only wraps paragraphs. Whitespace runs collapse to one
/// space and `''` / ``` `` ``` become `"`. An empty result is logged and
/// returned as is.
pub fn clean_text(text_el: Option<&XmlElement>, doc_id: &str) -> String {
    let mut text = text_el.map(|el| el.trimmed_text().to_string()).unwrap_or_default();

    if text.is_empty() {
        if let Some(el) = text_el {
            text = el
                .find_all("P")
                .map(|p| p.trimmed_text())
                .filter(|p| !p.is_empty())
                .collect::<Vec<_>>()
                .join(" ");
        }
    }

    let text = normalise(&text);
    if text.is_empty() {
        warn!(doc_id, "No text found for document");
    }
    text
}

/// Headline text, or an empty string when the record has none.
pub fn clean_headline(headline_el: Option<&XmlElement>) -> String {
    headline_el.map(|el| collapse_whitespace(el.trimmed_text())).unwrap_or_default()
}

pub fn normalise(text: &str) -> String {
    let collapsed = collapse_whitespace(text);
    QUOTE_RE.replace_all(&collapsed, "\"").into_owned()
}

fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RE.replace_all(text, " ").trim().to_string()
}
