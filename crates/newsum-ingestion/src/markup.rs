//! Markup repair and a small element tree built from quick-xml events.
//!
//! The LDC newswire files are not well-formed XML: they contain undeclared
//! entities, stray `<5`-style fragments inside running text, and (for two of
//! the three corpora) no single root element. `repair_markup` removes the
//! fragments that would abort parsing; `parse_tree` then builds an
//! `XmlElement` tree that the corpus extractors walk.

use lazy_static::lazy_static;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use regex::Regex;
use thiserror::Error;

lazy_static! {
    /// Entity escapes and `<digit` / `>digit` corruption fragments.
    static ref CLEAN_RE: Regex = Regex::new(r"&#?[A-Za-z0-9]+;|<[0-9]|>[0-9]").unwrap();
}

/// Name of the synthetic element wrapped around root-less corpus files.
pub const SYNTHETIC_ROOT: &str = "root";

#[derive(Debug, Error, Clone, PartialEq)]
#[error("{0}")]
pub struct TreeError(pub String);

/// Strip the escape/tag artifacts that break structural parsing.
pub fn repair_markup(raw: &str) -> String {
    CLEAN_RE.replace_all(raw, "").into_owned()
}

/// Wrap a bare sequence of sibling records in a synthetic root element.
pub fn wrap_in_root(markup: &str) -> String {
    format!("<{SYNTHETIC_ROOT}>{markup}</{SYNTHETIC_ROOT}>")
}

/// A parsed element. `text` holds only the character data that appears
/// before the first child element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub text: String,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First direct child with the given name.
    pub fn find(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All direct children with the given name, in document order.
    pub fn find_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    pub fn trimmed_text(&self) -> &str {
        self.text.trim()
    }
}

/// Parse markup into an element tree.
///
/// Mismatched or unclosed tags, multiple top-level elements and empty input
/// are errors. Declarations, doctypes, comments and processing instructions
/// are skipped.
pub fn parse_tree(xml: &str) -> Result<XmlElement, TreeError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().check_end_names = true;

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => stack.push(element_from_start(e)?),
            Ok(Event::Empty(ref e)) => {
                let el = element_from_start(e)?;
                attach(&mut stack, &mut root, el)?;
            }
            Ok(Event::End(_)) => {
                let el = stack
                    .pop()
                    .ok_or_else(|| TreeError("closing tag without an open element".to_string()))?;
                attach(&mut stack, &mut root, el)?;
            }
            Ok(Event::Text(ref t)) => {
                let text = t
                    .unescape()
                    .map(|s| s.into_owned())
                    .unwrap_or_else(|_| String::from_utf8_lossy(t).into_owned());
                push_text(&mut stack, &text);
            }
            Ok(Event::CData(ref c)) => {
                push_text(&mut stack, &String::from_utf8_lossy(c));
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(TreeError(format!(
                    "at byte {}: {e}",
                    reader.buffer_position()
                )))
            }
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(TreeError(format!("unclosed element <{}>", open.name)));
    }
    root.ok_or_else(|| TreeError("no root element".to_string()))
}

fn element_from_start(e: &BytesStart) -> Result<XmlElement, TreeError> {
    let mut el = XmlElement::new(String::from_utf8_lossy(e.name().as_ref()));
    for attr in e.attributes().with_checks(false) {
        let attr = attr.map_err(|err| TreeError(format!("bad attribute on <{}>: {err}", el.name)))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map(|v| v.into_owned())
            .unwrap_or_else(|_| String::from_utf8_lossy(&attr.value).into_owned());
        el.attributes.push((key, value));
    }
    Ok(el)
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    el: XmlElement,
) -> Result<(), TreeError> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(el);
            Ok(())
        }
        None if root.is_none() => {
            *root = Some(el);
            Ok(())
        }
        None => Err(TreeError(format!(
            "second top-level element <{}> after the root",
            el.name
        ))),
    }
}

fn push_text(stack: &mut [XmlElement], text: &str) {
    if let Some(current) = stack.last_mut() {
        // tail text after a child is not part of `text`
        if current.children.is_empty() {
            current.text.push_str(text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repair_strips_entities_and_digit_fragments() {
        let raw = "<P>Profits rose &amp; fell by <5 percent &#233;</P>";
        assert_eq!(repair_markup(raw), "<P>Profits rose  fell by  percent </P>");
    }

    #[test]
    fn test_unrepaired_digit_fragment_fails_to_parse() {
        let raw = "<TEXT>rates <5 percent</TEXT>";
        assert!(parse_tree(raw).is_err());
        assert!(parse_tree(&repair_markup(raw)).is_ok());
    }

    #[test]
    fn test_parse_nested_tree_keeps_leading_text_only() {
        let xml = r#"<DOC id="X1"><TEXT>
lead <P>first</P> tail <P>second</P></TEXT></DOC>"#;
        let tree = parse_tree(xml).unwrap();
        assert_eq!(tree.name, "DOC");
        assert_eq!(tree.attr("id"), Some("X1"));
        let text = tree.find("TEXT").unwrap();
        assert_eq!(text.trimmed_text(), "lead");
        let paras: Vec<_> = text.find_all("P").map(|p| p.trimmed_text()).collect();
        assert_eq!(paras, vec!["first", "second"]);
    }

    #[test]
    fn test_bare_records_need_synthetic_root() {
        let bare = "<DOC><DOCNO>A</DOCNO></DOC>\n<DOC><DOCNO>B</DOCNO></DOC>";
        assert!(parse_tree(bare).is_err());

        let tree = parse_tree(&wrap_in_root(bare)).unwrap();
        assert_eq!(tree.name, SYNTHETIC_ROOT);
        assert_eq!(tree.find_all("DOC").count(), 2);
    }

    #[test]
    fn test_mismatched_and_unclosed_tags_are_errors() {
        assert!(parse_tree("<A><B></A></B>").is_err());
        let err = parse_tree("<A><B>text</B>").unwrap_err();
        assert!(err.0.contains("unclosed"), "{err}");
        assert!(parse_tree("   ").is_err());
    }

    #[test]
    fn test_declaration_and_empty_elements() {
        let xml = "<?xml version=\"1.0\"?>\n<topics><doc id=\"D1\"/><doc id=\"D2\"/></topics>";
        let tree = parse_tree(xml).unwrap();
        let ids: Vec<_> = tree.find_all("doc").filter_map(|d| d.attr("id")).collect();
        assert_eq!(ids, vec!["D1", "D2"]);
    }
}
