//! AQUAINT (LDC2002T31).
//!
//! Ids look like `NYT19980903.0137`. Files are one per source per day:
//!   /corpora/LDC/LDC02T31/nyt/1998/19980903_NYT
//!   /corpora/LDC/LDC02T31/xie/1998/19980903_XIN_ENG
//!
//! A file is a bare run of `<DOC>` records, each holding a `DOCNO` child and a
//! `BODY` that wraps `HEADLINE` and `TEXT`.

use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use regex::Regex;

use super::{capture_id, Corpus, CorpusKind, DocIdParts, RawRecord};
use crate::markup::{repair_markup, wrap_in_root, XmlElement};

lazy_static! {
    static ref AQUAINT_ID_RE: Regex =
        Regex::new(r"^([A-Z]{3})([0-9]{4})([0-9]{2})([0-9]{2})\.([0-9]+)$").unwrap();
}

pub struct Aquaint {
    root: PathBuf,
}

impl Aquaint {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

/// File-name form of a source tag. The directory keeps the original tag.
pub fn file_tag(tag: &str) -> String {
    // Xinhua's directory is `xie` but its files say XIN
    let mut renamed = if tag == "XIE" { "XIN".to_string() } else { tag.to_string() };
    if tag != "NYT" {
        renamed.push_str("_ENG");
    }
    renamed
}

impl Corpus for Aquaint {
    fn kind(&self) -> CorpusKind {
        CorpusKind::Aquaint
    }

    fn root(&self) -> &Path {
        &self.root
    }

    fn match_id(&self, doc_id: &str) -> Option<DocIdParts> {
        capture_id(&AQUAINT_ID_RE, doc_id)
    }

    fn build_path(&self, parts: &DocIdParts) -> PathBuf {
        self.root
            .join(parts.tag.to_lowercase())
            .join(&parts.year)
            .join(format!(
                "{}{}{}_{}",
                parts.year,
                parts.month,
                parts.day,
                file_tag(&parts.tag)
            ))
    }

    fn prepare_markup(&self, raw: &str) -> String {
        wrap_in_root(&repair_markup(raw))
    }

    fn extract_record<'t>(&self, tree: &'t XmlElement, doc_id: &str) -> Option<RawRecord<'t>> {
        let doc = tree
            .find_all("DOC")
            .find(|doc| doc.find("DOCNO").map(|n| n.trimmed_text()) == Some(doc_id))?;

        let body = doc.find("BODY");
        Some(RawRecord {
            headline: body.and_then(|b| b.find("HEADLINE")),
            text: body.and_then(|b| b.find("TEXT")),
        })
    }
}
