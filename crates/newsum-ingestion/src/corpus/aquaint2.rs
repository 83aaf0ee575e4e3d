//! AQUAINT-2 (LDC2008T25).
//!
//! Ids look like `APW_ENG_20050110.0001`; one uncompressed file per source per
//! month: `apw_eng/apw_eng_200501.xml`. The file already has a `DOCSTREAM`
//! root, so only entity/fragment repair is applied.

use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use regex::Regex;

use super::{capture_id, find_attr_record, Corpus, CorpusKind, DocIdParts, RawRecord};
use crate::markup::XmlElement;

lazy_static! {
    pub(crate) static ref ENG_ID_RE: Regex =
        Regex::new(r"^([A-Z]{3})_ENG_([0-9]{4})([0-9]{2})([0-9]{2})\.([0-9]+)$").unwrap();
}

pub struct Aquaint2 {
    root: PathBuf,
}

impl Aquaint2 {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Corpus for Aquaint2 {
    fn kind(&self) -> CorpusKind {
        CorpusKind::Aquaint2
    }

    fn root(&self) -> &Path {
        &self.root
    }

    fn match_id(&self, doc_id: &str) -> Option<DocIdParts> {
        capture_id(&ENG_ID_RE, doc_id)
    }

    fn build_path(&self, parts: &DocIdParts) -> PathBuf {
        let tag = parts.tag.to_lowercase();
        self.root
            .join(format!("{tag}_eng"))
            .join(format!("{tag}_eng_{}{}.xml", parts.year, parts.month))
    }

    fn extract_record<'t>(&self, tree: &'t XmlElement, doc_id: &str) -> Option<RawRecord<'t>> {
        find_attr_record(tree, doc_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_path_is_monthly_xml() {
        let corpus = Aquaint2::new("/corpora/LDC/LDC08T25/data");
        let parts = corpus.match_id("APW_ENG_20050110.0001").unwrap();
        assert_eq!(
            corpus.build_path(&parts),
            PathBuf::from("/corpora/LDC/LDC08T25/data/apw_eng/apw_eng_200501.xml")
        );
    }

    #[test]
    fn test_parses_stream_without_wrapping() {
        let raw = r#"<?xml version="1.0" encoding="UTF-8"?>
<DOCSTREAM>
<DOC id="APW_ENG_20050110.0001" type="story">
<HEADLINE>Storm hits coast</HEADLINE>
<TEXT><P>Winds rose &amp; fell.</P></TEXT>
</DOC>
</DOCSTREAM>"#;
        let corpus = Aquaint2::new("/tmp");
        let tree = corpus.parse_tree(raw).unwrap();
        assert_eq!(tree.name, "DOCSTREAM");

        let record = corpus.extract_record(&tree, "APW_ENG_20050110.0001").unwrap();
        assert_eq!(record.headline.unwrap().trimmed_text(), "Storm hits coast");
        let para = record.text.unwrap().find("P").unwrap();
        assert_eq!(para.trimmed_text(), "Winds rose  fell.");
    }
}
