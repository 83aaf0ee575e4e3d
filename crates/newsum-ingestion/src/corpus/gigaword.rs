//! English Gigaword (LDC2011T07).
//!
//! Same id grammar and record shape as AQUAINT-2, but the monthly files are
//! gzipped (`afp_eng/afp_eng_200601.gz`) and have no root element.

use std::path::{Path, PathBuf};

use super::aquaint2::ENG_ID_RE;
use super::{capture_id, find_attr_record, Corpus, CorpusKind, DocIdParts, RawRecord};
use crate::markup::{repair_markup, wrap_in_root, XmlElement};

pub struct Gigaword {
    root: PathBuf,
}

impl Gigaword {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Corpus for Gigaword {
    fn kind(&self) -> CorpusKind {
        CorpusKind::Gigaword
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
            .join(format!("{tag}_eng_{}{}.gz", parts.year, parts.month))
    }

    fn prepare_markup(&self, raw: &str) -> String {
        wrap_in_root(&repair_markup(raw))
    }

    fn extract_record<'t>(&self, tree: &'t XmlElement, doc_id: &str) -> Option<RawRecord<'t>> {
        find_attr_record(tree, doc_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_path_is_monthly_gz() {
        let corpus = Gigaword::new("/corpora/LDC/LDC11T07/data");
        let parts = corpus.match_id("AFP_ENG_20060115.0042").unwrap();
        assert_eq!(parts.sequence, "0042");
        assert_eq!(
            corpus.build_path(&parts),
            PathBuf::from("/corpora/LDC/LDC11T07/data/afp_eng/afp_eng_200601.gz")
        );
    }

    #[test]
    fn test_wraps_bare_records() {
        let raw = "<DOC id=\"AFP_ENG_20060115.0042\" type=\"story\">\n<HEADLINE>\nA\n</HEADLINE>\n<TEXT>x</TEXT>\n</DOC>\n\
                   <DOC id=\"AFP_ENG_20060115.0043\" type=\"story\">\n<TEXT>y</TEXT>\n</DOC>\n";
        let corpus = Gigaword::new("/tmp");
        let tree = corpus.parse_tree(raw).unwrap();
        assert_eq!(tree.find_all("DOC").count(), 2);

        let record = corpus.extract_record(&tree, "AFP_ENG_20060115.0043").unwrap();
        assert!(record.headline.is_none());
        assert_eq!(record.text.unwrap().trimmed_text(), "y");
    }
}
