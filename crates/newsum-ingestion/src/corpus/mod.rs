//! Corpus layouts and document id resolution.
//!
//! Each supported archive (AQUAINT, AQUAINT-2, GIGAWORD) is one `Corpus`
//! implementation: it knows its id grammar, how an id maps onto a file under
//! its root, how that file's markup must be prepared before parsing, and
//! where a record's id, headline and body live in the parsed tree.
//!
//! Resolution order is fixed: AQUAINT, AQUAINT-2, GIGAWORD. AQUAINT-2 and
//! GIGAWORD share an id grammar, so a matching id only resolves to a corpus
//! whose file actually exists on disk.

pub mod aquaint;
pub mod aquaint2;
pub mod gigaword;
pub mod reader;

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::markup::{parse_tree, repair_markup, TreeError, XmlElement};

pub use aquaint::Aquaint;
pub use aquaint2::Aquaint2;
pub use gigaword::Gigaword;
pub use reader::read_tree;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorpusKind {
    Aquaint,
    Aquaint2,
    Gigaword,
}

impl CorpusKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CorpusKind::Aquaint  => "aquaint",
            CorpusKind::Aquaint2 => "aquaint2",
            CorpusKind::Gigaword => "gigaword",
        }
    }
}

impl std::fmt::Display for CorpusKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields captured from a document id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocIdParts {
    pub tag: String,
    pub year: String,
    pub month: String,
    pub day: String,
    pub sequence: String,
    pub date: NaiveDate,
}

/// Where a document id lives on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLocation {
    pub path: PathBuf,
    pub date: NaiveDate,
    pub kind: CorpusKind,
}

/// Headline and body elements of one record inside a parsed corpus file.
#[derive(Debug, Clone, Copy)]
pub struct RawRecord<'t> {
    pub headline: Option<&'t XmlElement>,
    pub text: Option<&'t XmlElement>,
}

pub trait Corpus: Send + Sync {
    fn kind(&self) -> CorpusKind;

    fn root(&self) -> &Path;

    /// Match `doc_id` against this corpus's id grammar.
    fn match_id(&self, doc_id: &str) -> Option<DocIdParts>;

    /// Absolute path of the file that would hold the document.
    fn build_path(&self, parts: &DocIdParts) -> PathBuf;

    /// Repair raw file contents into parseable markup.
    fn prepare_markup(&self, raw: &str) -> String {
        repair_markup(raw)
    }

    fn parse_tree(&self, raw: &str) -> Result<XmlElement, TreeError> {
        parse_tree(&self.prepare_markup(raw))
    }

    /// Find the record whose id equals `doc_id`.
    fn extract_record<'t>(&self, tree: &'t XmlElement, doc_id: &str) -> Option<RawRecord<'t>>;
}

/// Filesystem roots of the three corpora.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusRoots {
    #[serde(default = "default_aquaint_root")]
    pub aquaint_root: PathBuf,
    #[serde(default = "default_aquaint2_root")]
    pub aquaint2_root: PathBuf,
    #[serde(default = "default_gigaword_root")]
    pub gigaword_root: PathBuf,
}

fn default_aquaint_root()  -> PathBuf { PathBuf::from("/corpora/LDC/LDC02T31") }
fn default_aquaint2_root() -> PathBuf { PathBuf::from("/corpora/LDC/LDC08T25/data") }
fn default_gigaword_root() -> PathBuf { PathBuf::from("/corpora/LDC/LDC11T07/data") }

impl Default for CorpusRoots {
    fn default() -> Self {
        Self {
            aquaint_root: default_aquaint_root(),
            aquaint2_root: default_aquaint2_root(),
            gigaword_root: default_gigaword_root(),
        }
    }
}

/// The ordered set of corpora an id is resolved against.
pub struct CorpusRegistry {
    corpora: Vec<Box<dyn Corpus>>,
}

impl CorpusRegistry {
    pub fn from_roots(roots: &CorpusRoots) -> Self {
        Self::with_corpora(vec![
            Box::new(Aquaint::new(&roots.aquaint_root)),
            Box::new(Aquaint2::new(&roots.aquaint2_root)),
            Box::new(Gigaword::new(&roots.gigaword_root)),
        ])
    }

    pub fn with_corpora(corpora: Vec<Box<dyn Corpus>>) -> Self {
        Self { corpora }
    }

    pub fn corpora(&self) -> impl Iterator<Item = &dyn Corpus> {
        self.corpora.iter().map(|c| c.as_ref())
    }

    /// Resolve a document id to an existing file, or `None`.
    pub fn resolve(&self, doc_id: &str) -> Option<ResolvedLocation> {
        self.resolve_with_corpus(doc_id).map(|(_, loc)| loc)
    }

    pub(crate) fn resolve_with_corpus(&self, doc_id: &str) -> Option<(&dyn Corpus, ResolvedLocation)> {
        let mut sequence = None;
        for corpus in self.corpora() {
            let Some(parts) = corpus.match_id(doc_id) else {
                continue;
            };
            let path = corpus.build_path(&parts);
            if path.exists() {
                debug!(doc_id, corpus = %corpus.kind(), path = %path.display(), "Resolved document id");
                let location = ResolvedLocation { path, date: parts.date, kind: corpus.kind() };
                return Some((corpus, location));
            }
            debug!(
                doc_id,
                corpus = %corpus.kind(),
                root = %corpus.root().display(),
                path = %path.display(),
                "Candidate path does not exist"
            );
            sequence = Some(parts.sequence);
        }

        warn!(
            doc_id,
            sequence = sequence.as_deref().unwrap_or(""),
            "Unable to find path for document"
        );
        None
    }
}

/// Shared capture logic for the (tag, year, month, day, sequence) grammars.
/// Impossible calendar dates do not match.
pub(crate) fn capture_id(re: &Regex, doc_id: &str) -> Option<DocIdParts> {
    let caps = re.captures(doc_id)?;
    let year = caps.get(2)?.as_str();
    let month = caps.get(3)?.as_str();
    let day = caps.get(4)?.as_str();
    let date = NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)?;

    Some(DocIdParts {
        tag: caps.get(1)?.as_str().to_string(),
        year: year.to_string(),
        month: month.to_string(),
        day: day.to_string(),
        sequence: caps.get(5)?.as_str().to_string(),
        date,
    })
}

/// Record lookup for layouts that put the id in a `DOC` attribute and the
/// headline/text directly under it (AQUAINT-2, GIGAWORD).
pub(crate) fn find_attr_record<'t>(tree: &'t XmlElement, doc_id: &str) -> Option<RawRecord<'t>> {
    tree.find_all("DOC")
        .find(|doc| doc.attr("id") == Some(doc_id))
        .map(|doc| RawRecord {
            headline: doc.find("HEADLINE"),
            text: doc.find("TEXT"),
        })
}
