//! Topic aggregation.
//!
//! Orchestrates the full flow for a topic file:
//!   1. Restore from checkpoint when one exists
//!   2. Parse the topic file (topic id, title, docsetA document ids)
//!   3. For every referenced id, in order: resolve -> read -> extract -> segment
//!   4. Write the checkpoint
//!
//! Per-document failures are logged and skipped; a topic only ever loses the
//! documents that failed.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use newsum_common::{NewsumError, Result};
use tracing::{debug, info, instrument, warn};

use crate::checkpoint::{load_checkpoint, save_checkpoint};
use crate::corpus::{read_tree, CorpusRegistry};
use crate::extract::{clean_headline, clean_text};
use crate::markup::{parse_tree, XmlElement};
use crate::models::{Document, Topic};
use crate::segment::SentenceSplitter;

/// Parsed corpus files, keyed by path, reused across ids of one topic.
pub type TreeCache = HashMap<PathBuf, XmlElement>;

/// What happened to one requested document id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    /// No corpus produced an existing file for the id.
    Unresolved,
    /// The file parsed but holds no record with the id.
    NotInTree,
}

/// One `<topic>` entry of the topic file.
#[derive(Debug, Clone, PartialEq)]
pub struct TopicSpec {
    pub id: String,
    pub title: String,
    pub doc_ids: Vec<String>,
}

/// Split an external topic id into (all but the last char, last char).
pub fn split_topic_id(id: &str) -> Result<(String, String)> {
    let mut chars = id.chars();
    let last = chars
        .next_back()
        .ok_or_else(|| NewsumError::TopicFile("topic with an empty id".to_string()))?;
    Ok((chars.as_str().to_string(), last.to_string()))
}

/// Parse the topic file into topic specs, in document order.
pub fn parse_topic_file(path: &Path) -> Result<Vec<TopicSpec>> {
    let contents = fs::read_to_string(path).map_err(|e| NewsumError::io(path, e))?;
    let root = parse_tree(&contents)
        .map_err(|e| NewsumError::TopicFile(format!("{}: {e}", path.display())))?;

    let mut specs = Vec::new();
    for topic in root.find_all("topic") {
        let id = topic
            .attr("id")
            .ok_or_else(|| NewsumError::TopicFile("topic element without an id attribute".to_string()))?
            .trim()
            .to_string();
        let title = topic.find("title").map(|t| t.trimmed_text().to_string()).unwrap_or_default();

        let mut doc_ids = Vec::new();
        if let Some(docset) = topic.find("docsetA") {
            for doc in &docset.children {
                match doc.attr("id") {
                    Some(doc_id) => doc_ids.push(doc_id.trim().to_string()),
                    None => warn!(topic = %id, element = %doc.name, "docsetA entry without an id"),
                }
            }
        }

        specs.push(TopicSpec { id, title, doc_ids });
    }
    Ok(specs)
}

pub struct TopicLoader {
    registry: CorpusRegistry,
    splitter: Box<dyn SentenceSplitter>,
}

impl TopicLoader {
    pub fn new(registry: CorpusRegistry, splitter: Box<dyn SentenceSplitter>) -> Self {
        Self { registry, splitter }
    }

    /// Load every topic of `topic_file`, restoring from / saving to
    /// `checkpoint` when given.
    #[instrument(skip(self, topic_file), fields(topic_file = %topic_file.display()))]
    pub fn load_topics(&self, topic_file: &Path, checkpoint: Option<&Path>) -> Result<Vec<Topic>> {
        if let Some(path) = checkpoint {
            if let Some(topics) = load_checkpoint(path)? {
                info!(path = %path.display(), n_topics = topics.len(), "Using data checkpoint");
                return Ok(topics);
            }
            debug!(path = %path.display(), "No checkpoint yet; ingesting from corpora");
        }

        let specs = parse_topic_file(topic_file)?;
        let mut topics = Vec::with_capacity(specs.len());
        for spec in &specs {
            topics.push(self.load_topic(spec)?);
        }

        if let Some(path) = checkpoint {
            save_checkpoint(path, &topics)?;
            info!(path = %path.display(), n_topics = topics.len(), "Checkpoint written");
        }

        Ok(topics)
    }

    /// Load one topic; failing documents are skipped.
    pub fn load_topic(&self, spec: &TopicSpec) -> Result<Topic> {
        let t0 = Instant::now();
        let (id_1, id_2) = split_topic_id(&spec.id)?;
        info!(topic = %spec.id, title = %spec.title, n_docs = spec.doc_ids.len(), "Loading topic");

        let mut topic = Topic::new(id_1, id_2, spec.title.clone());
        let mut cache = TreeCache::new();

        for doc_id in &spec.doc_ids {
            match self.load_doc(&mut topic, doc_id, &mut cache) {
                Ok(LoadOutcome::Loaded) => {}
                Ok(outcome) => debug!(topic = %spec.id, doc_id = %doc_id, ?outcome, "Document skipped"),
                Err(e) => warn!(topic = %spec.id, doc_id = %doc_id, "Skipping document: {}", e),
            }
        }

        info!(
            topic = %spec.id,
            loaded = topic.documents.len(),
            requested = spec.doc_ids.len(),
            sentences = topic.sentence_count(),
            "Topic took {:.2} seconds",
            t0.elapsed().as_secs_f64()
        );
        Ok(topic)
    }

    /// Resolve, read, extract and segment one document into `topic`.
    ///
    /// Only read/parse failures are errors; unresolved ids and ids missing
    /// from their file are reported through `LoadOutcome`.
    pub fn load_doc(&self, topic: &mut Topic, doc_id: &str, cache: &mut TreeCache) -> Result<LoadOutcome> {
        let Some((corpus, location)) = self.registry.resolve_with_corpus(doc_id) else {
            return Ok(LoadOutcome::Unresolved);
        };

        let tree = match cache.entry(location.path.clone()) {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(e) => e.insert(read_tree(corpus, &location, doc_id)?),
        };

        let Some(record) = corpus.extract_record(tree, doc_id) else {
            debug!(doc_id, path = %location.path.display(), "Document id not found in corpus file");
            return Ok(LoadOutcome::NotInTree);
        };

        let headline = clean_headline(record.headline);
        let text = clean_text(record.text, doc_id);
        topic.documents.push(Document::new(
            doc_id,
            location.date,
            headline,
            text,
            self.splitter.as_ref(),
        ));
        Ok(LoadOutcome::Loaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::CorpusRoots;
    use crate::segment::SegmentationStrategy;
    use tempfile::TempDir;

    const TOPICS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<TACtaskdata>
<topic id = "D1001A" category = "1">
<title> Columbine Massacre </title>
<docsetA id = "D1001A-A">
<doc id = "APW_ENG_20050110.0001" />
<doc id = "NYT19990420.0001" />
<note />
</docsetA>
</topic>
<topic id="D1002B">
<title>Empty</title>
</topic>
</TACtaskdata>"#;

    #[test]
    fn test_split_topic_id() {
        assert_eq!(split_topic_id("D1001A").unwrap(), ("D1001".to_string(), "A".to_string()));
        assert_eq!(split_topic_id("X").unwrap(), (String::new(), "X".to_string()));
        assert!(split_topic_id("").is_err());
    }

    #[test]
    fn test_parse_topic_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("topics.xml");
        fs::write(&path, TOPICS).unwrap();

        let specs = parse_topic_file(&path).unwrap();
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].id, "D1001A");
        assert_eq!(specs[0].title, "Columbine Massacre");
        assert_eq!(specs[0].doc_ids, vec!["APW_ENG_20050110.0001", "NYT19990420.0001"]);
        assert!(specs[1].doc_ids.is_empty());
    }

    #[test]
    fn test_not_in_tree_is_distinguishable() {
        let dir = TempDir::new().unwrap();
        let roots = CorpusRoots {
            aquaint_root: dir.path().join("a"),
            aquaint2_root: dir.path().join("a2"),
            gigaword_root: dir.path().join("g"),
        };
        let file = roots.aquaint2_root.join("apw_eng/apw_eng_200501.xml");
        fs::create_dir_all(file.parent().unwrap()).unwrap();
        fs::write(
            &file,
            "<DOCSTREAM><DOC id=\"APW_ENG_20050110.0001\"><TEXT>Only one.</TEXT></DOC></DOCSTREAM>",
        )
        .unwrap();

        let loader = TopicLoader::new(
            CorpusRegistry::from_roots(&roots),
            SegmentationStrategy::RuleBased.splitter(),
        );
        let mut topic = Topic::new("D1", "A", "t");
        let mut cache = TreeCache::new();

        let missing = loader.load_doc(&mut topic, "APW_ENG_20050110.0002", &mut cache).unwrap();
        assert_eq!(missing, LoadOutcome::NotInTree);
        let found = loader.load_doc(&mut topic, "APW_ENG_20050110.0001", &mut cache).unwrap();
        assert_eq!(found, LoadOutcome::Loaded);
        let unresolved = loader.load_doc(&mut topic, "APW_ENG_20050210.0001", &mut cache).unwrap();
        assert_eq!(unresolved, LoadOutcome::Unresolved);

        assert_eq!(topic.documents.len(), 1);
        assert_eq!(cache.len(), 1);
    }
}
