//! Checkpoint store for ingested topics.
//!
//! The checkpoint is a versioned JSON document that mirrors the topic /
//! document / sentence model field by field. Sentence annotations are not
//! part of the schema and are lost on restore.

use std::fs;
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use newsum_common::{NewsumError, Result};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::models::{Document, Sentence, Topic};

pub const CHECKPOINT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckpointFile {
    pub version: u32,
    pub created_at: DateTime<Utc>,
    pub topics: Vec<TopicRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicRecord {
    pub id_1: String,
    pub id_2: String,
    pub title: String,
    pub documents: Vec<DocumentRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: String,
    pub headline: String,
    pub date: NaiveDate,
    pub text: String,
    pub sentences: Vec<SentenceRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceRecord {
    pub text: String,
    pub doc_headline: String,
    pub doc_date: NaiveDate,
}

impl From<&Sentence> for SentenceRecord {
    fn from(s: &Sentence) -> Self {
        Self {
            text: s.text.clone(),
            doc_headline: s.doc_headline.clone(),
            doc_date: s.doc_date,
        }
    }
}

impl From<SentenceRecord> for Sentence {
    fn from(r: SentenceRecord) -> Self {
        Sentence::new(r.text, r.doc_headline, r.doc_date)
    }
}

impl From<&Document> for DocumentRecord {
    fn from(d: &Document) -> Self {
        Self {
            id: d.id().to_string(),
            headline: d.headline().to_string(),
            date: d.date(),
            text: d.text().to_string(),
            sentences: d.sentences().iter().map(SentenceRecord::from).collect(),
        }
    }
}

impl From<DocumentRecord> for Document {
    fn from(r: DocumentRecord) -> Self {
        Document::from_parts(
            r.id,
            r.headline,
            r.date,
            r.text,
            r.sentences.into_iter().map(Sentence::from).collect(),
        )
    }
}

impl From<&Topic> for TopicRecord {
    fn from(t: &Topic) -> Self {
        Self {
            id_1: t.id_1.clone(),
            id_2: t.id_2.clone(),
            title: t.title.clone(),
            documents: t.documents.iter().map(DocumentRecord::from).collect(),
        }
    }
}

impl From<TopicRecord> for Topic {
    fn from(r: TopicRecord) -> Self {
        let mut topic = Topic::new(r.id_1, r.id_2, r.title);
        topic.documents = r.documents.into_iter().map(Document::from).collect();
        topic
    }
}

/// Write `topics` to `path` atomically (temp file in the same directory,
/// then rename).
pub fn save_checkpoint(path: &Path, topics: &[Topic]) -> Result<()> {
    let file = CheckpointFile {
        version: CHECKPOINT_VERSION,
        created_at: Utc::now(),
        topics: topics.iter().map(TopicRecord::from).collect(),
    };

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| NewsumError::io(dir, e))?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| NewsumError::io(dir, e))?;
    serde_json::to_writer(&mut tmp, &file)?;
    tmp.flush().map_err(|e| NewsumError::io(tmp.path(), e))?;
    tmp.persist(path).map_err(|e| NewsumError::io(path, e.error))?;

    debug!(path = %path.display(), n_topics = topics.len(), "Saved checkpoint");
    Ok(())
}

/// Restore topics from `path`. A missing file is `Ok(None)`.
pub fn load_checkpoint(path: &Path) -> Result<Option<Vec<Topic>>> {
    let contents = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(NewsumError::io(path, e)),
    };

    let file: CheckpointFile = serde_json::from_str(&contents)?;
    if file.version != CHECKPOINT_VERSION {
        return Err(NewsumError::Checkpoint(format!(
            "{} has version {}, expected {}",
            path.display(),
            file.version,
            CHECKPOINT_VERSION
        )));
    }

    Ok(Some(file.topics.into_iter().map(Topic::from).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ParseTree;
    use crate::segment::RuleBasedSplitter;
    use tempfile::TempDir;

    fn sample_topics() -> Vec<Topic> {
        let splitter = RuleBasedSplitter::default();
        let date = NaiveDate::from_ymd_opt(1999, 4, 20).unwrap();
        let mut topic = Topic::new("D1001", "A", "Columbine Massacre");
        topic.documents.push(Document::new(
            "NYT19990420.0001",
            date,
            "Gunmen kill students",
            "Two students opened fire. The school was evacuated.",
            &splitter,
        ));
        topic.documents.push(Document::new("NYT19990420.0002", date, "", "", &splitter));
        vec![topic, Topic::new("D1002", "B", "Empty topic")]
    }

    #[test]
    fn test_round_trip_preserves_all_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/checkpoint.json");
        let topics = sample_topics();

        save_checkpoint(&path, &topics).unwrap();
        let restored = load_checkpoint(&path).unwrap().unwrap();
        assert_eq!(restored, topics);
        assert_eq!(restored[0].id(), "D1001A");
        assert_eq!(restored[0].documents[0].sentences().len(), 2);
    }

    #[test]
    fn test_annotations_are_not_persisted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("checkpoint.json");
        let mut topics = sample_topics();
        for s in topics[0].documents[0].sentences_mut() {
            s.set_text_parse(ParseTree { bracketed: "(S)".to_string() });
        }

        save_checkpoint(&path, &topics).unwrap();
        let restored = load_checkpoint(&path).unwrap().unwrap();
        let sentence = &restored[0].documents[0].sentences()[0];
        assert!(sentence.text_parse().is_none());
        assert_eq!(sentence.text, topics[0].documents[0].sentences()[0].text);
    }

    #[test]
    fn test_missing_checkpoint_is_none() {
        let dir = TempDir::new().unwrap();
        assert!(load_checkpoint(&dir.path().join("nope.json")).unwrap().is_none());
    }

    #[test]
    fn test_version_mismatch_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("checkpoint.json");
        fs::write(&path, r#"{"version":99,"created_at":"2024-01-01T00:00:00Z","topics":[]}"#).unwrap();
        assert!(matches!(load_checkpoint(&path), Err(NewsumError::Checkpoint(_))));
    }

    #[test]
    fn test_dates_are_iso_strings() {
        let record = SentenceRecord {
            text: "x".to_string(),
            doc_headline: String::new(),
            doc_date: NaiveDate::from_ymd_opt(2006, 1, 15).unwrap(),
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"doc_date\":\"2006-01-15\""), "{json}");
    }
}
