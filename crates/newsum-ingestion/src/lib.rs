//! newsum-ingestion — Newswire corpus ingestion for multi-document summarization.
//! Covers the whole load path:
//! - Document id resolution across the AQUAINT, AQUAINT-2 and GIGAWORD layouts
//! - Markup repair and tree parsing of the raw corpus files
//! - Headline/body extraction and text cleaning
//! - Sentence segmentation and filtering
//! - Topic aggregation and checkpointing

pub mod checkpoint;
pub mod corpus;
pub mod extract;
pub mod markup;
pub mod models;
pub mod realize;
pub mod segment;
pub mod topics;

pub use corpus::{CorpusKind, CorpusRegistry, CorpusRoots, ResolvedLocation};
pub use models::{Document, Sentence, Topic};
pub use segment::{SegmentationStrategy, SentenceSplitter};
pub use topics::{LoadOutcome, TopicLoader};
