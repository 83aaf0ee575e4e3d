use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NewsumError {
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Markup parse error in {} for {doc_id}: {message}", .path.display())]
    MarkupParse {
        path: PathBuf,
        doc_id: String,
        message: String,
    },

    #[error("Topic file error: {0}")]
    TopicFile(String),

    #[error("Checkpoint error: {0}")]
    Checkpoint(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl NewsumError {
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        NewsumError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, NewsumError>;
