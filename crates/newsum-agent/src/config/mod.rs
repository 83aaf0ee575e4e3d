//! Configuration loading for newsum.
//! Reads newsum.toml from `--config`, the NEWSUM_CONFIG env var, or the
//! current directory. A missing file means built-in defaults.

use std::path::{Path, PathBuf};

use newsum_common::NewsumError;
use newsum_ingestion::{CorpusRoots, SegmentationStrategy};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub corpora: CorpusRoots,
    #[serde(default)]
    pub segmentation: SegmentationConfig,
    #[serde(default)]
    pub run: RunConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentationConfig {
    #[serde(default)]
    pub strategy: SegmentationStrategy,
    #[serde(default = "default_min_words")]
    pub min_words: usize,
}

fn default_min_words() -> usize { 8 }

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            strategy: SegmentationStrategy::default(),
            min_words: default_min_words(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    pub topic_file: Option<PathBuf>,
    pub checkpoint: Option<PathBuf>,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_run_id")]
    pub run_id: String,
}

fn default_output_dir() -> PathBuf { PathBuf::from("./outputs") }
fn default_run_id()     -> String  { "1".to_string() }

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            topic_file: None,
            checkpoint: None,
            output_dir: default_output_dir(),
            run_id: default_run_id(),
        }
    }
}

mod tests;

impl Config {
    /// Load configuration. An explicit path must exist; the env/default path
    /// may be absent, in which case defaults are used.
    pub fn load(explicit: Option<&Path>) -> Result<Self, NewsumError> {
        let (path, required) = match explicit {
            Some(p) => (p.to_path_buf(), true),
            None => (
                std::env::var("NEWSUM_CONFIG")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from("newsum.toml")),
                false,
            ),
        };

        if !path.exists() {
            if required {
                return Err(NewsumError::Config(format!("config file not found: {}", path.display())));
            }
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|e| NewsumError::io(&path, e))?;
        Self::from_toml(&content)
            .map_err(|e| NewsumError::Config(format!("{}: {e}", path.display())))
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
