//! Per-topic sentence output files.
//!
//! One file per topic named `{id_1}-A.M.100.{id_2}.{run_id}`, one sentence
//! per line.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use newsum_common::{NewsumError, Result};
use tracing::debug;

use crate::models::{Sentence, Topic};

pub fn summary_file_name(topic: &Topic, run_id: &str) -> String {
    format!("{}-A.M.100.{}.{}", topic.id_1, topic.id_2, run_id)
}

/// Write `sentences` for `topic` under `output_dir`; returns the file path.
pub fn write_topic_summary<'a>(
    output_dir: &Path,
    topic: &Topic,
    run_id: &str,
    sentences: impl IntoIterator<Item = &'a Sentence>,
) -> Result<PathBuf> {
    fs::create_dir_all(output_dir).map_err(|e| NewsumError::io(output_dir, e))?;
    let path = output_dir.join(summary_file_name(topic, run_id));

    let file = fs::File::create(&path).map_err(|e| NewsumError::io(&path, e))?;
    let mut w = BufWriter::new(file);
    let mut n = 0usize;
    for sentence in sentences {
        writeln!(w, "{}", sentence.text).map_err(|e| NewsumError::io(&path, e))?;
        n += 1;
    }
    w.flush().map_err(|e| NewsumError::io(&path, e))?;

    debug!(topic = %topic.id(), path = %path.display(), sentences = n, "Wrote topic output");
    Ok(path)
}
