//! Corpus file reader: bytes -> (gunzip) -> text -> repaired markup -> tree.

use std::fs;
use std::io::Read;
use std::path::Path;

use flate2::read::GzDecoder;
use newsum_common::{NewsumError, Result};
use tracing::{debug, error};

use super::{Corpus, ResolvedLocation};
use crate::markup::XmlElement;

/// Read the file behind `location` and parse it with `corpus`'s markup rules.
///
/// Parse failures are logged with the path and the id that triggered the read
/// and returned as `NewsumError::MarkupParse`.
pub fn read_tree(corpus: &dyn Corpus, location: &ResolvedLocation, doc_id: &str) -> Result<XmlElement> {
    let contents = read_text(&location.path)?;
    debug!(path = %location.path.display(), bytes = contents.len(), corpus = %corpus.kind(), "Read corpus file");

    corpus.parse_tree(&contents).map_err(|e| {
        error!(path = %location.path.display(), doc_id, "Error parsing corpus file: {}", e);
        NewsumError::MarkupParse {
            path: location.path.clone(),
            doc_id: doc_id.to_string(),
            message: e.to_string(),
        }
    })
}

/// Load a file as text, gunzipping `.gz` files. Invalid UTF-8 is replaced.
pub fn read_text(path: &Path) -> Result<String> {
    let raw = fs::read(path).map_err(|e| NewsumError::io(path, e))?;

    let bytes = if path.extension().is_some_and(|ext| ext == "gz") {
        let mut decoded = Vec::new();
        GzDecoder::new(raw.as_slice())
            .read_to_end(&mut decoded)
            .map_err(|e| NewsumError::io(path, e))?;
        decoded
    } else {
        raw
    };

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
