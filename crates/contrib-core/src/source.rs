//! Decoding contribution payloads.
//!
//! The contributions endpoint wraps records as `{ "data": [...] }`; exports
//! and hand-written fixtures are often a bare array. Both decode here.

use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::model::ContributionRecord;

/// Failure to obtain or decode a record set.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode contributions payload: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Payload {
    Bare(Vec<ContributionRecord>),
    Wrapped { data: Vec<ContributionRecord> },
}

/// Decode a JSON payload into records.
///
/// # Errors
///
/// Returns [`LoadError::Decode`] when the text is neither shape.
pub fn decode_payload(text: &str) -> Result<Vec<ContributionRecord>, LoadError> {
    let records = match serde_json::from_str::<Payload>(text) {
        Ok(Payload::Bare(data) | Payload::Wrapped { data }) => data,
        // Untagged errors are opaque; retry the wrapped shape for a useful
        // message.
        Err(_) => serde_json::from_str::<Wrapped>(text)?.data,
    };
    debug!(records = records.len(), "decoded contributions payload");
    Ok(records)
}

#[derive(Deserialize)]
struct Wrapped {
    data: Vec<ContributionRecord>,
}

/// Read and decode a payload file.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file cannot be read, or
/// [`LoadError::Decode`] if its contents are not a payload.
pub fn load_path(path: &Path) -> Result<Vec<ContributionRecord>, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    decode_payload(&text)
}

/// Read and decode a payload from any reader (stdin in the CLI).
///
/// # Errors
///
/// Same as [`load_path`]; the reported path is `-`.
pub fn load_reader(mut reader: impl Read) -> Result<Vec<ContributionRecord>, LoadError> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|source| LoadError::Io {
            path: PathBuf::from("-"),
            source,
        })?;
    decode_payload(&text)
}
