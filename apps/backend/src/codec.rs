//! Snapshot <-> bytes.
//!
//! A stored blob is the snapshot's JSON text, gzip-compressed.

use std::io::{Read, Write};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use thiserror::Error;

use crate::domain::snapshot::Snapshot;
use crate::domain::stage::Stage;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("refusing to encode snapshot in stage {0}")]
    NotPersistable(Stage),
    #[error("corrupt snapshot: {0}")]
    Corrupt(String),
    #[error("failed to encode snapshot: {0}")]
    Encode(String),
}

pub fn encode(snapshot: &Snapshot) -> Result<Vec<u8>, CodecError> {
    let stage = snapshot.engine_state.stage;
    if !stage.is_persistable() {
        return Err(CodecError::NotPersistable(stage));
    }

    let json = serde_json::to_vec(snapshot).map_err(|e| CodecError::Encode(e.to_string()))?;
    let mut encoder = GzEncoder::new(Vec::with_capacity(json.len() / 2), Compression::default());
    encoder
        .write_all(&json)
        .map_err(|e| CodecError::Encode(e.to_string()))?;
    encoder.finish().map_err(|e| CodecError::Encode(e.to_string()))
}

pub fn decode(bytes: &[u8]) -> Result<Snapshot, CodecError> {
    let mut json = Vec::new();
    GzDecoder::new(bytes)
        .read_to_end(&mut json)
        .map_err(|e| CodecError::Corrupt(format!("gzip: {e}")))?;

    let snapshot: Snapshot =
        serde_json::from_slice(&json).map_err(|e| CodecError::Corrupt(format!("json: {e}")))?;

    if !snapshot.engine_state.stage.is_persistable() {
        return Err(CodecError::Corrupt(format!(
            "stored stage {} is not persistable",
            snapshot.engine_state.stage
        )));
    }
    Ok(snapshot)
}
