//! Save format for puzzles and player statistics.
//!
//! A record is stored as JSON and restored verbatim. Decoding never repairs a
//! puzzle, anything failing validation is rejected so the caller can discard
//! it and start a fresh one.

use cryptogram_core::{GameError, PlayerStats, PuzzleState, Timestamp};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const FORMAT_VERSION: u32 = 1;

#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Malformed save record: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unsupported save format version {0}")]
    UnsupportedVersion(u32),
    #[error(transparent)]
    Game(#[from] GameError),
}

pub type Result<T> = core::result::Result<T, ProtocolError>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SaveRecord {
    pub version: u32,
    pub saved_at: Timestamp,
    pub puzzle: Option<PuzzleState>,
    #[serde(default)]
    pub stats: PlayerStats,
}

impl SaveRecord {
    pub fn new(puzzle: Option<PuzzleState>, stats: PlayerStats, saved_at: Timestamp) -> Self {
        Self {
            version: FORMAT_VERSION,
            saved_at,
            puzzle,
            stats,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.version != FORMAT_VERSION {
            return Err(ProtocolError::UnsupportedVersion(self.version));
        }
        if let Some(puzzle) = &self.puzzle {
            puzzle.validate()?;
        }
        Ok(())
    }
}

pub fn encode(record: &SaveRecord) -> Result<String> {
    Ok(serde_json::to_string(record)?)
}

pub fn decode(json: &str) -> Result<SaveRecord> {
    let record: SaveRecord = serde_json::from_str(json)?;
    if let Err(err) = record.validate() {
        log::warn!("Rejecting save record: {}", err);
        return Err(err);
    }
    Ok(record)
}

/// Decodes a record, dropping a corrupt puzzle but keeping the statistics.
///
/// Falls back to an empty record when the JSON can't be read or was written
/// by another format version, since its statistics can't be trusted either.
pub fn decode_lenient(json: &str) -> SaveRecord {
    let mut record = match serde_json::from_str::<SaveRecord>(json) {
        Ok(record) if record.version == FORMAT_VERSION => record,
        Ok(record) => {
            log::warn!("Discarding save record with version {}", record.version);
            return SaveRecord::new(None, PlayerStats::default(), record.saved_at);
        }
        Err(err) => {
            log::warn!("Discarding unreadable save record: {}", err);
            return SaveRecord::new(None, PlayerStats::default(), Timestamp::default());
        }
    };

    if let Some(Err(err)) = record.puzzle.as_ref().map(PuzzleState::validate) {
        log::warn!("Discarding corrupt puzzle: {}", err);
        record.puzzle = None;
    }
    record
}
