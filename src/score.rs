use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One completed session, immutable once appended.
/// Serialized field names follow the persisted log's original shape:
/// `score` holds the elapsed display string ("MM:SS:CC").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub date: String,
    pub player: String,
    pub score: String,
}

#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("score log write error: {0}")]
    Io(#[from] std::io::Error),
    #[error("score log serialize error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Append-only leaderboard log backed by a single JSON file.
///
/// No dedup, no size cap, no eviction: unbounded growth is an inherited
/// scope limit of the design, not an oversight.
#[derive(Debug, Clone)]
pub struct ScoreStore {
    path: PathBuf,
}

impl ScoreStore {
    #[inline]
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Full log in append order. A missing or unparseable file degrades to
    /// the empty log; corruption is never surfaced to the caller.
    pub fn load_all(&self) -> Vec<ScoreRecord> {
        let Ok(data) = fs::read_to_string(&self.path) else {
            return Vec::new();
        };
        match serde_json::from_str(&data) {
            Ok(log) => log,
            Err(e) => {
                tracing::warn!("score log unparseable, treating as empty: {e}");
                Vec::new()
            }
        }
    }

    /// Read-modify-write append: load the current log, push `record`, write
    /// the whole log back. Returns the updated log.
    pub fn append(&self, record: ScoreRecord) -> Result<Vec<ScoreRecord>, ScoreError> {
        let mut log = self.load_all();
        log.push(record);
        fs::write(&self.path, serde_json::to_string(&log)?)?;
        Ok(log)
    }
}
