use std::path::{Path, PathBuf};

use crate::types::SessionCollection;

/// Location of the session document inside an agent directory.
pub const SESSIONS_FILE: &str = "sessions/sessions.json";

#[derive(Debug, thiserror::Error)]
pub enum SessionReadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Aggregates over one agent's session collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionTotals {
    pub session_count: usize,
    pub last_active: Option<i64>,
    pub total_tokens: u64,
}

pub fn sessions_path(data_root: &Path, directory: &str) -> PathBuf {
    data_root.join(directory).join(SESSIONS_FILE)
}

/// Read and parse a `sessions.json` document.
///
/// Invalid UTF-8 surfaces as a parse error since the bytes go straight to serde.
pub async fn read_sessions(path: &Path) -> Result<SessionCollection, SessionReadError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| SessionReadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    serde_json::from_slice(&bytes).map_err(|source| SessionReadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn aggregate(sessions: &SessionCollection) -> SessionTotals {
    sessions
        .values()
        .fold(SessionTotals::default(), |mut totals, record| {
            totals.session_count += 1;
            totals.total_tokens = totals.total_tokens.saturating_add(record.effective_tokens());
            if let Some(updated_at) = record.updated_at {
                totals.last_active = Some(match totals.last_active {
                    Some(current) => current.max(updated_at),
                    None => updated_at,
                });
            }
            totals
        })
}
