//! Keeps the three panes across restarts when session restore is on.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::app::domain::source::{Pane, SourceSet};
use crate::app::infrastructure::error::{AppError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionData {
    #[serde(default)]
    pub active: Pane,
    pub sources: SourceSet,
}

/// Returns the session file path: data_dir/ferrisfiddle/session.json
pub fn session_path() -> PathBuf {
    let mut path = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("ferrisfiddle");
    path.push("session.json");
    path
}

pub fn save_session(data: &SessionData) -> Result<()> {
    save_session_to(data, &session_path())
}

pub fn save_session_to(data: &SessionData, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| AppError::Session(format!("Failed to create session dir: {}", e)))?;
    }
    let json = serde_json::to_string_pretty(data)?;
    fs::write(path, json)?;
    Ok(())
}

/// `None` when there is no session yet or it cannot be read.
pub fn load_session() -> Option<SessionData> {
    load_session_from(&session_path())
}

pub fn load_session_from(path: &Path) -> Option<SessionData> {
    let content = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&content) {
        Ok(data) => Some(data),
        Err(e) => {
            tracing::warn!("Ignoring unreadable session {}: {}", path.display(), e);
            None
        }
    }
}
