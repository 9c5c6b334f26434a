//! Solve history and sessions.

use std::path::Path;

use cubetimer_core::{CubeType, Timestamp};
use eyre::{Result, WrapErr};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{Penalty, SolveRecord, format_time, new_solve_id};

/// Maximum number of solves kept. Older solves are dropped.
pub const MAX_SOLVES: usize = 200;

/// Saves a history file, overwriting the existing one.
pub fn save(history: &History, path: &Path) -> Result<()> {
    if let Some(p) = path.parent() {
        std::fs::create_dir_all(p)?;
    }
    std::fs::write(path, history.to_json()?)
        .wrap_err_with(|| format!("error writing history to {}", path.display()))?;
    Ok(())
}

/// Loads a history file, or returns a fresh history if it is missing or
/// invalid.
pub fn load(path: &Path) -> History {
    // IIFE to mimic try_block
    (|| {
        let file_contents = std::fs::read_to_string(path).ok()?;
        match History::from_json(&file_contents) {
            Ok(history) => Some(history),
            Err(e) => {
                log::error!("error loading history from {}: {e}", path.display());
                None
            }
        }
    })()
    .unwrap_or_default()
}

/// Named group of solves.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Unique ID.
    pub id: String,
    /// Display name.
    pub name: String,
    /// When the session was created.
    pub created_at: Timestamp,
}

impl Session {
    fn new(name: String) -> Self {
        let created_at = Timestamp::now();
        Self {
            id: new_solve_id(created_at),
            name,
            created_at,
        }
    }
}

/// Solves and sessions.
///
/// Solves are stored newest first. There is always at least one session, and
/// the active session always exists.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct History {
    #[serde(default)]
    sessions: Vec<Session>,
    #[serde(default)]
    active_session: Option<String>,
    #[serde(default)]
    solves: Vec<SolveRecord>,
}

impl Default for History {
    fn default() -> Self {
        let mut ret = Self {
            sessions: vec![],
            active_session: None,
            solves: vec![],
        };
        ret.repair();
        ret
    }
}

impl History {
    /// Constructs a history with one empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Deserializes a history from JSON, repairing missing sessions.
    pub fn from_json(s: &str) -> serde_json::Result<Self> {
        let mut ret: Self = serde_json::from_str(s)?;
        ret.repair();
        Ok(ret)
    }

    /// Serializes the history to pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Ensures that there is at least one session, that the active session
    /// exists, that every solve belongs to a session, and that there are at
    /// most [`MAX_SOLVES`] solves.
    fn repair(&mut self) {
        if self.sessions.is_empty() {
            let mut session = Session::new("Session 1".to_owned());
            if let Some(id) = self.active_session.take() {
                session.id = id;
            }
            self.sessions.push(session);
        }
        if !self.has_session(self.active_session.as_deref().unwrap_or_default()) {
            self.active_session = Some(self.sessions[0].id.clone());
        }
        let active = self.active_session().id.clone();
        for solve in &mut self.solves {
            if solve.session_id.is_none() {
                solve.session_id = Some(active.clone());
            }
        }
        self.solves.truncate(MAX_SOLVES);
    }

    fn has_session(&self, id: &str) -> bool {
        self.sessions.iter().any(|s| s.id == id)
    }

    /// Returns all sessions, in creation order.
    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    /// Returns the active session.
    pub fn active_session(&self) -> &Session {
        self.active_session
            .as_ref()
            .and_then(|id| self.sessions.iter().find(|s| s.id == *id))
            .unwrap_or(&self.sessions[0])
    }

    /// Returns all solves, newest first.
    pub fn solves(&self) -> &[SolveRecord] {
        &self.solves
    }

    /// Returns the solves for a cube and session, newest first.
    pub fn filtered(&self, cube_type: CubeType, session_id: &str) -> Vec<&SolveRecord> {
        self.solves
            .iter()
            .filter(|s| s.cube_type == cube_type && s.session_id.as_deref() == Some(session_id))
            .collect()
    }

    /// Adds a solve as the newest, dropping the oldest if there are too many.
    /// A solve without a session is added to the active session.
    pub fn add_solve(&mut self, mut solve: SolveRecord) {
        if solve.session_id.is_none() {
            solve.session_id = Some(self.active_session().id.clone());
        }
        self.solves.insert(0, solve);
        self.solves.truncate(MAX_SOLVES);
    }

    /// Changes the penalty of a solve.
    pub fn update_penalty(&mut self, id: &str, penalty: Penalty) -> Result<(), HistoryError> {
        let solve = self
            .solves
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| HistoryError::UnknownSolve(id.to_owned()))?;
        solve.penalty = penalty;
        Ok(())
    }

    /// Deletes a solve and returns it.
    pub fn delete_solve(&mut self, id: &str) -> Result<SolveRecord, HistoryError> {
        let i = self
            .solves
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| HistoryError::UnknownSolve(id.to_owned()))?;
        Ok(self.solves.remove(i))
    }

    /// Deletes every solve for a cube and session. Returns the number of
    /// solves deleted.
    pub fn clear_solves_for(&mut self, cube_type: CubeType, session_id: &str) -> usize {
        let old_len = self.solves.len();
        self.solves
            .retain(|s| s.cube_type != cube_type || s.session_id.as_deref() != Some(session_id));
        old_len - self.solves.len()
    }

    /// Adds a session and makes it active. A blank name is replaced with
    /// `Session n`.
    pub fn add_session(&mut self, name: &str) -> &Session {
        let name = match name.trim() {
            "" => format!("Session {}", self.sessions.len() + 1),
            s => s.to_owned(),
        };
        let session = Session::new(name);
        self.active_session = Some(session.id.clone());
        self.sessions.push(session);
        self.active_session()
    }

    /// Renames a session. A blank name leaves the name unchanged.
    pub fn rename_session(&mut self, id: &str, name: &str) -> Result<(), HistoryError> {
        let session = self
            .sessions
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| HistoryError::UnknownSession(id.to_owned()))?;
        let name = name.trim();
        if !name.is_empty() {
            session.name = name.to_owned();
        }
        Ok(())
    }

    /// Deletes a session along with all of its solves.
    ///
    /// If it was the last session, a fresh session replaces it. If it was the
    /// active session, the first remaining session becomes active.
    pub fn delete_session(&mut self, id: &str) -> Result<(), HistoryError> {
        if !self.has_session(id) {
            return Err(HistoryError::UnknownSession(id.to_owned()));
        }
        self.sessions.retain(|s| s.id != id);
        self.solves.retain(|s| s.session_id.as_deref() != Some(id));
        if self.sessions.is_empty() {
            self.active_session = None;
        }
        self.repair();
        Ok(())
    }

    /// Makes a session active.
    pub fn set_active_session(&mut self, id: &str) -> Result<(), HistoryError> {
        if !self.has_session(id) {
            return Err(HistoryError::UnknownSession(id.to_owned()));
        }
        self.active_session = Some(id.to_owned());
        Ok(())
    }

    /// Exports the solves for a cube and session as CSV.
    pub fn export_csv(&self, cube_type: CubeType, session_id: &str, precision: u32) -> String {
        let session_name = self
            .sessions
            .iter()
            .find(|s| s.id == session_id)
            .map_or("Session", |s| s.name.as_str());

        let header = [
            "session",
            "cube",
            "time_ms",
            "time_display",
            "penalty",
            "scramble",
            "created_at",
        ]
        .map(str::to_owned);
        let rows = self.filtered(cube_type, session_id).into_iter().map(|s| {
            let display = match s.effective_ms() {
                Some(ms) => format_time(ms as f64, precision),
                None => "DNF".to_owned(),
            };
            [
                session_name.to_owned(),
                s.cube_type.to_string(),
                s.time_ms.to_string(),
                display,
                s.penalty.to_string(),
                s.scramble.clone(),
                s.created_at.to_string(),
            ]
        });

        std::iter::once(header)
            .chain(rows)
            .map(|row| row.iter().map(|field| escape_csv(field)).join(","))
            .join("\n")
    }
}

fn escape_csv(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Error modifying a [`History`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum HistoryError {
    #[error("no solve with ID {0:?}")]
    UnknownSolve(String),
    #[error("no session with ID {0:?}")]
    UnknownSession(String),
}
