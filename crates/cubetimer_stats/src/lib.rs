//! Solve records, timer, and statistics for the cube timer.

mod history;
mod solve;
mod stats;
mod timer;

pub use history::{History, HistoryError, MAX_SOLVES, Session, load, save};
pub use solve::{Penalty, SolveRecord, inspection_penalty, new_solve_id};
pub use stats::{Average, PbEntry, SessionStats, average_of, format_stat, format_time, pb_history};
pub use timer::{FinishedSolve, InspectionStatus, Timer, TimerState};

/// Time added to a solve with a [`Penalty::Plus2`], in milliseconds.
pub const PLUS2_MS: u64 = 2000;
