use std::time::Duration;

use web_time::Instant;

use crate::{PLUS2_MS, Penalty, inspection_penalty};

/// State of a [`Timer`].
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum TimerState {
    /// Waiting to start.
    #[default]
    Idle,
    /// Counting down inspection.
    Inspecting {
        /// When inspection started.
        start: Instant,
    },
    /// Timing a solve.
    Running {
        /// When the solve started.
        start: Instant,
        /// Penalty incurred during inspection.
        penalty: Penalty,
    },
    /// Showing a finished solve.
    Stopped {
        /// Raw solve time.
        elapsed: Duration,
        /// Penalty incurred during inspection.
        penalty: Penalty,
    },
}

/// Inspection countdown status.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum InspectionStatus {
    /// Seconds left before a penalty.
    Remaining(f32),
    /// Seconds over the limit, costing two seconds.
    OverLimit(f32),
    /// Too far over the limit; the solve will be a DNF.
    Dnf,
}

/// Solve reported when the timer stops.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FinishedSolve {
    /// Raw solve time in milliseconds, rounded to the nearest millisecond.
    pub time_ms: u64,
    /// Penalty incurred during inspection.
    pub penalty: Penalty,
}

/// Solve timer with optional inspection.
///
/// The timer never reads the clock itself; every call takes the current time
/// from the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timer {
    state: TimerState,
    inspection_limit: Duration,
}

impl Timer {
    /// Constructs an idle timer with an inspection limit in seconds.
    pub fn new(inspection_seconds: u32) -> Self {
        Self {
            state: TimerState::Idle,
            inspection_limit: Duration::from_secs(inspection_seconds.into()),
        }
    }

    /// Returns the current state.
    pub fn state(&self) -> TimerState {
        self.state
    }

    /// Returns whether the timer is inspecting or running.
    pub fn is_active(&self) -> bool {
        matches!(
            self.state,
            TimerState::Inspecting { .. } | TimerState::Running { .. }
        )
    }

    /// Advances the timer, as when the user presses the timer key.
    ///
    /// - Idle or stopped: starts inspection if enabled, otherwise starts the
    ///   solve.
    /// - Inspecting: starts the solve, with a penalty if inspection went over
    ///   the limit.
    /// - Running: stops the solve and returns it.
    pub fn toggle(&mut self, now: Instant, inspection_enabled: bool) -> Option<FinishedSolve> {
        match self.state {
            TimerState::Idle | TimerState::Stopped { .. } => {
                self.state = match inspection_enabled {
                    true => TimerState::Inspecting { start: now },
                    false => TimerState::Running {
                        start: now,
                        penalty: Penalty::Ok,
                    },
                };
                None
            }
            TimerState::Inspecting { start } => {
                let penalty =
                    inspection_penalty(now.saturating_duration_since(start), self.inspection_limit);
                if penalty != Penalty::Ok {
                    log::debug!("inspection penalty: {penalty}");
                }
                self.state = TimerState::Running {
                    start: now,
                    penalty,
                };
                None
            }
            TimerState::Running { start, penalty } => {
                let elapsed = now.saturating_duration_since(start);
                self.state = TimerState::Stopped { elapsed, penalty };
                Some(FinishedSolve {
                    time_ms: (elapsed.as_secs_f64() * 1000.0).round() as u64,
                    penalty,
                })
            }
        }
    }

    /// Returns to idle, discarding any solve in progress.
    pub fn reset(&mut self) {
        self.state = TimerState::Idle;
    }

    /// Ends inspection without starting the solve, as when inspection is
    /// disabled mid-countdown.
    pub fn cancel_inspection(&mut self) {
        if let TimerState::Inspecting { .. } = self.state {
            self.state = TimerState::Idle;
        }
    }

    /// Returns the raw time to display.
    pub fn elapsed(&self, now: Instant) -> Duration {
        match self.state {
            TimerState::Idle | TimerState::Inspecting { .. } => Duration::ZERO,
            TimerState::Running { start, .. } => now.saturating_duration_since(start),
            TimerState::Stopped { elapsed, .. } => elapsed,
        }
    }

    /// Returns the time to display with any penalty applied, or `None` for a
    /// DNF.
    pub fn display_time(&self, now: Instant) -> Option<Duration> {
        let elapsed = self.elapsed(now);
        match self.state {
            TimerState::Stopped { penalty, .. } | TimerState::Running { penalty, .. } => {
                match penalty {
                    Penalty::Ok => Some(elapsed),
                    Penalty::Plus2 => Some(elapsed + Duration::from_millis(PLUS2_MS)),
                    Penalty::Dnf => None,
                }
            }
            _ => Some(elapsed),
        }
    }

    /// Returns the inspection countdown, or `None` if not inspecting.
    pub fn inspection_status(&self, now: Instant) -> Option<InspectionStatus> {
        let TimerState::Inspecting { start } = self.state else {
            return None;
        };
        let elapsed = now.saturating_duration_since(start);
        let limit = self.inspection_limit;
        Some(if elapsed <= limit {
            InspectionStatus::Remaining((limit - elapsed).as_secs_f32())
        } else if elapsed < limit + Duration::from_millis(PLUS2_MS) {
            InspectionStatus::OverLimit((elapsed - limit).as_secs_f32())
        } else {
            InspectionStatus::Dnf
        })
    }
}
