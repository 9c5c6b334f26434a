use std::fmt;

use cubetimer_core::Timestamp;
use serde::{Deserialize, Serialize};

use crate::SolveRecord;

/// Maximum number of decimal places shown by [`format_time()`].
const MAX_PRECISION: u32 = 3;

/// Formats a time as `m:ss.ddd`, or `ss.ddd` if it is under a minute, with
/// `precision` decimal places (at most 3). Negative times are shown as zero.
pub fn format_time(ms: f64, precision: u32) -> String {
    let precision = precision.min(MAX_PRECISION);
    let scale = 10_u64.pow(precision);
    let units = (ms.max(0.0) / 1000.0 * scale as f64).round() as u64;

    let minutes = units / (60 * scale);
    let seconds = units % (60 * scale) / scale;
    let fraction = units % scale;
    let seconds_text = match precision {
        0 => format!("{seconds:02}"),
        p => format!("{seconds:02}.{fraction:0width$}", width = p as usize),
    };

    if minutes > 0 {
        format!("{minutes}:{seconds_text}")
    } else {
        seconds_text
    }
}

/// Average of several solves.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Average {
    /// Average time in milliseconds.
    Time(f64),
    /// The average is a DNF.
    Dnf,
}

impl Average {
    /// Returns the average in milliseconds, or `None` for a DNF.
    pub fn ms(self) -> Option<f64> {
        match self {
            Average::Time(ms) => Some(ms),
            Average::Dnf => None,
        }
    }
}

/// Formats a statistic: `--` when there is not enough data, `DNF`, or a time.
pub fn format_stat(value: Option<Average>, precision: u32) -> String {
    match value {
        None => "--".to_owned(),
        Some(Average::Dnf) => "DNF".to_owned(),
        Some(Average::Time(ms)) => format_time(ms, precision),
    }
}

/// Returns the mean of a set of times.
fn mean(times: &[u64]) -> Option<f64> {
    if times.is_empty() {
        return None;
    }
    let sum: f64 = times.iter().map(|&ms| ms as f64).sum();
    Some(sum / times.len() as f64)
}

/// Returns the average of the newest `n` solves, dropping the best and worst.
///
/// `times` holds effective times with the newest first, where `None` is a
/// DNF. Returns `None` if there are fewer than `n` solves. A single DNF counts
/// as the worst time and is dropped; two or more make the average a DNF.
pub fn average_of(times: &[Option<u64>], n: usize) -> Option<Average> {
    if n == 0 || times.len() < n {
        return None;
    }
    let recent = &times[..n];
    if recent.iter().filter(|t| t.is_none()).count() >= 2 {
        return Some(Average::Dnf);
    }

    let mut sorted: Vec<f64> = recent
        .iter()
        .map(|t| t.map_or(f64::INFINITY, |ms| ms as f64))
        .collect();
    sorted.sort_by(f64::total_cmp);
    let trimmed = sorted.get(1..n.saturating_sub(1)).unwrap_or_default();
    if trimmed.is_empty() || trimmed.iter().any(|t| !t.is_finite()) {
        return Some(Average::Dnf);
    }
    Some(Average::Time(trimmed.iter().sum::<f64>() / trimmed.len() as f64))
}

/// New personal best.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PbEntry {
    /// Effective time in milliseconds.
    pub time_ms: u64,
    /// When the solve was finished.
    pub created_at: Timestamp,
}

/// Number of entries returned by [`pb_history()`].
const PB_HISTORY_LEN: usize = 10;

/// Returns the solves that set a new personal best, newest first, limited to
/// the newest 10.
///
/// `solves` is newest first.
pub fn pb_history(solves: &[&SolveRecord]) -> Vec<PbEntry> {
    let mut best = u64::MAX;
    let mut history = vec![];
    for solve in solves.iter().rev() {
        let Some(time_ms) = solve.effective_ms() else {
            continue;
        };
        if time_ms < best {
            best = time_ms;
            history.push(PbEntry {
                time_ms,
                created_at: solve.created_at,
            });
        }
    }
    history.into_iter().rev().take(PB_HISTORY_LEN).collect()
}

/// Summary statistics for a list of solves.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct SessionStats {
    /// Number of solves, including DNFs.
    pub count: usize,
    /// Fastest non-DNF time.
    pub best: Option<u64>,
    /// Slowest non-DNF time.
    pub worst: Option<u64>,
    /// Mean of non-DNF times.
    pub mean: Option<f64>,
    /// Average of 5.
    pub ao5: Option<Average>,
    /// Average of 12.
    pub ao12: Option<Average>,
    /// Average of 100.
    pub ao100: Option<Average>,
}

impl SessionStats {
    /// Computes statistics for solves listed newest first.
    pub fn compute(solves: &[&SolveRecord]) -> Self {
        let effective: Vec<Option<u64>> = solves.iter().map(|s| s.effective_ms()).collect();
        let finished: Vec<u64> = effective.iter().flatten().copied().collect();
        Self {
            count: solves.len(),
            best: finished.iter().copied().min(),
            worst: finished.iter().copied().max(),
            mean: mean(&finished),
            ao5: average_of(&effective, 5),
            ao12: average_of(&effective, 12),
            ao100: average_of(&effective, 100),
        }
    }

    /// Returns a displayable summary with times formatted to `precision`
    /// decimal places.
    pub fn display(&self, precision: u32) -> impl '_ + fmt::Display {
        SessionStatsDisplay {
            stats: self,
            precision,
        }
    }
}

struct SessionStatsDisplay<'a> {
    stats: &'a SessionStats,
    precision: u32,
}

impl fmt::Display for SessionStatsDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.precision;
        let s = self.stats;
        let time = |t: Option<u64>| format_stat(t.map(|ms| Average::Time(ms as f64)), p);
        writeln!(f, "solves  {}", s.count)?;
        writeln!(f, "best    {}", time(s.best))?;
        writeln!(f, "worst   {}", time(s.worst))?;
        writeln!(f, "mean    {}", format_stat(s.mean.map(Average::Time), p))?;
        writeln!(f, "ao5     {}", format_stat(s.ao5, p))?;
        writeln!(f, "ao12    {}", format_stat(s.ao12, p))?;
        write!(f, "ao100   {}", format_stat(s.ao100, p))
    }
}
