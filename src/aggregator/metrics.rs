//! Derived statistics over a finished session.
//!
//! Percentages and the slowest span are what the renderers highlight; they
//! are computed here so every style reports the same numbers.

use crate::tracer::measurement::Measurement;
use log::debug;
use std::time::Duration;

/// Share of `total` taken by `part`, in percent
///
/// Returns 0.0 for an empty session instead of dividing by zero.
pub fn percentage_of(part: Duration, total: Duration) -> f64 {
    if total.is_zero() {
        0.0
    } else {
        part.as_secs_f64() / total.as_secs_f64() * 100.0
    }
}

/// Summary statistics for a session
///
/// **Public** - returned from calculate_statistics
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpanStatistics {
    /// Session duration the percentages are relative to
    pub total: Duration,

    /// Number of real spans (the trailing "End" excluded)
    pub span_count: usize,

    /// Sum of the real span durations
    pub recorded: Duration,

    /// Mean real span duration
    pub mean: Duration,

    /// Longest real span; the first one wins a tie
    pub slowest: Option<Measurement>,
}

/// Calculate summary statistics from real measurements
///
/// **Public** - main entry point for metrics calculation
///
/// # Arguments
/// * `measurements` - Real spans, "End" already removed
/// * `total` - Session duration
pub fn calculate_statistics(measurements: &[Measurement], total: Duration) -> SpanStatistics {
    debug!("Calculating statistics over {} spans", measurements.len());

    if measurements.is_empty() {
        return SpanStatistics {
            total,
            ..SpanStatistics::default()
        };
    }

    let recorded: Duration = measurements.iter().map(|m| m.duration).sum();
    let count = measurements.len();

    SpanStatistics {
        total,
        span_count: count,
        recorded,
        mean: recorded / count as u32,
        slowest: find_slowest(measurements).cloned(),
    }
}

/// Longest measurement, first occurrence on ties
///
/// **Private** - internal helper
fn find_slowest(measurements: &[Measurement]) -> Option<&Measurement> {
    measurements
        .iter()
        .fold(None, |best: Option<&Measurement>, m| match best {
            Some(b) if b.duration >= m.duration => Some(b),
            _ => Some(m),
        })
}

impl SpanStatistics {
    /// Percentage of the session spent in the slowest span
    pub fn slowest_percentage(&self) -> f64 {
        self.slowest
            .as_ref()
            .map(|m| percentage_of(m.duration, self.total))
            .unwrap_or(0.0)
    }

    /// Get human-readable summary
    ///
    /// **Public** - for logging and debugging
    pub fn summary(&self) -> String {
        let slowest = match &self.slowest {
            Some(m) => format!("{} ({:?})", m.label, m.duration),
            None => "-".to_string(),
        };
        format!(
            "Total: {:?} | Spans: {} | Mean: {:?} | Slowest: {}",
            self.total, self.span_count, self.mean, slowest
        )
    }
}
