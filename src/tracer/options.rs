//! Print gating and caller metadata for a tracer session.

use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use super::session::Tracer;
use crate::utils::config::DEFAULT_MIN_DURATION;

/// Predicate signature for `PrintCondition::Custom`
pub type PrintPredicate = dyn Fn(&Tracer) -> bool + Send + Sync;

/// Decides whether a finished session is rendered at all
///
/// Only one condition is active per tracer; setting another replaces it.
#[derive(Clone)]
pub enum PrintCondition {
    /// Render when the session ran at least this long
    MinTotalDuration(Duration),

    /// Render when any recorded interval reached this duration
    MinSpanDuration(Duration),

    /// Caller-supplied predicate. A panic inside it reaches the caller of `end`.
    Custom(Arc<PrintPredicate>),
}

impl PrintCondition {
    pub fn custom(predicate: impl Fn(&Tracer) -> bool + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(predicate))
    }

    /// Evaluate the condition against a session
    pub fn should_print(&self, tracer: &Tracer) -> bool {
        match self {
            Self::MinTotalDuration(min) => tracer.total_duration() >= *min,
            Self::MinSpanDuration(min) => tracer
                .measurements()
                .iter()
                .any(|m| m.duration >= *min),
            Self::Custom(predicate) => predicate(tracer),
        }
    }
}

impl Default for PrintCondition {
    fn default() -> Self {
        Self::MinTotalDuration(DEFAULT_MIN_DURATION)
    }
}

impl fmt::Debug for PrintCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MinTotalDuration(d) => f.debug_tuple("MinTotalDuration").field(d).finish(),
            Self::MinSpanDuration(d) => f.debug_tuple("MinSpanDuration").field(d).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Source location where a tracer was created
///
/// Supplied explicitly, usually through the `tracer!` macro.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerInfo {
    pub file: String,
    pub line: u32,
}

impl CallerInfo {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }

    /// File name without the directory part
    pub fn file_name(&self) -> String {
        Path::new(&self.file)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.file.clone())
    }

    /// `file_name:line`
    pub fn short(&self) -> String {
        format!("{}:{}", self.file_name(), self.line)
    }
}

impl fmt::Display for CallerInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}
