//! Reduction of recorded spans into what gets displayed.
//!
//! This module transforms a session's measurements into:
//! - Filtered and grouped display entries (smart filter)
//! - Summary statistics (percentages, slowest span)

pub mod filter;
pub mod metrics;

// Re-export main types and functions
pub use filter::{apply_smart_filter, group_similar, FilterConfig};
pub use metrics::{calculate_statistics, percentage_of, SpanStatistics};
