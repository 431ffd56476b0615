//! Presentation of finished sessions.
//!
//! Every renderer receives the same `TraceView` (filtered entries, totals,
//! metadata) and a `RenderContext` (colour switch, classification rules), and
//! returns the complete text block as a `String`:
//! - default, colorful, minimal listings (`text`)
//! - detailed summary with progress bars (`detailed`)
//! - numbered table (`table`)
//! - structured JSON (`json`)

pub mod classify;
pub mod detailed;
pub mod json;
pub mod render;
pub mod style;
pub mod table;
pub mod text;

// Re-export main types and functions
pub use classify::{Bucket, ClassificationRules, DurationRule, PercentageRule, TextStyle};
pub use json::{render_structured, StructuredReport};
pub use render::{render, renderer_for, RenderFn};
pub use style::OutputStyle;

use crate::aggregator::{apply_smart_filter, calculate_statistics, percentage_of};
use crate::aggregator::{FilterConfig, SpanStatistics};
use crate::tracer::measurement::{DisplayEntry, Measurement};
use crate::tracer::options::CallerInfo;
use crate::utils::config::{NO_MATCH_MESSAGE, NO_SPANS_MESSAGE};
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Everything a renderer needs to know about a finished session
#[derive(Debug, Clone, PartialEq)]
pub struct TraceView {
    pub name: String,

    /// Session duration percentages are relative to
    pub total: Duration,

    /// Filtered and grouped entries, in display order
    pub entries: Vec<DisplayEntry>,

    /// Statistics over all real spans, before filtering
    pub stats: SpanStatistics,

    /// Filters that produced `entries`
    pub filters: FilterConfig,

    pub caller: Option<CallerInfo>,

    /// Wall-clock time the session started
    pub started_at: DateTime<Utc>,
}

impl TraceView {
    /// Build a view from real spans (the trailing "End" already removed)
    pub fn build(
        name: impl Into<String>,
        measurements: &[Measurement],
        total: Duration,
        filters: FilterConfig,
        caller: Option<CallerInfo>,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            total,
            entries: apply_smart_filter(measurements, &filters),
            stats: calculate_statistics(measurements, total),
            filters,
            caller,
            started_at,
        }
    }

    /// True when the session recorded no real spans
    pub fn is_empty(&self) -> bool {
        self.stats.span_count == 0
    }

    /// Share of the session taken by an entry, in percent
    pub fn percentage(&self, entry: &DisplayEntry) -> f64 {
        percentage_of(entry.share(), self.total)
    }

    /// "🔍 Filtered: 2/5 spans | Active: slow>10ms" when any filter is on
    pub fn filter_summary(&self) -> Option<String> {
        if !self.filters.is_active() {
            return None;
        }
        Some(format!(
            "🔍 Filtered: {}/{} spans | Active: {}",
            self.entries.len(),
            self.stats.span_count,
            self.filters.descriptions().join(", ")
        ))
    }
}

/// Rendering switches shared by all styles
#[derive(Debug, Clone, PartialEq)]
pub struct RenderContext {
    /// Emit ANSI colour escapes
    pub colorize: bool,

    pub rules: ClassificationRules,
}

impl RenderContext {
    pub fn new(colorize: bool, rules: ClassificationRules) -> Self {
        Self { colorize, rules }
    }

    /// No colour, default rules
    pub fn plain() -> Self {
        Self::new(false, ClassificationRules::default())
    }

    /// Apply `style` only when colour is enabled
    pub fn paint(&self, text: &str, style: TextStyle) -> String {
        if self.colorize {
            style.apply(text)
        } else {
            text.to_string()
        }
    }

    /// Style for an entry's displayed duration
    pub fn duration_style(&self, d: Duration) -> TextStyle {
        self.rules.duration_bucket(d).style
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new(
            colored::control::SHOULD_COLORIZE.should_colorize(),
            ClassificationRules::default(),
        )
    }
}

/// Placeholder line when there is nothing to list
pub(crate) fn empty_message(view: &TraceView) -> Option<&'static str> {
    if view.is_empty() {
        Some(NO_SPANS_MESSAGE)
    } else if view.entries.is_empty() {
        Some(NO_MATCH_MESSAGE)
    } else {
        None
    }
}

/// Append `line` and a newline
pub(crate) fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

/// Label shown for an entry; groups carry a package marker and their size
pub(crate) fn entry_label(entry: &DisplayEntry) -> String {
    match entry {
        DisplayEntry::Span(m) => m.label.clone(),
        DisplayEntry::Group(g) => format!("📦 {} (×{})", g.label, g.count),
    }
}
