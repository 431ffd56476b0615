//! Structured (JSON) output.
//!
//! Builds a serde model of a finished session and serializes it with
//! pretty printing. The report carries no render-time timestamp, so the
//! same view always serializes to the same bytes.

use super::{ClassificationRules, RenderContext, TraceView};
use crate::tracer::measurement::DisplayEntry;
use crate::utils::config::SCHEMA_VERSION;
use crate::utils::error::OutputError;
use crate::utils::format::format_duration;
use log::{debug, error};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Top-level structured report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredReport {
    pub schema_version: String,
    pub tracer_name: String,

    /// RFC 3339 wall-clock start of the session
    pub started_at: String,

    /// Human-readable total, e.g. "120.00ms"
    pub total_duration: String,
    pub total_ns: u64,

    /// Real spans recorded, before filtering
    pub span_count: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caller_info: Option<CallerReport>,

    /// Filter descriptions such as "slow>10ms"
    pub active_filters: Vec<String>,

    /// Filtered entries in display order
    pub spans: Vec<EntryReport>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slowest: Option<SlowestReport>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerReport {
    /// File name without directories
    pub file: String,
    pub full_path: String,
    pub line: u32,
}

/// One displayed entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum EntryReport {
    Span {
        name: String,
        duration: String,
        duration_ns: u64,
        percent: f64,
        category: String,
    },
    Group {
        name: String,
        count: usize,
        /// Average member duration, human-readable
        duration: String,
        total_ns: u64,
        avg_ns: u64,
        min_ns: u64,
        max_ns: u64,
        percent: f64,
        category: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlowestReport {
    pub name: String,
    pub duration: String,
    pub duration_ns: u64,
    pub percent: f64,
}

impl StructuredReport {
    /// Build the report model for a view
    ///
    /// # Arguments
    /// * `view` - Finished session
    /// * `rules` - Classification used for each entry's `category`
    pub fn from_view(view: &TraceView, rules: &ClassificationRules) -> Self {
        let spans = view
            .entries
            .iter()
            .map(|entry| entry_report(view, entry, rules))
            .collect();

        let caller_info = view.caller.as_ref().map(|c| CallerReport {
            file: c.file_name(),
            full_path: c.file.clone(),
            line: c.line,
        });

        let slowest = view.stats.slowest.as_ref().map(|m| SlowestReport {
            name: m.label.clone(),
            duration: format_duration(m.duration),
            duration_ns: nanos(m.duration),
            percent: view.stats.slowest_percentage(),
        });

        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            tracer_name: view.name.clone(),
            started_at: view.started_at.to_rfc3339(),
            total_duration: format_duration(view.total),
            total_ns: nanos(view.total),
            span_count: view.stats.span_count,
            caller_info,
            active_filters: view.filters.descriptions(),
            spans,
            slowest,
        }
    }
}

/// Serialize a view as pretty-printed JSON
///
/// **Public** - main entry point for structured output
///
/// # Errors
/// * `OutputError::SerializationFailed` - serde_json rejected the model
pub fn render_structured(view: &TraceView, ctx: &RenderContext) -> Result<String, OutputError> {
    let report = StructuredReport::from_view(view, &ctx.rules);
    let mut json = serde_json::to_string_pretty(&report)?;
    json.push('\n');
    debug!("Structured report for '{}' ({} bytes)", view.name, json.len());
    Ok(json)
}

/// Infallible wrapper registered in the renderer table
///
/// **Public** - registered for `OutputStyle::Structured`
pub fn render_structured_text(view: &TraceView, ctx: &RenderContext) -> String {
    match render_structured(view, ctx) {
        Ok(json) => json,
        Err(e) => {
            error!("Failed to render structured output for '{}': {}", view.name, e);
            format!("{{\"error\": \"{}\"}}\n", e.to_string().replace('"', "'"))
        }
    }
}

/// **Private** - per-entry model
fn entry_report(view: &TraceView, entry: &DisplayEntry, rules: &ClassificationRules) -> EntryReport {
    let percent = view.percentage(entry);
    let category = rules.duration_bucket(entry.display_duration()).label.to_string();

    match entry {
        DisplayEntry::Span(m) => EntryReport::Span {
            name: m.label.clone(),
            duration: format_duration(m.duration),
            duration_ns: nanos(m.duration),
            percent,
            category,
        },
        DisplayEntry::Group(g) => EntryReport::Group {
            name: g.label.clone(),
            count: g.count,
            duration: format_duration(g.average),
            total_ns: nanos(g.total),
            avg_ns: nanos(g.average),
            min_ns: nanos(g.min),
            max_ns: nanos(g.max),
            percent,
            category,
        },
    }
}

fn nanos(d: Duration) -> u64 {
    u64::try_from(d.as_nanos()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::FilterConfig;
    use crate::tracer::measurement::Measurement;
    use crate::tracer::options::CallerInfo;
    use chrono::{TimeZone, Utc};

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn view(filters: FilterConfig) -> TraceView {
        let spans = vec![
            Measurement::new("auth", ms(40)),
            Measurement::new("lookup", ms(44)),
            Measurement::new("render", ms(100)),
        ];
        TraceView::build(
            "API",
            &spans,
            ms(184),
            filters,
            Some(CallerInfo::new("src/handlers/api.rs", 42)),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_structured_report_fields() {
        let json = render_structured(&view(FilterConfig::new()), &RenderContext::plain()).unwrap();
        let report: StructuredReport = serde_json::from_str(&json).unwrap();

        assert_eq!(report.schema_version, SCHEMA_VERSION);
        assert_eq!(report.tracer_name, "API");
        assert_eq!(report.started_at, "2024-01-01T00:00:00+00:00");
        assert_eq!(report.total_ns, 184_000_000);
        assert_eq!(report.span_count, 3);
        assert_eq!(report.spans.len(), 3);
        assert!(report.active_filters.is_empty());

        let caller = report.caller_info.unwrap();
        assert_eq!(caller.file, "api.rs");
        assert_eq!(caller.full_path, "src/handlers/api.rs");
        assert_eq!(caller.line, 42);

        assert_eq!(report.slowest.unwrap().name, "render");
    }

    #[test]
    fn test_structured_groups_are_tagged() {
        let filters = FilterConfig {
            group_similar: Some(ms(5)),
            ..Default::default()
        };
        let json = render_structured(&view(filters), &RenderContext::plain()).unwrap();

        assert!(json.contains("\"kind\": \"group\""));
        assert!(json.contains("\"kind\": \"span\""));
        assert!(json.contains("\"group±5ms\""));

        let report: StructuredReport = serde_json::from_str(&json).unwrap();
        match &report.spans[0] {
            EntryReport::Group { name, count, avg_ns, category, .. } => {
                assert_eq!(name, "auth + 1 similar");
                assert_eq!(*count, 2);
                assert_eq!(*avg_ns, 42_000_000);
                assert_eq!(category, "Very Fast");
            }
            other => panic!("expected a group, got {:?}", other),
        }
    }

    #[test]
    fn test_structured_output_is_stable() {
        let v = view(FilterConfig::new());
        let ctx = RenderContext::plain();
        assert_eq!(render_structured_text(&v, &ctx), render_structured_text(&v, &ctx));
    }

    #[test]
    fn test_structured_empty_session() {
        let v = TraceView::build("Empty", &[], Duration::ZERO, FilterConfig::new(), None, Utc::now());
        let report: StructuredReport =
            serde_json::from_str(&render_structured_text(&v, &RenderContext::plain())).unwrap();

        assert_eq!(report.span_count, 0);
        assert!(report.spans.is_empty());
        assert!(report.slowest.is_none());
        assert!(report.caller_info.is_none());
    }
}
