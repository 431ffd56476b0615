//! Detailed style: summary statistics followed by a per-entry breakdown
//! with percentages and progress bars.

use super::{empty_message, entry_label, push_line, RenderContext, TextStyle, TraceView};
use crate::utils::format::{center, format_duration, pad_left, pad_right, truncate};
use colored::Color;

const INDEX_WIDTH: usize = 3;
const NAME_WIDTH: usize = 29;
const DURATION_WIDTH: usize = 13;
const PERCENT_WIDTH: usize = 7;
const BAR_WIDTH: usize = 11;
const TOTAL_WIDTH: usize = 80;
const SLOWEST_NAME_WIDTH: usize = 25;

/// Render the detailed analysis view
///
/// **Public** - registered for `OutputStyle::Detailed`
pub fn render_detailed(view: &TraceView, ctx: &RenderContext) -> String {
    let inner = TOTAL_WIDTH - 2;
    let frame = TextStyle::bold(Color::Blue);
    let top = ctx.paint(&format!("╔{}╗", "═".repeat(inner)), frame);
    let separator = ctx.paint(&format!("╠{}╣", "═".repeat(inner)), frame);
    let thin = ctx.paint(&format!("╟{}╢", "─".repeat(inner)), frame);
    let bottom = ctx.paint(&format!("╚{}╝", "═".repeat(inner)), frame);

    let mut out = String::new();
    push_line(&mut out, &top);
    push_line(
        &mut out,
        &format!(
            "║{}║",
            ctx.paint(&center(&format!("🎯 TRACE: {}", view.name), inner), TextStyle::bold(Color::Magenta))
        ),
    );
    push_line(&mut out, &separator);

    render_summary(&mut out, view, ctx);

    push_line(&mut out, &separator);
    push_line(
        &mut out,
        &format!("║ {}", ctx.paint("🔍 DETAILED BREAKDOWN", TextStyle::bold(Color::Magenta))),
    );
    push_line(&mut out, &thin);
    push_line(
        &mut out,
        &format!(
            "║ {}",
            ctx.paint(
                &format!(
                    "{} │ {} │ {} │ {} │ {}",
                    pad_left("#", INDEX_WIDTH),
                    pad_right("Operation", NAME_WIDTH),
                    pad_left("Duration", DURATION_WIDTH),
                    pad_left("Percent", PERCENT_WIDTH),
                    "Progress"
                ),
                TextStyle::bold(Color::Magenta)
            )
        ),
    );
    push_line(&mut out, &thin);

    if let Some(message) = empty_message(view) {
        push_line(&mut out, &format!("║ {}", message));
    }

    for (i, entry) in view.entries.iter().enumerate() {
        let duration = entry.display_duration();
        let percentage = view.percentage(entry);
        let style = ctx.duration_style(duration);
        let bar_style = ctx.rules.percentage_bucket(percentage).style;

        push_line(
            &mut out,
            &format!(
                "║ {} │ {} │ {} │ {} │ {}",
                pad_left(&(i + 1).to_string(), INDEX_WIDTH),
                ctx.paint(&pad_right(&truncate(&entry_label(entry), NAME_WIDTH), NAME_WIDTH), style),
                ctx.paint(&pad_left(&format_duration(duration), DURATION_WIDTH), style),
                ctx.paint(&pad_left(&format!("{:.1}%", percentage), PERCENT_WIDTH), style),
                ctx.paint(&progress_bar(percentage, BAR_WIDTH), bar_style)
            ),
        );
    }

    if let Some(summary) = view.filter_summary() {
        push_line(&mut out, &thin);
        push_line(
            &mut out,
            &format!("║ {}", ctx.paint(&summary, TextStyle::color(Color::BrightBlack))),
        );
    }

    push_line(&mut out, &bottom);
    out
}

/// Summary block: totals, span count, slowest span, caller
///
/// **Private** - internal helper for render_detailed
fn render_summary(out: &mut String, view: &TraceView, ctx: &RenderContext) {
    push_line(out, &format!("║ {}", ctx.paint("📊 SUMMARY", TextStyle::bold(Color::Green))));
    push_line(
        out,
        &format!(
            "║ • Total Execution Time: {}",
            ctx.paint(&format_duration(view.total), TextStyle::bold(Color::Green))
        ),
    );
    push_line(
        out,
        &format!(
            "║ • Number of Spans: {}",
            ctx.paint(&view.stats.span_count.to_string(), TextStyle::bold(Color::Blue))
        ),
    );

    match &view.stats.slowest {
        Some(slowest) => {
            push_line(
                out,
                &format!(
                    "║ • Slowest Operation: {}",
                    ctx.paint(&truncate(&slowest.label, SLOWEST_NAME_WIDTH), TextStyle::bold(Color::Red))
                ),
            );
            push_line(
                out,
                &format!(
                    "║ • Slowest Duration: {} ({:.1}%)",
                    ctx.paint(&format_duration(slowest.duration), TextStyle::bold(Color::Red)),
                    view.stats.slowest_percentage()
                ),
            );
            push_line(
                out,
                &format!("║ • Average Span: {}", format_duration(view.stats.mean)),
            );
        }
        None => push_line(out, "║ • Slowest Operation: -"),
    }

    if let Some(caller) = &view.caller {
        push_line(
            out,
            &format!(
                "║ • File: {}",
                ctx.paint(&caller.to_string(), TextStyle::bold(Color::BrightBlack))
            ),
        );
    }
}

/// `█` blocks proportional to `percentage`, padded with `░` to `width`
pub(crate) fn progress_bar(percentage: f64, width: usize) -> String {
    let filled = ((percentage.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::FilterConfig;
    use crate::tracer::measurement::Measurement;
    use crate::tracer::options::CallerInfo;
    use chrono::Utc;
    use std::time::Duration;

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0.0, 4), "░░░░");
        assert_eq!(progress_bar(50.0, 4), "██░░");
        assert_eq!(progress_bar(100.0, 4), "████");
        assert_eq!(progress_bar(250.0, 4), "████");
    }

    #[test]
    fn test_detailed_summary_and_rows() {
        let spans = vec![
            Measurement::new("Load config", Duration::from_millis(25)),
            Measurement::new("Query database", Duration::from_millis(75)),
        ];
        let view = TraceView::build(
            "Request",
            &spans,
            Duration::from_millis(100),
            FilterConfig::new(),
            Some(CallerInfo::new("src/api.rs", 10)),
            Utc::now(),
        );

        let out = render_detailed(&view, &RenderContext::plain());

        assert!(out.contains("🎯 TRACE: Request"));
        assert!(out.contains("║ • Number of Spans: 2"));
        assert!(out.contains("║ • Slowest Operation: Query database"));
        assert!(out.contains("║ • Slowest Duration: 75.00ms (75.0%)"));
        assert!(out.contains("║ • File: src/api.rs:10"));
        assert!(out.contains("25.0%"));
        assert!(!out.contains("Filtered:"));
    }

    #[test]
    fn test_detailed_reports_filters() {
        let spans = vec![
            Measurement::new("fast", Duration::from_millis(1)),
            Measurement::new("slow", Duration::from_millis(99)),
        ];
        let filters = FilterConfig {
            slow_only: Some(Duration::from_millis(10)),
            ..Default::default()
        };
        let view = TraceView::build("Job", &spans, Duration::from_millis(100), filters, None, Utc::now());

        let out = render_detailed(&view, &RenderContext::plain());

        assert!(out.contains("🔍 Filtered: 1/2 spans | Active: slow>10ms"));
        assert!(!out.contains("│ fast"));
    }
}
