//! Table style: numbered boxed table with a total row and a footer.

use super::{empty_message, entry_label, push_line, RenderContext, TextStyle, TraceView};
use crate::utils::format::{format_duration, pad_left, pad_right, truncate};
use colored::Color;

const INDEX_WIDTH: usize = 3;
const NAME_WIDTH: usize = 35;
const DURATION_WIDTH: usize = 15;

/// Render the numbered table view
///
/// **Public** - registered for `OutputStyle::Table`
pub fn render_table(view: &TraceView, ctx: &RenderContext) -> String {
    let frame = TextStyle::bold(Color::Cyan);
    let idx = "─".repeat(INDEX_WIDTH + 2);
    let name = "─".repeat(NAME_WIDTH + 2);
    let dur = "─".repeat(DURATION_WIDTH + 2);
    // The total row spans the index and name columns
    let merged = "─".repeat(INDEX_WIDTH + NAME_WIDTH + 5);

    let mut out = String::new();
    push_line(&mut out, &ctx.paint(&format!("┌{}┬{}┐", merged, dur), frame));
    push_line(
        &mut out,
        &format!(
            "│ {} │ {} │",
            ctx.paint(
                &pad_right(
                    &truncate(&format!("📊 TOTAL EXECUTION TIME: {}", view.name), INDEX_WIDTH + NAME_WIDTH + 3),
                    INDEX_WIDTH + NAME_WIDTH + 3
                ),
                TextStyle::bold(Color::Yellow)
            ),
            ctx.paint(
                &pad_left(&format_duration(view.total), DURATION_WIDTH),
                TextStyle::bold(Color::Green)
            )
        ),
    );
    push_line(&mut out, &ctx.paint(&format!("├{}┬{}┼{}┤", idx, name, dur), frame));
    push_line(
        &mut out,
        &ctx.paint(
            &format!(
                "│ {} │ {} │ {} │",
                pad_left("#", INDEX_WIDTH),
                pad_right("Span", NAME_WIDTH),
                pad_left("Duration", DURATION_WIDTH)
            ),
            TextStyle::bold(Color::Magenta),
        ),
    );
    push_line(&mut out, &ctx.paint(&format!("├{}┼{}┼{}┤", idx, name, dur), frame));

    if let Some(message) = empty_message(view) {
        push_line(
            &mut out,
            &format!(
                "│ {} │ {} │ {} │",
                pad_left("-", INDEX_WIDTH),
                pad_right(message, NAME_WIDTH),
                pad_left("-", DURATION_WIDTH)
            ),
        );
    }

    for (i, entry) in view.entries.iter().enumerate() {
        let duration = entry.display_duration();
        let style = ctx.duration_style(duration);
        push_line(
            &mut out,
            &format!(
                "│ {} │ {} │ {} │",
                pad_left(&(i + 1).to_string(), INDEX_WIDTH),
                ctx.paint(&pad_right(&truncate(&entry_label(entry), NAME_WIDTH), NAME_WIDTH), style),
                ctx.paint(&pad_left(&format_duration(duration), DURATION_WIDTH), style)
            ),
        );
    }

    push_line(&mut out, &ctx.paint(&format!("└{}┴{}┴{}┘", idx, name, dur), frame));
    push_line(&mut out, &ctx.paint(&footer(view), TextStyle::color(Color::BrightBlack)));

    if let Some(summary) = view.filter_summary() {
        push_line(&mut out, &ctx.paint(&summary, TextStyle::color(Color::BrightBlack)));
    }

    out
}

/// "📈 Spans: 3 | 🐌 Slowest: query (60.00ms)"
///
/// **Private** - internal helper for render_table
fn footer(view: &TraceView) -> String {
    match &view.stats.slowest {
        Some(slowest) => format!(
            "📈 Spans: {} | 🐌 Slowest: {} ({})",
            view.stats.span_count,
            slowest.label,
            format_duration(slowest.duration)
        ),
        None => format!("📈 Spans: {}", view.stats.span_count),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::FilterConfig;
    use crate::tracer::measurement::Measurement;
    use chrono::Utc;
    use std::time::Duration;

    fn build(spans: &[Measurement], filters: FilterConfig) -> TraceView {
        let total = spans.iter().map(|m| m.duration).sum();
        TraceView::build("Import", spans, total, filters, None, Utc::now())
    }

    #[test]
    fn test_table_rows_are_numbered() {
        let spans = vec![
            Measurement::new("parse", Duration::from_millis(20)),
            Measurement::new("query", Duration::from_millis(60)),
            Measurement::new("render", Duration::from_millis(20)),
        ];
        let out = render_table(&build(&spans, FilterConfig::new()), &RenderContext::plain());

        assert!(out.contains("📊 TOTAL EXECUTION TIME: Import"));
        assert!(out.contains("│   1 │ parse"));
        assert!(out.contains("│   3 │ render"));
        assert!(out.contains("📈 Spans: 3 | 🐌 Slowest: query (60.00ms)"));
    }

    #[test]
    fn test_table_borders_line_up() {
        let spans = vec![Measurement::new("only", Duration::from_millis(5))];
        let out = render_table(&build(&spans, FilterConfig::new()), &RenderContext::plain());

        let widths: Vec<usize> = out
            .lines()
            .filter(|l| l.starts_with('┌') || l.starts_with('├') || l.starts_with('└'))
            .map(|l| l.chars().count())
            .collect();
        assert_eq!(widths.len(), 4);
        assert!(widths.iter().all(|w| *w == widths[0]));
    }

    #[test]
    fn test_table_long_name_keeps_title_row_width() {
        let spans = vec![Measurement::new("only", Duration::from_millis(5))];
        let view = TraceView::build(
            "Nightly warehouse import for every regional tenant",
            &spans,
            Duration::from_millis(5),
            FilterConfig::new(),
            None,
            Utc::now(),
        );
        let out = render_table(&view, &RenderContext::plain());

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[1].chars().count(), lines[0].chars().count());
        assert!(lines[1].contains("📊 TOTAL EXECUTION TIME: Nightly wareho..."));
    }

    #[test]
    fn test_table_empty_session() {
        let out = render_table(&build(&[], FilterConfig::new()), &RenderContext::plain());

        assert!(out.contains("No spans recorded"));
        assert!(out.contains("📈 Spans: 0"));
        assert!(!out.contains("Slowest"));
    }

    #[test]
    fn test_table_no_match_after_filtering() {
        let spans = vec![Measurement::new("tiny", Duration::from_micros(10))];
        let filters = FilterConfig {
            hide_ultra_fast: Some(Duration::from_millis(1)),
            ..Default::default()
        };
        let out = render_table(&build(&spans, filters), &RenderContext::plain());

        assert!(out.contains("No spans matched the active filters"));
        assert!(out.contains("🔍 Filtered: 0/1 spans | Active: hide<1ms"));
    }
}
