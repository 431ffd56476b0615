//! Listing styles: default, colorful and minimal.

use super::{empty_message, entry_label, push_line, RenderContext, TextStyle, TraceView};
use crate::utils::config::{DURATION_WIDTH, NAME_WIDTH, RULE_WIDTH};
use crate::utils::format::{center, format_duration, pad_right, truncate};
use colored::Color;

const SPAN_COLUMN: usize = 45;
const TOTAL_COLUMN: usize = 20;

/// Ruled two-column listing
pub fn render_default(view: &TraceView, ctx: &RenderContext) -> String {
    let heavy = ctx.paint(&"=".repeat(RULE_WIDTH), TextStyle::bold(Color::Cyan));
    let light = ctx.paint(&"-".repeat(RULE_WIDTH), TextStyle::color(Color::Cyan));
    let mut out = String::new();

    push_line(&mut out, &heavy);
    push_line(
        &mut out,
        &ctx.paint(&format!("| {}", view.name), TextStyle::bold(Color::Yellow)),
    );
    if let Some(caller) = &view.caller {
        push_line(
            &mut out,
            &ctx.paint(&format!("| 📍 {}", caller.short()), TextStyle::color(Color::BrightBlack)),
        );
    }
    push_line(&mut out, &heavy);
    push_line(
        &mut out,
        &ctx.paint(
            &format!(
                "| {} | {}",
                pad_right("Total time", TOTAL_COLUMN),
                format_duration(view.total)
            ),
            TextStyle::bold(Color::Green),
        ),
    );
    push_line(&mut out, &light);
    push_line(
        &mut out,
        &ctx.paint(
            &format!("| {} | Execution time", pad_right("Span", SPAN_COLUMN)),
            TextStyle::bold(Color::Magenta),
        ),
    );
    push_line(&mut out, &light);

    if let Some(message) = empty_message(view) {
        push_line(&mut out, &format!("| {}", message));
    }

    for entry in &view.entries {
        let duration = entry.display_duration();
        let style = ctx.duration_style(duration);
        let label = pad_right(&truncate(&entry_label(entry), SPAN_COLUMN), SPAN_COLUMN);
        push_line(
            &mut out,
            &format!(
                "| {} | {}",
                ctx.paint(&label, style),
                ctx.paint(&format_duration(duration), style)
            ),
        );
    }

    if let Some(summary) = view.filter_summary() {
        push_line(&mut out, &light);
        push_line(
            &mut out,
            &ctx.paint(&format!("| {}", summary), TextStyle::color(Color::BrightBlack)),
        );
    }

    push_line(&mut out, &heavy);
    out
}

/// Unicode box with coloured spans
pub fn render_colorful(view: &TraceView, ctx: &RenderContext) -> String {
    let frame = BoxFrame::new(NAME_WIDTH + DURATION_WIDTH + 4);
    let mut out = String::new();

    push_line(&mut out, &ctx.paint(&frame.top, TextStyle::bold(Color::Cyan)));
    push_line(
        &mut out,
        &ctx.paint(&frame.centered(&format!("🚀 {}", view.name)), TextStyle::bold(Color::Yellow)),
    );
    if let Some(caller) = &view.caller {
        push_line(
            &mut out,
            &ctx.paint(
                &frame.centered(&format!("📍 File: {}", caller.short())),
                TextStyle::color(Color::BrightBlack),
            ),
        );
    }
    push_line(&mut out, &ctx.paint(&frame.separator, TextStyle::bold(Color::Cyan)));
    push_line(
        &mut out,
        &ctx.paint(
            &format!(
                "│ {} │ {}",
                pad_right("⏱️  Total Time", NAME_WIDTH),
                format_duration(view.total)
            ),
            TextStyle::bold(Color::Green),
        ),
    );
    push_line(&mut out, &ctx.paint(&frame.separator, TextStyle::color(Color::Cyan)));
    push_line(
        &mut out,
        &ctx.paint(
            &format!("│ {} │ ⏰ Duration", pad_right("📋 Span", NAME_WIDTH)),
            TextStyle::bold(Color::Magenta),
        ),
    );
    push_line(&mut out, &ctx.paint(&frame.separator, TextStyle::color(Color::Cyan)));

    if let Some(message) = empty_message(view) {
        push_line(&mut out, &format!("│ {}", message));
    }

    for entry in &view.entries {
        let duration = entry.display_duration();
        let style = ctx.duration_style(duration);
        let label = pad_right(&truncate(&entry_label(entry), NAME_WIDTH), NAME_WIDTH);
        push_line(
            &mut out,
            &format!(
                "│ {} │ {}",
                ctx.paint(&label, style),
                ctx.paint(&format_duration(duration), style)
            ),
        );
    }

    if let Some(summary) = view.filter_summary() {
        push_line(&mut out, &ctx.paint(&frame.separator, TextStyle::color(Color::Cyan)));
        push_line(
            &mut out,
            &ctx.paint(&format!("│ {}", summary), TextStyle::color(Color::BrightBlack)),
        );
    }

    push_line(&mut out, &ctx.paint(&frame.bottom, TextStyle::bold(Color::Cyan)));
    out
}

/// Compact tree column
pub fn render_minimal(view: &TraceView, ctx: &RenderContext) -> String {
    let frame = BoxFrame::new(NAME_WIDTH + DURATION_WIDTH + 4);
    let mut out = String::new();

    push_line(&mut out, &ctx.paint(&frame.top, TextStyle::bold(Color::Cyan)));

    let title = truncate(&format!("⚡ {}", view.name), NAME_WIDTH);
    push_line(
        &mut out,
        &ctx.paint(
            &format!("│ {} │ {}", pad_right(&title, NAME_WIDTH), format_duration(view.total)),
            TextStyle::bold(Color::Cyan),
        ),
    );
    if let Some(caller) = &view.caller {
        let info = truncate(&format!("📍 File: {}", caller.short()), NAME_WIDTH);
        push_line(
            &mut out,
            &ctx.paint(&format!("│ {} │", pad_right(&info, NAME_WIDTH)), TextStyle::color(Color::BrightBlack)),
        );
    }
    push_line(&mut out, &ctx.paint(&frame.separator, TextStyle::color(Color::Cyan)));

    if let Some(message) = empty_message(view) {
        push_line(&mut out, &format!("│   {}", message));
    }

    for entry in &view.entries {
        let duration = entry.display_duration();
        let style = ctx.duration_style(duration);
        let label = truncate(&format!("  └─ {}", entry_label(entry)), NAME_WIDTH);
        push_line(
            &mut out,
            &format!(
                "│ {} │ {}",
                ctx.paint(&pad_right(&label, NAME_WIDTH), style),
                ctx.paint(&format_duration(duration), style)
            ),
        );
    }

    if let Some(summary) = view.filter_summary() {
        push_line(
            &mut out,
            &ctx.paint(&format!("│ {}", summary), TextStyle::color(Color::BrightBlack)),
        );
    }

    push_line(&mut out, &ctx.paint(&frame.bottom, TextStyle::bold(Color::Cyan)));
    out
}

/// Single-line box borders of a fixed width
pub(crate) struct BoxFrame {
    width: usize,
    pub top: String,
    pub separator: String,
    pub bottom: String,
}

impl BoxFrame {
    pub fn new(width: usize) -> Self {
        let inner = "─".repeat(width.saturating_sub(2));
        Self {
            width,
            top: format!("┌{}┐", inner),
            separator: format!("├{}┤", inner),
            bottom: format!("└{}┘", inner),
        }
    }

    /// `│   text   │` spanning the full width
    pub fn centered(&self, text: &str) -> String {
        format!("│{}│", center(text, self.width.saturating_sub(2)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::FilterConfig;
    use crate::tracer::measurement::Measurement;
    use chrono::Utc;
    use std::time::Duration;

    fn view(millis: &[u64]) -> TraceView {
        let spans: Vec<Measurement> = millis
            .iter()
            .enumerate()
            .map(|(i, ms)| Measurement::new(format!("step {}", i + 1), Duration::from_millis(*ms)))
            .collect();
        let total = spans.iter().map(|m| m.duration).sum();
        TraceView::build("Checkout", &spans, total, FilterConfig::new(), None, Utc::now())
    }

    #[test]
    fn test_default_lists_every_span() {
        let out = render_default(&view(&[40, 60]), &RenderContext::plain());

        assert!(out.contains("| Checkout"));
        assert!(out.contains("| Total time           | 100.00ms"));
        assert!(out.contains("step 1"));
        assert!(out.contains("60.00ms"));
        assert!(!out.contains('\u{1b}'));
    }

    #[test]
    fn test_colorful_box_is_closed() {
        let out = render_colorful(&view(&[5]), &RenderContext::plain());
        let lines: Vec<&str> = out.lines().collect();

        assert!(lines.first().unwrap().starts_with('┌'));
        assert!(lines.last().unwrap().starts_with('└'));
        assert!(out.contains("🚀 Checkout"));
    }

    #[test]
    fn test_minimal_uses_tree_marks() {
        let out = render_minimal(&view(&[5, 7]), &RenderContext::plain());
        assert_eq!(out.matches("└─ step").count(), 2);
    }

    #[test]
    fn test_empty_session_message() {
        let out = render_minimal(&view(&[]), &RenderContext::plain());
        assert!(out.contains("No spans recorded"));
    }

    #[test]
    fn test_box_frame_centering() {
        let frame = BoxFrame::new(10);
        assert_eq!(frame.top, "┌────────┐");
        assert_eq!(frame.centered("ab"), "│   ab   │");
    }
}
