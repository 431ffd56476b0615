//! Style dispatch.
//!
//! Styles map to renderer functions through a lookup table; a new style is a
//! new enum variant plus one table row.

use super::{detailed, json, table, text};
use super::{OutputStyle, RenderContext, TraceView};
use log::debug;

/// Renderer signature shared by every style
pub type RenderFn = fn(&TraceView, &RenderContext) -> String;

const RENDERERS: [(OutputStyle, RenderFn); 6] = [
    (OutputStyle::Default, text::render_default),
    (OutputStyle::Colorful, text::render_colorful),
    (OutputStyle::Minimal, text::render_minimal),
    (OutputStyle::Detailed, detailed::render_detailed),
    (OutputStyle::Table, table::render_table),
    (OutputStyle::Structured, json::render_structured_text),
];

/// Look up the renderer for a style
pub fn renderer_for(style: OutputStyle) -> RenderFn {
    RENDERERS
        .iter()
        .find(|(s, _)| *s == style)
        .map(|(_, f)| *f)
        .unwrap_or(text::render_default)
}

/// Render a view in the given style
///
/// **Public** - main entry point for presentation
///
/// # Returns
/// The complete text block, ending with a newline
pub fn render(view: &TraceView, style: OutputStyle, ctx: &RenderContext) -> String {
    debug!(
        "Rendering '{}' as {} ({} entries) | {}",
        view.name,
        style,
        view.entries.len(),
        view.stats.summary()
    );
    renderer_for(style)(view, ctx)
}
