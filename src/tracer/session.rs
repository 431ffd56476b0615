//! Tracer session: the measurement log and its builder.
//!
//! A `Tracer` records the time between consecutive checkpoints. `end` appends
//! the final "End" interval, decides whether the session is worth printing,
//! and hands the filtered view to the renderer for the configured style.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use log::{debug, info, warn};

use super::clock::{Clock, SystemClock};
use super::measurement::Measurement;
use super::options::{CallerInfo, PrintCondition};
use super::sink::{Sink, StdoutSink};
use crate::aggregator::FilterConfig;
use crate::output::{render, ClassificationRules, OutputStyle, RenderContext, TraceView};
use crate::settings::TracerConfig;
use crate::utils::config::{
    DEFAULT_SIMILAR_THRESHOLD, DEFAULT_SLOW_THRESHOLD, DEFAULT_ULTRA_FAST_THRESHOLD, END_LABEL,
};

/// A single timing session
///
/// **Public** - main entry point of the library
///
/// # Example
/// ```ignore
/// let mut tracer = Tracer::new("Checkout");
/// tracer.checkpoint("Load cart");
/// tracer.checkpoint("Charge card");
/// tracer.end();
/// ```
pub struct Tracer {
    name: String,
    measurements: Vec<Measurement>,
    start: Instant,
    last_checkpoint: Instant,
    enabled: bool,
    silent: bool,
    style: OutputStyle,
    print_condition: PrintCondition,
    filters: FilterConfig,
    caller: Option<CallerInfo>,
    clock: Arc<dyn Clock>,
    sink: Arc<dyn Sink>,

    /// `None` follows the terminal detection of the `colored` crate
    color: Option<bool>,
    rules: ClassificationRules,
    started_at: DateTime<Utc>,

    /// Session total frozen by `end`
    ended_total: Option<Duration>,

    /// Positions of the "End" entries appended by `end`
    end_indices: Vec<usize>,
}

impl Tracer {
    /// Start configuring a tracer
    pub fn builder(name: impl Into<String>) -> TracerBuilder {
        TracerBuilder::new(name)
    }

    /// Enabled tracer with the default style and print gate
    pub fn new(name: impl Into<String>) -> Self {
        Self::builder(name).build()
    }

    pub fn colorful(name: impl Into<String>) -> Self {
        Self::builder(name).style(OutputStyle::Colorful).build()
    }

    pub fn minimal(name: impl Into<String>) -> Self {
        Self::builder(name).style(OutputStyle::Minimal).build()
    }

    pub fn detailed(name: impl Into<String>) -> Self {
        Self::builder(name).style(OutputStyle::Detailed).build()
    }

    pub fn table(name: impl Into<String>) -> Self {
        Self::builder(name).style(OutputStyle::Table).build()
    }

    pub fn structured(name: impl Into<String>) -> Self {
        Self::builder(name).style(OutputStyle::Structured).build()
    }

    /// Records measurements but never prints
    pub fn silent_session(name: impl Into<String>) -> Self {
        Self::builder(name).silent(true).build()
    }

    /// Every call is a no-op
    pub fn disabled(name: impl Into<String>) -> Self {
        Self::builder(name).enabled(false).build()
    }

    /// Detailed style with slow-only 50ms, hide-below 1ms and group ±10ms
    pub fn smart_filtered(name: impl Into<String>) -> Self {
        Self::builder(name)
            .style(OutputStyle::Detailed)
            .smart_filter(
                DEFAULT_SLOW_THRESHOLD,
                DEFAULT_ULTRA_FAST_THRESHOLD,
                DEFAULT_SIMILAR_THRESHOLD,
            )
            .build()
    }

    /// Record the time since the previous checkpoint under `label`
    pub fn checkpoint(&mut self, label: impl Into<String>) {
        if !self.enabled {
            return;
        }
        let now = self.clock.now();
        let duration = now.saturating_duration_since(self.last_checkpoint);
        self.measurements.push(Measurement::new(label, duration));
        self.last_checkpoint = now;
    }

    /// Finish the session and print its summary
    ///
    /// **Public** - ends the session
    ///
    /// Appends the "End" checkpoint, then renders and emits the summary
    /// when the session is not silent and the print condition holds.
    ///
    /// # Returns
    /// The emitted text, or `None` when nothing was printed
    pub fn end(&mut self) -> Option<String> {
        if !self.enabled {
            return None;
        }

        self.checkpoint(END_LABEL);
        self.end_indices.push(self.measurements.len() - 1);
        self.ended_total = Some(self.total_duration());

        if !self.print_condition.should_print(self) {
            debug!("'{}' below print condition {:?}", self.name, self.print_condition);
            return None;
        }
        if self.silent {
            debug!("'{}' is silent, skipping output", self.name);
            return None;
        }

        let text = self.render();
        if let Err(e) = self.sink.emit(&text) {
            warn!("Failed to emit summary for '{}': {}", self.name, e);
        }

        info!(
            "'{}' finished in {:?} with {} spans",
            self.name,
            self.ended_total.unwrap_or_default(),
            self.real_measurements().len()
        );
        Some(text)
    }

    /// Render the session in its current style, ignoring gating and silence
    pub fn render(&self) -> String {
        render(&self.view(), self.style, &self.render_context())
    }

    /// Snapshot handed to the renderers
    ///
    /// Uses the frozen total once the session has ended, the live one before.
    pub fn view(&self) -> TraceView {
        TraceView::build(
            self.name.clone(),
            &self.real_measurements(),
            self.ended_total.unwrap_or_else(|| self.total_duration()),
            self.filters,
            self.caller.clone(),
            self.started_at,
        )
    }

    /// Measurements without the "End" entries appended by `end`
    ///
    /// **Private** - entries are excluded by position, not by label, so
    /// checkpoints recorded after `end` stay visible
    fn real_measurements(&self) -> Vec<Measurement> {
        self.measurements
            .iter()
            .enumerate()
            .filter(|(i, _)| !self.end_indices.contains(i))
            .map(|(_, m)| m.clone())
            .collect()
    }

    fn render_context(&self) -> RenderContext {
        let colorize = self
            .color
            .unwrap_or_else(|| colored::control::SHOULD_COLORIZE.should_colorize());
        RenderContext::new(colorize, self.rules.clone())
    }

    // --- runtime mutators ---

    /// Disabling keeps recorded measurements readable
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn set_silent(&mut self, silent: bool) {
        self.silent = silent;
    }

    pub fn set_style(&mut self, style: OutputStyle) {
        self.style = style;
    }

    pub fn set_print_condition(&mut self, condition: PrintCondition) {
        self.print_condition = condition;
    }

    // --- accessors ---

    /// Time elapsed since the session started, read from the clock
    pub fn total_duration(&self) -> Duration {
        self.clock.now().saturating_duration_since(self.start)
    }

    /// Every recorded measurement, including any trailing "End"
    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_silent(&self) -> bool {
        self.silent
    }

    pub fn style(&self) -> OutputStyle {
        self.style
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn caller(&self) -> Option<&CallerInfo> {
        self.caller.as_ref()
    }

    pub fn filters(&self) -> &FilterConfig {
        &self.filters
    }

    pub fn has_active_filters(&self) -> bool {
        self.filters.is_active()
    }

    /// "slow>50ms, hide<1ms, group±10ms"; empty when no filter is on
    pub fn active_filters_info(&self) -> String {
        self.filters.descriptions().join(", ")
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// True once `end` has run
    pub fn is_ended(&self) -> bool {
        self.ended_total.is_some()
    }
}

impl fmt::Debug for Tracer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tracer")
            .field("name", &self.name)
            .field("measurements", &self.measurements)
            .field("enabled", &self.enabled)
            .field("silent", &self.silent)
            .field("style", &self.style)
            .field("print_condition", &self.print_condition)
            .field("filters", &self.filters)
            .field("caller", &self.caller)
            .field("started_at", &self.started_at)
            .field("ended_total", &self.ended_total)
            .field("end_indices", &self.end_indices)
            .finish_non_exhaustive()
    }
}

/// Builder for `Tracer`
///
/// Single-valued options keep the last value applied. Filter options add up.
#[derive(Debug)]
pub struct TracerBuilder {
    name: String,
    enabled: bool,
    silent: bool,
    style: OutputStyle,
    print_condition: PrintCondition,
    filters: FilterConfig,
    caller: Option<CallerInfo>,
    clock: Arc<dyn Clock>,
    sink: Arc<dyn Sink>,
    color: Option<bool>,
    rules: ClassificationRules,
}

impl TracerBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enabled: true,
            silent: false,
            style: OutputStyle::default(),
            print_condition: PrintCondition::default(),
            filters: FilterConfig::new(),
            caller: None,
            clock: Arc::new(SystemClock),
            sink: Arc::new(StdoutSink),
            color: None,
            rules: ClassificationRules::default(),
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    pub fn style(mut self, style: OutputStyle) -> Self {
        self.style = style;
        self
    }

    /// Print only when the whole session took at least `min`
    pub fn min_total_duration(self, min: Duration) -> Self {
        self.print_condition(PrintCondition::MinTotalDuration(min))
    }

    /// Print only when some interval took at least `min`
    pub fn min_span_duration(self, min: Duration) -> Self {
        self.print_condition(PrintCondition::MinSpanDuration(min))
    }

    /// Print only when `predicate` returns true
    pub fn print_when(self, predicate: impl Fn(&Tracer) -> bool + Send + Sync + 'static) -> Self {
        self.print_condition(PrintCondition::custom(predicate))
    }

    pub fn print_condition(mut self, condition: PrintCondition) -> Self {
        self.print_condition = condition;
        self
    }

    /// Keep only spans of at least `threshold`
    pub fn show_slow_only(mut self, threshold: Duration) -> Self {
        self.filters.slow_only = Some(threshold);
        self
    }

    /// Drop spans shorter than `threshold`
    pub fn hide_ultra_fast(mut self, threshold: Duration) -> Self {
        self.filters.hide_ultra_fast = Some(threshold);
        self
    }

    /// Merge spans within `threshold` of a group's first span
    pub fn group_similar(mut self, threshold: Duration) -> Self {
        self.filters.group_similar = Some(threshold);
        self
    }

    /// Set all three filters at once; a zero threshold leaves that filter as it was
    pub fn smart_filter(mut self, slow: Duration, ultra_fast: Duration, similar: Duration) -> Self {
        self.filters.merge_smart(slow, ultra_fast, similar);
        self
    }

    pub fn caller(mut self, caller: CallerInfo) -> Self {
        self.caller = Some(caller);
        self
    }

    pub fn clock(mut self, clock: impl Clock) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn sink(mut self, sink: impl Sink) -> Self {
        self.sink = Arc::new(sink);
        self
    }

    /// Request colour on or off instead of detecting the terminal
    ///
    /// `colored` still applies its global override (`NO_COLOR`, non-tty
    /// output) when the text is displayed, so `true` is a request only.
    pub fn color(mut self, color: bool) -> Self {
        self.color = Some(color);
        self
    }

    pub fn rules(mut self, rules: ClassificationRules) -> Self {
        self.rules = rules;
        self
    }

    /// Apply settings loaded from a config file
    pub fn config(mut self, config: &TracerConfig) -> Self {
        self.enabled = config.enabled;
        self.silent = config.silent;
        self.style = config.style;
        if let Some(condition) = config.print_condition() {
            self.print_condition = condition;
        }
        if let Some(color) = config.color {
            self.color = Some(color);
        }
        config.filters.apply(&mut self.filters);
        self
    }

    /// Start the session clock and return the tracer
    pub fn build(self) -> Tracer {
        let now = self.clock.now();
        debug!(
            "Starting tracer '{}' (style: {}, filters: {:?})",
            self.name, self.style, self.filters
        );

        Tracer {
            name: self.name,
            measurements: Vec::new(),
            start: now,
            last_checkpoint: now,
            enabled: self.enabled,
            silent: self.silent,
            style: self.style,
            print_condition: self.print_condition,
            filters: self.filters,
            caller: self.caller,
            clock: self.clock,
            sink: self.sink,
            color: self.color,
            rules: self.rules,
            started_at: Utc::now(),
            ended_total: None,
            end_indices: Vec::new(),
        }
    }
}
