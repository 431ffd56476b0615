//! Configuration and constants for the tracer.

use std::time::Duration;

/// Default print gate: sessions shorter than this render nothing
pub const DEFAULT_MIN_DURATION: Duration = Duration::from_millis(100);

/// Label of the synthetic checkpoint appended by `Tracer::end`
pub const END_LABEL: &str = "End";

/// Current structured output schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

// Defaults for `Tracer::smart_filtered`
pub const DEFAULT_SLOW_THRESHOLD: Duration = Duration::from_millis(50);
pub const DEFAULT_ULTRA_FAST_THRESHOLD: Duration = Duration::from_millis(1);
pub const DEFAULT_SIMILAR_THRESHOLD: Duration = Duration::from_millis(10);

// Column widths shared by the boxed renderers
pub const NAME_WIDTH: usize = 35;
pub const DURATION_WIDTH: usize = 25;
pub const RULE_WIDTH: usize = 70;

/// Message rendered by every style when a session has no real spans
pub const NO_SPANS_MESSAGE: &str = "No spans recorded";

/// Message rendered when spans exist but the filters removed all of them
pub const NO_MATCH_MESSAGE: &str = "No spans matched the active filters";
