use quick_trace::OutputStyle;
use std::path::PathBuf;

/// Arguments for the demo command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct DemoArgs {
    /// Output style; `None` keeps the config file's style (or the default)
    pub style: Option<OutputStyle>,

    /// Keep only spans of at least this many milliseconds
    pub slow_only_ms: Option<u64>,

    /// Hide spans shorter than this many milliseconds
    pub hide_fast_ms: Option<u64>,

    /// Group spans within this many milliseconds of each other
    pub group_ms: Option<u64>,

    /// Print only when the session takes at least this many milliseconds
    pub min_total_ms: Option<u64>,

    /// Record without printing
    pub silent: bool,

    /// Disable ANSI colours
    pub no_color: bool,

    /// Advance a manual clock instead of sleeping
    pub simulate: bool,

    /// TOML settings applied before the flags above
    pub config: Option<PathBuf>,
}

impl Default for DemoArgs {
    fn default() -> Self {
        Self {
            style: None,
            slow_only_ms: None,
            hide_fast_ms: None,
            group_ms: None,
            min_total_ms: None,
            silent: false,
            no_color: false,
            simulate: false,
            config: None,
        }
    }
}
