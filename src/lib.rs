//! Quick Trace
//!
//! Lightweight checkpoint timing for Rust code paths. Mark named
//! checkpoints in a sequence of operations; when the sequence ends, a
//! summary of per-span and total durations is printed in one of six styles,
//! optionally filtered and grouped.
//!
//! ## Getting Started
//!
//! ```ignore
//! use quick_trace::Tracer;
//!
//! let mut tracer = Tracer::detailed("Import");
//! tracer.checkpoint("Read file");
//! tracer.checkpoint("Parse rows");
//! tracer.end();
//! ```
//!
//! The `quick-trace` binary runs a demo workload:
//!
//! ```bash
//! quick-trace demo --style table --group 5
//! ```

pub mod aggregator;
pub mod output;
pub mod settings;
pub mod tracer;
pub mod utils;

pub use aggregator::FilterConfig;
pub use output::{ClassificationRules, OutputStyle};
pub use settings::{load_config, TracerConfig};
pub use tracer::{CallerInfo, PrintCondition, Tracer, TracerBuilder};
