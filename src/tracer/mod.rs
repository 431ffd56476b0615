//! Measurement log.
//!
//! A `Tracer` records named checkpoints and, on `end`, prints a summary of
//! the intervals between them:
//! - `session`: the tracer itself and its builder
//! - `measurement`: recorded intervals and grouped summaries
//! - `options`: print gating and caller metadata
//! - `clock`, `sink`: injectable time source and output destination

pub mod clock;
pub mod measurement;
pub mod options;
pub mod session;
pub mod sink;

// Re-export main types
pub use clock::{Clock, ManualClock, SystemClock};
pub use measurement::{DisplayEntry, GroupedMeasurement, Measurement};
pub use options::{CallerInfo, PrintCondition, PrintPredicate};
pub use session::{Tracer, TracerBuilder};
pub use sink::{BufferSink, Sink, StdoutSink};

/// Start a `TracerBuilder` that records the calling file and line
///
/// # Example
/// ```ignore
/// let mut tracer = quick_trace::tracer!("Import").style(OutputStyle::Table).build();
/// ```
#[macro_export]
macro_rules! tracer {
    ($name:expr) => {
        $crate::tracer::Tracer::builder($name)
            .caller($crate::tracer::CallerInfo::new(file!(), line!()))
    };
}
