//! Destinations for rendered summaries.
//!
//! A summary is always emitted as one complete block so that sessions ending
//! at the same time on different threads never interleave.

use std::fmt::Debug;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Receives a fully rendered summary
pub trait Sink: Debug + Send + Sync + 'static {
    /// Emit `text` with a single write
    fn emit(&self, text: &str) -> io::Result<()>;
}

/// Writes to process stdout while holding the stdout lock
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl Sink for StdoutSink {
    fn emit(&self, text: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        out.write_all(text.as_bytes())?;
        out.flush()
    }
}

/// In-memory sink; clones share the same buffer
#[derive(Debug, Clone, Default)]
pub struct BufferSink {
    buffer: Arc<Mutex<String>>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything emitted so far
    pub fn contents(&self) -> String {
        self.buffer.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// True until something has been emitted
    pub fn is_empty(&self) -> bool {
        self.buffer.lock().unwrap_or_else(|e| e.into_inner()).is_empty()
    }
}

impl Sink for BufferSink {
    fn emit(&self, text: &str) -> io::Result<()> {
        self.buffer
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_str(text);
        Ok(())
    }
}
