//! Destinations for turn records.
//!
//! Every completed turn produces exactly one record, written by the worker
//! that holds the turn while it still holds the turn mutex. Records from
//! different workers therefore never interleave.
//!
//! - [`Sink`] — the trait workers write through,
//! - [`WriterSink`] — formats records as `Thread<id>: <slice>` lines on any
//!   [`std::io::Write`] (stdout by default),
//! - [`MemorySink`] — captures records in memory for embedding and tests.

mod memory;
mod writer;

pub use memory::{MemorySink, Record};
pub use writer::WriterSink;

use std::io;

/// Receiver of per-turn output.
pub trait Sink: Send + Sync {
    /// Writes the slice printed by `worker` during the turn that started at
    /// `cursor`.
    fn record(&self, worker: usize, cursor: usize, slice: &[u8]) -> io::Result<()>;
}
