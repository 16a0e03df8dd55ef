use super::Sink;

use std::io;
use std::sync::{Mutex, PoisonError};

/// One completed turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    /// Id of the worker that printed.
    pub worker: usize,

    /// Cursor value at the start of the turn.
    pub cursor: usize,

    /// Bytes printed during the turn.
    pub slice: Vec<u8>,
}

impl Record {
    /// Renders the record the way [`WriterSink`](super::WriterSink) prints
    /// it, without the trailing newline.
    pub fn line(&self) -> String {
        format!("Thread{}: {}", self.worker, String::from_utf8_lossy(&self.slice))
    }
}

/// Sink that keeps every record in memory, in turn order.
#[derive(Default)]
pub struct MemorySink {
    records: Mutex<Vec<Record>>,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the records captured so far.
    pub fn records(&self) -> Vec<Record> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the captured records as output lines.
    pub fn lines(&self) -> Vec<String> {
        self.records().iter().map(Record::line).collect()
    }
}

impl Sink for MemorySink {
    fn record(&self, worker: usize, cursor: usize, slice: &[u8]) -> io::Result<()> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Record {
                worker,
                cursor,
                slice: slice.to_vec(),
            });
        Ok(())
    }
}
