use super::Sink;

use std::io::{self, Stdout, Write};
use std::sync::{Mutex, PoisonError};

/// Line-oriented sink over a writer.
///
/// Each record is written as `Thread<id>: <slice>\n` and flushed, so the
/// line is visible before the turn is handed back.
pub struct WriterSink<W> {
    writer: Mutex<W>,
}

impl<W: Write> WriterSink<W> {
    /// Creates a sink writing records to `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the sink and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl WriterSink<Stdout> {
    /// Sink writing to the process standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> Sink for WriterSink<W> {
    fn record(&self, worker: usize, _cursor: usize, slice: &[u8]) -> io::Result<()> {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);

        write!(writer, "Thread{worker}: ")?;
        writer.write_all(slice)?;
        writer.write_all(b"\n")?;
        writer.flush()
    }
}
