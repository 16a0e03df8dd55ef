use crate::output::Sink;
use crate::sync::TurnState;

use std::any::Any;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};

/// A printing worker.
///
/// Each worker runs on its own thread and cycles through
/// `WaitingForTurn -> Printing -> WaitingForTurn` until it is stopped:
/// 1. Check the stop flag
/// 2. Wait until the turn token names this worker
/// 3. Print `chars_per_turn` bytes starting at the cursor, wrapping
/// 4. Hand the token back to the dispatcher
pub(crate) struct Worker {
    /// Identifier of the worker, in `1..=N`.
    id: usize,

    /// Bytes printed per turn.
    chars_per_turn: usize,

    /// Shared text.
    text: Arc<[u8]>,

    /// Shared turn token and cursor.
    turns: Arc<TurnState>,

    /// Destination of the printed slices.
    sink: Arc<dyn Sink>,

    /// Set once the worker has been asked to stop.
    stop: Arc<AtomicBool>,
}

impl Worker {
    pub(crate) fn new(
        id: usize,
        chars_per_turn: usize,
        text: Arc<[u8]>,
        turns: Arc<TurnState>,
        sink: Arc<dyn Sink>,
    ) -> Self {
        Self {
            id,
            chars_per_turn,
            text,
            turns,
            sink,
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Identifier of the worker.
    pub(crate) fn id(&self) -> usize {
        self.id
    }

    /// Starts the worker on a new named thread.
    pub(crate) fn spawn(self) -> io::Result<WorkerHandle> {
        let id = self.id;
        let stop = self.stop.clone();
        let turns = self.turns.clone();

        let thread = thread::Builder::new()
            .name(format!("baton-worker-{id}"))
            .spawn(move || self.run())?;

        Ok(WorkerHandle {
            id,
            stop,
            turns,
            thread: Some(thread),
        })
    }

    /// Runs the worker loop until a stop is observed at a wait point.
    ///
    /// A stop never interrupts a print in progress. A panicking sink is
    /// contained to the turn it happened in; the worker keeps its place in
    /// the rotation.
    fn run(self) {
        tracing::debug!(worker = self.id, "worker started");

        let mut slice = Vec::new();

        while !self.stop.load(Ordering::Acquire) {
            let Some(turn) = self.turns.wait_for_turn(self.id, &self.stop) else {
                break;
            };

            let cursor = turn.cursor();
            fill_slice(&mut slice, &self.text, cursor, self.chars_per_turn);

            let recorded =
                panic::catch_unwind(AssertUnwindSafe(|| self.sink.record(self.id, cursor, &slice)));

            match recorded {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    tracing::error!(worker = self.id, error = %err, "failed to write turn output");
                }
                Err(payload) => {
                    tracing::error!(
                        worker = self.id,
                        panic = panic_message(payload.as_ref()),
                        "sink panicked while writing turn output"
                    );
                }
            }

            tracing::trace!(worker = self.id, cursor, "turn completed");

            turn.release();
        }

        tracing::debug!(worker = self.id, "worker stopped");
    }
}

/// Owner-side handle of a running worker.
pub struct WorkerHandle {
    id: usize,
    stop: Arc<AtomicBool>,
    turns: Arc<TurnState>,
    thread: Option<JoinHandle<()>>,
}

impl WorkerHandle {
    /// Identifier of the worker.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Asks the worker to stop at its next wait point.
    ///
    /// Requesting a stop on a worker that is already stopping or has exited
    /// is a no-op and never blocks.
    pub fn request_stop(&self) {
        if !self.stop.swap(true, Ordering::AcqRel) {
            tracing::debug!(worker = self.id, "stop requested");
        }

        self.turns.wake_all();
    }

    /// Returns `true` once a stop has been requested.
    pub fn is_stopping(&self) -> bool {
        self.stop.load(Ordering::Acquire)
    }

    /// Returns `true` once the worker thread has exited.
    pub fn is_finished(&self) -> bool {
        self.thread.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Returns `true` once the handle has been joined.
    pub(crate) fn is_joined(&self) -> bool {
        self.thread.is_none()
    }

    /// Waits for the worker thread to exit.
    ///
    /// This should be called after [`request_stop`](Self::request_stop).
    pub(crate) fn join(&mut self) {
        if let Some(thread) = self.thread.take()
            && thread.join().is_err()
        {
            tracing::warn!(worker = self.id, "worker panicked");
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}

/// Fills `slice` with `count` bytes of `text` starting at `cursor`,
/// wrapping around the end of the text.
fn fill_slice(slice: &mut Vec<u8>, text: &[u8], cursor: usize, count: usize) {
    slice.clear();
    slice.extend((0..count).map(|i| text[(cursor + i) % text.len()]));
}
