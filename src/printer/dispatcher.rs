use crate::config::Config;
use crate::error::{ConfigError, Error};
use crate::output::Sink;
use crate::printer::worker::{Worker, WorkerHandle};
use crate::shutdown::Termination;
use crate::sync::TurnState;

use std::io;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Outcome of a finished run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of completed turns.
    pub turns: u64,

    /// Cursor value after the last completed turn.
    pub cursor: usize,
}

/// Round-robin turn dispatcher.
///
/// The `Dispatcher` is responsible for:
/// - granting turns to workers in strict id order, wrapping from N to 1,
/// - waiting for each turn to be handed back before granting the next,
/// - advancing the shared cursor and pacing iterations,
/// - stopping and joining every worker on shutdown.
///
/// It owns the worker threads. Dropping the dispatcher shuts them down.
pub struct Dispatcher {
    /// Shared turn token and cursor.
    turns: Arc<TurnState>,

    /// Handles of the worker threads, indexed by `id - 1`.
    workers: Vec<WorkerHandle>,

    /// Bytes each turn consumes.
    chars_per_turn: usize,

    /// Pause after each completed turn.
    pacing: Duration,

    /// Optional bound on the number of turns.
    max_turns: Option<u64>,

    /// Polled once per iteration.
    termination: Termination,

    /// Id of the worker that held the previous turn, 0 before the first.
    last: usize,

    /// Number of completed turns.
    completed: u64,
}

impl Dispatcher {
    /// Validates `config`, creates the shared state and spawns the workers.
    ///
    /// If a worker thread cannot be created, the workers spawned so far are
    /// stopped and joined before the error is returned.
    pub(crate) fn start(
        config: Config,
        sink: Arc<dyn Sink>,
        termination: Termination,
    ) -> Result<Self, Error> {
        Self::start_with(config, sink, termination, Worker::spawn)
    }

    /// Like [`start`](Self::start), with `spawn` starting each worker.
    pub(crate) fn start_with(
        config: Config,
        sink: Arc<dyn Sink>,
        termination: Termination,
        mut spawn: impl FnMut(Worker) -> io::Result<WorkerHandle>,
    ) -> Result<Self, Error> {
        config.validate()?;

        let len = NonZeroUsize::new(config.text.len()).ok_or(ConfigError::EmptyText)?;
        let turns = Arc::new(TurnState::new(len));

        let mut dispatcher = Self {
            turns: turns.clone(),
            workers: Vec::with_capacity(config.workers),
            chars_per_turn: config.chars_per_turn,
            pacing: config.pacing,
            max_turns: config.max_turns,
            termination,
            last: 0,
            completed: 0,
        };

        for id in 1..=config.workers {
            let worker = Worker::new(
                id,
                config.chars_per_turn,
                config.text.clone(),
                turns.clone(),
                sink.clone(),
            );

            match spawn(worker) {
                Ok(handle) => dispatcher.workers.push(handle),
                Err(source) => {
                    tracing::error!(worker = id, error = %source, "failed to spawn worker");
                    dispatcher.shutdown();
                    return Err(Error::Spawn { id, source });
                }
            }
        }

        tracing::debug!(
            workers = config.workers,
            chars_per_turn = config.chars_per_turn,
            "dispatcher started"
        );

        Ok(dispatcher)
    }

    /// Number of workers taking part in the rotation.
    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Handle of worker `id` (1-based).
    pub fn worker(&self, id: usize) -> Option<&WorkerHandle> {
        id.checked_sub(1).and_then(|index| self.workers.get(index))
    }

    /// Id of the worker that will receive the next turn.
    pub fn next_worker(&self) -> usize {
        next_turn(self.last, self.workers.len())
    }

    /// Shared turn state.
    pub fn turns(&self) -> &TurnState {
        &self.turns
    }

    /// Runs exactly one turn and returns the id of the worker that printed.
    ///
    /// Grants the turn, blocks until the worker hands it back, then advances
    /// the cursor. Does not pace and does not check for termination.
    ///
    /// Returns `None` without granting anything if the next worker has been
    /// asked to stop or its thread has exited.
    pub fn step(&mut self) -> Option<usize> {
        let next = self.next_worker();

        if self
            .worker(next)
            .is_none_or(|worker| worker.is_stopping() || worker.is_finished())
        {
            tracing::warn!(worker = next, "next worker is not running, stopping rotation");
            return None;
        }

        self.turns.advance_turn(next);
        tracing::trace!(worker = next, "turn granted");

        self.turns.wait_idle();
        self.turns.advance_cursor(self.chars_per_turn);

        self.last = next;
        self.completed += 1;

        Some(next)
    }

    /// Drives the rotation until termination is requested or the turn bound
    /// is reached, then shuts the workers down.
    ///
    /// Termination is polled between iterations only, so it is observed at
    /// most one turn plus one pacing interval after it was requested.
    pub fn run(mut self) -> RunSummary {
        loop {
            if self.termination.is_requested() {
                if self.termination.is_process() {
                    tracing::info!(turns = self.completed, "interrupt received, stopping");
                } else {
                    tracing::info!(turns = self.completed, "termination requested, stopping");
                }
                break;
            }

            if self.max_turns.is_some_and(|max| self.completed >= max) {
                tracing::info!(turns = self.completed, "turn limit reached, stopping");
                break;
            }

            if self.step().is_none() {
                break;
            }

            if !self.pacing.is_zero() {
                thread::sleep(self.pacing);
            }
        }

        self.shutdown();

        self.summary()
    }

    /// Turns completed so far and the current cursor.
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            turns: self.completed,
            cursor: self.turns.read_cursor(),
        }
    }

    /// Requests a stop on every worker, then joins them.
    ///
    /// Calling this more than once is a no-op.
    pub fn shutdown(&mut self) {
        if self.workers.iter().all(WorkerHandle::is_joined) {
            return;
        }

        for worker in &self.workers {
            worker.request_stop();
        }

        for worker in &mut self.workers {
            worker.join();
        }

        tracing::info!(turns = self.completed, "all workers stopped");
    }
}

impl Drop for Dispatcher {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Returns the 1-based id following `last` in a rotation of `workers`.
fn next_turn(last: usize, workers: usize) -> usize {
    last % workers + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::MemorySink;

    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_next_turn_starts_at_one() {
        assert_eq!(next_turn(0, 3), 1);
    }

    #[test]
    fn test_next_turn_wraps_to_one() {
        let order: Vec<usize> = (0..7)
            .scan(0, |last, _| {
                *last = next_turn(*last, 3);
                Some(*last)
            })
            .collect();

        assert_eq!(order, vec![1, 2, 3, 1, 2, 3, 1]);
    }

    #[test]
    fn test_next_turn_single_worker() {
        assert_eq!(next_turn(0, 1), 1);
        assert_eq!(next_turn(1, 1), 1);
    }

    #[test]
    fn test_spawn_failure_aborts_and_joins_started_workers() {
        let sink = Arc::new(MemorySink::new());
        let attempts = AtomicUsize::new(0);

        let mut config = Config::new("abc");
        config.workers = 4;

        let result = Dispatcher::start_with(config, sink.clone(), Termination::new(), |worker| {
            attempts.fetch_add(1, Ordering::SeqCst);
            if worker.id() == 3 {
                return Err(io::Error::other("thread limit reached"));
            }
            worker.spawn()
        });

        assert!(
            matches!(result, Err(Error::Spawn { id: 3, .. })),
            "startup should fail on worker 3"
        );
        assert_eq!(
            attempts.load(Ordering::SeqCst),
            3,
            "no worker should be spawned after the failure"
        );
        assert_eq!(
            Arc::strong_count(&sink),
            1,
            "workers 1 and 2 should have been stopped and joined"
        );
        assert!(sink.records().is_empty());
    }
}
