use crate::config::Config;
use crate::error::Error;
use crate::output::{Sink, WriterSink};
use crate::printer::Dispatcher;
use crate::shutdown::Termination;

use std::sync::Arc;
use std::time::Duration;

/// Builder for configuring and starting a printing run.
///
/// `PrinterBuilder` collects the run parameters, then [`build`](Self::build)
/// validates them, creates the shared turn state and spawns every worker
/// before returning the [`Dispatcher`] that drives them.
///
/// # Examples
///
/// ```rust,no_run
/// use baton::PrinterBuilder;
///
/// let dispatcher = PrinterBuilder::new("abcdef")
///     .chars_per_turn(3)
///     .workers(2)
///     .max_turns(4)
///     .build()
///     .unwrap();
///
/// dispatcher.run();
/// ```
pub struct PrinterBuilder {
    config: Config,

    /// Destination of turn records. Standard output when unset.
    sink: Option<Arc<dyn Sink>>,

    /// Checked by the dispatcher between turns.
    termination: Termination,
}

impl PrinterBuilder {
    /// Creates a builder for `text`.
    ///
    /// By default one worker prints one byte per turn, turns are paced one
    /// second apart and the run lasts until terminated.
    pub fn new(text: impl AsRef<[u8]>) -> Self {
        Self {
            config: Config::new(text),
            sink: None,
            termination: Termination::new(),
        }
    }

    /// Creates a builder from an existing configuration.
    pub fn from_config(config: Config) -> Self {
        Self {
            config,
            sink: None,
            termination: Termination::new(),
        }
    }

    /// Sets the number of bytes printed per turn.
    pub fn chars_per_turn(mut self, n: usize) -> Self {
        self.config.chars_per_turn = n;
        self
    }

    /// Sets the number of worker threads.
    ///
    /// Zero is rejected by [`build`](Self::build).
    pub fn workers(mut self, n: usize) -> Self {
        self.config.workers = n;
        self
    }

    /// Sets the pause taken after each turn.
    pub fn pacing(mut self, pacing: Duration) -> Self {
        self.config.pacing = pacing;
        self
    }

    /// Stops the run after `turns` completed turns.
    pub fn max_turns(mut self, turns: u64) -> Self {
        self.config.max_turns = Some(turns);
        self
    }

    /// Sends turn records to `sink` instead of standard output.
    pub fn sink(mut self, sink: Arc<dyn Sink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Uses `termination` to end the run.
    pub fn termination(mut self, termination: Termination) -> Self {
        self.termination = termination;
        self
    }

    /// Validates the configuration and starts the workers.
    ///
    /// Fails with [`Error::Config`] before any thread is spawned, or with
    /// [`Error::Spawn`] after stopping the workers already started.
    pub fn build(self) -> Result<Dispatcher, Error> {
        let sink: Arc<dyn Sink> = match self.sink {
            Some(sink) => sink,
            None => Arc::new(WriterSink::stdout()),
        };

        Dispatcher::start(self.config, sink, self.termination)
    }
}
