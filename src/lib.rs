//! # Baton
//!
//! **Baton** prints a fixed string cooperatively from N worker threads. A
//! single dispatcher passes a turn token round-robin; exactly one worker
//! wakes, prints a contiguous wrapped slice of the string and hands the
//! token back.
//!
//! Nothing runs in parallel on purpose: the crate is a small, complete
//! turn-passing protocol over one mutex and two condition variables. It
//! offers:
//!
//! - **Strict round-robin** turns in worker-id order, wrapping from N to 1
//! - **Mutual exclusion** of output: one record per turn, never interleaved
//! - **Cooperative shutdown** through a termination flag and a SIGINT hook
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use baton::{PrinterBuilder, Termination};
//! use std::time::Duration;
//!
//! let dispatcher = PrinterBuilder::new("abcdef")
//!     .chars_per_turn(3)
//!     .workers(2)
//!     .pacing(Duration::from_millis(100))
//!     .termination(Termination::process())
//!     .build()
//!     .expect("valid configuration");
//!
//! // Thread1: abc
//! // Thread2: def
//! // Thread1: abc
//! // ...
//! let summary = dispatcher.run();
//! println!("{} turns", summary.turns);
//! ```
//!
//! ## Modules
//!
//! - [`output`] — Sinks receiving one record per turn
//! - [`signal`] — Interrupt hook feeding [`Termination::process`]

mod builder;
mod config;
mod error;
mod printer;
mod shutdown;
mod sync;

pub mod output;
pub mod signal;

pub use builder::PrinterBuilder;
pub use config::{Config, DEFAULT_PACING};
pub use error::{ConfigError, Error};
pub use printer::{Dispatcher, RunSummary, WorkerHandle};
pub use shutdown::Termination;
pub use sync::{Token, Turn, TurnState};
