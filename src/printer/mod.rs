//! Turn-passing printer.
//!
//! It is composed of:
//! - [`dispatcher`]: owns the round-robin policy, the cursor and shutdown,
//! - [`worker`]: one thread per worker, printing only while holding the turn.

pub(crate) mod dispatcher;
pub(crate) mod worker;

pub use dispatcher::{Dispatcher, RunSummary};
pub use worker::WorkerHandle;
