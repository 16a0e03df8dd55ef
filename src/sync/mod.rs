//! Synchronization primitives for the printer.
//!
//! This module provides the shared coordination object that the dispatcher
//! and every worker hold for the duration of a run:
//! - [`TurnState`] — the turn token and read cursor behind one mutex, with
//!   two condition variables multiplexing the two wait reasons.
//!
//! ## Design notes
//!
//! - Every read or write of the token happens with the mutex held.
//! - Waits always re-check their predicate, so spurious wakeups are harmless.
//! - The dispatcher only writes the `Idle -> Held` transition and the worker
//!   holding the turn only writes `Held -> Idle`.

mod turn;

pub use turn::{Token, Turn, TurnState};
