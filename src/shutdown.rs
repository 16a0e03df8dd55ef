//! Cooperative termination of a run.
//!
//! The dispatcher polls a [`Termination`] once per iteration boundary. A
//! termination is either owned (requested programmatically through
//! [`Termination::request`]) or bound to the process-wide interrupt flag
//! that the [`signal`](crate::signal) hook sets.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Process-wide interrupt flag.
///
/// Written only from the interrupt handler, which must stay
/// async-signal-safe: a single atomic store and nothing else.
pub(crate) static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// Flag checked by the dispatcher between turns.
///
/// Cloning a `Termination` shares the underlying flag.
#[derive(Clone, Debug)]
pub struct Termination {
    flag: Flag,
}

#[derive(Clone, Debug)]
enum Flag {
    Owned(Arc<AtomicBool>),
    Process(&'static AtomicBool),
}

impl Termination {
    /// Creates a termination that is only triggered by [`request`](Self::request).
    pub fn new() -> Self {
        Self {
            flag: Flag::Owned(Arc::new(AtomicBool::new(false))),
        }
    }

    /// Returns the termination bound to the process interrupt flag.
    pub fn process() -> Self {
        Self {
            flag: Flag::Process(&INTERRUPTED),
        }
    }

    /// Requests termination. Calling it more than once has no further effect.
    pub fn request(&self) {
        self.atomic().store(true, Ordering::Release);
    }

    /// Returns `true` once termination has been requested.
    pub fn is_requested(&self) -> bool {
        self.atomic().load(Ordering::Acquire)
    }

    /// Returns `true` if this termination is bound to the process interrupt
    /// flag.
    pub fn is_process(&self) -> bool {
        matches!(self.flag, Flag::Process(_))
    }

    fn atomic(&self) -> &AtomicBool {
        match &self.flag {
            Flag::Owned(flag) => flag,
            Flag::Process(flag) => flag,
        }
    }
}

impl Default for Termination {
    fn default() -> Self {
        Self::new()
    }
}
