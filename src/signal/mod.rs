//! Interrupt hook.
//!
//! [`install`] routes the user interrupt (SIGINT on Unix, Ctrl-C / Ctrl-Break
//! on Windows) to the process-wide flag behind [`Termination::process`].
//! The handler only stores to an atomic; logging happens later, when the
//! dispatcher observes the flag.
//!
//! The concrete implementation is selected at compile time depending on
//! the target operating system.
//!
//! [`Termination::process`]: crate::Termination::process

#[cfg(unix)]
mod unix;

#[cfg(windows)]
mod windows;

#[cfg(unix)]
use unix as platform;

#[cfg(windows)]
use windows as platform;

use std::io;

/// Keeps the interrupt hook installed.
///
/// Dropping the guard restores the handler that was active before
/// [`install`] was called.
#[must_use = "the previous handler is restored as soon as the guard is dropped"]
pub struct SignalGuard {
    previous: platform::Previous,
}

/// Installs the interrupt hook.
pub fn install() -> io::Result<SignalGuard> {
    let previous = platform::install()?;

    tracing::debug!("interrupt hook installed");

    Ok(SignalGuard { previous })
}

impl Drop for SignalGuard {
    fn drop(&mut self) {
        platform::restore(self.previous);
    }
}
