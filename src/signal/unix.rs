use crate::shutdown::INTERRUPTED;

use libc::{SIG_ERR, SIGINT, c_int, sighandler_t, signal};
use std::io;
use std::sync::atomic::Ordering;

/// Disposition of SIGINT before the hook was installed.
pub(crate) type Previous = sighandler_t;

extern "C" fn on_interrupt(_signum: c_int) {
    INTERRUPTED.store(true, Ordering::SeqCst);
}

/// Installs `on_interrupt` for SIGINT and returns the previous disposition.
pub(crate) fn install() -> io::Result<Previous> {
    let handler = on_interrupt as extern "C" fn(c_int) as sighandler_t;

    let previous = unsafe { signal(SIGINT, handler) };
    if previous == SIG_ERR {
        return Err(io::Error::last_os_error());
    }

    Ok(previous)
}

/// Restores a disposition returned by [`install`].
pub(crate) fn restore(previous: Previous) {
    unsafe { signal(SIGINT, previous) };
}
