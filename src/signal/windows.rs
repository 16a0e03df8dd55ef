use crate::shutdown::INTERRUPTED;

use std::io;
use std::sync::atomic::Ordering;

use windows_sys::Win32::System::Console::{CTRL_BREAK_EVENT, CTRL_C_EVENT, SetConsoleCtrlHandler};
use windows_sys::core::BOOL;

/// Console handlers are chained rather than replaced, so there is nothing
/// to remember.
pub(crate) type Previous = ();

unsafe extern "system" fn on_ctrl(ctrl_type: u32) -> BOOL {
    if ctrl_type == CTRL_C_EVENT || ctrl_type == CTRL_BREAK_EVENT {
        INTERRUPTED.store(true, Ordering::SeqCst);
        return 1;
    }

    0
}

/// Registers `on_ctrl` in front of the console handler chain.
pub(crate) fn install() -> io::Result<Previous> {
    if unsafe { SetConsoleCtrlHandler(Some(on_ctrl), 1) } == 0 {
        return Err(io::Error::last_os_error());
    }

    Ok(())
}

/// Removes `on_ctrl` from the handler chain.
pub(crate) fn restore(_previous: Previous) {
    unsafe { SetConsoleCtrlHandler(Some(on_ctrl), 0) };
}
