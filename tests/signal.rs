#![cfg(unix)]

use baton::output::MemorySink;
use baton::{PrinterBuilder, Termination, signal};
use std::sync::Arc;
use std::time::Duration;

#[test]
fn test_sigint_terminates_run() {
    let guard = signal::install().expect("hook should install");
    assert!(!Termination::process().is_requested());

    let rc = unsafe { libc::raise(libc::SIGINT) };
    assert_eq!(rc, 0);
    assert!(Termination::process().is_requested());

    let sink = Arc::new(MemorySink::new());
    let summary = PrinterBuilder::new("abc")
        .workers(2)
        .pacing(Duration::ZERO)
        .sink(sink.clone())
        .termination(Termination::process())
        .build()
        .unwrap()
        .run();

    assert_eq!(summary.turns, 0);
    drop(guard);
}
