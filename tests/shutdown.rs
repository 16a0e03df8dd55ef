use baton::output::MemorySink;
use baton::{PrinterBuilder, Termination};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[test]
fn test_request_stop_is_idempotent() {
    let mut dispatcher = PrinterBuilder::new("abc")
        .workers(3)
        .sink(Arc::new(MemorySink::new()))
        .build()
        .unwrap();

    let worker = dispatcher.worker(2).expect("worker 2 exists");
    worker.request_stop();
    worker.request_stop();
    assert!(worker.is_stopping());

    dispatcher.shutdown();
    dispatcher.shutdown();

    for id in 1..=3 {
        let worker = dispatcher.worker(id).unwrap();
        assert!(worker.is_finished(), "worker {id} should have exited");
        worker.request_stop();
    }
}

#[test]
fn test_step_refuses_stopped_worker() {
    let sink = Arc::new(MemorySink::new());
    let mut dispatcher = PrinterBuilder::new("abcd")
        .chars_per_turn(2)
        .workers(2)
        .sink(sink.clone())
        .build()
        .unwrap();

    assert_eq!(dispatcher.step(), Some(1));

    dispatcher.worker(2).unwrap().request_stop();
    assert_eq!(dispatcher.step(), None);

    assert_eq!(sink.lines(), vec!["Thread1: ab"]);
    assert_eq!(dispatcher.summary().turns, 1);
}

#[test]
fn test_termination_before_run_prints_nothing() {
    let sink = Arc::new(MemorySink::new());
    let termination = Termination::new();
    termination.request();

    let summary = PrinterBuilder::new("abc")
        .workers(2)
        .sink(sink.clone())
        .termination(termination)
        .build()
        .unwrap()
        .run();

    assert_eq!(summary.turns, 0);
    assert!(sink.records().is_empty());
}

#[test]
fn test_termination_stops_running_dispatcher() {
    let sink = Arc::new(MemorySink::new());
    let termination = Termination::new();

    let dispatcher = PrinterBuilder::new("abcdef")
        .chars_per_turn(3)
        .workers(2)
        .pacing(Duration::from_millis(1))
        .sink(sink.clone())
        .termination(termination.clone())
        .build()
        .unwrap();

    let runner = thread::spawn(move || dispatcher.run());

    thread::sleep(Duration::from_millis(50));
    termination.request();

    let summary = runner.join().expect("dispatcher should not panic");

    assert!(summary.turns > 0, "some turns should run before termination");
    assert_eq!(sink.records().len() as u64, summary.turns);
}

#[test]
fn test_dropping_dispatcher_joins_workers() {
    let sink = Arc::new(MemorySink::new());

    let dispatcher = PrinterBuilder::new("abc")
        .workers(4)
        .sink(sink.clone())
        .build()
        .unwrap();

    assert_eq!(Arc::strong_count(&sink), 5);

    drop(dispatcher);

    assert_eq!(
        Arc::strong_count(&sink),
        1,
        "every worker should have exited and released the sink"
    );
}
