use std::process::{Command, Output};

fn baton(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_baton"))
        .args(args)
        .output()
        .expect("failed to run the baton binary")
}

#[test]
fn test_cli_rejects_empty_text() {
    let output = baton(&["", "1", "1", "--pacing-ms", "0", "--turns", "1"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty(), "nothing should be printed on stdout");
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error: "));
}

#[test]
fn test_cli_rejects_zero_threads() {
    let output = baton(&["abc", "1", "0", "--pacing-ms", "0", "--turns", "1"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty(), "nothing should be printed on stdout");
}

#[test]
fn test_cli_missing_arguments_is_a_usage_error() {
    let output = baton(&["abc"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_cli_bounded_run_prints_turns_then_exits() {
    let output = baton(&["abcdef", "3", "2", "--pacing-ms", "0", "--turns", "2"]);

    assert!(output.status.success(), "status: {:?}", output.status);
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "Thread1: abc\nThread2: def\nProgram exiting.\n"
    );
}

#[test]
fn test_cli_wraps_text_across_turns() {
    let output = baton(&["xyz", "2", "3", "--pacing-ms", "0", "--turns", "3"]);

    assert!(output.status.success(), "status: {:?}", output.status);
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "Thread1: xy\nThread2: zx\nThread3: yz\nProgram exiting.\n"
    );
}
