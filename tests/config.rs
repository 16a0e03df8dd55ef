use baton::output::MemorySink;
use baton::{Config, ConfigError, Error, PrinterBuilder};
use std::sync::Arc;
use std::time::Duration;

#[test]
fn test_empty_text_is_rejected() {
    let result = PrinterBuilder::new("").workers(2).build();

    assert!(
        matches!(result, Err(Error::Config(ConfigError::EmptyText))),
        "empty text should be a configuration error"
    );
}

#[test]
fn test_zero_workers_is_rejected() {
    let result = PrinterBuilder::new("abc").workers(0).build();

    assert!(
        matches!(result, Err(Error::Config(ConfigError::NoWorkers))),
        "zero workers should be a configuration error"
    );
}

#[test]
fn test_zero_chars_per_turn_is_valid() {
    let mut config = Config::new("abc");
    config.chars_per_turn = 0;

    assert_eq!(config.validate(), Ok(()));
}

#[test]
fn test_config_defaults() {
    let config = Config::new("abc");

    assert_eq!(&*config.text, b"abc");
    assert_eq!(config.chars_per_turn, 1);
    assert_eq!(config.workers, 1);
    assert_eq!(config.pacing, Duration::from_secs(1));
    assert_eq!(config.max_turns, None);
}

#[test]
fn test_builder_from_config() {
    let mut config = Config::new("abcdef");
    config.chars_per_turn = 3;
    config.workers = 2;
    config.pacing = Duration::ZERO;
    config.max_turns = Some(2);

    let sink = Arc::new(MemorySink::new());
    PrinterBuilder::from_config(config)
        .sink(sink.clone())
        .build()
        .unwrap()
        .run();

    assert_eq!(sink.lines(), vec!["Thread1: abc", "Thread2: def"]);
}

#[test]
fn test_error_labels() {
    assert_eq!(
        Error::from(ConfigError::EmptyText).as_label(),
        "config_empty_text"
    );
    assert_eq!(
        Error::from(ConfigError::NoWorkers).as_label(),
        "config_no_workers"
    );
}
