//! Tests for loading the decoder configuration.

use std::io::Write;
use strictly_fibs::{EventKind, FibsConfig, Side, decode_reader};

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "log_filter = \"strictly_fibs=debug\"").unwrap();
    writeln!(file, "skip_unrecognized = true").unwrap();
    writeln!(file, "side = \"Black\"").unwrap();

    let config = FibsConfig::from_file(file.path()).unwrap();
    assert_eq!(config.log_filter(), "strictly_fibs=debug");
    assert!(*config.skip_unrecognized());
    assert!(*config.skip_empty());
    assert_eq!(*config.side(), Side::Black);
}

#[test]
fn test_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = FibsConfig::load_or_default(dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, FibsConfig::default());
    assert_eq!(*config.side(), Side::White);
}

#[test]
fn test_unreadable_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let error = FibsConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(error.to_string().contains("Failed to read config file"));
}

#[test]
fn test_skip_settings_filter_events() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "skip_unrecognized = true\nskip_empty = false").unwrap();
    let config = FibsConfig::from_file(file.path()).unwrap();

    let input = "\nJoeBlack rolls 3 and 4.\nnothing to see\n";
    let transcript = decode_reader(input.as_bytes(), &config).unwrap();
    let kinds: Vec<EventKind> = transcript.events.iter().map(|event| event.kind()).collect();
    assert_eq!(kinds, vec![EventKind::Empty, EventKind::Rolls]);
    assert_eq!(transcript.summary[&EventKind::Unrecognized], 1);
}
