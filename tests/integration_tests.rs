//! Integration tests for the logger factory
//!
//! These tests verify:
//! - Console routing by level range
//! - File destinations with per-destination ranges
//! - Replace-once truncation across loggers and factory instances
//! - Idempotent logger assembly
//! - Default session layout and JSON configuration

use logger_factory::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

struct Harness {
    factory: LoggerFactory,
    stdout: MemoryAppender,
    stderr: MemoryAppender,
}

fn harness() -> Harness {
    let stdout = MemoryAppender::new("stdout");
    let stderr = MemoryAppender::new("stderr");
    let factory = LoggerFactory::builder()
        .console_out_appender(stdout.clone())
        .console_err_appender(stderr.clone())
        .build();
    Harness {
        factory,
        stdout,
        stderr,
    }
}

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .expect("Failed to read log file")
        .lines()
        .map(String::from)
        .collect()
}

#[test]
fn test_info_goes_to_console_out_only() {
    let h = harness();
    let logger = h.factory.get_logger("svc").unwrap();

    logger.info("hello");

    assert_eq!(h.stdout.len(), 1);
    assert!(h.stdout.lines()[0].contains("INFO - hello"));
    assert!(h.stderr.is_empty());
}

#[test]
fn test_critical_reaches_file_and_console_err() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let errors = temp_dir.path().join("errors.log");

    let h = harness();
    h.factory.add_output_file(
        &errors,
        LogLevel::WARN,
        LogLevel::CRITICAL,
        WriteMode::Append,
    );
    let logger = h
        .factory
        .get_logger_with_level("svc", LogLevel::DEBUG)
        .unwrap();

    logger.debug("not an error");
    logger.critical("meltdown");

    let lines = read_lines(&errors);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("CRITICAL - meltdown"));
    assert_eq!(h.stderr.len(), 1);
    assert!(h.stderr.lines()[0].contains("meltdown"));
    assert_eq!(h.stdout.len(), 1);
}

#[test]
fn test_replace_once_scenario_across_runs() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("out").join("app.log");

    let run = |first_message: &str| {
        let h = harness();
        h.factory.register(
            Destination::new(&log_file)
                .with_levels(LogLevel::DEBUG, LogLevel::CRITICAL)
                .with_mode(WriteMode::ReplaceOnce),
        );
        let logger = h
            .factory
            .get_logger_with_level("svc", LogLevel::DEBUG)
            .unwrap();
        logger.debug(first_message);
        logger.critical("second");
        logger.flush().unwrap();
    };

    run("first run");
    let lines = read_lines(&log_file);
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("DEBUG - first run \t["));
    assert!(lines[1].contains("CRITICAL - second \t["));

    // A fresh factory has a fresh ledger, so the file is replaced again
    run("second run");
    let lines = read_lines(&log_file);
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("second run"));
}

#[test]
fn test_replace_once_shared_by_two_loggers() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("latest.log");
    fs::write(&log_file, "stale\n").unwrap();

    let h = harness();
    h.factory.add_output_file(
        &log_file,
        LogLevel::DEBUG,
        LogLevel::CRITICAL,
        WriteMode::ReplaceOnce,
    );

    let ingest = h.factory.get_logger("ingest").unwrap();
    ingest.info("from ingest");
    let train = h.factory.get_logger("train").unwrap();
    train.info("from train");

    let lines = read_lines(&log_file);
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("from ingest"));
    assert!(lines[1].contains("from train"));
    assert!(ingest.sinks()[2].shares_appender_with(&train.sinks()[2]));
}

#[test]
fn test_repeat_get_logger_keeps_sink_count() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let h = harness();
    for name in ["a.log", "b.log", "c.log"] {
        h.factory.register(Destination::new(temp_dir.path().join(name)));
    }

    let first = h.factory.get_logger("x").unwrap();
    let second = h.factory.get_logger("x").unwrap();

    assert_eq!(first.sink_count(), 2 + h.factory.destinations().len());
    assert_eq!(second.sink_count(), first.sink_count());

    second.info("once");
    assert_eq!(h.stdout.len(), 1);
    assert_eq!(read_lines(&temp_dir.path().join("b.log")).len(), 1);
}

#[test]
fn test_threshold_changes_keep_sink_identities() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let h = harness();
    h.factory.register(
        Destination::new(temp_dir.path().join("app.log"))
            .with_levels(LogLevel::DEBUG, LogLevel::CRITICAL),
    );

    let logger = h.factory.get_logger_with_level("x", LogLevel::WARN).unwrap();
    let before: Vec<(SinkId, SinkKind)> = logger
        .sinks()
        .iter()
        .map(|s| (s.id(), s.kind().clone()))
        .collect();
    logger.info("suppressed");

    let logger = h.factory.get_logger_with_level("x", LogLevel::DEBUG).unwrap();
    let after: Vec<(SinkId, SinkKind)> = logger
        .sinks()
        .iter()
        .map(|s| (s.id(), s.kind().clone()))
        .collect();
    logger.debug("visible");

    assert_eq!(before, after);
    assert_eq!(h.stdout.len(), 1);
    assert!(h.stdout.lines()[0].contains("visible"));
    assert_eq!(logger.metrics().suppressed(), 1);
}

#[test]
fn test_destinations_attach_in_registration_order() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let h = harness();
    let paths: Vec<_> = ["z.log", "a.log", "m.log"]
        .iter()
        .map(|name| temp_dir.path().join(name))
        .collect();
    for path in &paths {
        h.factory.register(Destination::new(path));
    }

    let logger = h.factory.get_logger("ordered").unwrap();
    let kinds: Vec<SinkKind> = logger.sinks().iter().map(|s| s.kind().clone()).collect();

    let mut expected = vec![SinkKind::ConsoleOut, SinkKind::ConsoleErr];
    expected.extend(paths.iter().cloned().map(SinkKind::File));
    assert_eq!(kinds, expected);
}

#[test]
fn test_file_and_console_templates_are_independent() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("app.log");

    let h = harness();
    h.factory.set_console_format("console: {message}").unwrap();
    h.factory.set_file_format("file: {logger} {level:<8}{message}").unwrap();
    h.factory.register(Destination::new(&log_file));

    let logger = h.factory.get_logger("svc").unwrap();
    logger.warn("careful");

    // Changing templates later does not touch sinks already attached
    h.factory.set_file_format("changed {message}").unwrap();
    logger.warn("still old format");

    assert_eq!(
        read_lines(&log_file),
        vec!["file: svc WARN    careful", "file: svc WARN    still old format"]
    );
    assert_eq!(h.stderr.lines()[0], "console: careful");
}

#[test]
fn test_default_file_template_shape() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("app.log");

    let h = harness();
    h.factory.set_timestamp_format(TimestampFormat::Iso8601);
    h.factory.register(Destination::new(&log_file));
    let logger = h.factory.get_logger("svc").unwrap();

    let line = line!() + 1;
    logger.error("shape check");

    let lines = read_lines(&log_file);
    let (timestamp, rest) = lines[0].split_once(' ').unwrap();
    assert!(timestamp.ends_with('Z'), "{}", timestamp);
    assert_eq!(
        rest,
        format!("ERROR - shape check \t[integration_tests.rs:{}]", line)
    );
}

#[test]
fn test_log_injection_prevention() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("injection_test.log");

    let h = harness();
    h.factory.register(Destination::new(&log_file));
    let logger = h.factory.get_logger("svc").unwrap();

    logger.info("User login\nCRITICAL fake entry\nINFO continuation");

    let lines = read_lines(&log_file);
    assert_eq!(lines.len(), 1, "Log should be a single line, not multiple");
    assert!(lines[0].contains("\\n"));
}

#[test]
fn test_install_default_destinations() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let h = harness();

    let session_dir = h.factory.install_default_destinations(temp_dir.path()).unwrap();
    assert!(session_dir.starts_with(temp_dir.path()));

    let logger = h
        .factory
        .get_logger_with_level("pipeline", LogLevel::DEBUG)
        .unwrap();
    logger.debug("detail");
    logger.warn("problem");

    assert_eq!(read_lines(&session_dir.join("Latest_ERRORS.log")).len(), 1);
    assert_eq!(read_lines(&session_dir.join("Latest.log")).len(), 2);
    assert_eq!(read_lines(&session_dir.join("Debug.log")).len(), 2);
    assert!(h.factory.is_replaced(session_dir.join("Latest.log")));
    assert!(!h.factory.is_replaced(session_dir.join("Debug.log")));
}

#[test]
fn test_factory_from_json_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("cfg.log");
    let config_file = temp_dir.path().join("logging.json");

    let config = FactoryConfig {
        file_format: "{level} {message}".parse().unwrap(),
        destinations: vec![Destination::new(&log_file)
            .with_levels(LogLevel::ERROR, LogLevel::CRITICAL)
            .with_mode(WriteMode::ReplaceOnce)],
        ..FactoryConfig::default()
    };
    config.save_json_file(&config_file).unwrap();

    let factory = LoggerFactory::from_config(FactoryConfig::from_json_file(&config_file).unwrap());
    let logger = factory.get_logger("cfg").unwrap();
    logger.warn("below file range");
    logger.error("in range");

    assert_eq!(read_lines(&log_file), vec!["ERROR in range"]);
}

#[test]
fn test_inverted_range_destination_receives_nothing() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("never.log");

    let h = harness();
    h.factory.add_output_file(
        &log_file,
        LogLevel::CRITICAL,
        LogLevel::DEBUG,
        WriteMode::Append,
    );
    let logger = h.factory.get_logger_with_level("svc", LogLevel::DEBUG).unwrap();
    for level in [LogLevel::DEBUG, LogLevel::INFO, LogLevel::WARN, LogLevel::CRITICAL] {
        logger.log(level, "x");
    }

    // Created on provisioning, but never written to
    assert!(log_file.exists());
    assert!(read_lines(&log_file).is_empty());
}

#[test]
fn test_provisioning_error_propagates() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let blocker = temp_dir.path().join("file_not_dir");
    fs::write(&blocker, "").unwrap();

    let h = harness();
    h.factory.register(Destination::new(blocker.join("app.log")));

    let err = h.factory.get_logger("svc").unwrap_err();
    assert!(matches!(err, LoggerError::IoOperation { .. }));
    assert!(h.stdout.is_empty());
    assert!(h.stderr.is_empty());
    assert!(!h.factory.is_assembled("svc"));
}
