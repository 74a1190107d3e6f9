// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Writer-side failures reach the error sink and never the producers.

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, TimeDelta};
use logsink_core::{LogLevel, MockClock, Record};
use logsink_rolling::{AppenderError, Error, RollingFileAppender};
use logsink_testing::{Captured, Fault, MemoryStorage, TempDir};

const PATH: &str = "/logs/app.log";

fn open(storage: &MemoryStorage, max_file_size: u64) -> (RollingFileAppender, Captured<AppenderError>) {
	let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
	let errors = Captured::new();
	let appender = RollingFileAppender::builder(PATH, max_file_size)
		.formatter(|record: &Record| format!("{}\n", record.message()))
		.clock(MockClock::new(start).with_tick(TimeDelta::seconds(1)))
		.on_error(errors.sink())
		.open_with(storage.clone())
		.unwrap();
	(appender, errors)
}

fn record(message: &str) -> Record {
	Record::new(LogLevel::Info, "test", message)
}

#[test]
fn test_rename_failure_keeps_logging_then_recovers() {
	let storage = MemoryStorage::new();
	let (appender, errors) = open(&storage, 3);

	storage.fail(Fault::Rename, true);
	appender.append(record("abcd")).unwrap();
	appender.append(record("efgh")).unwrap();
	appender.flush().unwrap();

	assert_eq!(errors.count(|e| matches!(e, AppenderError::Rename { .. })), 2);
	assert_eq!(storage.paths(), vec![PathBuf::from(PATH)]);
	assert_eq!(storage.contents(PATH).unwrap(), "abcd\nefgh\n");

	storage.fail(Fault::Rename, false);
	appender.append(record("ijkl")).unwrap();
	appender.close().unwrap();

	let paths = storage.paths();
	assert_eq!(paths.len(), 2);
	let rotated = paths.iter().find(|p| p.as_path() != Path::new(PATH)).unwrap();
	assert_eq!(storage.contents(rotated).unwrap(), "abcd\nefgh\nijkl\n");
	assert_eq!(storage.contents(PATH).unwrap(), "");
	assert_eq!(errors.len(), 2);
}

#[test]
fn test_lost_file_degrades_to_no_file_errors() {
	let storage = MemoryStorage::new();
	let (appender, errors) = open(&storage, 3);

	storage.fail(Fault::Rename, true);
	storage.fail(Fault::Reopen, true);

	appender.append(record("abcd")).unwrap();
	for i in 0..5 {
		appender.append(record(&format!("lost-{}", i))).unwrap();
	}
	appender.flush().unwrap();
	appender.close().unwrap();

	errors.with(|errors| {
		assert!(matches!(errors[0], AppenderError::Rename { .. }));
		assert!(matches!(errors[1], AppenderError::Open { .. }));
		assert!(errors[2..].iter().all(|e| matches!(e, AppenderError::NoFile)));
		assert_eq!(errors.len(), 7);
	});
	assert_eq!(storage.contents(PATH).unwrap(), "abcd\n");

	let metrics = appender.metrics();
	assert_eq!(metrics.written, 1);
	assert_eq!(metrics.dropped, 5);
}

#[test]
fn test_create_failure_after_rename() {
	let storage = MemoryStorage::new();
	let (appender, errors) = open(&storage, 3);

	storage.fail(Fault::Create, true);
	appender.append(record("abcd")).unwrap();
	appender.append(record("lost")).unwrap();
	appender.close().unwrap();

	assert!(!storage.exists(PATH));
	assert_eq!(storage.contents("/logs/app.log.2025-01-01T00-00-00").unwrap(), "abcd\n");
	assert_eq!(errors.count(|e| matches!(e, AppenderError::Open { .. })), 1);
	assert_eq!(errors.count(|e| matches!(e, AppenderError::NoFile)), 1);
}

#[test]
fn test_write_failure_drops_only_that_record() {
	let storage = MemoryStorage::new();
	let (appender, errors) = open(&storage, 1 << 20);

	appender.append(record("first")).unwrap();
	appender.flush().unwrap();

	storage.fail(Fault::Write, true);
	appender.append(record("lost")).unwrap();
	appender.flush().unwrap();

	storage.fail(Fault::Write, false);
	appender.append(record("last")).unwrap();
	appender.close().unwrap();

	assert_eq!(storage.contents(PATH).unwrap(), "first\nlast\n");
	errors.with(|errors| {
		assert_eq!(errors.len(), 1);
		assert!(matches!(&errors[0], AppenderError::Write { path, .. } if path == &PathBuf::from(PATH)));
	});
}

#[test]
fn test_sync_and_close_failures_are_reported() {
	let storage = MemoryStorage::new();
	let (appender, errors) = open(&storage, 1 << 20);
	appender.flush().unwrap();

	storage.fail(Fault::Sync, true);
	appender.append(record("unsynced")).unwrap();
	appender.flush().unwrap();
	assert_eq!(errors.count(|e| matches!(e, AppenderError::Write { .. })), 1);

	appender.close().unwrap();
	assert_eq!(errors.count(|e| matches!(e, AppenderError::Close { .. })), 1);
	assert_eq!(storage.contents(PATH).unwrap(), "unsynced\n");
}

#[test]
fn test_errors_without_sink_are_ignored() {
	let storage = MemoryStorage::new();
	let appender = RollingFileAppender::builder(PATH, 3)
		.formatter(|record: &Record| format!("{}\n", record.message()))
		.open_with(storage.clone())
		.unwrap();

	storage.fail(Fault::Rename, true);
	storage.fail(Fault::Reopen, true);
	appender.append(record("abcd")).unwrap();
	appender.append(record("lost")).unwrap();
	appender.close().unwrap();

	assert_eq!(storage.contents(PATH).unwrap(), "abcd\n");
}

#[test]
fn test_open_fails_for_missing_directory() {
	let dir = TempDir::new().unwrap();
	let result = RollingFileAppender::open(dir.join("missing").join("app.log"), 1024, None, None);
	assert!(matches!(result, Err(Error::Open { .. })));
}
