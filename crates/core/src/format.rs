// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Rendering of records into text lines

use crate::Record;

/// Turns a record into the exact bytes an appender writes.
///
/// Implementations must include any trailing newline themselves.
pub trait Formatter: Send + Sync + 'static {
	fn format(&self, record: &Record) -> String;
}

impl<F> Formatter for F
where
	F: Fn(&Record) -> String + Send + Sync + 'static,
{
	fn format(&self, record: &Record) -> String {
		self(record)
	}
}

/// Default single-line text format:
/// `[2025/01/31 13:45:07] [prefix.LEVEL] [file.rs:42] message`
#[derive(Debug, Clone, Copy, Default)]
pub struct TextFormatter;

impl Formatter for TextFormatter {
	fn format(&self, record: &Record) -> String {
		let location = match (&record.file, record.line) {
			(Some(file), Some(line)) => format!("{}:{}", file, line),
			(Some(file), None) => file.clone(),
			_ => "unknown".to_string(),
		};

		format!(
			"[{}] [{}.{}] [{}] {}\n",
			record.timestamp.format("%Y/%m/%d %H:%M:%S"),
			record.prefix,
			record.level,
			location,
			record.message()
		)
	}
}
