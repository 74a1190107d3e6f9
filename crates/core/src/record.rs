// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Log record types

use std::fmt;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LogLevel {
	Trace = 0,
	Debug = 1,
	Info = 2,
	Warn = 3,
	Error = 4,
	Critical = 5,
}

impl LogLevel {
	pub fn as_str(&self) -> &'static str {
		match self {
			LogLevel::Trace => "TRACE",
			LogLevel::Debug => "DEBUG",
			LogLevel::Info => "INFO",
			LogLevel::Warn => "WARN",
			LogLevel::Error => "ERROR",
			LogLevel::Critical => "CRITICAL",
		}
	}
}

impl fmt::Display for LogLevel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A single log entry as handed to an appender.
///
/// Records are built once by the producer and never mutated afterwards. The
/// message is a template; every `{}` in it is replaced by the next positional
/// argument when the record is rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
	/// Component or subsystem that produced the record
	pub prefix: String,
	/// Log severity level
	pub level: LogLevel,
	/// Timestamp when the record was created
	pub timestamp: DateTime<Local>,
	/// File location where the record was generated
	pub file: Option<String>,
	/// Line number where the record was generated
	pub line: Option<u32>,
	/// Message template
	pub message: String,
	/// Positional arguments for the template
	pub args: Vec<Value>,
}

impl Record {
	pub fn new(level: LogLevel, prefix: impl Into<String>, message: impl Into<String>) -> Self {
		Self {
			prefix: prefix.into(),
			level,
			timestamp: Local::now(),
			file: None,
			line: None,
			message: message.into(),
			args: Vec::new(),
		}
	}

	pub fn with_location(mut self, file: impl Into<String>, line: u32) -> Self {
		self.file = Some(file.into());
		self.line = Some(line);
		self
	}

	pub fn with_timestamp(mut self, timestamp: DateTime<Local>) -> Self {
		self.timestamp = timestamp;
		self
	}

	/// Appends a positional argument. Values that fail to serialize become `null`.
	pub fn with_arg(mut self, arg: impl Serialize) -> Self {
		self.args.push(serde_json::to_value(arg).unwrap_or(Value::Null));
		self
	}

	pub fn with_args<I>(mut self, args: I) -> Self
	where
		I: IntoIterator<Item = Value>,
	{
		self.args.extend(args);
		self
	}

	/// Renders the message template against the positional arguments.
	///
	/// `{{` and `}}` produce literal braces. A placeholder without a
	/// remaining argument is kept verbatim and surplus arguments are ignored.
	pub fn message(&self) -> String {
		let mut out = String::with_capacity(self.message.len());
		let mut args = self.args.iter();
		let mut chars = self.message.chars().peekable();

		while let Some(c) = chars.next() {
			match (c, chars.peek()) {
				('{', Some('{')) => {
					chars.next();
					out.push('{');
				}
				('}', Some('}')) => {
					chars.next();
					out.push('}');
				}
				('{', Some('}')) => {
					chars.next();
					match args.next() {
						Some(Value::String(s)) => out.push_str(s),
						Some(value) => out.push_str(&value.to_string()),
						None => out.push_str("{}"),
					}
				}
				_ => out.push(c),
			}
		}

		out
	}
}
