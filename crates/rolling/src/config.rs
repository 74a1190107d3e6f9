// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Builder for configuring a rolling file appender

use std::{path::PathBuf, sync::Arc};

use logsink_core::{Clock, Formatter, FsStorage, LogStorage, TextFormatter};

use crate::{
	appender::RollingFileAppender,
	error::{AppenderError, Error, ErrorSink, HeaderGenerator, Result},
	metrics::Counters,
	writer::Writer,
};

/// Capacity of the submission queue unless configured otherwise.
pub const DEFAULT_QUEUE_CAPACITY: usize = 4096;

/// Builder for [`RollingFileAppender`].
///
/// Everything configured here is fixed once the appender is opened.
pub struct RollingFileBuilder {
	path: PathBuf,
	max_file_size: u64,
	queue_capacity: usize,
	on_error: Option<ErrorSink>,
	header: Option<HeaderGenerator>,
	formatter: Box<dyn Formatter>,
	clock: Clock,
}

impl RollingFileBuilder {
	pub fn new(path: impl Into<PathBuf>, max_file_size: u64) -> Self {
		Self {
			path: path.into(),
			max_file_size,
			queue_capacity: DEFAULT_QUEUE_CAPACITY,
			on_error: None,
			header: None,
			formatter: Box::new(TextFormatter),
			clock: Clock::default(),
		}
	}

	/// Must be non-zero: the overflow path blocks on the same queue.
	pub fn queue_capacity(mut self, capacity: usize) -> Self {
		self.queue_capacity = capacity;
		self
	}

	pub fn on_error(mut self, sink: impl Fn(AppenderError) + Send + 'static) -> Self {
		self.on_error = Some(Box::new(sink));
		self
	}

	pub fn header(mut self, generator: impl Fn() -> String + Send + 'static) -> Self {
		self.header = Some(Box::new(generator));
		self
	}

	pub fn formatter(mut self, formatter: impl Formatter) -> Self {
		self.formatter = Box::new(formatter);
		self
	}

	pub fn clock(mut self, clock: impl Into<Clock>) -> Self {
		self.clock = clock.into();
		self
	}

	pub(crate) fn with_parts(mut self, on_error: Option<ErrorSink>, header: Option<HeaderGenerator>) -> Self {
		self.on_error = on_error;
		self.header = header;
		self
	}

	/// Opens the appender on the local filesystem.
	pub fn open(self) -> Result<RollingFileAppender> {
		self.open_with(FsStorage)
	}

	/// Opens the appender on the given storage.
	///
	/// The file is opened for appending and its current size seeds the
	/// rotation counter, so a restarted process keeps filling the same file
	/// up to the threshold.
	pub fn open_with<S: LogStorage>(self, storage: S) -> Result<RollingFileAppender> {
		if self.queue_capacity == 0 {
			return Err(Error::ZeroCapacity);
		}

		let path = std::path::absolute(&self.path).map_err(|source| Error::Resolve {
			path: self.path.clone(),
			source,
		})?;

		let file = storage.open_append(&path).map_err(|source| Error::Open {
			path: path.clone(),
			source,
		})?;

		let size = storage.size(&file).map_err(|source| Error::Stat {
			path: path.clone(),
			source,
		})?;

		let counters = Arc::new(Counters::default());
		let writer = Writer {
			path: path.clone(),
			storage,
			file: Some(file),
			size,
			max_file_size: self.max_file_size,
			on_error: self.on_error.unwrap_or_else(|| Box::new(|_: AppenderError| {})),
			header: self.header,
			formatter: self.formatter,
			clock: self.clock,
			counters: Arc::clone(&counters),
		};

		RollingFileAppender::spawn(writer, path, self.queue_capacity, counters)
	}
}
