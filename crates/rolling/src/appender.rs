// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Producer-facing handle of the rolling file appender.

use std::{
	panic::Location,
	path::{Path, PathBuf},
	sync::Arc,
	thread::{self, JoinHandle},
};

use crossbeam_channel::{Sender, TrySendError, bounded, unbounded};
use logsink_core::{LogLevel, LogStorage, Record};
use parking_lot::{Mutex, RwLock};
use tracing::{debug, warn};

use crate::{
	config::RollingFileBuilder,
	drain::{self, Control},
	error::{Error, ErrorSink, HeaderGenerator, Result},
	metrics::{AppenderMetrics, Counters},
	writer::Writer,
};

/// Prefix of the warning record emitted when the queue overflows.
pub const OVERFLOW_PREFIX: &str = "RollingFileAppender";

/// Appends log records to a file that is rotated once it grows past a size
/// threshold.
///
/// Records are handed to a dedicated writer thread through a bounded queue,
/// so [`append`](Self::append) only blocks when that queue is full. Write
/// failures never surface here; they are delivered to the error sink from
/// the writer thread.
///
/// The handle is `Sync`; share it between producers with an `Arc`.
pub struct RollingFileAppender {
	path: PathBuf,
	capacity: usize,
	records: Sender<Record>,
	control: Sender<Control>,
	/// Held for reading across every enqueue, so close never overtakes an
	/// accepted record
	closed: RwLock<bool>,
	worker: Mutex<Option<JoinHandle<()>>>,
	counters: Arc<Counters>,
}

impl RollingFileAppender {
	pub fn builder(path: impl Into<PathBuf>, max_file_size: u64) -> RollingFileBuilder {
		RollingFileBuilder::new(path, max_file_size)
	}

	/// Opens `path` with the default queue capacity and text format.
	pub fn open(
		path: impl Into<PathBuf>,
		max_file_size: u64,
		on_error: Option<ErrorSink>,
		header: Option<HeaderGenerator>,
	) -> Result<Self> {
		RollingFileBuilder::new(path, max_file_size).with_parts(on_error, header).open()
	}

	pub(crate) fn spawn<S: LogStorage>(
		writer: Writer<S>,
		path: PathBuf,
		capacity: usize,
		counters: Arc<Counters>,
	) -> Result<Self> {
		let (records, records_rx) = bounded(capacity);
		let (control, control_rx) = unbounded();

		let worker = thread::Builder::new()
			.name("rolling-file-writer".to_string())
			.spawn(move || writer.run(records_rx, control_rx))
			.map_err(Error::Spawn)?;

		Ok(Self {
			path,
			capacity,
			records,
			control,
			closed: RwLock::new(false),
			worker: Mutex::new(Some(worker)),
			counters,
		})
	}

	/// Queues a record for writing.
	///
	/// If the queue is full, a warning record about the overflow is queued
	/// first and both enqueues block until the writer makes room. Nothing is
	/// dropped on overflow.
	///
	/// Returns [`Error::NoFile`] once the appender is closed. A record
	/// accepted here is on disk by the time a concurrent `close` returns.
	#[track_caller]
	pub fn append(&self, record: Record) -> Result<()> {
		let closed = self.closed.read();
		if *closed {
			return Err(Error::NoFile);
		}

		match self.records.try_send(record) {
			Ok(()) => Ok(()),
			Err(TrySendError::Full(record)) => {
				Counters::incr(&self.counters.overflows);
				warn!(capacity = self.capacity, "Rolling file appender queue is full");

				let warning = overflow_warning(self.capacity, Location::caller());
				self.records.send(warning).map_err(|_| Error::NoFile)?;
				self.records.send(record).map_err(|_| Error::NoFile)
			}
			Err(TrySendError::Disconnected(_)) => Err(Error::NoFile),
		}
	}

	/// Blocks until every record queued before this call is written and
	/// synced.
	pub fn flush(&self) -> Result<()> {
		if drain::request(&self.control) || *self.closed.read() {
			return Ok(());
		}
		Err(Error::WorkerPanicked)
	}

	/// Drains the queue, closes the file and stops the writer thread.
	///
	/// Every record appended before the call is on disk when this returns.
	/// Closing again is a no-op. There is no timeout: a writer stuck in I/O
	/// keeps this call blocked.
	pub fn close(&self) -> Result<()> {
		let mut worker = self.worker.lock();
		let Some(handle) = worker.take() else {
			return Ok(());
		};

		*self.closed.write() = true;

		if !drain::request(&self.control) {
			debug!(path = %self.path.display(), "Writer stopped before the queue was drained");
		}
		let _ = self.control.send(Control::Shutdown);

		handle.join().map_err(|_| Error::WorkerPanicked)
	}

	pub fn is_closed(&self) -> bool {
		*self.closed.read()
	}

	/// The absolute path of the active file.
	pub fn path(&self) -> &Path {
		&self.path
	}

	pub fn metrics(&self) -> AppenderMetrics {
		self.counters.snapshot(self.records.len(), self.capacity)
	}
}

impl Drop for RollingFileAppender {
	fn drop(&mut self) {
		let _ = self.close();
	}
}

fn overflow_warning(capacity: usize, caller: &Location<'_>) -> Record {
	Record::new(
		LogLevel::Warn,
		OVERFLOW_PREFIX,
		"submission queue is full. You may want to increase the queue capacity (currently {}).",
	)
	.with_arg(capacity)
	.with_location(caller.file(), caller.line())
}
