// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! The writer thread.
//!
//! Exactly one thread owns a [`Writer`]: the file handle, the size counter
//! and rotation are never touched from anywhere else, so none of them need a
//! lock. The loop alternates between two states:
//!
//! - **Clean**: everything written so far is synced. Block until a record or
//!   a control message arrives.
//! - **Dirty**: writes are pending. Keep taking records without blocking; as
//!   soon as the queue is empty, sync and become clean.
//!
//! Syncs are therefore batched over bursts of records, and a drain request
//! answered while clean with an empty queue means everything is on disk.

use std::{
	io::Write,
	path::PathBuf,
	sync::Arc,
};

use crossbeam_channel::{Receiver, TryRecvError, select};
use logsink_core::{Clock, Formatter, LogLevel, LogStorage, Record};
use tracing::{debug, trace};

use crate::{
	drain::{Control, DrainWaiters},
	error::{AppenderError, ErrorSink, HeaderGenerator},
	metrics::Counters,
};

/// Prefix of the records carrying the header text.
pub const HEADER_PREFIX: &str = "header";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
	Clean,
	Dirty,
}

pub(crate) struct Writer<S: LogStorage> {
	pub(crate) path: PathBuf,
	pub(crate) storage: S,
	/// `None` once every attempt to (re)open the file has failed
	pub(crate) file: Option<S::File>,
	/// Bytes of tracked writes in the active file
	pub(crate) size: u64,
	pub(crate) max_file_size: u64,
	pub(crate) on_error: ErrorSink,
	pub(crate) header: Option<HeaderGenerator>,
	pub(crate) formatter: Box<dyn Formatter>,
	pub(crate) clock: Clock,
	pub(crate) counters: Arc<Counters>,
}

impl<S: LogStorage> Writer<S> {
	pub(crate) fn run(mut self, records: Receiver<Record>, control: Receiver<Control>) {
		debug!(path = %self.path.display(), size = self.size, "Rolling file writer started");

		self.write_header();

		let mut waiters = DrainWaiters::default();
		let mut state = State::Dirty;

		'run: loop {
			match state {
				State::Dirty => match records.try_recv() {
					Ok(record) => self.append(&record),
					Err(TryRecvError::Empty) => {
						self.sync();
						state = State::Clean;
						if records.is_empty() {
							waiters.release();
						}
					}
					Err(TryRecvError::Disconnected) => break 'run,
				},
				State::Clean => select! {
					recv(records) -> msg => match msg {
						Ok(record) => {
							self.append(&record);
							state = State::Dirty;
						}
						Err(_) => break 'run,
					},
					recv(control) -> msg => match msg {
						Ok(Control::Drain(reply)) => {
							if records.is_empty() {
								trace!("Drain request answered");
								let _ = reply.send(());
							} else {
								waiters.park(reply);
							}
						}
						Ok(Control::Shutdown) | Err(_) => break 'run,
					},
				},
			}
		}

		self.shutdown(&records, &mut waiters);
		debug!(path = %self.path.display(), "Rolling file writer stopped");
	}

	/// Writes whatever is still queued, then closes the file.
	fn shutdown(&mut self, records: &Receiver<Record>, waiters: &mut DrainWaiters) {
		for record in records.try_iter() {
			self.append(&record);
		}

		if let Some(file) = self.file.take() {
			if let Err(source) = self.storage.close(file) {
				self.report(AppenderError::Close {
					path: self.path.clone(),
					source,
				});
			}
		}

		waiters.release();
	}

	pub(crate) fn append(&mut self, record: &Record) {
		if self.write(record, true) {
			Counters::incr(&self.counters.written);
		} else {
			Counters::incr(&self.counters.dropped);
		}
	}

	/// Emits the header, if one is configured. Header bytes never count
	/// towards the rotation threshold, otherwise a header larger than the
	/// threshold would rotate on every file.
	pub(crate) fn write_header(&mut self) {
		let Some(header) = &self.header else {
			return;
		};
		let record = Record::new(LogLevel::Info, HEADER_PREFIX, "{}").with_arg(header());
		self.write(&record, false);
	}

	/// Returns whether the record reached the file.
	fn write(&mut self, record: &Record, track_size: bool) -> bool {
		let Some(file) = self.file.as_mut() else {
			self.report(AppenderError::NoFile);
			return false;
		};

		let line = self.formatter.format(record);
		if let Err(source) = file.write_all(line.as_bytes()) {
			self.report(AppenderError::Write {
				path: self.path.clone(),
				source,
			});
			return false;
		}

		if track_size {
			self.size += line.len() as u64;
			if self.size > self.max_file_size {
				self.rotate();
			}
		}
		true
	}

	fn sync(&mut self) {
		let Some(file) = self.file.as_mut() else {
			return;
		};
		if let Err(source) = self.storage.sync(file) {
			self.report(AppenderError::Write {
				path: self.path.clone(),
				source,
			});
		}
	}

	pub(crate) fn report(&self, err: AppenderError) {
		debug!(error = %err, "Rolling file appender failure");
		(self.on_error)(err);
	}
}
