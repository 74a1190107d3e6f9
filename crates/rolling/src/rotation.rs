// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Size-triggered rotation of the active log file.
//!
//! Rotation closes the active file, renames it to a timestamped sibling and
//! starts a fresh file at the original path. Timestamps have second
//! resolution, so two rotations within the same second reuse the same name
//! and the later rename replaces the earlier archive.

use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDateTime, Timelike};
use logsink_core::LogStorage;
use tracing::debug;

use crate::{error::AppenderError, metrics::Counters, writer::Writer};

/// `<path>.<YYYY>-<MM>-<DD>T<HH>-<MM>-<SS>`
pub fn rotated_path(path: &Path, now: NaiveDateTime) -> PathBuf {
	let mut name = path.as_os_str().to_owned();
	name.push(format!(
		".{}-{:02}-{:02}T{:02}-{:02}-{:02}",
		now.year(),
		now.month(),
		now.day(),
		now.hour(),
		now.minute(),
		now.second()
	));
	PathBuf::from(name)
}

impl<S: LogStorage> Writer<S> {
	pub(crate) fn rotate(&mut self) {
		if let Some(file) = self.file.take() {
			if let Err(source) = self.storage.close(file) {
				// best effort
				self.report(AppenderError::Close {
					path: self.path.clone(),
					source,
				});
			}
		}

		let rotated = rotated_path(&self.path, self.clock.now());
		if let Err(source) = self.storage.rename(&self.path, &rotated) {
			self.report(AppenderError::Rename {
				from: self.path.clone(),
				to: rotated,
				source,
			});
			self.resume_unrotated();
			return;
		}

		debug!(from = %self.path.display(), to = %rotated.display(), "Rotated log file");
		Counters::incr(&self.counters.rotations);
		self.size = 0;

		match self.storage.create(&self.path) {
			Ok(file) => {
				self.file = Some(file);
				self.write_header();
			}
			Err(source) => {
				self.report(AppenderError::Open {
					path: self.path.clone(),
					source,
				});
			}
		}
	}

	/// After a failed rename, keep appending to the file at the original
	/// path. The size counter is left as is, so the next tracked write tries
	/// to rotate again.
	fn resume_unrotated(&mut self) {
		match self.storage.reopen(&self.path) {
			Ok(file) => self.file = Some(file),
			Err(source) => {
				self.size = 0;
				self.report(AppenderError::Open {
					path: self.path.clone(),
					source,
				});
			}
		}
	}
}
