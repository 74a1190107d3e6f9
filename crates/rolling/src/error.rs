// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Error types for the rolling file appender.
//!
//! Two tiers exist. [`Error`] is returned synchronously from construction,
//! submission after close and close itself. [`AppenderError`] describes
//! failures of the background writer; those are never returned to producers
//! and are delivered to the configured [`ErrorSink`] instead.

use std::{io, path::PathBuf};

/// Result type for appender operations
pub type Result<T> = std::result::Result<T, Error>;

/// Callback receiving writer-side failures. Runs on the writer thread.
pub type ErrorSink = Box<dyn Fn(AppenderError) + Send + 'static>;

/// Produces the header text re-emitted at the top of every file.
pub type HeaderGenerator = Box<dyn Fn() -> String + Send + 'static>;

/// Failures reported asynchronously by the writer thread.
#[derive(Debug, thiserror::Error)]
pub enum AppenderError {
	/// A write was attempted while no file is open
	#[error("no log file to write to")]
	NoFile,

	#[error("failed to write to {}: {source}", path.display())]
	Write {
		path: PathBuf,
		source: io::Error,
	},

	/// Closing the old file during rotation or shutdown failed
	#[error("failed to close {}: {source}", path.display())]
	Close {
		path: PathBuf,
		source: io::Error,
	},

	#[error("failed to rename {} to {}: {source}", from.display(), to.display())]
	Rename {
		from: PathBuf,
		to: PathBuf,
		source: io::Error,
	},

	/// Opening or creating a file failed, either after a failed rename or
	/// when starting a fresh file after rotation
	#[error("failed to open {}: {source}", path.display())]
	Open {
		path: PathBuf,
		source: io::Error,
	},
}

impl AppenderError {
	/// The file path the failure concerns, if any. For renames this is the
	/// source path.
	pub fn path(&self) -> Option<&PathBuf> {
		match self {
			AppenderError::NoFile => None,
			AppenderError::Write {
				path,
				..
			}
			| AppenderError::Close {
				path,
				..
			}
			| AppenderError::Open {
				path,
				..
			} => Some(path),
			AppenderError::Rename {
				from,
				..
			} => Some(from),
		}
	}
}

/// Errors returned synchronously to callers.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("queue capacity must be greater than zero")]
	ZeroCapacity,

	#[error("failed to resolve log path {}: {source}", path.display())]
	Resolve {
		path: PathBuf,
		source: io::Error,
	},

	#[error("failed to open {}: {source}", path.display())]
	Open {
		path: PathBuf,
		source: io::Error,
	},

	#[error("failed to stat {}: {source}", path.display())]
	Stat {
		path: PathBuf,
		source: io::Error,
	},

	#[error("failed to spawn writer thread: {0}")]
	Spawn(#[source] io::Error),

	/// The appender is closed or its writer has stopped
	#[error("no log file to write to")]
	NoFile,

	#[error("writer thread panicked")]
	WorkerPanicked,
}
