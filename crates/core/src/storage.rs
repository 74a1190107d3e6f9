// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! File operations an appender performs, behind a trait so the writer can
//! run against the real filesystem or an in-memory stand-in.

use std::{
	fs::{self, File, OpenOptions},
	io::{self, Write},
	path::Path,
};

/// File-system operations used by file appenders.
///
/// All methods are called from a single writer thread; implementations only
/// need to be `Send`.
pub trait LogStorage: Send + 'static {
	type File: Write + Send + 'static;

	/// Opens `path` for appending, creating it if missing.
	fn open_append(&self, path: &Path) -> io::Result<Self::File>;

	/// Current size of an open file in bytes.
	fn size(&self, file: &Self::File) -> io::Result<u64>;

	/// Creates a fresh, empty file at `path`, truncating any existing one.
	fn create(&self, path: &Path) -> io::Result<Self::File>;

	/// Opens an existing file for appending. Fails if `path` does not exist.
	fn reopen(&self, path: &Path) -> io::Result<Self::File>;

	fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

	/// Flushes file contents to durable storage.
	fn sync(&self, file: &mut Self::File) -> io::Result<()>;

	/// Syncs and releases the file. An error here is a close failure.
	fn close(&self, file: Self::File) -> io::Result<()>;
}

/// [`LogStorage`] backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStorage;

impl FsStorage {
	fn options() -> OpenOptions {
		let mut options = OpenOptions::new();
		#[cfg(unix)]
		{
			use std::os::unix::fs::OpenOptionsExt;
			options.mode(0o666);
		}
		options
	}
}

impl LogStorage for FsStorage {
	type File = File;

	fn open_append(&self, path: &Path) -> io::Result<File> {
		Self::options().append(true).create(true).open(path)
	}

	fn size(&self, file: &File) -> io::Result<u64> {
		Ok(file.metadata()?.len())
	}

	fn create(&self, path: &Path) -> io::Result<File> {
		Self::options().write(true).create(true).truncate(true).open(path)
	}

	fn reopen(&self, path: &Path) -> io::Result<File> {
		Self::options().append(true).open(path)
	}

	fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
		fs::rename(from, to)
	}

	fn sync(&self, file: &mut File) -> io::Result<()> {
		file.flush()?;
		file.sync_all()
	}

	fn close(&self, mut file: File) -> io::Result<()> {
		self.sync(&mut file)
	}
}

