// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! In-memory [`LogStorage`] with injectable failures.
//!
//! Files are byte vectors keyed by path. Each operation can be made to fail
//! on demand, which lets tests drive the writer through every error path
//! without relying on filesystem permissions.

use std::{
	collections::{BTreeMap, HashSet},
	io::{self, Write},
	path::{Path, PathBuf},
	sync::Arc,
};

use logsink_core::LogStorage;
use parking_lot::Mutex;

/// Operations that can be forced to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fault {
	Open,
	Create,
	Reopen,
	Rename,
	Write,
	Sync,
	Close,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
	inner: Arc<MemoryStorageInner>,
}

#[derive(Debug, Default)]
struct MemoryStorageInner {
	files: Mutex<BTreeMap<PathBuf, Vec<u8>>>,
	faults: Mutex<HashSet<Fault>>,
	syncs: Mutex<usize>,
}

impl MemoryStorage {
	pub fn new() -> Self {
		Self::default()
	}

	/// Enables or disables a fault for all subsequent operations.
	pub fn fail(&self, fault: Fault, enabled: bool) {
		let mut faults = self.inner.faults.lock();
		if enabled {
			faults.insert(fault);
		} else {
			faults.remove(&fault);
		}
	}

	fn check(&self, fault: Fault) -> io::Result<()> {
		if self.inner.faults.lock().contains(&fault) {
			return Err(io::Error::other(format!("injected {:?} failure", fault)));
		}
		Ok(())
	}

	/// Seeds a file with existing content.
	pub fn insert(&self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) {
		self.inner.files.lock().insert(path.into(), content.into());
	}

	pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
		self.inner.files.lock().get(path.as_ref()).map(|bytes| String::from_utf8_lossy(bytes).into_owned())
	}

	pub fn exists(&self, path: impl AsRef<Path>) -> bool {
		self.inner.files.lock().contains_key(path.as_ref())
	}

	/// All paths currently present, sorted.
	pub fn paths(&self) -> Vec<PathBuf> {
		self.inner.files.lock().keys().cloned().collect()
	}

	/// Number of successful syncs, including those done on close.
	pub fn sync_count(&self) -> usize {
		*self.inner.syncs.lock()
	}

	fn handle(&self, path: &Path) -> MemoryFile {
		MemoryFile {
			storage: self.clone(),
			path: path.to_path_buf(),
		}
	}
}

/// Handle to a file inside a [`MemoryStorage`].
#[derive(Debug)]
pub struct MemoryFile {
	storage: MemoryStorage,
	path: PathBuf,
}

impl Write for MemoryFile {
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		self.storage.check(Fault::Write)?;
		let mut files = self.storage.inner.files.lock();
		files.entry(self.path.clone()).or_default().extend_from_slice(buf);
		Ok(buf.len())
	}

	fn flush(&mut self) -> io::Result<()> {
		Ok(())
	}
}

impl LogStorage for MemoryStorage {
	type File = MemoryFile;

	fn open_append(&self, path: &Path) -> io::Result<MemoryFile> {
		self.check(Fault::Open)?;
		self.inner.files.lock().entry(path.to_path_buf()).or_default();
		Ok(self.handle(path))
	}

	fn size(&self, file: &MemoryFile) -> io::Result<u64> {
		let files = self.inner.files.lock();
		files.get(&file.path)
			.map(|bytes| bytes.len() as u64)
			.ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "file vanished"))
	}

	fn create(&self, path: &Path) -> io::Result<MemoryFile> {
		self.check(Fault::Create)?;
		self.inner.files.lock().insert(path.to_path_buf(), Vec::new());
		Ok(self.handle(path))
	}

	fn reopen(&self, path: &Path) -> io::Result<MemoryFile> {
		self.check(Fault::Reopen)?;
		if !self.exists(path) {
			return Err(io::Error::new(io::ErrorKind::NotFound, "no such file"));
		}
		Ok(self.handle(path))
	}

	fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
		self.check(Fault::Rename)?;
		let mut files = self.inner.files.lock();
		let content = files.remove(from).ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))?;
		files.insert(to.to_path_buf(), content);
		Ok(())
	}

	fn sync(&self, _file: &mut MemoryFile) -> io::Result<()> {
		self.check(Fault::Sync)?;
		*self.inner.syncs.lock() += 1;
		Ok(())
	}

	fn close(&self, mut file: MemoryFile) -> io::Result<()> {
		self.check(Fault::Close)?;
		self.sync(&mut file)
	}
}
