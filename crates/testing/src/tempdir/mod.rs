// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	env, fs, io,
	path::{Path, PathBuf},
};

use uuid::Uuid;

/// A uniquely named directory under the system temp dir, removed on drop.
#[derive(Debug)]
pub struct TempDir {
	path: PathBuf,
}

impl TempDir {
	pub fn new() -> io::Result<Self> {
		let mut path = env::temp_dir();
		path.push(format!("logsink-{}", Uuid::new_v4()));
		fs::create_dir(&path)?;
		Ok(Self {
			path,
		})
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	pub fn join(&self, name: impl AsRef<Path>) -> PathBuf {
		self.path.join(name)
	}

	/// File names in the directory, sorted.
	pub fn file_names(&self) -> io::Result<Vec<String>> {
		let mut names = Vec::new();
		for entry in fs::read_dir(&self.path)? {
			names.push(entry?.file_name().to_string_lossy().into_owned());
		}
		names.sort();
		Ok(names)
	}
}

impl Drop for TempDir {
	fn drop(&mut self) {
		let _ = fs::remove_dir_all(&self.path);
	}
}

pub fn temp_dir<F>(f: F) -> io::Result<()>
where
	F: FnOnce(&Path) -> io::Result<()>,
{
	let dir = TempDir::new()?;
	f(dir.path())
}
