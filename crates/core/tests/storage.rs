// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{fs, io::Write};

use logsink_core::{FsStorage, LogStorage};
use logsink_testing::TempDir;

#[test]
fn test_open_append_keeps_existing_content() {
	let dir = TempDir::new().unwrap();
	let path = dir.join("app.log");
	fs::write(&path, "existing\n").unwrap();

	let storage = FsStorage;
	let mut file = storage.open_append(&path).unwrap();
	assert_eq!(storage.size(&file).unwrap(), 9);
	file.write_all(b"more\n").unwrap();
	storage.close(file).unwrap();

	assert_eq!(fs::read_to_string(&path).unwrap(), "existing\nmore\n");
}

#[test]
fn test_reopen_requires_existing_file() {
	let dir = TempDir::new().unwrap();
	assert!(FsStorage.reopen(&dir.join("missing.log")).is_err());
}

#[test]
fn test_reopen_appends() {
	let dir = TempDir::new().unwrap();
	let path = dir.join("app.log");
	fs::write(&path, "kept\n").unwrap();

	let mut file = FsStorage.reopen(&path).unwrap();
	file.write_all(b"added\n").unwrap();
	FsStorage.close(file).unwrap();

	assert_eq!(fs::read_to_string(&path).unwrap(), "kept\nadded\n");
}

#[test]
fn test_create_truncates() {
	let dir = TempDir::new().unwrap();
	let path = dir.join("app.log");
	fs::write(&path, "old content").unwrap();

	let file = FsStorage.create(&path).unwrap();
	assert_eq!(FsStorage.size(&file).unwrap(), 0);
}

#[test]
fn test_rename_replaces_destination() {
	let dir = TempDir::new().unwrap();
	fs::write(dir.join("app.log"), "new").unwrap();
	fs::write(dir.join("app.log.old"), "old").unwrap();

	FsStorage.rename(&dir.join("app.log"), &dir.join("app.log.old")).unwrap();

	assert_eq!(dir.file_names().unwrap(), vec!["app.log.old"]);
	assert_eq!(fs::read_to_string(dir.join("app.log.old")).unwrap(), "new");
}

#[cfg(unix)]
#[test]
fn test_new_files_are_world_writable_before_umask() {
	use std::os::unix::fs::PermissionsExt;

	let dir = TempDir::new().unwrap();
	let path = dir.join("app.log");
	drop(FsStorage.open_append(&path).unwrap());

	let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
	// umask can only clear bits, never add them
	assert_eq!(mode & !0o666, 0);
	assert_ne!(mode & 0o600, 0);
}
