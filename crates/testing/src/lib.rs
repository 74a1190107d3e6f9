// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Shared helpers for logsink tests.

pub mod capture;
pub mod memory;
pub mod tempdir;
pub mod util;

pub use capture::Captured;
pub use memory::{Fault, MemoryFile, MemoryStorage};
pub use tempdir::{TempDir, temp_dir};
pub use util::wait::{wait_for, wait_for_condition};
