// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters shared between the appender handle and its writer thread.
#[derive(Debug, Default)]
pub(crate) struct Counters {
	pub(crate) written: AtomicU64,
	pub(crate) dropped: AtomicU64,
	pub(crate) rotations: AtomicU64,
	pub(crate) overflows: AtomicU64,
}

impl Counters {
	pub(crate) fn incr(counter: &AtomicU64) {
		counter.fetch_add(1, Ordering::Relaxed);
	}

	fn get(counter: &AtomicU64) -> u64 {
		counter.load(Ordering::Relaxed)
	}

	pub(crate) fn snapshot(&self, pending: usize, capacity: usize) -> AppenderMetrics {
		AppenderMetrics {
			pending,
			capacity,
			written: Self::get(&self.written),
			dropped: Self::get(&self.dropped),
			rotations: Self::get(&self.rotations),
			overflows: Self::get(&self.overflows),
		}
	}
}

/// Point-in-time view of an appender.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppenderMetrics {
	/// Records waiting in the submission queue
	pub pending: usize,
	pub capacity: usize,
	/// Records written successfully, headers excluded
	pub written: u64,
	/// Records dropped because of a write failure or a missing file
	pub dropped: u64,
	/// Completed rotations
	pub rotations: u64,
	/// Submissions that found the queue full
	pub overflows: u64,
}
