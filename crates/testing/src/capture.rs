// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use parking_lot::Mutex;

/// Thread-safe collection of values pushed from callbacks, e.g. an error sink
/// running on a writer thread.
#[derive(Debug)]
pub struct Captured<T> {
	inner: Arc<Mutex<Vec<T>>>,
}

impl<T> Clone for Captured<T> {
	fn clone(&self) -> Self {
		Self {
			inner: Arc::clone(&self.inner),
		}
	}
}

impl<T> Default for Captured<T> {
	fn default() -> Self {
		Self {
			inner: Arc::new(Mutex::new(Vec::new())),
		}
	}
}

impl<T> Captured<T> {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn push(&self, value: T) {
		self.inner.lock().push(value);
	}

	pub fn len(&self) -> usize {
		self.inner.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.inner.lock().is_empty()
	}

	/// Runs `f` over the captured values without cloning them.
	pub fn with<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
		f(&self.inner.lock())
	}

	pub fn count(&self, predicate: impl Fn(&T) -> bool) -> usize {
		self.inner.lock().iter().filter(|v| predicate(v)).count()
	}

	pub fn take(&self) -> Vec<T> {
		std::mem::take(&mut *self.inner.lock())
	}
}

impl<T: Send + 'static> Captured<T> {
	/// A callback that appends into this collection.
	pub fn sink(&self) -> impl Fn(T) + Send + Sync + 'static {
		let inner = Arc::clone(&self.inner);
		move |value| inner.lock().push(value)
	}
}
