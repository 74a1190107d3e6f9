// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Drain barrier between callers of flush/close and the writer thread.
//!
//! A caller sends a [`Control::Drain`] carrying a one-shot reply channel and
//! blocks on it. The writer answers immediately when it is clean and the
//! queue is empty; otherwise it parks the request and answers every parked
//! request at once the next time it becomes clean with an empty queue.

use crossbeam_channel::{Sender, bounded};
use tracing::trace;

/// Messages on the writer's control channel.
pub(crate) enum Control {
	Drain(Sender<()>),
	Shutdown,
}

/// Drain requests waiting for the writer to go idle.
#[derive(Default)]
pub(crate) struct DrainWaiters {
	waiters: Vec<Sender<()>>,
}

impl DrainWaiters {
	pub(crate) fn park(&mut self, reply: Sender<()>) {
		self.waiters.push(reply);
	}

	#[cfg(test)]
	pub(crate) fn is_empty(&self) -> bool {
		self.waiters.is_empty()
	}

	/// Wakes every parked caller.
	pub(crate) fn release(&mut self) {
		if self.waiters.is_empty() {
			return;
		}
		trace!(waiters = self.waiters.len(), "Releasing drain waiters");
		for reply in self.waiters.drain(..) {
			// the caller may have given up already
			let _ = reply.send(());
		}
	}
}

/// Blocks until the writer reports a drained queue.
///
/// Returns `false` if the writer is gone before answering.
pub(crate) fn request(control: &Sender<Control>) -> bool {
	let (reply, done) = bounded(1);
	if control.send(Control::Drain(reply)).is_err() {
		return false;
	}
	done.recv().is_ok()
}
