// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Wall-clock source used for naming rotated files.

use std::sync::Arc;

use chrono::{Local, NaiveDateTime, TimeDelta};
use parking_lot::Mutex;

#[derive(Debug, Clone, Default)]
pub enum Clock {
	/// Local system time
	#[default]
	Real,
	/// Manually driven time, for tests
	Mock(MockClock),
}

impl Clock {
	/// Current local wall-clock time.
	pub fn now(&self) -> NaiveDateTime {
		match self {
			Clock::Real => Local::now().naive_local(),
			Clock::Mock(mock) => mock.now(),
		}
	}
}

impl From<MockClock> for Clock {
	fn from(mock: MockClock) -> Self {
		Clock::Mock(mock)
	}
}

/// A clock that only moves when told to.
///
/// Clones share the same time. With a tick configured, every read returns
/// the current time and then advances it by the tick.
#[derive(Debug, Clone)]
pub struct MockClock {
	inner: Arc<Mutex<MockClockInner>>,
}

#[derive(Debug)]
struct MockClockInner {
	now: NaiveDateTime,
	tick: TimeDelta,
}

impl MockClock {
	pub fn new(now: NaiveDateTime) -> Self {
		Self {
			inner: Arc::new(Mutex::new(MockClockInner {
				now,
				tick: TimeDelta::zero(),
			})),
		}
	}

	pub fn with_tick(self, tick: TimeDelta) -> Self {
		self.inner.lock().tick = tick;
		self
	}

	pub fn now(&self) -> NaiveDateTime {
		let mut inner = self.inner.lock();
		let now = inner.now;
		inner.now = now + inner.tick;
		now
	}

	pub fn set(&self, now: NaiveDateTime) {
		self.inner.lock().now = now;
	}

	pub fn advance(&self, delta: TimeDelta) {
		let mut inner = self.inner.lock();
		inner.now = inner.now + delta;
	}
}

#[cfg(test)]
mod tests {
	use chrono::NaiveDate;

	use super::*;

	fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
		NaiveDate::from_ymd_opt(2025, 3, 9).unwrap().and_hms_opt(h, m, s).unwrap()
	}

	#[test]
	fn test_mock_clock_is_frozen_without_tick() {
		let clock = Clock::from(MockClock::new(at(10, 0, 0)));
		assert_eq!(clock.now(), at(10, 0, 0));
		assert_eq!(clock.now(), at(10, 0, 0));
	}

	#[test]
	fn test_mock_clock_ticks_per_read() {
		let clock = MockClock::new(at(10, 0, 0)).with_tick(TimeDelta::seconds(1));
		assert_eq!(clock.now(), at(10, 0, 0));
		assert_eq!(clock.now(), at(10, 0, 1));
		assert_eq!(clock.now(), at(10, 0, 2));
	}

	#[test]
	fn test_mock_clock_clones_share_time() {
		let clock = MockClock::new(at(10, 0, 0));
		let shared = Clock::Mock(clock.clone());

		clock.advance(TimeDelta::minutes(5));
		assert_eq!(shared.now(), at(10, 5, 0));

		clock.set(at(23, 59, 59));
		assert_eq!(shared.now(), at(23, 59, 59));
	}
}
