// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub use clock::{Clock, MockClock};
pub use format::{Formatter, TextFormatter};
pub use record::{LogLevel, Record};
pub use storage::{FsStorage, LogStorage};

pub mod clock;
pub mod format;
mod macros;
pub mod record;
pub mod storage;
