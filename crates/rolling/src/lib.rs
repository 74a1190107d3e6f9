// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Non-blocking, size-rotated file appender.
//!
//! Producers submit [`Record`](logsink_core::Record)s through a bounded
//! queue; a single writer thread formats them, appends them to the active
//! file, rotates the file once it exceeds the configured size and syncs to
//! disk whenever the queue runs dry. Failures on the writer side go to a
//! user-supplied error sink and never reach the producers.

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub use appender::{OVERFLOW_PREFIX, RollingFileAppender};
pub use config::{DEFAULT_QUEUE_CAPACITY, RollingFileBuilder};
pub use error::{AppenderError, Error, ErrorSink, HeaderGenerator, Result};
pub use metrics::AppenderMetrics;
pub use rotation::rotated_path;
pub use writer::HEADER_PREFIX;

mod appender;
mod config;
mod drain;
pub mod error;
mod metrics;
mod rotation;
mod writer;
