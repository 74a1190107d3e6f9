// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Record construction macros

/// Builds a [`Record`](crate::Record) at the call site.
///
/// ```
/// use logsink_core::{LogLevel, record};
///
/// let record = record!(LogLevel::Info, "server", "listening on port {}", 8080);
/// assert_eq!(record.message(), "listening on port 8080");
/// ```
#[macro_export]
macro_rules! record {
	($level:expr, $prefix:expr, $msg:expr) => {
		$crate::Record::new($level, $prefix, $msg).with_location(file!(), line!())
	};

	($level:expr, $prefix:expr, $msg:expr, $($arg:expr),+ $(,)?) => {{
		let record = $crate::Record::new($level, $prefix, $msg).with_location(file!(), line!());
		$(
			let record = record.with_arg($arg);
		)+
		record
	}};
}
