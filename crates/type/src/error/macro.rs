// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

/// Wraps a diagnostic into an [`Error`](crate::Error).
#[macro_export]
macro_rules! error {
	($diagnostic:expr) => {
		$crate::Error($crate::IntoDiagnostic::into_diagnostic($diagnostic))
	};
}

/// Returns early with `Err` built from a diagnostic.
#[macro_export]
macro_rules! return_error {
	($diagnostic:expr) => {
		return Err($crate::error!($diagnostic))
	};
}

/// `Err` built from a diagnostic, for use in expression position.
#[macro_export]
macro_rules! err {
	($diagnostic:expr) => {
		Err($crate::error!($diagnostic))
	};
}

#[cfg(test)]
mod tests {
	use crate::{Diagnostic, Error, error::diagnostic::internal::internal};

	fn failing() -> crate::Result<()> {
		return_error!(internal("boom"));
	}

	#[test]
	fn test_error_macro_wraps_diagnostic() {
		let err: Error = error!(internal("wrapped"));
		assert_eq!(err.code, "INTERNAL_ERROR");
		assert!(err.message.contains("wrapped"));
	}

	#[test]
	fn test_return_error() {
		let err = failing().unwrap_err();
		assert!(err.message.contains("boom"));
	}

	#[test]
	fn test_err_macro() {
		let result: crate::Result<()> = err!(Diagnostic::new("TEST_001", "plain"));
		assert_eq!(result.unwrap_err().code, "TEST_001");
	}
}
