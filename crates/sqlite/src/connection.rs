// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use rusqlite::Connection;
use tabula_type::{Result, error, error::diagnostic::internal::internal};

use crate::{DbPath, OpenFlags};

pub(crate) fn connect(path: &DbPath, flags: rusqlite::OpenFlags) -> Result<Connection> {
	fn connection_failed(path: String, error: String) -> String {
		format!("Failed to connect to database at {}: {}", path, error)
	}

	match path {
		DbPath::Memory => Connection::open_in_memory_with_flags(flags)
			.map_err(|e| error!(internal(connection_failed(":memory:".to_string(), e.to_string())))),
		DbPath::File(path) => {
			let mut flags = flags;
			if path.to_string_lossy().contains(':') {
				flags |= rusqlite::OpenFlags::SQLITE_OPEN_URI;
			}
			Connection::open_with_flags(path, flags)
				.map_err(|e| error!(internal(connection_failed(path.display().to_string(), e.to_string()))))
		}
	}
}

/// Convert our OpenFlags to rusqlite OpenFlags.
pub(crate) fn convert_flags(flags: &OpenFlags) -> rusqlite::OpenFlags {
	let mut rusqlite_flags = rusqlite::OpenFlags::empty();

	if flags.read_write {
		rusqlite_flags |= rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE;
	}
	if flags.create {
		rusqlite_flags |= rusqlite::OpenFlags::SQLITE_OPEN_CREATE;
	}
	if flags.full_mutex {
		rusqlite_flags |= rusqlite::OpenFlags::SQLITE_OPEN_FULL_MUTEX;
	}
	if flags.no_mutex {
		rusqlite_flags |= rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX;
	}
	if flags.shared_cache {
		rusqlite_flags |= rusqlite::OpenFlags::SQLITE_OPEN_SHARED_CACHE;
	}
	if flags.private_cache {
		rusqlite_flags |= rusqlite::OpenFlags::SQLITE_OPEN_PRIVATE_CACHE;
	}
	if flags.uri {
		rusqlite_flags |= rusqlite::OpenFlags::SQLITE_OPEN_URI;
	}

	rusqlite_flags
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_convert_default_flags() {
		let flags = convert_flags(&OpenFlags::default());
		assert!(flags.contains(rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE));
		assert!(flags.contains(rusqlite::OpenFlags::SQLITE_OPEN_CREATE));
		assert!(flags.contains(rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX));
		assert!(!flags.contains(rusqlite::OpenFlags::SQLITE_OPEN_SHARED_CACHE));
	}

	#[test]
	fn test_connect_in_memory() {
		let conn = connect(&DbPath::Memory, convert_flags(&OpenFlags::default())).unwrap();
		let one: i64 = conn.query_row("SELECT 1", [], |row| row.get(0)).unwrap();
		assert_eq!(one, 1);
	}
}
