// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Fixture tables and functions shared by the tabula test suites.

mod function;
mod logging;
pub mod table;

pub use function::{FailFunction, PiFunction, PowerFunction, SqrtFunction};
pub use logging::init_logging;
pub use table::{Counters, FailingTable, PathLenTable, ProcessTable, SignatureTable, T1Table, UsersTable};
