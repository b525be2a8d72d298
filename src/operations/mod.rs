//! Task operations - shared business logic layer
//!
//! This module contains the only code that mutates the task list,
//! shared between the TUI and the command line.

pub mod tasks;
