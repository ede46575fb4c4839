//! Command implementations for the step type creator
//!
//! Each command module handles the CLI interface and delegates to
//! step-type-create for the actual work.

pub mod create;
