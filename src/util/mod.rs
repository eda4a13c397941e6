//! Small shared utilities.

pub mod retry;
