//! CLI command implementations
//!
//! This module contains all CLI command implementations.

pub mod delete;
pub mod history;
pub mod init;
pub mod scan;
pub mod show;
pub mod validate;
