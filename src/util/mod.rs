//! Utility module
//!
//! Common utilities used across the application.

pub mod download;
pub mod format;
pub mod hash;
