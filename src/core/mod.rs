//! Core module
//!
//! The shared file and the HTTP surface around it.

pub mod file;
pub mod page;
pub mod server;
