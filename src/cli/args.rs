//! CLI argument definitions
//!
//! Uses clap derive macros for argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// sharefile - Share one file over HTTP together with its SHA-256
#[derive(Parser, Debug)]
#[command(name = "sharefile")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// File to share
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Port to listen on [default: 8080, or server.port from the config file]
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the SHA-256 of a file in sha256sum format
    Hash {
        /// File to hash
        path: PathBuf,
    },

    /// Check a file against an expected SHA-256
    Verify {
        /// File to check
        path: PathBuf,
        /// Expected hex digest
        expected: String,
    },

    /// Download a shared file from a running server and verify it
    Fetch {
        /// Server address, e.g. http://192.168.1.20:8080/
        url: String,
        /// Directory to save into
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
        /// Replace an existing file with the same name
        #[arg(long)]
        force: bool,
    },
}
