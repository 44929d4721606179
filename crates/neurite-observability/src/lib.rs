// Copyright 2025 Neurite Developers
// SPDX-License-Identifier: Apache-2.0

//! # neurite-observability
//!
//! Logging setup shared by the neurite tools, with per-crate debug flag support.
//!
//! ## Features
//! - `file-logging`: per-run log folders with one JSON file per crate

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod config;
pub mod init;

// Re-export commonly used items
pub use cli::*;
pub use config::*;
pub use init::*;

/// Known neurite crate names for debug flags
pub const KNOWN_CRATES: &[&str] = &[
    "neurite",
    "neurite-structures",
    "neurite-compartments",
    "neurite-config",
    "neurite-observability",
];

/// Tracing target for a crate name (`neurite-compartments` -> `neurite_compartments`)
pub fn crate_target(crate_name: &str) -> String {
    crate_name.replace('-', "_")
}
