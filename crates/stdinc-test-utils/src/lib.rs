#![deny(unsafe_code)]

//! Shared test utilities for the stdinc workspace.
//!
//! Provides config builders, temporary C++ source trees, and tracing helpers
//! so that individual crate tests stay concise and consistent.
//!
//! Add this crate as a `[dev-dependency]` in any workspace member:
//!
//! ```toml
//! [dev-dependencies]
//! stdinc-test-utils = { workspace = true }
//! ```

pub mod config;
pub mod source_tree;
pub mod tracing_setup;

pub use config::TestConfigBuilder;
pub use source_tree::SourceTree;
