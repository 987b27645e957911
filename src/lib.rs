//! lbrender renders logical load-balancer state into HAProxy
//! configuration files.
//!
//! It takes a declarative description of a virtual IP, a backend pool,
//! the pool's members, and their health monitors, translates it into the
//! HAProxy textual configuration format, and atomically replaces the
//! target file so the daemon always reloads a complete config.
//!
//! # Architecture
//!
//! - [`cli`] -- Command-line argument parsing with clap derive macros.
//! - [`cmd`] -- Subcommand dispatch and execution (render, watch, init,
//!   validate).
//! - [`config`] -- The logical data model, schema validation, and state
//!   file loading via the [`ConfigSource`](config::ConfigSource) trait.
//! - [`error`] -- Unified error types using `thiserror`.
//! - [`logging`] -- Structured tracing setup with JSON and pretty-print
//!   output.
//! - [`render`] -- Core translation: section builders, health-check
//!   option derivation, status-code range expansion, and the atomic
//!   writer.
//!
//! # Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `yaml` | YAML state file support _(enabled by default)_ |
//! | `json` | JSON state file support |
//! | `toml` | TOML state file support |
//! | `file-backends` | All file format backends |
//! | `full` | All features |

// Binary crate — public functions are internal, not consumed by external users.
#![allow(clippy::missing_errors_doc)]

pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod logging;
pub mod render;
