//! # Transformer CLI
//!
//! Command line front end for the Transformer image service.
//!
//! This crate provides:
//! - **Settings**: defaults, `transformer.toml`, `TRANSFORMER_*` environment
//!   variables and flags, merged in that order
//! - **Asset lifecycle**: `add`, `update`, `block`, `delete`, `activate`,
//!   `versions`
//! - **Delivery**: `url`, `get`, `get-id`

pub mod cli;
pub mod commands;
pub mod config;

pub use cli::{Args, Command};
pub use commands::run;
pub use config::Settings;
