//! gh-reject library.
//!
//! Exposes the API client, configuration and the `reject` pipeline for
//! integration testing. The binary entrypoint is in `main.rs`.

pub mod api;
pub mod cli;
pub mod config;
pub mod prompt;
pub mod utils;
