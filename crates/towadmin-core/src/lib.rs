//! Core types and utilities for the towadmin dashboard
//!
//! Shared foundation for the REST client and the terminal front-end:
//! configuration loading, the error taxonomy, and the domain data model.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod config;
pub mod error;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
