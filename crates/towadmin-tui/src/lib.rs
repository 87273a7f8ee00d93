//! Terminal front-end for the towadmin dashboard
//!
//! Composition follows three layers: [`components`] are reusable widgets
//! with no knowledge of the domain, [`screens`] wire components to remote
//! resources, and [`app`] owns the terminal and routes events.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod app;
pub mod components;
pub mod msg;
pub mod screens;
pub mod session;

pub use app::App;
pub use msg::AppMsg;
