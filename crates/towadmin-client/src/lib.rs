//! Remote-data layer for the towadmin dashboard
//!
//! [`api::ApiClient`] wraps the platform's REST surface; [`resource`] layers a
//! keyed cache with request de-duplication and manual revalidation on top of
//! it. Screens never talk HTTP directly; they hold [`resource::Resource`]
//! handles and read snapshots.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod api;
pub mod resource;

pub use api::{keys, ApiClient};
pub use resource::{Fetcher, Resource, ResourceCache, ResourceOptions, ResourceState};
