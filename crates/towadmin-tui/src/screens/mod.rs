//! Screen composition
//!
//! Every list screen is one [`crud::CrudScreen`] configured by a factory in
//! the per-domain modules below. Factories receive [`ScreenDeps`], a cheap
//! clone of everything a screen needs to fetch and mutate data.

pub mod admins;
pub mod bookings;
pub mod centers;
pub mod crud;
pub mod customers;
pub mod drivers;
pub mod fees;
pub mod login;
pub mod operators;

pub use crud::CrudScreen;
pub use login::LoginScreen;

use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;
use towadmin_client::{ApiClient, Fetcher, ResourceCache, ResourceOptions};
use towadmin_core::types::Session;

use crate::msg::AppMsg;

/// Shared wiring handed to every screen at composition time
#[derive(Debug, Clone)]
pub struct ScreenDeps {
    /// Authenticated API client
    pub api: ApiClient,
    /// Shared resource cache
    pub cache: ResourceCache,
    /// Runtime handle for spawning mutations
    pub handle: Handle,
    /// Channel back to the UI loop
    pub tx: UnboundedSender<AppMsg>,
    /// The authenticated session
    pub session: Session,
    /// Rows per table page
    pub page_size: usize,
    /// Static-maps key for location links, when configured
    pub maps_api_key: Option<String>,
}

/// Fetcher that resolves a resource key through the API client
///
/// The key doubles as the request path, so this is the only fetcher the list
/// screens ever need.
pub fn api_fetcher(api: &ApiClient, key: impl Into<String>) -> Fetcher {
    let api = api.clone();
    let key: String = key.into();
    Arc::new(move || {
        let api = api.clone();
        let key = key.clone();
        Box::pin(async move { api.get_resource(&key).await })
    })
}

/// Options used by every list screen: no focus-driven refetch
#[must_use]
pub fn list_options() -> ResourceOptions {
    ResourceOptions {
        revalidate_on_focus: false,
    }
}
