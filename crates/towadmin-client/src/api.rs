//! HTTP client for the towing-platform admin API

use reqwest::{Client, Method, RequestBuilder};
use serde_json::Value;
use towadmin_core::config::ApiConfig;
use towadmin_core::types::{
    CommandCenterPayload, Envelope, FeePayload, LoginRequest, ResetPasswordRequest, Session,
    UserRole,
};
use towadmin_core::{Error, Result};
use tracing::debug;

/// Resource keys for the collections the dashboard consumes
///
/// A key is both the cache key and the request path under the admin base
/// path, so every list screen names exactly one string.
pub mod keys {
    use towadmin_core::types::BookingStatus;

    /// Customer accounts
    pub const USERS: &str = "users/";
    /// Towing operators
    pub const OPERATORS: &str = "users/operators/";
    /// Driver teams
    pub const DRIVERS: &str = "users/drivers/";
    /// Admin accounts
    pub const ADMIN_USERS: &str = "accounts/admin-user";
    /// Supported payout banks
    pub const BANK_LISTS: &str = "settings/bank-lists";
    /// Fee components
    pub const FEES: &str = "settings/fees";
    /// Fee component count
    pub const FEES_COUNT: &str = "settings/fees?component=count";
    /// Command centers
    pub const COMMAND_CENTERS: &str = "settings/command-centers/";
    /// Booking requests, all statuses
    pub const BOOKING_REQUESTS: &str = "bookings/requests/";

    /// Key for a single operator's detail record
    #[must_use]
    pub fn operator_detail(id: &str) -> String {
        format!("users/operators/{}/", urlencoding::encode(id))
    }

    /// Key for booking requests filtered by status
    #[must_use]
    pub fn booking_requests(status: Option<BookingStatus>) -> String {
        status.map_or_else(
            || BOOKING_REQUESTS.to_string(),
            |s| format!("{BOOKING_REQUESTS}?status={s}"),
        )
    }
}

/// API client for the platform's admin REST surface
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    admin_path: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a new API client against the given base URL and admin path
    #[must_use]
    pub fn new(base_url: impl Into<String>, admin_path: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let admin_path = admin_path.into();
        let admin_path = format!("/{}", admin_path.trim_matches('/'));
        Self {
            client: Client::new(),
            base_url,
            admin_path,
            token: None,
        }
    }

    /// Build a client from configuration, honoring the request timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout))
            .build()
            .map_err(|e| Error::Http(e.to_string()))?;
        let mut api = Self::new(config.base_url.clone(), config.admin_path.clone());
        api.client = client;
        Ok(api)
    }

    /// Attach a bearer token to every subsequent request
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Drop the bearer token (used on logout)
    #[must_use]
    pub fn without_token(mut self) -> Self {
        self.token = None;
        self
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}{}/{}",
            self.base_url,
            self.admin_path,
            path.trim_start_matches('/')
        )
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self.client.request(method, self.url(path));
        if let Some(ref token) = self.token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Value> {
        let response = builder
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        let http_status = response.status();
        let envelope: Envelope = response
            .json()
            .await
            .map_err(|e| Error::Http(format!("failed to parse response: {e}")))?;

        if !http_status.is_success() || !envelope.is_ok() {
            return Err(Error::Api {
                status: if envelope.status.is_empty() {
                    http_status.to_string()
                } else {
                    envelope.status
                },
                message: envelope
                    .message
                    .unwrap_or_else(|| http_status.to_string()),
            });
        }

        Ok(envelope.data.unwrap_or(Value::Null))
    }

    /// Fetch an arbitrary collection or record by its resource key
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-ok envelope.
    pub async fn get_resource(&self, key: &str) -> Result<Value> {
        debug!(key, "fetching resource");
        self.send(self.request(Method::GET, key)).await
    }

    /// Authenticate and build a session from the returned claims
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-ok envelope, or a
    /// response missing the access token.
    pub async fn login(&self, request: &LoginRequest) -> Result<Session> {
        let data = self
            .send(self.request(Method::POST, "auths/login").json(request))
            .await?;

        let token = data
            .get("access_token")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::Authentication("login response missing access token".to_string()))?
            .to_string();

        let role = data
            .get("role")
            .cloned()
            .map(serde_json::from_value::<UserRole>)
            .transpose()?
            .unwrap_or_default();

        let display_name = match (
            data.get("first_name").and_then(Value::as_str),
            data.get("last_name").and_then(Value::as_str),
        ) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(first), None) => first.to_string(),
            _ => request.email.clone(),
        };

        Ok(Session {
            token,
            role,
            display_name,
        })
    }

    /// Invalidate the current session on the server
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-ok envelope.
    pub async fn logout(&self) -> Result<()> {
        self.send(self.request(Method::GET, "accounts/auth/logout/"))
            .await
            .map(|_| ())
    }

    /// Request a password-reset email
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-ok envelope.
    pub async fn reset_password(&self, request: &ResetPasswordRequest) -> Result<()> {
        self.send(self.request(Method::POST, "auths/reset-password").json(request))
            .await
            .map(|_| ())
    }

    /// Delete a customer account
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-ok envelope.
    pub async fn delete_user(&self, id: &str) -> Result<()> {
        self.send(self.request(Method::DELETE, &format!("users/{}", urlencoding::encode(id))))
            .await
            .map(|_| ())
    }

    /// Delete an admin account
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-ok envelope.
    pub async fn delete_admin_user(&self, id: &str) -> Result<()> {
        self.send(self.request(
            Method::DELETE,
            &format!("accounts/admin-user/{}", urlencoding::encode(id)),
        ))
        .await
        .map(|_| ())
    }

    /// Remove a booking request
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-ok envelope.
    pub async fn delete_booking_request(&self, id: &str) -> Result<()> {
        self.send(self.request(
            Method::DELETE,
            &format!("bookings/requests/{}", urlencoding::encode(id)),
        ))
        .await
        .map(|_| ())
    }

    /// Fetch the supported payout banks
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-ok envelope.
    pub async fn bank_lists(&self) -> Result<Value> {
        self.get_resource(keys::BANK_LISTS).await
    }

    /// Create a fee component
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-ok envelope.
    pub async fn create_fee(&self, payload: &FeePayload) -> Result<Value> {
        self.send(self.request(Method::POST, keys::FEES).json(payload))
            .await
    }

    /// Update a fee component
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-ok envelope.
    pub async fn update_fee(&self, id: &str, payload: &FeePayload) -> Result<Value> {
        self.send(
            self.request(
                Method::PATCH,
                &format!("settings/fees/{}", urlencoding::encode(id)),
            )
            .json(payload),
        )
        .await
    }

    /// Delete a fee component
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-ok envelope.
    pub async fn delete_fee(&self, id: &str) -> Result<()> {
        self.send(self.request(
            Method::DELETE,
            &format!("settings/fees/{}", urlencoding::encode(id)),
        ))
        .await
        .map(|_| ())
    }

    /// Create a command center
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-ok envelope.
    pub async fn create_command_center(&self, payload: &CommandCenterPayload) -> Result<Value> {
        self.send(self.request(Method::POST, keys::COMMAND_CENTERS).json(payload))
            .await
    }

    /// Delete a command center
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-ok envelope.
    pub async fn delete_command_center(&self, id: &str) -> Result<()> {
        self.send(self.request(
            Method::DELETE,
            &format!("settings/command-centers/{}", urlencoding::encode(id)),
        ))
        .await
        .map(|_| ())
    }
}
