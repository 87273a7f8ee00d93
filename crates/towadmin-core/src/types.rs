//! Core data types for the towadmin dashboard

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Response envelope used by every platform endpoint
///
/// The service reports success through `status == "ok"`; anything else is an
/// application-level failure, with `message` carrying the human-readable
/// reason.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    /// Status string; `"ok"` on success
    pub status: String,

    /// Optional human-readable message
    #[serde(default)]
    pub message: Option<String>,

    /// Payload; shape depends on the endpoint
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl Envelope {
    /// Whether the service reported success
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

/// Role attached to an authenticated admin session
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Full platform control, including admin-account management
    SuperAdmin,
    /// Day-to-day operations
    Admin,
    /// Read-mostly support staff
    Support,
}

impl Default for UserRole {
    fn default() -> Self {
        Self::Support
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SuperAdmin => write!(f, "super_admin"),
            Self::Admin => write!(f, "admin"),
            Self::Support => write!(f, "support"),
        }
    }
}

/// Read-only session context created on login and cleared on logout
///
/// Injected into screens at composition time; screens never mutate it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token attached to authenticated requests
    pub token: String,

    /// Role used to gate screen composition
    pub role: UserRole,

    /// Name shown in the header bar
    pub display_name: String,
}

/// Login request payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Admin account email
    #[validate(email)]
    pub email: String,

    /// Account password
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

/// Password-reset request payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    /// Email the reset link is sent to
    #[validate(email)]
    pub email: String,
}

/// Booking request lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Awaiting an operator
    Pending,
    /// Operator assigned
    Accepted,
    /// Tow completed
    Completed,
    /// Cancelled by either party
    Cancelled,
}

impl BookingStatus {
    /// All statuses, in filter-menu order
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::Accepted,
        Self::Completed,
        Self::Cancelled,
    ];
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Accepted => write!(f, "accepted"),
            Self::Completed => write!(f, "completed"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Fee component create/update payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FeePayload {
    /// Fee component name (e.g. "base", "per_km")
    #[validate(length(min = 1, max = 64))]
    pub component: String,

    /// Amount in the platform's minor currency unit
    pub amount: i64,
}

/// Command-center create payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CommandCenterPayload {
    /// Center display name
    #[validate(length(min = 1, max = 128))]
    pub name: String,

    /// Contact phone number
    #[validate(length(min = 6, max = 32))]
    pub phone: String,

    /// Street address
    #[validate(length(max = 255))]
    pub address: Option<String>,
}
