//! Role-based screen gating
//!
//! The session's role decides which tabs are composed at all; there is no
//! per-action permission check beyond what the service enforces server-side.

use towadmin_core::types::UserRole;

/// One top-level tab of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    /// Customer accounts
    Customers,
    /// Towing operators
    Operators,
    /// Driver teams
    Drivers,
    /// Booking requests
    Bookings,
    /// Fee configuration
    Fees,
    /// Command centers
    CommandCenters,
    /// Admin accounts
    Admins,
}

impl Tab {
    /// Title shown in the tab bar
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Customers => "Customers",
            Self::Operators => "Operators",
            Self::Drivers => "Drivers",
            Self::Bookings => "Bookings",
            Self::Fees => "Fees",
            Self::CommandCenters => "Command Centers",
            Self::Admins => "Admins",
        }
    }

    /// Stable identifier used to route background-task completions
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Customers => "customers",
            Self::Operators => "operators",
            Self::Drivers => "drivers",
            Self::Bookings => "bookings",
            Self::Fees => "fees",
            Self::CommandCenters => "centers",
            Self::Admins => "admins",
        }
    }
}

/// The tab set a role is allowed to see
///
/// Support staff get the operational views only; admin-account management is
/// reserved for super admins.
#[must_use]
pub fn tabs_for(role: UserRole) -> Vec<Tab> {
    match role {
        UserRole::SuperAdmin => vec![
            Tab::Customers,
            Tab::Operators,
            Tab::Drivers,
            Tab::Bookings,
            Tab::Fees,
            Tab::CommandCenters,
            Tab::Admins,
        ],
        UserRole::Admin => vec![
            Tab::Customers,
            Tab::Operators,
            Tab::Drivers,
            Tab::Bookings,
            Tab::Fees,
            Tab::CommandCenters,
        ],
        UserRole::Support => vec![
            Tab::Customers,
            Tab::Operators,
            Tab::Drivers,
            Tab::Bookings,
        ],
    }
}

/// Whether a role may issue destructive actions
#[must_use]
pub const fn can_delete(role: UserRole) -> bool {
    matches!(role, UserRole::SuperAdmin | UserRole::Admin)
}
