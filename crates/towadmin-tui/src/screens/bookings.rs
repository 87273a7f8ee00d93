//! Booking requests screen
//!
//! Carries a status filter that re-keys the collection, so each status is
//! cached separately and switching back to a seen status is instant.

use serde_json::Value;

use crate::components::{capitalize, Column, FilterOption, CELL_PLACEHOLDER};
use crate::screens::customers::display_name;
use crate::screens::{crud::CrudScreen, ScreenDeps};
use crate::session::can_delete;
use towadmin_client::keys;
use towadmin_core::types::BookingStatus;

fn status_options() -> Vec<FilterOption> {
    let mut options = vec![FilterOption::new("", "All")];
    for status in BookingStatus::ALL {
        let id = status.to_string();
        options.push(FilterOption::new(id.clone(), capitalize(&id)));
    }
    options
}

fn key_for_status(id: &str) -> String {
    if id.is_empty() {
        keys::BOOKING_REQUESTS.to_string()
    } else {
        format!("{}?status={id}", keys::BOOKING_REQUESTS)
    }
}

/// Booking label used in the delete confirmation
fn booking_label(row: &Value) -> String {
    row.get("user").map_or_else(
        || {
            row.get("id")
                .map_or_else(|| CELL_PLACEHOLDER.to_string(), |id| format!("booking {id}"))
        },
        display_name,
    )
}

/// Compose the booking-requests screen
#[must_use]
pub fn screen(deps: &ScreenDeps) -> CrudScreen {
    let mut screen = CrudScreen::new(
        deps,
        "bookings",
        "Bookings",
        keys::BOOKING_REQUESTS,
        vec![
            Column::new("customer", "customer", "user.first_name")
                .with_render(|_, row, _| booking_label(row)),
            Column::new("pickup", "pickup", "pickup_address"),
            Column::new("destination", "destination", "destination_address"),
            Column::new("status", "status", "status"),
            Column::new("created", "created", "created_at"),
        ],
    )
    .with_filter("Status", status_options(), "", key_for_status);
    if can_delete(deps.session.role) {
        screen = screen.with_delete(booking_label, |api, id| {
            Box::pin(async move { api.delete_booking_request(&id).await })
        });
    }
    screen
}
