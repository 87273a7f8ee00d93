//! Customer accounts screen

use serde_json::Value;

use crate::components::{resolve_path, Column, CELL_PLACEHOLDER};
use crate::screens::{crud::CrudScreen, ScreenDeps};
use crate::session::can_delete;
use towadmin_client::keys;

/// Display name for a user record: "first last", falling back to the email
pub fn display_name(row: &Value) -> String {
    let first = resolve_path(row, "first_name").and_then(Value::as_str);
    let last = resolve_path(row, "last_name").and_then(Value::as_str);
    match (first, last) {
        (Some(first), Some(last)) => format!("{first} {last}"),
        (Some(first), None) => first.to_string(),
        _ => resolve_path(row, "email")
            .and_then(Value::as_str)
            .unwrap_or(CELL_PLACEHOLDER)
            .to_string(),
    }
}

fn name_column() -> Column {
    Column::new("name", "name", "first_name")
        .with_render(|_, row, _| display_name(row))
}

/// Compose the customers screen
#[must_use]
pub fn screen(deps: &ScreenDeps) -> CrudScreen {
    let mut screen = CrudScreen::new(
        deps,
        "customers",
        "Customers",
        keys::USERS,
        vec![
            name_column(),
            Column::new("email", "email", "email"),
            Column::new("phone", "phone", "phone"),
            Column::new("joined", "joined", "created_at"),
        ],
    );
    if can_delete(deps.session.role) {
        screen = screen.with_delete(display_name, |api, id| {
            Box::pin(async move { api.delete_user(&id).await })
        });
    }
    screen
}
