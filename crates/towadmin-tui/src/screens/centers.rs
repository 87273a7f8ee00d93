//! Command centers screen

use serde_json::Value;

use crate::components::{resolve_path, Column};
use crate::screens::{crud::CrudScreen, ScreenDeps};
use crate::session::can_delete;
use towadmin_client::keys;

fn center_label(row: &Value) -> String {
    resolve_path(row, "name")
        .and_then(Value::as_str)
        .unwrap_or("command center")
        .to_string()
}

/// Compose the command-centers screen
#[must_use]
pub fn screen(deps: &ScreenDeps) -> CrudScreen {
    let mut screen = CrudScreen::new(
        deps,
        "centers",
        "Command Centers",
        keys::COMMAND_CENTERS,
        vec![
            Column::new("name", "name", "name"),
            Column::new("phone", "phone", "phone"),
            Column::new("address", "address", "address"),
        ],
    );
    if can_delete(deps.session.role) {
        screen = screen.with_delete(center_label, |api, id| {
            Box::pin(async move { api.delete_command_center(&id).await })
        });
    }
    screen
}
