//! Fee configuration screen
//!
//! Tracks the component count as a companion resource, so the header count
//! stays consistent with the service after a delete.

use serde_json::Value;

use crate::components::{resolve_path, Column, CELL_PLACEHOLDER};
use crate::screens::{crud::CrudScreen, ScreenDeps};
use crate::session::can_delete;
use towadmin_client::keys;

fn fee_label(row: &Value) -> String {
    resolve_path(row, "component")
        .and_then(Value::as_str)
        .map_or_else(|| "fee".to_string(), |c| format!("fee '{c}'"))
}

fn amount_column() -> Column {
    Column::new("amount", "amount", "amount").with_render(|value, _, _| {
        value.and_then(Value::as_i64).map_or_else(
            || CELL_PLACEHOLDER.to_string(),
            |minor| format!("{}.{:02}", minor / 100, (minor % 100).abs()),
        )
    })
}

/// Compose the fees screen
#[must_use]
pub fn screen(deps: &ScreenDeps) -> CrudScreen {
    let mut screen = CrudScreen::new(
        deps,
        "fees",
        "Fees",
        keys::FEES,
        vec![
            Column::new("component", "component", "component"),
            amount_column(),
            Column::new("updated", "updated", "updated_at"),
        ],
    )
    .with_count_key(keys::FEES_COUNT);
    if can_delete(deps.session.role) {
        screen = screen.with_delete(fee_label, |api, id| {
            Box::pin(async move { api.delete_fee(&id).await })
        });
    }
    screen
}
