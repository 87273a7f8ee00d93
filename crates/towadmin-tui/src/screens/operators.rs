//! Towing operators screen
//!
//! Clicking an operator opens a detail pane with the full record; when the
//! record carries coordinates and a maps key is configured, the pane links to
//! a static map of the operator's position.

use serde_json::Value;

use crate::components::{Column, CELL_PLACEHOLDER};
use crate::screens::customers::display_name;
use crate::screens::{crud::CrudScreen, ScreenDeps};
use crate::session::can_delete;
use towadmin_client::keys;

fn verified_column() -> Column {
    Column::new("verified", "verified", "is_verified").with_render(|value, _, _| {
        match value.and_then(Value::as_bool) {
            Some(true) => "yes".to_string(),
            Some(false) => "no".to_string(),
            None => CELL_PLACEHOLDER.to_string(),
        }
    })
}

/// Compose the operators screen
#[must_use]
pub fn screen(deps: &ScreenDeps) -> CrudScreen {
    let mut screen = CrudScreen::new(
        deps,
        "operators",
        "Operators",
        keys::OPERATORS,
        vec![
            Column::new("name", "name", "first_name").with_render(|_, row, _| display_name(row)),
            Column::new("email", "email", "email"),
            Column::new("phone", "phone", "phone"),
            verified_column(),
        ],
    )
    .with_detail(keys::operator_detail);
    if can_delete(deps.session.role) {
        screen = screen.with_delete(display_name, |api, id| {
            Box::pin(async move { api.delete_user(&id).await })
        });
    }
    screen
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn verified_renders_yes_no_or_placeholder() {
        let column = verified_column();
        let render = column
            .render
            .as_ref()
            .unwrap_or_else(|| panic!("render should be set"));
        assert_eq!(render(Some(&json!(true)), &json!({}), 0), "yes");
        assert_eq!(render(Some(&json!(false)), &json!({}), 0), "no");
        assert_eq!(render(None, &json!({}), 0), "-");
    }

    #[test]
    fn detail_key_targets_the_operator_record() {
        assert_eq!(keys::operator_detail("7"), "users/operators/7/");
    }
}
