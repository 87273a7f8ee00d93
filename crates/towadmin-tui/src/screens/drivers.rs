//! Driver teams screen

use crate::components::Column;
use crate::screens::customers::display_name;
use crate::screens::{crud::CrudScreen, ScreenDeps};
use crate::session::can_delete;
use towadmin_client::keys;

/// Compose the drivers screen
#[must_use]
pub fn screen(deps: &ScreenDeps) -> CrudScreen {
    let mut screen = CrudScreen::new(
        deps,
        "drivers",
        "Drivers",
        keys::DRIVERS,
        vec![
            Column::new("name", "name", "first_name").with_render(|_, row, _| display_name(row)),
            Column::new("email", "email", "email"),
            Column::new("phone", "phone", "phone"),
            Column::new("operator", "operator", "operator.company_name"),
        ],
    );
    if can_delete(deps.session.role) {
        screen = screen.with_delete(display_name, |api, id| {
            Box::pin(async move { api.delete_user(&id).await })
        });
    }
    screen
}
