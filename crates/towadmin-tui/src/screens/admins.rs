//! Admin accounts screen (super admin only)

use crate::components::Column;
use crate::screens::customers::display_name;
use crate::screens::{crud::CrudScreen, ScreenDeps};
use towadmin_client::keys;

/// Compose the admin-accounts screen
///
/// Only reachable for super admins (see [`crate::session::tabs_for`]), so the
/// delete action is always wired.
#[must_use]
pub fn screen(deps: &ScreenDeps) -> CrudScreen {
    CrudScreen::new(
        deps,
        "admins",
        "Admins",
        keys::ADMIN_USERS,
        vec![
            Column::new("name", "name", "first_name").with_render(|_, row, _| display_name(row)),
            Column::new("email", "email", "email"),
            Column::new("role", "role", "role"),
        ],
    )
    .with_delete(display_name, |api, id| {
        Box::pin(async move { api.delete_admin_user(&id).await })
    })
}
