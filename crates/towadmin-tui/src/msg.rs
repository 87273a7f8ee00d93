//! Messages sent from spawned tasks back to the UI loop
//!
//! Network work runs on the tokio runtime; the synchronous draw loop drains
//! these through an unbounded channel once per tick.

use towadmin_core::types::Session;
use towadmin_core::Result;

/// Completion notice from a background task
#[derive(Debug)]
pub enum AppMsg {
    /// A delete request finished on the named screen
    ///
    /// Carries the deleted item's display label on success.
    DeleteFinished {
        /// Slug of the screen that issued the request
        screen: &'static str,
        /// Request outcome; `Ok` carries the item label for the toast
        outcome: Result<String>,
    },

    /// A login attempt finished
    LoginFinished(Box<Result<Session>>),

    /// A password-reset request finished
    ResetPasswordFinished(Result<()>),

    /// The server-side logout call finished
    ///
    /// The local session is dropped regardless of the outcome.
    LogoutFinished(Result<()>),
}
