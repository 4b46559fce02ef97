//! View-state machines behind each console screen.
//!
//! Views are synchronous: an action runs its request to completion and
//! leaves its outcome in the view's notification queue. Actions take
//! `&mut self`, so a view never has two requests in flight.

pub mod customers;
pub mod devices;
pub mod login;
pub mod register;

/// Which tab of a create dialog is submitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CreateMode {
    #[default]
    Form,
    /// The raw JSON text is sent as-is.
    Json,
}
