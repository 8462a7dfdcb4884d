//! Effect handlers for the TUI runtime.
//!
//! Handlers perform I/O and return the `UiEvent` describing the result.
//! They never touch state; the runtime spawns them and forwards the result
//! to the inbox.

pub mod auth;
pub mod timers;

pub use auth::{store_token, submit_login, submit_register};
pub use timers::{redirect, status_expiry};
