//! Core of the keygate login/registration client.
//!
//! Field validation, form state, the submission workflow and the status
//! message lifecycle live here. Nothing in this crate touches the terminal;
//! the TUI and CLI crates drive it.

pub mod api;
pub mod config;
pub mod criteria;
pub mod forms;
pub mod logging;
pub mod status;
pub mod token;
pub mod validation;
pub mod workflow;
