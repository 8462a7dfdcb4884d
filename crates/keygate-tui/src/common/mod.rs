//! Shared leaf helpers for TUI features.
//!
//! This module must NOT import `UiEvent` or feature state.

pub mod render_utils;
pub mod text;

pub use text::{edit_value, mask, sanitize_paste, truncate_start_with_ellipsis};
