//! Registration screen.

mod render;
mod state;
mod update;

pub use render::render_register;
pub use state::RegisterState;
pub use update::{handle_key, handle_paste, handle_settled, submit};
