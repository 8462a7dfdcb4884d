//! Login screen.

mod render;
mod state;
mod update;

pub use render::render_login;
pub use state::LoginState;
pub use update::{
    handle_key, handle_paste, handle_redirected, handle_settled, handle_token_stored, submit,
};
