//! Token command handlers.

use keygate_core::token::TokenStore;

pub fn path() {
    println!("{}", TokenStore::default().path().display());
}
