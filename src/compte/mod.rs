//! The joint bank account records and their endpoints.

mod core;
mod get_endpoint;
mod update_endpoint;

pub use core::{Compte, fetch_compte, update_compte, update_revenus_compte};
pub use get_endpoint::get_compte_endpoint;
pub use update_endpoint::update_compte_endpoint;
