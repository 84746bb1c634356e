//! The personal budget records and their endpoints.

mod core;
mod get_endpoint;
mod update_endpoint;

pub use core::{
    Budget, fetch_budget, fetch_or_create_budget, fetch_virement_famille, update_revenus_budget,
    upsert_budget,
};
pub use get_endpoint::get_budget_endpoint;
pub use update_endpoint::update_budget_endpoint;
