//! The API endpoint URIs.

/// The route to fetch or replace a joint account by its logical name.
pub const COMPTE: &str = "/api/comptes/{compte}";
/// The route to fetch or replace a person's budget.
pub const BUDGET: &str = "/api/budget/{personne}";
/// The route external monitors call to keep the store awake.
pub const KEEP_ALIVE: &str = "/api/keep-alive";
