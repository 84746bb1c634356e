//! Application router configuration.

use axum::{
    Router,
    routing::{get, post},
};

use crate::{
    AppState,
    budget::{get_budget_endpoint, update_budget_endpoint},
    compte::{get_compte_endpoint, update_compte_endpoint},
    endpoints,
    keep_alive::keep_alive_endpoint,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            endpoints::COMPTE,
            get(get_compte_endpoint).post(update_compte_endpoint),
        )
        .route(
            endpoints::BUDGET,
            get(get_budget_endpoint).post(update_budget_endpoint),
        )
        .route(endpoints::KEEP_ALIVE, get(keep_alive_endpoint))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum_test::TestServer;
    use rusqlite::Connection;

    use crate::{AppState, config::AccountsConfig};

    use super::build_router;

    #[tokio::test]
    async fn unknown_routes_are_not_found() {
        let connection = Connection::open_in_memory().unwrap();
        let state = AppState::new(connection, AccountsConfig::default()).unwrap();
        let server =
            TestServer::new(build_router(state));

        let response = server.get("/api/transactions").await;

        response.assert_status_not_found();
    }
}
