//! Defines the endpoint for fetching (or lazily creating) a personal budget.
use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    AppState, Error,
    budget::{Budget, fetch_or_create_budget},
    config::Personne,
};

/// A route handler for fetching a person's budget.
///
/// The budget record is created empty on first access, so this never returns
/// 404 for a known person.
pub async fn get_budget_endpoint(
    State(state): State<AppState>,
    Path(personne): Path<String>,
) -> Result<Json<Budget>, Error> {
    let personne: Personne = personne.parse()?;

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("Could not acquire database lock: {error}");
            return Err(Error::DatabaseLockError);
        }
    };

    let budget = fetch_or_create_budget(&connection, personne)?;

    Ok(Json(budget))
}

#[cfg(test)]
mod tests {
    use axum_test::TestServer;
    use rusqlite::Connection;
    use rust_decimal::Decimal;

    use crate::{AppState, budget::Budget, config::AccountsConfig, routing::build_router};

    fn get_test_server() -> (AppState, TestServer) {
        let connection = Connection::open_in_memory().unwrap();
        let state = AppState::new(connection, AccountsConfig::default()).unwrap();
        let server =
            TestServer::new(build_router(state.clone()));

        (state, server)
    }

    #[tokio::test]
    async fn first_fetch_creates_an_empty_budget() {
        let (_, server) = get_test_server();

        let response = server.get("/api/budget/marine").await;

        response.assert_status_ok();
        let budget: Budget = response.json();
        assert!(budget.charges.is_empty());
        assert!(budget.revenus.is_empty());
        assert_eq!(budget.virement_famille, Decimal::ZERO);
    }

    #[tokio::test]
    async fn unknown_person_is_rejected_without_touching_the_store() {
        let (state, server) = get_test_server();

        let response = server.get("/api/budget/paul").await;

        response.assert_status_bad_request();

        let connection = state.db_connection.lock().unwrap();
        let count: i64 = connection
            .query_row("SELECT COUNT(*) FROM budget", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }
}
