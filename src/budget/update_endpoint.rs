//! Defines the endpoint for replacing a personal budget whole.
use axum::{
    Json,
    extract::{Path, State},
};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{
    AppState, Error,
    budget::{Budget, upsert_budget},
    config::Personne,
    entry::{Depense, Revenu, assigner_ids_depenses, assigner_ids_revenus},
};

/// The request body for updating a personal budget.
#[derive(Debug, Deserialize)]
pub struct BudgetPayload {
    /// The full charge list, replacing the stored one.
    pub charges: Vec<Depense>,
    /// The full income list, replacing the stored one.
    pub revenus: Vec<Revenu>,
    /// The monthly transfer towards the family account. Must not be negative.
    #[serde(rename = "virementFamille")]
    pub virement_famille: Decimal,
}

/// A route handler replacing a person's budget whole, creating it if absent.
pub async fn update_budget_endpoint(
    State(state): State<AppState>,
    Path(personne): Path<String>,
    Json(payload): Json<BudgetPayload>,
) -> Result<Json<Budget>, Error> {
    let personne: Personne = personne.parse()?;

    if payload.virement_famille < Decimal::ZERO {
        return Err(Error::VirementNegatif);
    }

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("Could not acquire database lock: {error}");
            return Err(Error::DatabaseLockError);
        }
    };

    let mut charges = payload.charges;
    let mut revenus = payload.revenus;
    assigner_ids_depenses(&mut charges);
    assigner_ids_revenus(&mut revenus);

    let budget = upsert_budget(
        &connection,
        personne,
        &charges,
        &revenus,
        payload.virement_famille,
    )?;

    Ok(Json(budget))
}

#[cfg(test)]
mod tests {
    use axum_test::TestServer;
    use rusqlite::Connection;
    use rust_decimal::Decimal;
    use serde_json::json;

    use crate::{AppState, budget::Budget, config::AccountsConfig, routing::build_router};

    fn get_test_server() -> (AppState, TestServer) {
        let connection = Connection::open_in_memory().unwrap();
        let state = AppState::new(connection, AccountsConfig::default()).unwrap();
        let server =
            TestServer::new(build_router(state.clone()));

        (state, server)
    }

    #[tokio::test]
    async fn upserts_and_returns_the_stored_budget() {
        let (_, server) = get_test_server();

        let response = server
            .post("/api/budget/benoit")
            .json(&json!({
                "charges": [{
                    "nom": "Téléphone",
                    "montant": 19.99,
                    "type": "prelevement",
                    "date": "2024-02-01T00:00:00Z",
                    "pointe": true,
                }],
                "revenus": [],
                "virementFamille": 300.0,
            }))
            .await;

        response.assert_status_ok();
        let budget: Budget = response.json();
        assert_eq!(budget.charges.len(), 1);
        assert_eq!(budget.charges[0].pointe, Some(true));
        assert!(budget.charges[0].id.is_some());
        assert_eq!(budget.virement_famille, Decimal::from(300));
    }

    #[tokio::test]
    async fn negative_family_transfer_is_rejected() {
        let (_, server) = get_test_server();

        let response = server
            .post("/api/budget/benoit")
            .json(&json!({
                "charges": [],
                "revenus": [],
                "virementFamille": -50.0,
            }))
            .await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn unknown_person_is_a_client_error() {
        let (_, server) = get_test_server();

        let response = server
            .post("/api/budget/paul")
            .json(&json!({
                "charges": [],
                "revenus": [],
                "virementFamille": 0,
            }))
            .await;

        response.assert_status_bad_request();
    }
}
