//! Defines the endpoint for fetching a joint account.
use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    AppState, Error,
    compte::{Compte, fetch_compte},
    config::CompteJoint,
    transfer_sync::sync_virements_famille,
};

/// A route handler for fetching a joint account record by its logical name.
///
/// Fetching the family account first re-derives the family transfer incomes
/// from the personal budgets, so the returned record always reflects the
/// current `virementFamille` amounts.
pub async fn get_compte_endpoint(
    State(state): State<AppState>,
    Path(compte): Path<String>,
) -> Result<Json<Compte>, Error> {
    let compte: CompteJoint = compte.parse()?;

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("Could not acquire database lock: {error}");
            return Err(Error::DatabaseLockError);
        }
    };

    let record = if compte == state.accounts.compte_famille() {
        sync_virements_famille(&connection, &state.accounts)?
    } else {
        fetch_compte(&connection, state.accounts.key_for(compte))?
    };

    Ok(Json(record))
}
