//! Defines the endpoint for replacing a joint account's expense and income lists.
use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use crate::{
    AppState, Error,
    compte::{Compte, fetch_compte, update_compte},
    config::CompteJoint,
    entry::{Depense, Revenu, assigner_ids_depenses, assigner_ids_revenus},
    transfer_sync::sync_depenses,
};

/// The request body for updating a joint account.
#[derive(Debug, Deserialize)]
pub struct ComptePayload {
    /// The full expense list, replacing the stored one.
    pub depenses: Vec<Depense>,
    /// The full income list, replacing the stored one.
    pub revenus: Vec<Revenu>,
}

/// A route handler replacing a joint account's lists whole.
///
/// Recurring transfers are synchronized against the previously stored
/// expense list before persisting: removed or retargeted transfers lose
/// their mirror income on the old destination, and every submitted transfer
/// gets its mirror upserted. Destination-side failures are logged and do not
/// fail this request; only errors on the account record itself do.
pub async fn update_compte_endpoint(
    State(state): State<AppState>,
    Path(compte): Path<String>,
    Json(payload): Json<ComptePayload>,
) -> Result<Json<Compte>, Error> {
    let compte: CompteJoint = compte.parse()?;
    let key = state.accounts.key_for(compte);

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("Could not acquire database lock: {error}");
            return Err(Error::DatabaseLockError);
        }
    };

    let existant = fetch_compte(&connection, key)?;

    let mut depenses = payload.depenses;
    let mut revenus = payload.revenus;
    assigner_ids_depenses(&mut depenses);
    assigner_ids_revenus(&mut revenus);

    sync_depenses(
        &connection,
        &state.accounts,
        compte,
        &existant.depenses,
        &depenses,
    );

    let updated = update_compte(&connection, key, &depenses, &revenus)?;

    Ok(Json(updated))
}
