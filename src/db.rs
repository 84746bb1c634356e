//! Creates and seeds the SQLite schema.
//!
//! The store is deliberately key-value shaped: each record keeps its expense
//! and income lists whole, as JSON text columns, and updates replace a list
//! in one go. Two concurrent updates of the same record are last-writer-wins;
//! the application accepts that (see DESIGN.md).

use rusqlite::{Connection, params};

use crate::config::{AccountsConfig, CompteJoint};

/// Create the application's database tables and seed the joint account
/// records if they do not exist yet.
///
/// # Errors
/// Returns an error if the tables or seed rows could not be created.
pub fn initialize(connection: &Connection, accounts: &AccountsConfig) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS compte (
            id TEXT PRIMARY KEY,
            nom TEXT NOT NULL UNIQUE,
            depenses TEXT NOT NULL,
            revenus TEXT NOT NULL
        )",
        (),
    )?;

    connection.execute(
        "CREATE TABLE IF NOT EXISTS budget (
            personne TEXT PRIMARY KEY,
            charges TEXT NOT NULL,
            revenus TEXT NOT NULL,
            virement_famille TEXT NOT NULL
        )",
        (),
    )?;

    // The joint accounts are fixed: three records with deployment-time keys,
    // never created or deleted through the API.
    for compte in CompteJoint::ALL {
        connection.execute(
            "INSERT OR IGNORE INTO compte (id, nom, depenses, revenus) VALUES (?1, ?2, '[]', '[]')",
            params![accounts.key_for(compte), compte.as_str()],
        )?;
    }

    Ok(())
}
