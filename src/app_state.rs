//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{Error, config::AccountsConfig, db::initialize};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The database connection.
    pub db_connection: Arc<Mutex<Connection>>,

    /// The mapping from joint accounts to their store keys.
    pub accounts: AccountsConfig,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for
    /// the account and budget records, and seeding the joint accounts with
    /// the keys from `accounts`.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(db_connection: Connection, accounts: AccountsConfig) -> Result<Self, Error> {
        initialize(&db_connection, &accounts)?;

        Ok(Self {
            db_connection: Arc::new(Mutex::new(db_connection)),
            accounts,
        })
    }
}
