//! Comptes is a small web service for managing a family's budget: three
//! joint bank accounts and one personal budget per person, served as a JSON
//! REST API backed by SQLite.
//!
//! The interesting part lives in [transfer_sync]: recurring transfers
//! recorded as expenses on one account are mirrored as incomes on their
//! destination account or budget, and kept in sync on every update.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod app_state;
mod budget;
mod compte;
mod config;
mod db;
mod endpoints;
mod entry;
mod error;
mod keep_alive;
mod routing;
pub mod totaux;
pub mod transfer_sync;

pub use app_state::AppState;
pub use budget::Budget;
pub use compte::Compte;
pub use config::{AccountsConfig, CompteJoint, DestinationRef, Personne};
pub use db::initialize as initialize_db;
pub use entry::{Depense, DepenseType, Revenu};
pub use error::Error;
pub use routing::build_router;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
