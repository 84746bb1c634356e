//! A keep-alive endpoint that exercises the store.
//!
//! The hosted database pauses after a few days without queries, so an
//! external cron job hits this route periodically. HEAD is served by the
//! same route for uptime monitors.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::AppState;

#[derive(Debug, Serialize)]
struct KeepAliveBody {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    timestamp: String,
}

fn timestamp() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default()
}

/// A route handler running a trivial query to keep the store awake.
pub async fn keep_alive_endpoint(State(state): State<AppState>) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("Could not acquire database lock: {error}");
            return keep_alive_failure("could not acquire the database lock");
        }
    };

    match connection.query_row("SELECT COUNT(*) FROM compte", [], |row| row.get::<_, i64>(0)) {
        Ok(_) => (
            StatusCode::OK,
            Json(KeepAliveBody {
                success: true,
                message: Some("store is alive".to_owned()),
                error: None,
                timestamp: timestamp(),
            }),
        )
            .into_response(),
        Err(error) => {
            tracing::error!("keep-alive query failed: {error}");
            keep_alive_failure("keep-alive query failed")
        }
    }
}

fn keep_alive_failure(reason: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(KeepAliveBody {
            success: false,
            message: None,
            error: Some(reason.to_owned()),
            timestamp: timestamp(),
        }),
    )
        .into_response()
}
