use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::db;
use crate::AppState;

/// Health check endpoint
///
/// Reports whether the account store answers and whether the download
/// directory is present.
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let db = state.db.clone();
    let accounts = tokio::task::spawn_blocking(move || db::count_accounts(&db))
        .await
        .map_err(crate::AppError::from)
        .and_then(|r| r);

    let db_status = match &accounts {
        Ok(_) => "connected",
        Err(e) => {
            tracing::error!("Database health check failed: {:?}", e);
            "disconnected"
        }
    };

    let downloads_status = match tokio::fs::metadata(&state.config.download_dir).await {
        Ok(meta) if meta.is_dir() => "available",
        _ => "missing",
    };

    Json(json!({
        "status": if db_status == "connected" { "healthy" } else { "unhealthy" },
        "database": db_status,
        "accounts": accounts.ok(),
        "downloads": downloads_status,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
