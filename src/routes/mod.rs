pub mod auth;
pub mod downloads;
pub mod health;
pub mod pages;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

pub use auth::{login, login_form, logout, register, register_form};
pub use downloads::{download_file, downloads};
pub use health::health_check;
pub use pages::{about, community, home};

use crate::AppState;

/// Build the application router
pub fn router(state: AppState) -> Router {
    let log_requests = state.config.log_requests;

    let app = Router::new()
        .route("/", get(home))
        .route("/about", get(about))
        .route("/community", get(community))
        .route("/downloads", get(downloads))
        .route("/download/:filename", get(download_file))
        .route("/login", get(login_form).post(login))
        .route("/register", get(register_form).post(register))
        .route("/logout", get(logout))
        .route("/health", get(health_check))
        .with_state(state);

    if log_requests {
        app.layer(TraceLayer::new_for_http())
    } else {
        app
    }
}
