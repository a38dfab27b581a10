pub mod health;
pub mod page;

use axum::{
    routing::{get, post},
    Router,
};

use crate::auth::handlers::{handle_login, handle_logout};
use crate::export::handlers::handle_export;
use crate::generation::handlers::{handle_generate, handle_get_state, handle_list_variants};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(page::index_handler))
        .route("/health", get(health::health_handler))
        .route("/auth/login", get(handle_login))
        .route("/auth/logout", get(handle_logout))
        .route("/api/v1/variants", get(handle_list_variants))
        .route("/api/v1/copilot/generate", post(handle_generate))
        .route("/api/v1/copilot/state", get(handle_get_state))
        .route("/api/v1/copilot/export", post(handle_export))
        .with_state(state)
}
