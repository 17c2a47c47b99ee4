use crate::{handlers, state::AppState};
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;

/// Builds the full route table. CORS accepts any origin.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/openapi", get(handlers::openapi))
        .route("/processo", post(handlers::add_processo))
        .route("/processos", get(handlers::get_processos))
        .route("/busca_processo", get(handlers::get_processo))
        .route("/del_processo", delete(handlers::del_processo))
        .route("/processo/atualizar", put(handlers::update_processo))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
