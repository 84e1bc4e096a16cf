pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod services;
pub mod state;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/chat", post(handlers::chat::chat))
        .route("/enviar_formulario", post(handlers::forms::submit_form))
        .route("/estadisticas_citas", get(handlers::forms::appointment_stats))
        .route(
            "/estadisticas_objetivos",
            get(handlers::objectives::objective_stats),
        )
        .route(
            "/completar_objetivo",
            post(handlers::objectives::complete_objective),
        )
        .route(
            "/historial/:usuario_id",
            get(handlers::history::get_history),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
