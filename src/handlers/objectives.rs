use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::models::Objective;
use crate::services::chat::DEFAULT_USER_ID;
use crate::services::objectives::{self, ObjectiveStats, StatisticsReport};
use crate::state::AppState;

use super::parse_json;

// GET /estadisticas_objetivos
pub async fn objective_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ObjectiveStats>, AppError> {
    let report = {
        let db = state.db()?;
        objectives::objective_statistics(&db)
    };

    match report {
        StatisticsReport::Counts(stats) => Ok(Json(stats)),
        StatisticsReport::Failed { error } => Err(AppError::Internal(error)),
    }
}

#[derive(Deserialize)]
pub struct CompleteRequest {
    pub tipo: String,
    #[serde(default)]
    pub usuario_id: Option<String>,
}

// POST /completar_objetivo
pub async fn complete_objective(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let req: CompleteRequest = parse_json(&body)?;

    let objective = Objective::parse(req.tipo.trim()).ok_or_else(|| {
        AppError::BadRequest(format!("tipo de objetivo desconocido: {}", req.tipo))
    })?;
    let user_id = req
        .usuario_id
        .unwrap_or_else(|| DEFAULT_USER_ID.to_string());

    let message = {
        let db = state.db()?;
        objectives::complete_objective(&db, objective, &user_id)
    };

    Ok(Json(json!({ "message": message })))
}
