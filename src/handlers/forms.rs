use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::models::FormSubmission;
use crate::services::forms;
use crate::state::AppState;

use super::parse_json;

// POST /enviar_formulario
pub async fn submit_form(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let form: FormSubmission = parse_json(&body)?;

    {
        let db = state.db()?;
        forms::submit_form(&db, &form)?;
    }

    Ok(Json(json!({
        "message": "Formulario recibido y almacenado correctamente"
    })))
}

// GET /estadisticas_citas
pub async fn appointment_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let total_citas = {
        let db = state.db()?;
        forms::appointment_count(&db)?
    };

    tracing::debug!(total_citas, "appointment statistics");

    Ok(Json(json!({ "total_citas": total_citas })))
}
