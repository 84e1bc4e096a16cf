use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::errors::AppError;
use crate::models::MessageRecord;
use crate::services::conversation;
use crate::state::AppState;

#[derive(Serialize)]
pub struct HistoryResponse {
    pub usuario_id: String,
    pub mensajes: Vec<MessageRecord>,
}

// GET /historial/:usuario_id
pub async fn get_history(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<HistoryResponse>, AppError> {
    let mensajes = {
        let db = state.db()?;
        conversation::history(&db, &user_id)?
    };

    Ok(Json(HistoryResponse {
        usuario_id: user_id,
        mensajes,
    }))
}
