use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::errors::AppError;
use crate::services::chat::{self, ChatReply, DEFAULT_USER_ID};
use crate::state::AppState;

use super::parse_json;

#[derive(Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub usuario_id: Option<String>,
}

// POST /chat
pub async fn chat(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ChatReply>, AppError> {
    let req: ChatRequest = parse_json(&body)?;

    let message = req.message.unwrap_or_default();
    if message.trim().is_empty() {
        return Err(AppError::BadRequest(
            "El campo 'message' está vacío o ausente".to_string(),
        ));
    }

    let user_id = req
        .usuario_id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_USER_ID.to_string());

    tracing::info!(user_id = %user_id, "incoming chat message");

    let reply = chat::respond(&state, &message, &user_id).await?;
    Ok(Json(reply))
}
