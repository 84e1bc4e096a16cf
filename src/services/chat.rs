use serde::Serialize;

use crate::errors::AppError;
use crate::models::Role;
use crate::services::ai::prompt::Prompt;
use crate::services::conversation::log_message;
use crate::services::intent::detect_objective;
use crate::services::objectives::register_objective;
use crate::state::AppState;

pub const DEFAULT_USER_ID: &str = "usuario_generico";

#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub response: String,
    pub mostrar_formulario: bool,
}

/// Classify, record the objective, ask the model with catalog context, log
/// both sides of the exchange.
pub async fn respond(state: &AppState, message: &str, user_id: &str) -> Result<ChatReply, AppError> {
    let objective = detect_objective(message);

    if objective.is_some() {
        let outcome = {
            let db = state.db()?;
            register_objective(&db, message, user_id)
        };
        tracing::debug!(user_id, outcome = %outcome, "objective tracking");
    }

    let catalog = state.catalog.fetch_products().await;

    let prompt = Prompt::sales(
        state.config.prompt_profile,
        &state.config.form_url,
        message,
        &catalog,
    );
    let response = state
        .llm
        .invoke(&prompt.render())
        .await
        .map_err(|e| AppError::Llm(format!("{e:#}")))?;

    let mostrar_formulario = objective.map(|o| o.wants_form()).unwrap_or(false);

    tracing::info!(
        user_id,
        objective = objective.map(|o| o.as_str()).unwrap_or("no_detectado"),
        mostrar_formulario,
        "chat reply generated"
    );

    {
        let db = state.db()?;
        log_message(&db, message, user_id, Role::User);
        log_message(&db, &response, user_id, Role::Bot);
    }

    Ok(ChatReply {
        response,
        mostrar_formulario,
    })
}
