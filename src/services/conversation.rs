use rusqlite::Connection;

use crate::db::queries;
use crate::models::{DocumentKind, MessageRecord, Role};

/// Appends one message to the user's history. Failures are logged, never returned.
pub fn log_message(conn: &Connection, text: &str, user_id: &str, role: Role) {
    let record = MessageRecord {
        user_id: user_id.to_string(),
        role,
        text: text.to_string(),
    };

    let result = queries::count_documents(conn)
        .and_then(|seq| queries::add_document(conn, &record.to_document(seq)));

    match result {
        Ok(true) => {}
        Ok(false) => tracing::warn!(user_id, role = role.as_str(), "message id collision, not stored"),
        Err(e) => tracing::error!(error = %e, user_id, "failed to log message"),
    }
}

/// Messages for one user, oldest first.
pub fn history(conn: &Connection, user_id: &str) -> anyhow::Result<Vec<MessageRecord>> {
    let docs = queries::list_documents(conn, DocumentKind::Message, &[("usuario", user_id)])?;

    Ok(docs
        .into_iter()
        .map(|doc| {
            let role = match doc.meta_str("tipo") {
                Some("bot") => Role::Bot,
                _ => Role::User,
            };
            MessageRecord {
                user_id: user_id.to_string(),
                role,
                text: doc.document,
            }
        })
        .collect())
}
