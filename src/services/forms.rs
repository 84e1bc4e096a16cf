use rusqlite::Connection;

use crate::db::queries;
use crate::models::{DocumentKind, FormSubmission};

/// Stores the submission under `user_<cedula>`, replacing an earlier one.
pub fn submit_form(conn: &Connection, form: &FormSubmission) -> anyhow::Result<()> {
    queries::upsert_document(conn, &form.to_document())?;
    tracing::info!(
        user_id = %form.user_id(),
        producto = %form.product,
        agendar_cita = form.wants_appointment(),
        "form stored"
    );
    Ok(())
}

/// Number of stored forms that asked for an appointment.
pub fn appointment_count(conn: &Connection) -> anyhow::Result<i64> {
    queries::count_documents_matching(conn, DocumentKind::Form, "agendarCita", "sí")
}
