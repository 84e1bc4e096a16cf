use std::collections::HashMap;

use rusqlite::Connection;
use serde::Serialize;
use serde_json::json;

use crate::db::queries;
use crate::models::{DocumentKind, Metadata, Objective, ObjectiveRecord, ObjectiveStatus};
use crate::services::intent::detect_objective;

pub const NOT_DETECTED: &str = "No se detectó un objetivo específico.";

/// Classifies `text` and stores a pending objective for the user.
///
/// The record id is derived from user and objective, so repeated detections
/// keep a single record and never move a fulfilled objective back to pending.
/// Store failures come back as a message instead of an error.
pub fn register_objective(conn: &Connection, text: &str, user_id: &str) -> String {
    let Some(objective) = detect_objective(text) else {
        return NOT_DETECTED.to_string();
    };

    let record = ObjectiveRecord::pending(user_id, objective);
    match queries::add_document(conn, &record.to_document()) {
        Ok(inserted) => {
            tracing::info!(
                user_id,
                objective = objective.as_str(),
                inserted,
                "objective registered"
            );
            format!("Objetivo '{}' registrado para {}.", objective.as_str(), user_id)
        }
        Err(e) => {
            tracing::error!(error = %e, user_id, "failed to register objective");
            format!("Error al registrar objetivo: {e}")
        }
    }
}

/// Marks the user's objective as fulfilled.
pub fn complete_objective(conn: &Connection, objective: Objective, user_id: &str) -> String {
    let fulfilled = ObjectiveRecord {
        user_id: user_id.to_string(),
        objective,
        status: ObjectiveStatus::Fulfilled,
    };
    let doc = fulfilled.to_document();

    let mut patch = Metadata::new();
    patch.insert("estado".into(), json!(ObjectiveStatus::Fulfilled.as_str()));

    match queries::update_document(conn, &doc.id, &doc.document, &patch) {
        Ok(true) => {
            tracing::info!(user_id, objective = objective.as_str(), "objective fulfilled");
            format!("Objetivo '{}' cumplido para {}.", objective.as_str(), user_id)
        }
        Ok(false) => format!(
            "No existe un objetivo '{}' para {}.",
            objective.as_str(),
            user_id
        ),
        Err(e) => {
            tracing::error!(error = %e, user_id, "failed to complete objective");
            format!("Error al marcar objetivo como completado: {e}")
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ObjectiveStats {
    pub total_vender: u64,
    pub total_consultar: u64,
    pub total_agendar: u64,
    pub cumplidos_vender: u64,
    pub cumplidos_consultar: u64,
    pub cumplidos_agendar: u64,
}

impl ObjectiveStats {
    pub fn total(&self, objective: Objective) -> u64 {
        match objective {
            Objective::Sell => self.total_vender,
            Objective::Inquire => self.total_consultar,
            Objective::ScheduleAppointment => self.total_agendar,
        }
    }

    pub fn fulfilled(&self, objective: Objective) -> u64 {
        match objective {
            Objective::Sell => self.cumplidos_vender,
            Objective::Inquire => self.cumplidos_consultar,
            Objective::ScheduleAppointment => self.cumplidos_agendar,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum StatisticsReport {
    Counts(ObjectiveStats),
    Failed { error: String },
}

/// Per-objective totals and fulfilled counts over every stored objective.
pub fn objective_statistics(conn: &Connection) -> StatisticsReport {
    let docs = match queries::list_documents(conn, DocumentKind::Objective, &[]) {
        Ok(docs) => docs,
        Err(e) => {
            tracing::error!(error = %e, "failed to load objectives");
            return StatisticsReport::Failed {
                error: e.to_string(),
            };
        }
    };

    let mut totals: HashMap<Objective, (u64, u64)> = HashMap::new();
    for record in docs.iter().filter_map(ObjectiveRecord::from_document) {
        let entry = totals.entry(record.objective).or_default();
        entry.0 += 1;
        if record.status == ObjectiveStatus::Fulfilled {
            entry.1 += 1;
        }
    }

    let get = |o: Objective| totals.get(&o).copied().unwrap_or_default();
    let (total_vender, cumplidos_vender) = get(Objective::Sell);
    let (total_consultar, cumplidos_consultar) = get(Objective::Inquire);
    let (total_agendar, cumplidos_agendar) = get(Objective::ScheduleAppointment);

    StatisticsReport::Counts(ObjectiveStats {
        total_vender,
        total_consultar,
        total_agendar,
        cumplidos_vender,
        cumplidos_consultar,
        cumplidos_agendar,
    })
}
