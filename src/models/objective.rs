use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{Document, DocumentKind, Metadata};

/// A user goal detected in a chat message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Objective {
    #[serde(rename = "vender")]
    Sell,
    #[serde(rename = "consultar")]
    Inquire,
    #[serde(rename = "agendar_cita")]
    ScheduleAppointment,
}

impl Objective {
    pub const ALL: [Objective; 3] = [
        Objective::Sell,
        Objective::Inquire,
        Objective::ScheduleAppointment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Objective::Sell => "vender",
            Objective::Inquire => "consultar",
            Objective::ScheduleAppointment => "agendar_cita",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "vender" => Some(Objective::Sell),
            "consultar" => Some(Objective::Inquire),
            // older records spelled it with a space
            "agendar_cita" | "agendar cita" => Some(Objective::ScheduleAppointment),
            _ => None,
        }
    }

    /// Whether the caller should be asked to fill in the contact form.
    pub fn wants_form(&self) -> bool {
        matches!(self, Objective::Sell | Objective::ScheduleAppointment)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ObjectiveStatus {
    #[serde(rename = "pendiente")]
    Pending,
    #[serde(rename = "cumplido")]
    Fulfilled,
}

impl ObjectiveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectiveStatus::Pending => "pendiente",
            ObjectiveStatus::Fulfilled => "cumplido",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "cumplido" => ObjectiveStatus::Fulfilled,
            _ => ObjectiveStatus::Pending,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ObjectiveRecord {
    pub user_id: String,
    pub objective: Objective,
    pub status: ObjectiveStatus,
}

impl ObjectiveRecord {
    pub fn pending(user_id: &str, objective: Objective) -> Self {
        Self {
            user_id: user_id.to_string(),
            objective,
            status: ObjectiveStatus::Pending,
        }
    }

    /// One record per user and objective type.
    pub fn id_for(user_id: &str, objective: Objective) -> String {
        format!("objetivo_{}_{}", user_id, objective.as_str())
    }

    pub fn id(&self) -> String {
        Self::id_for(&self.user_id, self.objective)
    }

    pub fn to_document(&self) -> Document {
        let status_label = match self.status {
            ObjectiveStatus::Pending => "Pendiente",
            ObjectiveStatus::Fulfilled => "Cumplido",
        };
        let mut metadata = Metadata::new();
        metadata.insert("usuario".into(), json!(self.user_id));
        metadata.insert("tipo".into(), json!(self.objective.as_str()));
        metadata.insert("estado".into(), json!(self.status.as_str()));

        Document::new(
            self.id(),
            DocumentKind::Objective,
            format!(
                "Usuario: {}, Objetivo: {}, Estado: {}",
                self.user_id,
                self.objective.as_str(),
                status_label
            ),
            metadata,
        )
    }

    /// Returns `None` for documents without a recognised `tipo`.
    pub fn from_document(doc: &Document) -> Option<Self> {
        let objective = Objective::parse(doc.meta_str("tipo")?)?;
        Some(Self {
            user_id: doc.meta_str("usuario").unwrap_or_default().to_string(),
            objective,
            status: ObjectiveStatus::parse(doc.meta_str("estado").unwrap_or_default()),
        })
    }
}
