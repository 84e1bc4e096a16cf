use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub type Metadata = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Objective,
    Message,
    Form,
}

impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Objective => "objective",
            DocumentKind::Message => "message",
            DocumentKind::Form => "form",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "objective" => Some(DocumentKind::Objective),
            "message" => Some(DocumentKind::Message),
            "form" => Some(DocumentKind::Form),
            _ => None,
        }
    }
}

/// A stored entry: free text for inspection plus metadata used for filtering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub kind: DocumentKind,
    pub document: String,
    pub metadata: Metadata,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Document {
    pub fn new(
        id: impl Into<String>,
        kind: DocumentKind,
        document: impl Into<String>,
        metadata: Metadata,
    ) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: id.into(),
            kind,
            document: document.into(),
            metadata,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn meta_str(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(|v| v.as_str())
    }
}
