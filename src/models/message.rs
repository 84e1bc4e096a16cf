use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{Document, DocumentKind, Metadata};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Role {
    #[serde(rename = "usuario")]
    User,
    #[serde(rename = "bot")]
    Bot,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "usuario",
            Role::Bot => "bot",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageRecord {
    pub user_id: String,
    pub role: Role,
    pub text: String,
}

impl MessageRecord {
    /// `seq` keeps ids unique within the collection; records are never rewritten.
    pub fn to_document(&self, seq: i64) -> Document {
        let mut metadata = Metadata::new();
        metadata.insert("usuario".into(), json!(self.user_id));
        metadata.insert("tipo".into(), json!(self.role.as_str()));

        Document::new(
            format!("mensaje_{}_{}_{}", self.user_id, self.role.as_str(), seq),
            DocumentKind::Message,
            self.text.clone(),
            metadata,
        )
    }
}
