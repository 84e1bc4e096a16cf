use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};

use super::{Document, DocumentKind, Metadata};

const YES: &str = "sí";
const NO: &str = "no";

/// Contact data collected once a sale or appointment intent shows up.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormSubmission {
    #[serde(rename = "nombre", default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(rename = "cedula", default, deserialize_with = "lenient_string")]
    pub id_number: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(rename = "numero", default, deserialize_with = "lenient_string")]
    pub phone: String,
    #[serde(rename = "producto", default, deserialize_with = "lenient_string")]
    pub product: String,
    #[serde(rename = "agendarCita", default)]
    pub appointment: AppointmentChoice,
}

impl FormSubmission {
    pub fn user_id(&self) -> String {
        format!("user_{}", self.id_number)
    }

    pub fn wants_appointment(&self) -> bool {
        self.appointment.is_yes()
    }

    pub fn to_document(&self) -> Document {
        let mut metadata = Metadata::new();
        metadata.insert("nombre".into(), json!(self.name));
        metadata.insert("cedula".into(), json!(self.id_number));
        metadata.insert("email".into(), json!(self.email));
        metadata.insert("numero".into(), json!(self.phone));
        metadata.insert("producto".into(), json!(self.product));
        metadata.insert("agendarCita".into(), json!(self.appointment.as_str()));

        Document::new(
            self.user_id(),
            DocumentKind::Form,
            format!(
                "Nombre: {}, Cedula: {}, Email: {}, Teléfono: {}, Producto: {}, Agendar Cita: {}",
                self.name,
                self.id_number,
                self.email,
                self.phone,
                self.product,
                self.appointment.as_str()
            ),
            metadata,
        )
    }
}

/// The `agendarCita` answer. Stored verbatim; only `"sí"` counts as a booked
/// appointment. JSON booleans are normalised to `"sí"` / `"no"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AppointmentChoice(String);

impl AppointmentChoice {
    pub fn yes() -> Self {
        Self(YES.to_string())
    }

    pub fn no() -> Self {
        Self(NO.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_yes(&self) -> bool {
        self.0 == YES
    }
}

impl Default for AppointmentChoice {
    fn default() -> Self {
        Self::no()
    }
}

impl From<&str> for AppointmentChoice {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl<'de> Deserialize<'de> for AppointmentChoice {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Bool(true) => Self::yes(),
            Value::Bool(false) | Value::Null => Self::no(),
            Value::String(s) => Self(s),
            other => Self(other.to_string()),
        })
    }
}

/// Frontends send ids and phone numbers as numbers or strings.
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}
