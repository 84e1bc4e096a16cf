pub mod document;
pub mod form;
pub mod message;
pub mod objective;

pub use document::{Document, DocumentKind, Metadata};
pub use form::{AppointmentChoice, FormSubmission};
pub use message::{MessageRecord, Role};
pub use objective::{Objective, ObjectiveRecord, ObjectiveStatus};
