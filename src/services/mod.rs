pub mod ai;
pub mod catalog;
pub mod chat;
pub mod conversation;
pub mod forms;
pub mod intent;
pub mod objectives;
