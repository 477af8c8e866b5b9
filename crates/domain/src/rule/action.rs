//! Action — the effect dispatched when a rule fires.

use serde::{Deserialize, Serialize};

/// An effect to perform when a rule's trigger fires and all conditions
/// hold. Each variant carries exactly the parameters its collaborator
/// needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Create a follow-up task for the broker.
    CreateTask { title: String },
    /// Send an email to the contact.
    SendEmail { subject: String, body: String },
    /// Push a notification to the admin channel.
    NotifyAdmin { message: String },
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CreateTask { title } => write!(f, "create_task({title})"),
            Self::SendEmail { subject, .. } => write!(f, "send_email({subject})"),
            Self::NotifyAdmin { message } => write!(f, "notify_admin({message})"),
        }
    }
}
