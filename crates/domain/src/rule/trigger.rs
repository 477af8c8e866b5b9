//! Trigger — the event pattern that activates a rule.

use serde::{Deserialize, Serialize};

use crate::event::{Event, EventType};

/// Describes what class of pipeline event should activate a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Trigger {
    /// Fires when a contact moves to a pipeline stage.
    StatusChanged {
        /// Only match transitions *to* this stage; `None` matches any stage.
        #[serde(default)]
        to: Option<String>,
    },
    /// Fires when a document is uploaded to a contact's file.
    DocumentUploaded,
    /// Fires when a contact accepts a funding offer.
    OfferAccepted,
    /// Fires when a lead has been idle past the staleness threshold.
    LeadStale,
}

impl Trigger {
    /// Check whether this trigger matches a given event.
    ///
    /// `rule_fired` events never match any trigger, so rules cannot
    /// cascade off each other's firings.
    #[must_use]
    pub fn matches_event(&self, event: &Event) -> bool {
        match self {
            Self::StatusChanged { to } => {
                if event.event_type != EventType::StatusChanged {
                    return false;
                }
                match to {
                    Some(expected) => {
                        event.data.get("to").and_then(|v| v.as_str()) == Some(expected.as_str())
                    }
                    None => true,
                }
            }
            Self::DocumentUploaded => event.event_type == EventType::DocumentUploaded,
            Self::OfferAccepted => event.event_type == EventType::OfferAccepted,
            Self::LeadStale => event.event_type == EventType::LeadStale,
        }
    }
}

impl std::fmt::Display for Trigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StatusChanged { to: Some(stage) } => write!(f, "status_changed({stage})"),
            Self::StatusChanged { to: None } => f.write_str("status_changed(any)"),
            Self::DocumentUploaded => f.write_str("document_uploaded"),
            Self::OfferAccepted => f.write_str("offer_accepted"),
            Self::LeadStale => f.write_str("lead_stale"),
        }
    }
}
