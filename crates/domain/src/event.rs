//! Event — an immutable record of something that happened in the pipeline.
//!
//! Events are produced when a contact's pipeline status changes, a document
//! is uploaded, an offer is accepted, a lead goes stale, or a rule fires.
//! Rule triggers are matched against these events.

use serde::{Deserialize, Serialize};

use crate::id::{ContactId, EventId};
use crate::time::Timestamp;

/// The class of a domain event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// A contact moved to a different pipeline stage.
    StatusChanged,
    /// A document was attached to a contact's file.
    DocumentUploaded,
    /// A contact accepted a funding offer.
    OfferAccepted,
    /// A lead has seen no activity for longer than the staleness threshold.
    LeadStale,
    /// A rule's trigger matched and its actions were dispatched.
    RuleFired,
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::StatusChanged => "status_changed",
            Self::DocumentUploaded => "document_uploaded",
            Self::OfferAccepted => "offer_accepted",
            Self::LeadStale => "lead_stale",
            Self::RuleFired => "rule_fired",
        };
        f.write_str(name)
    }
}

/// A single domain event with a typed kind and a JSON payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub event_type: EventType,
    /// The contact this event concerns, when there is one.
    pub contact_id: Option<ContactId>,
    /// Event-type-specific payload (e.g. `{"from": "...", "to": "..."}`
    /// for status changes).
    pub data: serde_json::Value,
    pub occurred_at: Timestamp,
}

impl Event {
    /// Create a new event stamped with the current time.
    #[must_use]
    pub fn new(
        event_type: EventType,
        contact_id: Option<ContactId>,
        data: serde_json::Value,
    ) -> Self {
        Self {
            id: EventId::new(),
            event_type,
            contact_id,
            data,
            occurred_at: crate::time::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_assign_fresh_id_and_timestamp_on_new() {
        let before = crate::time::now();
        let event = Event::new(EventType::StatusChanged, None, serde_json::json!({}));
        assert!(event.occurred_at >= before);

        let other = Event::new(EventType::StatusChanged, None, serde_json::json!({}));
        assert_ne!(event.id, other.id);
    }

    #[test]
    fn should_serialize_event_type_as_snake_case() {
        let json = serde_json::to_value(EventType::DocumentUploaded).unwrap();
        assert_eq!(json, serde_json::json!("document_uploaded"));
    }

    #[test]
    fn should_roundtrip_event_through_serde_json() {
        let event = Event::new(
            EventType::OfferAccepted,
            Some(ContactId::new()),
            serde_json::json!({"offer_id": "of_1"}),
        );
        let json = serde_json::to_string(&event).unwrap();
        let parsed: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, event.id);
        assert_eq!(parsed.event_type, event.event_type);
        assert_eq!(parsed.contact_id, event.contact_id);
        assert_eq!(parsed.data, event.data);
    }

    #[test]
    fn should_display_all_event_types() {
        assert_eq!(EventType::StatusChanged.to_string(), "status_changed");
        assert_eq!(EventType::LeadStale.to_string(), "lead_stale");
        assert_eq!(EventType::RuleFired.to_string(), "rule_fired");
    }
}
