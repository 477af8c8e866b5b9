//! Contact — the lead/deal record that rule conditions evaluate against.

use serde::{Deserialize, Serialize};

use crate::error::{DealflowError, ValidationError};
use crate::id::ContactId;
use crate::time::Timestamp;

/// A lead or active deal in the broker's pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    /// Free-form pipeline stage label (e.g. `"New Lead"`, `"Negotiation"`).
    pub status: String,
    /// Requested or agreed funding amount in dollars.
    pub deal_value: f64,
    pub credit_score: i64,
    pub industry: String,
    /// Last time anything happened on this contact. Drives staleness
    /// detection.
    pub last_activity: Timestamp,
}

impl Contact {
    /// Create a builder for constructing a [`Contact`].
    #[must_use]
    pub fn builder() -> ContactBuilder {
        ContactBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`DealflowError::Validation`] when `name` is empty.
    pub fn validate(&self) -> Result<(), DealflowError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(())
    }

    /// Record activity on this contact, resetting the staleness clock.
    pub fn touch(&mut self, at: Timestamp) {
        self.last_activity = at;
    }
}

/// Step-by-step builder for [`Contact`].
#[derive(Debug, Default)]
pub struct ContactBuilder {
    id: Option<ContactId>,
    name: Option<String>,
    status: Option<String>,
    deal_value: Option<f64>,
    credit_score: Option<i64>,
    industry: Option<String>,
    last_activity: Option<Timestamp>,
}

impl ContactBuilder {
    #[must_use]
    pub fn id(mut self, id: ContactId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    #[must_use]
    pub fn deal_value(mut self, value: f64) -> Self {
        self.deal_value = Some(value);
        self
    }

    #[must_use]
    pub fn credit_score(mut self, score: i64) -> Self {
        self.credit_score = Some(score);
        self
    }

    #[must_use]
    pub fn industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = Some(industry.into());
        self
    }

    #[must_use]
    pub fn last_activity(mut self, ts: Timestamp) -> Self {
        self.last_activity = Some(ts);
        self
    }

    /// Consume the builder, validate, and return a [`Contact`].
    ///
    /// # Errors
    ///
    /// Returns [`DealflowError::Validation`] if required fields are missing
    /// or empty.
    pub fn build(self) -> Result<Contact, DealflowError> {
        let contact = Contact {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            status: self.status.unwrap_or_else(|| "New Lead".to_string()),
            deal_value: self.deal_value.unwrap_or_default(),
            credit_score: self.credit_score.unwrap_or_default(),
            industry: self.industry.unwrap_or_default(),
            last_activity: self.last_activity.unwrap_or_else(crate::time::now),
        };
        contact.validate()?;
        Ok(contact)
    }
}
