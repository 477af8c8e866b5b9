//! Contact service — use-cases for managing pipeline contacts.
//!
//! Mutations that the automation engine cares about (stage moves, document
//! uploads, accepted offers) publish a domain event after the write, so
//! rules react to what actually happened in storage.

use dealflow_domain::contact::Contact;
use dealflow_domain::error::{DealflowError, NotFoundError};
use dealflow_domain::event::{Event, EventType};
use dealflow_domain::id::ContactId;

use crate::ports::{ContactRepository, EventPublisher};

/// Application service for contact CRUD and pipeline moves.
pub struct ContactService<R, P> {
    repo: R,
    publisher: P,
}

impl<R, P> ContactService<R, P>
where
    R: ContactRepository,
    P: EventPublisher,
{
    /// Create a new service backed by the given repository and publisher.
    pub fn new(repo: R, publisher: P) -> Self {
        Self { repo, publisher }
    }

    /// Create a new contact after validating domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`DealflowError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, contact), fields(contact_name = %contact.name))]
    pub async fn create_contact(&self, contact: Contact) -> Result<Contact, DealflowError> {
        contact.validate()?;
        self.repo.create(contact).await
    }

    /// Look up a contact by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`DealflowError::NotFound`] when no contact with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_contact(&self, id: ContactId) -> Result<Contact, DealflowError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Contact",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List all contacts.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_contacts(&self) -> Result<Vec<Contact>, DealflowError> {
        self.repo.get_all().await
    }

    /// Update an existing contact.
    ///
    /// # Errors
    ///
    /// Returns [`DealflowError::Validation`] if invariants fail, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self, contact))]
    pub async fn update_contact(&self, contact: Contact) -> Result<Contact, DealflowError> {
        contact.validate()?;
        self.repo.update(contact).await
    }

    /// Delete a contact by id.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_contact(&self, id: ContactId) -> Result<(), DealflowError> {
        self.repo.delete(id).await
    }

    /// Move a contact to a new pipeline stage and publish `status_changed`.
    ///
    /// # Errors
    ///
    /// Returns [`DealflowError::NotFound`] when the contact does not exist,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn update_status(
        &self,
        id: ContactId,
        status: String,
    ) -> Result<Contact, DealflowError> {
        let mut contact = self.get_contact(id).await?;
        let from = std::mem::replace(&mut contact.status, status.clone());
        contact.touch(dealflow_domain::time::now());
        let contact = self.repo.update(contact).await?;

        let event = Event::new(
            EventType::StatusChanged,
            Some(id),
            serde_json::json!({"from": from, "to": status}),
        );
        let _ = self.publisher.publish(event).await;

        Ok(contact)
    }

    /// Record a document upload and publish `document_uploaded`.
    ///
    /// # Errors
    ///
    /// Returns [`DealflowError::NotFound`] when the contact does not exist,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn record_document(
        &self,
        id: ContactId,
        filename: String,
    ) -> Result<Contact, DealflowError> {
        let mut contact = self.get_contact(id).await?;
        contact.touch(dealflow_domain::time::now());
        let contact = self.repo.update(contact).await?;

        let event = Event::new(
            EventType::DocumentUploaded,
            Some(id),
            serde_json::json!({"filename": filename}),
        );
        let _ = self.publisher.publish(event).await;

        Ok(contact)
    }

    /// Record an accepted funding offer and publish `offer_accepted`.
    ///
    /// # Errors
    ///
    /// Returns [`DealflowError::NotFound`] when the contact does not exist,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn accept_offer(&self, id: ContactId) -> Result<Contact, DealflowError> {
        let mut contact = self.get_contact(id).await?;
        contact.touch(dealflow_domain::time::now());
        let contact = self.repo.update(contact).await?;

        let event = Event::new(
            EventType::OfferAccepted,
            Some(id),
            serde_json::json!({"deal_value": contact.deal_value}),
        );
        let _ = self.publisher.publish(event).await;

        Ok(contact)
    }
}
