//! Contact repository port — persistence for pipeline contacts.

use std::future::Future;

use dealflow_domain::contact::Contact;
use dealflow_domain::error::DealflowError;
use dealflow_domain::id::ContactId;

/// Repository for persisting and querying [`Contact`]s.
pub trait ContactRepository {
    /// Create a new contact in storage.
    fn create(
        &self,
        contact: Contact,
    ) -> impl Future<Output = Result<Contact, DealflowError>> + Send;

    /// Get a contact by its unique identifier.
    fn get_by_id(
        &self,
        id: ContactId,
    ) -> impl Future<Output = Result<Option<Contact>, DealflowError>> + Send;

    /// Get all contacts.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Contact>, DealflowError>> + Send;

    /// Update an existing contact.
    fn update(
        &self,
        contact: Contact,
    ) -> impl Future<Output = Result<Contact, DealflowError>> + Send;

    /// Delete a contact by its unique identifier.
    fn delete(&self, id: ContactId) -> impl Future<Output = Result<(), DealflowError>> + Send;
}

impl<T: ContactRepository + Send + Sync> ContactRepository for std::sync::Arc<T> {
    fn create(
        &self,
        contact: Contact,
    ) -> impl Future<Output = Result<Contact, DealflowError>> + Send {
        (**self).create(contact)
    }

    fn get_by_id(
        &self,
        id: ContactId,
    ) -> impl Future<Output = Result<Option<Contact>, DealflowError>> + Send {
        (**self).get_by_id(id)
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Contact>, DealflowError>> + Send {
        (**self).get_all()
    }

    fn update(
        &self,
        contact: Contact,
    ) -> impl Future<Output = Result<Contact, DealflowError>> + Send {
        (**self).update(contact)
    }

    fn delete(&self, id: ContactId) -> impl Future<Output = Result<(), DealflowError>> + Send {
        (**self).delete(id)
    }
}
