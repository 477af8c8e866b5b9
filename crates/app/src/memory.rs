//! In-memory repository implementations.
//!
//! Backing store for tests and ephemeral deployments. The rule store is a
//! plain `Vec` guarded by a mutex, which makes the ordering contract of
//! [`RuleRepository`] trivially true: new rules append, updates replace
//! in place.

use std::future::Future;
use std::sync::Mutex;

use dealflow_domain::contact::Contact;
use dealflow_domain::error::DealflowError;
use dealflow_domain::id::{ContactId, RuleId};
use dealflow_domain::rule::Rule;

use crate::ports::{ContactRepository, RuleRepository};

/// Order-preserving in-memory rule store.
#[derive(Default)]
pub struct MemoryRuleRepository {
    store: Mutex<Vec<Rule>>,
}

impl MemoryRuleRepository {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `rules`, in order.
    #[must_use]
    pub fn with(rules: Vec<Rule>) -> Self {
        Self {
            store: Mutex::new(rules),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Rule>> {
        // Lock poisoning means a panic mid-mutation; the Vec is still
        // structurally sound, so recover the guard.
        self.store.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl RuleRepository for MemoryRuleRepository {
    fn upsert(&self, rule: Rule) -> impl Future<Output = Result<Rule, DealflowError>> + Send {
        let mut store = self.lock();
        match store.iter_mut().find(|r| r.id == rule.id) {
            Some(slot) => *slot = rule.clone(),
            None => store.push(rule.clone()),
        }
        async { Ok(rule) }
    }

    fn get_by_id(
        &self,
        id: RuleId,
    ) -> impl Future<Output = Result<Option<Rule>, DealflowError>> + Send {
        let store = self.lock();
        let result = store.iter().find(|r| r.id == id).cloned();
        async { Ok(result) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Rule>, DealflowError>> + Send {
        let store = self.lock();
        let result = store.clone();
        async { Ok(result) }
    }

    fn get_enabled(&self) -> impl Future<Output = Result<Vec<Rule>, DealflowError>> + Send {
        let store = self.lock();
        let result: Vec<Rule> = store.iter().filter(|r| r.enabled).cloned().collect();
        async { Ok(result) }
    }

    fn delete(&self, id: RuleId) -> impl Future<Output = Result<(), DealflowError>> + Send {
        let mut store = self.lock();
        store.retain(|r| r.id != id);
        async { Ok(()) }
    }
}

/// In-memory contact store.
#[derive(Default)]
pub struct MemoryContactRepository {
    store: Mutex<Vec<Contact>>,
}

impl MemoryContactRepository {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `contacts`.
    #[must_use]
    pub fn with(contacts: Vec<Contact>) -> Self {
        Self {
            store: Mutex::new(contacts),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Contact>> {
        self.store.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl ContactRepository for MemoryContactRepository {
    fn create(
        &self,
        contact: Contact,
    ) -> impl Future<Output = Result<Contact, DealflowError>> + Send {
        let mut store = self.lock();
        store.push(contact.clone());
        async { Ok(contact) }
    }

    fn get_by_id(
        &self,
        id: ContactId,
    ) -> impl Future<Output = Result<Option<Contact>, DealflowError>> + Send {
        let store = self.lock();
        let result = store.iter().find(|c| c.id == id).cloned();
        async { Ok(result) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Contact>, DealflowError>> + Send {
        let store = self.lock();
        let result = store.clone();
        async { Ok(result) }
    }

    fn update(
        &self,
        contact: Contact,
    ) -> impl Future<Output = Result<Contact, DealflowError>> + Send {
        let mut store = self.lock();
        if let Some(slot) = store.iter_mut().find(|c| c.id == contact.id) {
            *slot = contact.clone();
        }
        async { Ok(contact) }
    }

    fn delete(&self, id: ContactId) -> impl Future<Output = Result<(), DealflowError>> + Send {
        let mut store = self.lock();
        store.retain(|c| c.id != id);
        async { Ok(()) }
    }
}
