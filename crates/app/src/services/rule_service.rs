//! Rule service — use-cases for managing automation rules.

use dealflow_domain::error::{DealflowError, NotFoundError};
use dealflow_domain::id::RuleId;
use dealflow_domain::rule::Rule;

use crate::ports::RuleRepository;

/// Application service for rule CRUD operations.
///
/// No validation happens here on purpose: an unnamed rule or a rule with
/// zero actions is a legal (if useless) entry, and the editor relies on
/// being able to commit work-in-progress rules.
pub struct RuleService<R> {
    repo: R,
}

impl<R: RuleRepository> RuleService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Insert a rule, or replace the stored rule with the same id.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self, rule), fields(rule_name = %rule.name))]
    pub async fn upsert_rule(&self, rule: Rule) -> Result<Rule, DealflowError> {
        self.repo.upsert(rule).await
    }

    /// Look up a rule by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`DealflowError::NotFound`] when no rule with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_rule(&self, id: RuleId) -> Result<Rule, DealflowError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Rule",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List all rules in insertion order.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_rules(&self) -> Result<Vec<Rule>, DealflowError> {
        self.repo.get_all().await
    }

    /// List all enabled rules in insertion order.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_enabled(&self) -> Result<Vec<Rule>, DealflowError> {
        self.repo.get_enabled().await
    }

    /// Delete a rule by id. Deleting an unknown id succeeds silently.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_rule(&self, id: RuleId) -> Result<(), DealflowError> {
        self.repo.delete(id).await
    }

    /// Flip a rule's enabled flag, returning the stored result.
    ///
    /// # Errors
    ///
    /// Returns [`DealflowError::NotFound`] when no rule with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn toggle_rule(&self, id: RuleId) -> Result<Rule, DealflowError> {
        let mut rule = self.get_rule(id).await?;
        rule.enabled = !rule.enabled;
        self.repo.upsert(rule).await
    }
}
