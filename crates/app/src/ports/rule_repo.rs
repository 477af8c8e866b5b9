//! Rule repository port — persistence for automation rules.

use std::future::Future;

use dealflow_domain::error::DealflowError;
use dealflow_domain::id::RuleId;
use dealflow_domain::rule::Rule;

/// Repository for persisting and querying [`Rule`]s.
///
/// Implementations must preserve insertion order: `get_all` returns rules
/// in the order they were first upserted, and updating an existing rule
/// keeps its position.
pub trait RuleRepository {
    /// Insert a rule, or replace the stored rule with the same id.
    fn upsert(&self, rule: Rule) -> impl Future<Output = Result<Rule, DealflowError>> + Send;

    /// Get a rule by its unique identifier.
    fn get_by_id(
        &self,
        id: RuleId,
    ) -> impl Future<Output = Result<Option<Rule>, DealflowError>> + Send;

    /// Get all rules in insertion order.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Rule>, DealflowError>> + Send;

    /// Get all enabled rules in insertion order.
    fn get_enabled(&self) -> impl Future<Output = Result<Vec<Rule>, DealflowError>> + Send;

    /// Delete a rule by its unique identifier. Deleting an unknown id is
    /// a no-op.
    fn delete(&self, id: RuleId) -> impl Future<Output = Result<(), DealflowError>> + Send;
}

impl<T: RuleRepository + Send + Sync> RuleRepository for std::sync::Arc<T> {
    fn upsert(&self, rule: Rule) -> impl Future<Output = Result<Rule, DealflowError>> + Send {
        (**self).upsert(rule)
    }

    fn get_by_id(
        &self,
        id: RuleId,
    ) -> impl Future<Output = Result<Option<Rule>, DealflowError>> + Send {
        (**self).get_by_id(id)
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Rule>, DealflowError>> + Send {
        (**self).get_all()
    }

    fn get_enabled(&self) -> impl Future<Output = Result<Vec<Rule>, DealflowError>> + Send {
        (**self).get_enabled()
    }

    fn delete(&self, id: RuleId) -> impl Future<Output = Result<(), DealflowError>> + Send {
        (**self).delete(id)
    }
}
