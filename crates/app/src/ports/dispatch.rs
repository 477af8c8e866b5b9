//! Action dispatch port — performing the effects of fired rules.

use std::fmt;
use std::future::Future;

use dealflow_domain::contact::Contact;
use dealflow_domain::error::DealflowError;
use dealflow_domain::id::{EventId, RuleId};
use dealflow_domain::rule::Action;

/// Identifies one action occurrence within one rule firing.
///
/// The engine derives the key from the rule, the event that fired it, and
/// the action's position, so re-delivering the same event cannot dispatch
/// the same action twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DispatchKey {
    pub rule_id: RuleId,
    pub event_id: EventId,
    pub action_index: usize,
}

impl fmt::Display for DispatchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.rule_id, self.event_id, self.action_index)
    }
}

/// Performs rule actions against the outside world.
pub trait ActionDispatcher {
    /// Dispatch a single action.
    ///
    /// `contact` is the contact the triggering event concerned, when known,
    /// so dispatchers can address emails and tasks. Implementations should
    /// treat `key` as an idempotency token and skip keys already seen.
    fn dispatch(
        &self,
        key: DispatchKey,
        action: &Action,
        contact: Option<&Contact>,
    ) -> impl Future<Output = Result<(), DealflowError>> + Send;
}

impl<T: ActionDispatcher + Send + Sync> ActionDispatcher for std::sync::Arc<T> {
    fn dispatch(
        &self,
        key: DispatchKey,
        action: &Action,
        contact: Option<&Contact>,
    ) -> impl Future<Output = Result<(), DealflowError>> + Send {
        (**self).dispatch(key, action, contact)
    }
}
