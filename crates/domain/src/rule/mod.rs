//! Rule — trigger → condition → action pipeline automations.
//!
//! Rules let a broker react to pipeline events without manual work. Each
//! rule has a [`Trigger`] that determines when it activates, optional
//! [`Condition`]s that must all hold against the contact the event
//! concerns, and a sequence of [`Action`]s to dispatch.
//!
//! A rule with zero actions is a valid no-op; a rule with an empty name is
//! also accepted. Commit-time validation is deliberately absent — the rule
//! store takes drafts as they are.

mod action;
mod condition;
mod draft;
mod sketch;
mod trigger;

pub use action::Action;
pub use condition::{Comparison, Condition};
pub use draft::RuleDraft;
pub use sketch::RuleSketch;
pub use trigger::Trigger;

use serde::{Deserialize, Serialize};

use crate::id::RuleId;
use crate::time::Timestamp;

/// An automation that reacts to pipeline events by dispatching actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub id: RuleId,
    pub name: String,
    /// Disabled rules stay in the store but are skipped by the engine.
    pub enabled: bool,
    pub trigger: Trigger,
    /// AND-composed predicates; an empty list is vacuously true.
    pub conditions: Vec<Condition>,
    pub actions: Vec<Action>,
    pub last_fired: Option<Timestamp>,
}

impl Rule {
    /// Create a builder for constructing a [`Rule`].
    #[must_use]
    pub fn builder() -> RuleBuilder {
        RuleBuilder::default()
    }
}

/// Step-by-step builder for [`Rule`].
#[derive(Debug, Default)]
pub struct RuleBuilder {
    id: Option<RuleId>,
    name: Option<String>,
    enabled: Option<bool>,
    trigger: Option<Trigger>,
    conditions: Vec<Condition>,
    actions: Vec<Action>,
    last_fired: Option<Timestamp>,
}

impl RuleBuilder {
    #[must_use]
    pub fn id(mut self, id: RuleId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    #[must_use]
    pub fn trigger(mut self, trigger: Trigger) -> Self {
        self.trigger = Some(trigger);
        self
    }

    #[must_use]
    pub fn condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    #[must_use]
    pub fn action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    #[must_use]
    pub fn last_fired(mut self, ts: Timestamp) -> Self {
        self.last_fired = Some(ts);
        self
    }

    /// Consume the builder and return a [`Rule`].
    ///
    /// Defaults: fresh random id, empty name, enabled, a `status_changed`
    /// trigger matching any target stage, no conditions, no actions.
    #[must_use]
    pub fn build(self) -> Rule {
        Rule {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            enabled: self.enabled.unwrap_or(true),
            trigger: self
                .trigger
                .unwrap_or(Trigger::StatusChanged { to: None }),
            conditions: self.conditions,
            actions: self.actions,
            last_fired: self.last_fired,
        }
    }
}
