//! Draft — the uncommitted edit buffer for a single rule.

use serde::{Deserialize, Serialize};

use super::{Action, Comparison, Condition, Rule, Trigger};
use crate::id::RuleId;

/// A rule being edited, before it is committed to the store.
///
/// A blank draft starts enabled with a `status_changed` trigger matching
/// any stage and empty condition/action lists. Fields are public and
/// unvalidated: a draft with an empty name or zero actions is still
/// committable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleDraft {
    /// `Some` when editing an existing rule, `None` for a new one.
    pub id: Option<RuleId>,
    pub name: String,
    pub enabled: bool,
    pub trigger: Trigger,
    pub conditions: Vec<Condition>,
    pub actions: Vec<Action>,
}

impl Default for RuleDraft {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            enabled: true,
            trigger: Trigger::StatusChanged { to: None },
            conditions: Vec::new(),
            actions: Vec::new(),
        }
    }
}

impl RuleDraft {
    /// Start a blank draft.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an existing rule into a draft for editing.
    #[must_use]
    pub fn from_rule(rule: &Rule) -> Self {
        Self {
            id: Some(rule.id),
            name: rule.name.clone(),
            enabled: rule.enabled,
            trigger: rule.trigger.clone(),
            conditions: rule.conditions.clone(),
            actions: rule.actions.clone(),
        }
    }

    /// Append a default condition clause (`deal_value > 0`).
    pub fn add_condition(&mut self) {
        self.conditions.push(Condition::DealValue {
            op: Comparison::GreaterThan,
            value: 0.0,
        });
    }

    /// Remove the condition at `index`; out-of-range is a no-op.
    pub fn remove_condition(&mut self, index: usize) {
        if index < self.conditions.len() {
            self.conditions.remove(index);
        }
    }

    /// Append a default action (`create_task` titled "New Task").
    pub fn add_action(&mut self) {
        self.actions.push(Action::CreateTask {
            title: "New Task".to_string(),
        });
    }

    /// Remove the action at `index`; out-of-range is a no-op.
    pub fn remove_action(&mut self, index: usize) {
        if index < self.actions.len() {
            self.actions.remove(index);
        }
    }

    /// Convert the draft into a committable [`Rule`], keeping the original
    /// id when editing an existing rule. `last_fired` is reset — a fresh
    /// commit has not fired yet.
    #[must_use]
    pub fn into_rule(self) -> Rule {
        Rule {
            id: self.id.unwrap_or_default(),
            name: self.name,
            enabled: self.enabled,
            trigger: self.trigger,
            conditions: self.conditions,
            actions: self.actions,
            last_fired: None,
        }
    }
}
