//! Sketch — an untrusted, partially-decoded rule from an external source.

use serde::Deserialize;

use super::{Action, Condition, RuleDraft, Trigger};

/// A rule candidate decoded from untrusted JSON, typically a language
/// model's reply.
///
/// Unlike [`RuleDraft`], every field is optional and decoding is lenient:
/// each top-level field and each condition/action element is parsed
/// independently, and anything malformed is dropped rather than failing
/// the whole sketch. The caller decides via [`RuleSketch::is_usable`]
/// whether enough survived to offer to the user.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RuleSketch {
    pub name: Option<String>,
    pub trigger: Option<Trigger>,
    pub conditions: Vec<Condition>,
    pub actions: Vec<Action>,
}

impl RuleSketch {
    /// Decode a sketch from a JSON value, keeping whatever parses.
    ///
    /// A non-object input yields an empty sketch. Within `conditions` and
    /// `actions`, well-formed elements are kept even when siblings are
    /// malformed.
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self::default();
        };
        Self {
            name: object
                .get("name")
                .and_then(serde_json::Value::as_str)
                .map(str::to_string),
            trigger: object
                .get("trigger")
                .and_then(|v| serde_json::from_value(v.clone()).ok()),
            conditions: decode_elements(object.get("conditions")),
            actions: decode_elements(object.get("actions")),
        }
    }

    /// Whether the sketch carries enough substance to present to a user.
    ///
    /// The bar is deliberately low: a non-empty name. Triggers default and
    /// condition/action lists may legitimately be empty.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        self.name.as_ref().is_some_and(|name| !name.trim().is_empty())
    }

    /// Lift the sketch into an editable draft, filling gaps with the
    /// draft defaults.
    #[must_use]
    pub fn into_draft(self) -> RuleDraft {
        let mut draft = RuleDraft::new();
        if let Some(name) = self.name {
            draft.name = name;
        }
        if let Some(trigger) = self.trigger {
            draft.trigger = trigger;
        }
        draft.conditions = self.conditions;
        draft.actions = self.actions;
        draft
    }
}

fn decode_elements<T>(value: Option<&serde_json::Value>) -> Vec<T>
where
    T: serde::de::DeserializeOwned,
{
    value
        .and_then(serde_json::Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| serde_json::from_value(item.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}
