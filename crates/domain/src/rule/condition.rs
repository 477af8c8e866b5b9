//! Condition — a guard that must hold for a rule's actions to dispatch.

use serde::{Deserialize, Serialize};

use crate::contact::Contact;

/// Comparison operator for numeric condition fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparison {
    #[serde(rename = "gt")]
    GreaterThan,
    #[serde(rename = "lt")]
    LessThan,
    #[serde(rename = "eq")]
    Equals,
}

impl Comparison {
    fn apply_f64(self, left: f64, right: f64) -> bool {
        match self {
            Self::GreaterThan => left > right,
            Self::LessThan => left < right,
            Self::Equals => (left - right).abs() < f64::EPSILON,
        }
    }

    fn apply_i64(self, left: i64, right: i64) -> bool {
        match self {
            Self::GreaterThan => left > right,
            Self::LessThan => left < right,
            Self::Equals => left == right,
        }
    }
}

impl std::fmt::Display for Comparison {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            Self::GreaterThan => ">",
            Self::LessThan => "<",
            Self::Equals => "==",
        };
        f.write_str(symbol)
    }
}

/// A predicate over a single contact field.
///
/// Conditions are evaluated *after* the trigger fires, against the contact
/// the event concerns. All conditions in a rule must be satisfied
/// (logical AND). Each variant carries only the operand types valid for
/// its field, so no runtime coercion is needed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", rename_all = "snake_case")]
pub enum Condition {
    /// Compares the contact's requested/agreed funding amount.
    DealValue { op: Comparison, value: f64 },
    /// Compares the contact's credit score.
    CreditScore { op: Comparison, value: i64 },
    /// Requires the contact's industry label to match exactly.
    /// Ordering comparisons are meaningless for industry labels, so only
    /// equality is expressible.
    Industry { value: String },
}

impl Condition {
    /// Evaluate this predicate against a contact.
    #[must_use]
    pub fn evaluate(&self, contact: &Contact) -> bool {
        match self {
            Self::DealValue { op, value } => op.apply_f64(contact.deal_value, *value),
            Self::CreditScore { op, value } => op.apply_i64(contact.credit_score, *value),
            Self::Industry { value } => contact.industry == *value,
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DealValue { op, value } => write!(f, "deal_value {op} {value}"),
            Self::CreditScore { op, value } => write!(f, "credit_score {op} {value}"),
            Self::Industry { value } => write!(f, "industry == {value}"),
        }
    }
}
