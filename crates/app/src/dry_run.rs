//! Dry run — evaluate a rule against an event without side effects.
//!
//! This is the "test run" button: it reports exactly what the engine
//! *would* do for a given event and contact, without dispatching actions,
//! stamping `last_fired`, or publishing anything.

use serde::Serialize;

use dealflow_domain::contact::Contact;
use dealflow_domain::event::Event;
use dealflow_domain::rule::Rule;

/// Outcome of evaluating a single condition during a dry run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionOutcome {
    /// Human-readable rendering of the condition, e.g. `deal_value > 50000`.
    pub condition: String,
    /// `None` when the event carried no contact to evaluate against.
    pub satisfied: Option<bool>,
}

/// Full report of a dry run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DryRunReport {
    pub trigger_matched: bool,
    pub conditions: Vec<ConditionOutcome>,
    /// Whether the live engine would have fired this rule.
    pub would_fire: bool,
    /// Renderings of the actions that would have been dispatched, in order.
    /// Empty when the rule would not fire.
    pub planned_actions: Vec<String>,
}

/// Evaluate `rule` against `event` exactly as the engine would, reporting
/// instead of acting.
///
/// `contact` is the contact the event concerns, when it exists. A rule
/// with conditions but no contact cannot fire, mirroring the engine.
#[must_use]
pub fn dry_run(rule: &Rule, event: &Event, contact: Option<&Contact>) -> DryRunReport {
    let trigger_matched = rule.trigger.matches_event(event);

    let conditions: Vec<ConditionOutcome> = rule
        .conditions
        .iter()
        .map(|condition| ConditionOutcome {
            condition: condition.to_string(),
            satisfied: contact.map(|c| condition.evaluate(c)),
        })
        .collect();

    // Vacuously true for an unconditional rule; false when any condition
    // failed or could not be evaluated.
    let conditions_met = conditions.iter().all(|o| o.satisfied == Some(true));
    let would_fire = trigger_matched && conditions_met;

    let planned_actions = if would_fire {
        rule.actions.iter().map(ToString::to_string).collect()
    } else {
        Vec::new()
    };

    DryRunReport {
        trigger_matched,
        conditions,
        would_fire,
        planned_actions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dealflow_domain::event::EventType;
    use dealflow_domain::id::ContactId;
    use dealflow_domain::rule::{Action, Comparison, Condition, Trigger};

    fn contact(deal_value: f64) -> Contact {
        Contact::builder()
            .name("Probe Co")
            .deal_value(deal_value)
            .credit_score(700)
            .industry("Retail")
            .build()
            .unwrap()
    }

    fn negotiation_rule() -> Rule {
        Rule::builder()
            .name("High value alert")
            .trigger(Trigger::StatusChanged {
                to: Some("Negotiation".to_string()),
            })
            .condition(Condition::DealValue {
                op: Comparison::GreaterThan,
                value: 50_000.0,
            })
            .action(Action::NotifyAdmin {
                message: "Big deal.".to_string(),
            })
            .build()
    }

    fn negotiation_event(contact_id: ContactId) -> Event {
        Event::new(
            EventType::StatusChanged,
            Some(contact_id),
            serde_json::json!({"from": "Underwriting", "to": "Negotiation"}),
        )
    }

    #[test]
    fn should_report_firing_when_everything_matches() {
        let c = contact(60_000.0);
        let report = dry_run(&negotiation_rule(), &negotiation_event(c.id), Some(&c));

        assert!(report.trigger_matched);
        assert_eq!(report.conditions.len(), 1);
        assert_eq!(report.conditions[0].satisfied, Some(true));
        assert!(report.would_fire);
        assert_eq!(report.planned_actions, vec!["notify_admin(Big deal.)"]);
    }

    #[test]
    fn should_report_failed_condition_without_planning_actions() {
        let c = contact(10_000.0);
        let report = dry_run(&negotiation_rule(), &negotiation_event(c.id), Some(&c));

        assert!(report.trigger_matched);
        assert_eq!(report.conditions[0].satisfied, Some(false));
        assert!(!report.would_fire);
        assert!(report.planned_actions.is_empty());
    }

    #[test]
    fn should_report_trigger_mismatch() {
        let c = contact(60_000.0);
        let event = Event::new(
            EventType::DocumentUploaded,
            Some(c.id),
            serde_json::json!({"filename": "a.pdf"}),
        );
        let report = dry_run(&negotiation_rule(), &event, Some(&c));

        assert!(!report.trigger_matched);
        assert!(!report.would_fire);
        // Conditions are still reported so the user sees the whole picture.
        assert_eq!(report.conditions.len(), 1);
    }

    #[test]
    fn should_mark_conditions_unknown_when_contact_missing() {
        let report = dry_run(
            &negotiation_rule(),
            &negotiation_event(ContactId::new()),
            None,
        );

        assert!(report.trigger_matched);
        assert_eq!(report.conditions[0].satisfied, None);
        assert!(!report.would_fire);
    }

    #[test]
    fn should_fire_unconditional_rule_without_contact() {
        let rule = Rule::builder()
            .name("Any move")
            .trigger(Trigger::StatusChanged { to: None })
            .action(Action::CreateTask {
                title: "Review".to_string(),
            })
            .build();
        let event = Event::new(EventType::StatusChanged, None, serde_json::json!({}));

        let report = dry_run(&rule, &event, None);
        assert!(report.would_fire);
        assert_eq!(report.planned_actions, vec!["create_task(Review)"]);
    }

    #[test]
    fn should_render_each_condition_outcome() {
        let c = contact(60_000.0);
        let rule = Rule::builder()
            .name("Mixed")
            .trigger(Trigger::StatusChanged { to: None })
            .condition(Condition::DealValue {
                op: Comparison::GreaterThan,
                value: 50_000.0,
            })
            .condition(Condition::Industry {
                value: "Healthcare".to_string(),
            })
            .build();

        let report = dry_run(&rule, &negotiation_event(c.id), Some(&c));
        assert_eq!(report.conditions[0].condition, "deal_value > 50000");
        assert_eq!(report.conditions[0].satisfied, Some(true));
        assert_eq!(report.conditions[1].condition, "industry == Healthcare");
        assert_eq!(report.conditions[1].satisfied, Some(false));
        assert!(!report.would_fire);
    }

    #[test]
    fn should_serialize_report_for_api_responses() {
        let c = contact(60_000.0);
        let report = dry_run(&negotiation_rule(), &negotiation_event(c.id), Some(&c));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["would_fire"], true);
        assert_eq!(json["conditions"][0]["satisfied"], true);
    }
}
