//! Rule engine — reacts to pipeline events by evaluating and firing rules.
//!
//! The engine subscribes to the event bus and, for each incoming event,
//! checks all enabled rules. When a trigger matches, conditions are
//! evaluated against the contact the event concerns and, if all pass, the
//! rule's actions are dispatched in order.

use tokio::sync::broadcast;

use dealflow_domain::contact::Contact;
use dealflow_domain::error::DealflowError;
use dealflow_domain::event::{Event, EventType};
use dealflow_domain::id::RuleId;
use dealflow_domain::rule::Rule;

use crate::ports::{ActionDispatcher, ContactRepository, DispatchKey, EventPublisher, RuleRepository};

/// Reactive rule engine that subscribes to domain events.
pub struct RuleEngine<RR, CR, D, P> {
    rule_repo: RR,
    contact_repo: CR,
    dispatcher: D,
    publisher: P,
}

impl<RR, CR, D, P> RuleEngine<RR, CR, D, P>
where
    RR: RuleRepository,
    CR: ContactRepository,
    D: ActionDispatcher,
    P: EventPublisher,
{
    /// Create a new engine.
    pub fn new(rule_repo: RR, contact_repo: CR, dispatcher: D, publisher: P) -> Self {
        Self {
            rule_repo,
            contact_repo,
            dispatcher,
            publisher,
        }
    }

    /// Process a single event against all enabled rules.
    ///
    /// For each rule whose trigger matches, conditions are evaluated
    /// against the event's contact. If all conditions pass, the actions
    /// are dispatched in order, `last_fired` is stamped, and a
    /// `rule_fired` event is published.
    ///
    /// `rule_fired` events themselves are ignored, so rules cannot cascade
    /// off each other's firings.
    ///
    /// # Errors
    ///
    /// Returns a storage error if loading rules or contacts fails, or a
    /// dispatch error from the action dispatcher.
    pub async fn process_event(&self, event: &Event) -> Result<Vec<RuleId>, DealflowError> {
        if event.event_type == EventType::RuleFired {
            return Ok(Vec::new());
        }

        let rules = self.rule_repo.get_enabled().await?;
        let contact = self.load_contact(event).await?;
        let mut fired = Vec::new();

        for rule in &rules {
            if !rule.trigger.matches_event(event) {
                continue;
            }
            if !conditions_met(rule, contact.as_ref()) {
                continue;
            }

            self.dispatch_actions(rule, event, contact.as_ref()).await?;

            // Stamp the row as currently stored, not the snapshot read at
            // the top: a rule deleted or edited while its actions were
            // dispatching must stay deleted/edited.
            if let Some(mut current) = self.rule_repo.get_by_id(rule.id).await? {
                current.last_fired = Some(dealflow_domain::time::now());
                self.rule_repo.upsert(current).await?;
            }

            // Publish rule_fired (fire-and-forget). The engine skips these
            // on the way in, so this cannot recurse.
            let fired_event = Event::new(
                EventType::RuleFired,
                event.contact_id,
                serde_json::json!({
                    "rule_id": rule.id,
                    "rule_name": rule.name,
                    "source_event_id": event.id,
                }),
            );
            let _ = self.publisher.publish(fired_event).await;

            fired.push(rule.id);
        }

        Ok(fired)
    }

    /// Consume events from a bus subscription until the channel closes.
    ///
    /// Processing errors are logged and the loop keeps going; a lagged
    /// receiver drops the missed events and continues from the present.
    pub async fn run(&self, mut rx: broadcast::Receiver<Event>) {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    if let Err(error) = self.process_event(&event).await {
                        tracing::error!(%error, event_type = %event.event_type, "rule engine failed to process event");
                    }
                }
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    tracing::warn!(missed, "rule engine lagged behind event bus");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    }

    async fn load_contact(&self, event: &Event) -> Result<Option<Contact>, DealflowError> {
        match event.contact_id {
            Some(id) => self.contact_repo.get_by_id(id).await,
            None => Ok(None),
        }
    }

    async fn dispatch_actions(
        &self,
        rule: &Rule,
        event: &Event,
        contact: Option<&Contact>,
    ) -> Result<(), DealflowError> {
        for (action_index, action) in rule.actions.iter().enumerate() {
            let key = DispatchKey {
                rule_id: rule.id,
                event_id: event.id,
                action_index,
            };
            self.dispatcher.dispatch(key, action, contact).await?;
        }
        Ok(())
    }
}

/// Evaluate all of a rule's conditions (logical AND). Returns `true` when
/// the list is empty. A rule with conditions but no contact to evaluate
/// them against does not fire.
fn conditions_met(rule: &Rule, contact: Option<&Contact>) -> bool {
    if rule.conditions.is_empty() {
        return true;
    }
    let Some(contact) = contact else {
        return false;
    };
    rule.conditions.iter().all(|c| c.evaluate(contact))
}
