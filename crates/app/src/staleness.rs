//! Staleness monitor — flags leads that have gone quiet.
//!
//! Periodically scans contacts and publishes a `lead_stale` event for each
//! one whose `last_activity` is older than the configured threshold. A
//! contact is flagged once per idle period: activity on the contact arms
//! it again.

use std::collections::HashSet;
use std::sync::Mutex;

use dealflow_domain::error::DealflowError;
use dealflow_domain::event::{Event, EventType};
use dealflow_domain::id::ContactId;

use crate::ports::{ContactRepository, EventPublisher};

/// Scans the contact store for idle leads and emits `lead_stale` events.
pub struct StalenessMonitor<CR, P> {
    contact_repo: CR,
    publisher: P,
    threshold: chrono::Duration,
    flagged: Mutex<HashSet<ContactId>>,
}

impl<CR, P> StalenessMonitor<CR, P>
where
    CR: ContactRepository,
    P: EventPublisher,
{
    /// Create a monitor that considers a contact stale after `threshold`
    /// without activity.
    pub fn new(contact_repo: CR, publisher: P, threshold: chrono::Duration) -> Self {
        Self {
            contact_repo,
            publisher,
            threshold,
            flagged: Mutex::new(HashSet::new()),
        }
    }

    /// Run one scan over all contacts, publishing `lead_stale` for newly
    /// idle ones. Returns the ids flagged by this scan.
    ///
    /// # Errors
    ///
    /// Returns a storage error if listing contacts fails.
    #[tracing::instrument(skip(self))]
    pub async fn scan(&self) -> Result<Vec<ContactId>, DealflowError> {
        let now = dealflow_domain::time::now();
        let contacts = self.contact_repo.get_all().await?;
        let mut newly_flagged = Vec::new();

        for contact in &contacts {
            let idle = now - contact.last_activity;
            let is_stale = idle > self.threshold;
            {
                let mut flagged = self
                    .flagged
                    .lock()
                    .unwrap_or_else(std::sync::PoisonError::into_inner);

                if !is_stale {
                    // Fresh activity re-arms the flag for the next idle period.
                    flagged.remove(&contact.id);
                    continue;
                }
                if !flagged.insert(contact.id) {
                    continue;
                }
            }

            let event = Event::new(
                EventType::LeadStale,
                Some(contact.id),
                serde_json::json!({
                    "idle_hours": idle.num_hours(),
                    "status": contact.status,
                }),
            );
            let _ = self.publisher.publish(event).await;
            newly_flagged.push(contact.id);
        }

        Ok(newly_flagged)
    }

    /// Scan on a fixed interval until the task is dropped.
    pub async fn run(&self, every: std::time::Duration) {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            if let Err(error) = self.scan().await {
                tracing::error!(%error, "staleness scan failed");
            }
        }
    }
}
