//! # dealflow-adapter-dispatch-log
//!
//! Action dispatcher adapter that records fired actions to the tracing
//! log. This is the built-in dispatcher: tasks, emails, and admin alerts
//! become structured log lines rather than calls to external systems.
//!
//! ## Dependency rule
//! Depends on `dealflow-app` (for the port trait) and `dealflow-domain`
//! (for domain types). The `app` and `domain` crates must never reference
//! this adapter.

use std::collections::HashSet;
use std::sync::Mutex;

use dealflow_app::ports::{ActionDispatcher, DispatchKey};
use dealflow_domain::contact::Contact;
use dealflow_domain::error::DealflowError;
use dealflow_domain::rule::Action;

/// Dispatcher that logs each action and deduplicates by dispatch key.
///
/// Keys already seen are skipped, so re-delivered events do not produce a
/// second task or email. The seen-set lives in memory and resets on
/// restart, which is acceptable for a log-only dispatcher.
#[derive(Default)]
pub struct LogActionDispatcher {
    seen: Mutex<HashSet<String>>,
}

impl LogActionDispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn mark_seen(&self, key: DispatchKey) -> bool {
        match self.seen.lock() {
            Ok(mut seen) => seen.insert(key.to_string()),
            Err(poisoned) => poisoned.into_inner().insert(key.to_string()),
        }
    }
}

impl ActionDispatcher for LogActionDispatcher {
    async fn dispatch(
        &self,
        key: DispatchKey,
        action: &Action,
        contact: Option<&Contact>,
    ) -> Result<(), DealflowError> {
        if !self.mark_seen(key) {
            tracing::debug!(%key, "skipping already dispatched action");
            return Ok(());
        }

        let contact_name = contact.map_or("<unknown>", |c| c.name.as_str());
        match action {
            Action::CreateTask { title } => {
                tracing::info!(%key, contact = contact_name, title, "task created");
            }
            Action::SendEmail { subject, body } => {
                tracing::info!(
                    %key,
                    contact = contact_name,
                    subject,
                    body_length = body.len(),
                    "email sent"
                );
            }
            Action::NotifyAdmin { message } => {
                tracing::info!(%key, contact = contact_name, message, "admin notified");
            }
        }
        Ok(())
    }
}
