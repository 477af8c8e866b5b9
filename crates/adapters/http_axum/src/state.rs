//! Shared application state for axum handlers.

use std::sync::Arc;

use dealflow_app::event_bus::InProcessEventBus;
use dealflow_app::ports::{ContactRepository, RuleGenerator, RuleRepository};
use dealflow_app::services::contact_service::ContactService;
use dealflow_app::services::rule_service::RuleService;

/// Application state shared across all axum handlers.
///
/// Generic over the repository and generator types to avoid dynamic
/// dispatch. The event bus is concrete: handlers need its `subscribe`
/// method for SSE, which no port trait exposes. `Clone` is implemented
/// manually so the underlying types themselves do not need to be `Clone`
/// — only the `Arc` wrappers are cloned.
pub struct AppState<RR, CR, G> {
    /// Rule CRUD service.
    pub rule_service: Arc<RuleService<RR>>,
    /// Contact CRUD and pipeline-move service.
    pub contact_service: Arc<ContactService<CR, Arc<InProcessEventBus>>>,
    /// Natural-language rule generator.
    pub generator: Arc<G>,
    /// Event bus for injecting events and the SSE stream.
    pub event_bus: Arc<InProcessEventBus>,
}

impl<RR, CR, G> Clone for AppState<RR, CR, G> {
    fn clone(&self) -> Self {
        Self {
            rule_service: Arc::clone(&self.rule_service),
            contact_service: Arc::clone(&self.contact_service),
            generator: Arc::clone(&self.generator),
            event_bus: Arc::clone(&self.event_bus),
        }
    }
}

impl<RR, CR, G> AppState<RR, CR, G>
where
    RR: RuleRepository + Send + Sync + 'static,
    CR: ContactRepository + Send + Sync + 'static,
    G: RuleGenerator + Send + Sync + 'static,
{
    /// Create a new application state from pre-wrapped `Arc` parts.
    ///
    /// The parts are shared with background tasks (engine, staleness
    /// monitor), so the caller wraps them first.
    pub fn new(
        rule_service: Arc<RuleService<RR>>,
        contact_service: Arc<ContactService<CR, Arc<InProcessEventBus>>>,
        generator: Arc<G>,
        event_bus: Arc<InProcessEventBus>,
    ) -> Self {
        Self {
            rule_service,
            contact_service,
            generator,
            event_bus,
        }
    }
}
