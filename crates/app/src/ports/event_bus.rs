//! Event bus port — publish/subscribe for domain events.

use std::future::Future;

use dealflow_domain::error::DealflowError;
use dealflow_domain::event::Event;

/// Publishes domain events to interested subscribers.
pub trait EventPublisher {
    /// Publish an event to all current subscribers.
    fn publish(&self, event: Event) -> impl Future<Output = Result<(), DealflowError>> + Send;
}

impl<T: EventPublisher + Send + Sync> EventPublisher for std::sync::Arc<T> {
    fn publish(&self, event: Event) -> impl Future<Output = Result<(), DealflowError>> + Send {
        (**self).publish(event)
    }
}
