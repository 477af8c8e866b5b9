//! Fan-out of domain events to in-process consumers (the rule engine,
//! SSE streams) over a tokio broadcast channel.

use std::future::Future;

use tokio::sync::broadcast;

use dealflow_domain::error::DealflowError;
use dealflow_domain::event::Event;

use crate::ports::EventPublisher;

/// Event bus that fans each published [`Event`] out to every live
/// subscriber via [`broadcast`].
///
/// An event published while nobody is subscribed is dropped; `publish`
/// still reports success.
pub struct InProcessEventBus {
    sender: broadcast::Sender<Event>,
}

impl InProcessEventBus {
    /// Create a bus whose channel buffers up to `capacity` events per
    /// subscriber before older ones are overwritten.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Open a new subscription.
    ///
    /// The receiver only sees events published from this point on;
    /// earlier ones are not replayed.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.sender.subscribe()
    }
}

impl EventPublisher for InProcessEventBus {
    fn publish(&self, event: Event) -> impl Future<Output = Result<(), DealflowError>> + Send {
        // A send error just means no receiver is currently attached;
        // the contract says that is not a publish failure.
        let _ = self.sender.send(event);
        async { Ok(()) }
    }
}
