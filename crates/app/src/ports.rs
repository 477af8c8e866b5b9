//! Port definitions — traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the use-case layer and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod contact_repo;
pub mod dispatch;
pub mod event_bus;
pub mod generator;
pub mod rule_repo;

pub use contact_repo::ContactRepository;
pub use dispatch::{ActionDispatcher, DispatchKey};
pub use event_bus::EventPublisher;
pub use generator::RuleGenerator;
pub use rule_repo::RuleRepository;
