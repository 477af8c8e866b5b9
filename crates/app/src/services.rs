//! Application services — use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod contact_service;
pub mod rule_service;

pub use contact_service::ContactService;
pub use rule_service::RuleService;
