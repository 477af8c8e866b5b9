//! # dealflow-adapter-rulegen-genai
//!
//! Rule generator adapter backed by the [genai](https://docs.rs/genai)
//! crate.
//!
//! ## Responsibilities
//! - Implement the `RuleGenerator` port from `dealflow-app::ports`
//! - Prompt a chat model for a rule description in JSON form
//! - Decode the reply leniently into a `RuleSketch`
//!
//! ## Dependency rule
//! Depends on `dealflow-app` (for the port trait) and `dealflow-domain`
//! (for the sketch type). The `app` and `domain` crates must never
//! reference this adapter.

pub mod error;
pub mod generator;

pub use error::GeneratorError;
pub use generator::{ChatExecutor, GenaiRuleGenerator};
