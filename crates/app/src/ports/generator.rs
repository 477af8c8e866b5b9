//! Rule generator port — natural-language prompt to rule sketch.

use std::future::Future;

use dealflow_domain::error::DealflowError;
use dealflow_domain::rule::RuleSketch;

/// Produces a [`RuleSketch`] from a natural-language description.
///
/// The sketch is untrusted output: callers must check
/// [`RuleSketch::is_usable`] before offering it to a user, and must treat
/// errors as "no suggestion" rather than surfacing them as failures.
pub trait RuleGenerator {
    /// Generate a rule sketch for the given prompt.
    fn generate(
        &self,
        prompt: &str,
    ) -> impl Future<Output = Result<RuleSketch, DealflowError>> + Send;
}

impl<T: RuleGenerator + Send + Sync> RuleGenerator for std::sync::Arc<T> {
    fn generate(
        &self,
        prompt: &str,
    ) -> impl Future<Output = Result<RuleSketch, DealflowError>> + Send {
        (**self).generate(prompt)
    }
}
