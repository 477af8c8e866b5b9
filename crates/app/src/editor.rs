//! Rule editor — a single-slot draft buffer over the rule store.
//!
//! The editor holds at most one [`RuleDraft`] at a time. Beginning a new
//! draft discards whatever was in the buffer. Committing writes the draft
//! through [`RuleService::upsert_rule`] and clears the buffer.

use dealflow_domain::error::DealflowError;
use dealflow_domain::rule::{Rule, RuleDraft, RuleSketch};

use crate::ports::{RuleGenerator, RuleRepository};
use crate::services::RuleService;

/// Draft buffer for building or editing one rule at a time.
#[derive(Debug, Default)]
pub struct RuleEditor {
    draft: Option<RuleDraft>,
}

impl RuleEditor {
    /// Create an editor with an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a blank draft, replacing any draft in progress.
    pub fn begin(&mut self) -> &mut RuleDraft {
        self.draft.insert(RuleDraft::new())
    }

    /// Load an existing rule for editing, replacing any draft in progress.
    pub fn begin_rule(&mut self, rule: &Rule) -> &mut RuleDraft {
        self.draft.insert(RuleDraft::from_rule(rule))
    }

    /// Load a generated sketch for editing.
    ///
    /// Returns `false` (leaving the buffer untouched) when the sketch is
    /// not usable, so a failed generation never clobbers manual work.
    pub fn begin_sketch(&mut self, sketch: RuleSketch) -> bool {
        if !sketch.is_usable() {
            return false;
        }
        self.draft = Some(sketch.into_draft());
        true
    }

    /// Access the draft in progress, if any.
    pub fn draft_mut(&mut self) -> Option<&mut RuleDraft> {
        self.draft.as_mut()
    }

    /// Whether a draft is in progress.
    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    /// Drop the draft in progress without saving.
    pub fn discard(&mut self) {
        self.draft = None;
    }

    /// Commit the draft through the rule service and clear the buffer.
    ///
    /// Returns `Ok(None)` when there is nothing to commit. The buffer is
    /// kept on storage errors so the user's work survives a retry.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn commit<R: RuleRepository>(
        &mut self,
        service: &RuleService<R>,
    ) -> Result<Option<Rule>, DealflowError> {
        let Some(draft) = self.draft.take() else {
            return Ok(None);
        };
        match service.upsert_rule(draft.clone().into_rule()).await {
            Ok(rule) => Ok(Some(rule)),
            Err(error) => {
                self.draft = Some(draft);
                Err(error)
            }
        }
    }
}

/// Ask a generator to sketch a rule for a natural-language `prompt`.
///
/// Generation is best-effort by contract: a blank prompt, a generator
/// error, or an unusable sketch all come back as `None`. Failures are
/// logged, never surfaced.
pub async fn suggest_rule<G: RuleGenerator>(generator: &G, prompt: &str) -> Option<RuleSketch> {
    if prompt.trim().is_empty() {
        return None;
    }
    match generator.generate(prompt).await {
        Ok(sketch) if sketch.is_usable() => Some(sketch),
        Ok(_) => {
            tracing::warn!("rule generator returned an unusable sketch");
            None
        }
        Err(error) => {
            tracing::warn!(%error, "rule generation failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryRuleRepository;
    use dealflow_domain::rule::Trigger;
    use std::future::Future;

    fn make_service() -> RuleService<MemoryRuleRepository> {
        RuleService::new(MemoryRuleRepository::new())
    }

    #[tokio::test]
    async fn should_commit_blank_draft_as_valid_rule() {
        let svc = make_service();
        let mut editor = RuleEditor::new();
        editor.begin();

        let committed = editor.commit(&svc).await.unwrap().unwrap();
        assert!(committed.name.is_empty());
        assert!(committed.enabled);
        assert_eq!(committed.trigger, Trigger::StatusChanged { to: None });

        let stored = svc.list_rules().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert!(!editor.is_editing());
    }

    #[tokio::test]
    async fn should_edit_existing_rule_in_place() {
        let svc = make_service();
        let rule = Rule::builder().name("Before").build();
        let id = rule.id;
        svc.upsert_rule(rule.clone()).await.unwrap();

        let mut editor = RuleEditor::new();
        editor.begin_rule(&rule).name = "After".to_string();
        editor.commit(&svc).await.unwrap();

        let stored = svc.list_rules().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, id);
        assert_eq!(stored[0].name, "After");
    }

    #[tokio::test]
    async fn should_return_none_when_committing_empty_buffer() {
        let svc = make_service();
        let mut editor = RuleEditor::new();
        let committed = editor.commit(&svc).await.unwrap();
        assert!(committed.is_none());
    }

    #[tokio::test]
    async fn should_discard_draft_without_saving() {
        let svc = make_service();
        let mut editor = RuleEditor::new();
        editor.begin().name = "Never saved".to_string();
        editor.discard();

        assert!(!editor.is_editing());
        assert!(editor.commit(&svc).await.unwrap().is_none());
        assert!(svc.list_rules().await.unwrap().is_empty());
    }

    #[test]
    fn should_replace_draft_when_beginning_again() {
        let mut editor = RuleEditor::new();
        editor.begin().name = "First".to_string();
        let draft = editor.begin();
        assert!(draft.name.is_empty());
    }

    #[test]
    fn should_refuse_unusable_sketch_and_keep_buffer() {
        let mut editor = RuleEditor::new();
        editor.begin().name = "Manual work".to_string();

        let accepted = editor.begin_sketch(RuleSketch::default());
        assert!(!accepted);
        assert_eq!(
            editor.draft_mut().map(|d| d.name.clone()),
            Some("Manual work".to_string())
        );
    }

    #[test]
    fn should_load_usable_sketch_into_buffer() {
        let mut editor = RuleEditor::new();
        let sketch = RuleSketch::from_json(&serde_json::json!({
            "name": "Generated",
            "trigger": {"type": "lead_stale"}
        }));
        assert!(editor.begin_sketch(sketch));
        let draft = editor.draft_mut().unwrap();
        assert_eq!(draft.name, "Generated");
        assert_eq!(draft.trigger, Trigger::LeadStale);
    }

    // ── suggest_rule ───────────────────────────────────────────────

    struct CannedGenerator {
        reply: Result<RuleSketch, DealflowError>,
    }

    impl RuleGenerator for CannedGenerator {
        fn generate(
            &self,
            _prompt: &str,
        ) -> impl Future<Output = Result<RuleSketch, DealflowError>> + Send {
            let reply = match &self.reply {
                Ok(sketch) => Ok(sketch.clone()),
                Err(_) => Err(DealflowError::Generation("model unavailable".into())),
            };
            async { reply }
        }
    }

    fn usable_sketch() -> RuleSketch {
        RuleSketch::from_json(&serde_json::json!({"name": "Suggested"}))
    }

    #[tokio::test]
    async fn should_return_sketch_for_normal_prompt() {
        let generator = CannedGenerator {
            reply: Ok(usable_sketch()),
        };
        let sketch = suggest_rule(&generator, "notify me about big deals").await;
        assert_eq!(sketch.unwrap().name.as_deref(), Some("Suggested"));
    }

    #[tokio::test]
    async fn should_return_none_for_blank_prompt_without_calling_generator() {
        struct PanickingGenerator;
        impl RuleGenerator for PanickingGenerator {
            fn generate(
                &self,
                _prompt: &str,
            ) -> impl Future<Output = Result<RuleSketch, DealflowError>> + Send {
                async { panic!("generator must not be called for a blank prompt") }
            }
        }
        assert!(suggest_rule(&PanickingGenerator, "   ").await.is_none());
    }

    #[tokio::test]
    async fn should_return_none_when_generator_fails() {
        let generator = CannedGenerator {
            reply: Err(DealflowError::Generation("boom".into())),
        };
        assert!(suggest_rule(&generator, "do a thing").await.is_none());
    }

    #[tokio::test]
    async fn should_return_none_when_sketch_is_unusable() {
        let generator = CannedGenerator {
            reply: Ok(RuleSketch::default()),
        };
        assert!(suggest_rule(&generator, "do a thing").await.is_none());
    }
}
