//! Chat-model-backed implementation of [`RuleGenerator`].

use std::sync::Arc;

use async_trait::async_trait;
use genai::{
    Client as GenaiClient, Error as GenaiError,
    chat::{
        ChatMessage as GenaiChatMessage, ChatOptions, ChatRequest, ChatResponse,
        ChatResponseFormat,
    },
};

use dealflow_app::ports::RuleGenerator;
use dealflow_domain::error::DealflowError;
use dealflow_domain::rule::RuleSketch;

use crate::error::GeneratorError;

/// Default model identifier when none is configured.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

const TEMPERATURE: f64 = 0.2;
const MAX_TOKENS: u32 = 800;

const SYSTEM_PROMPT: &str = "\
You translate a broker's plain-language description of a pipeline automation \
into a single JSON object. Reply with JSON only, no prose.

The object has this shape:
{
  \"name\": \"short human-readable rule name\",
  \"trigger\": {\"type\": \"status_changed\", \"to\": \"Negotiation\"}
           | {\"type\": \"document_uploaded\"}
           | {\"type\": \"offer_accepted\"}
           | {\"type\": \"lead_stale\"},
  \"conditions\": [
    {\"field\": \"deal_value\", \"op\": \"gt\"|\"lt\"|\"eq\", \"value\": 50000.0},
    {\"field\": \"credit_score\", \"op\": \"gt\"|\"lt\"|\"eq\", \"value\": 650},
    {\"field\": \"industry\", \"value\": \"Transport\"}
  ],
  \"actions\": [
    {\"type\": \"create_task\", \"title\": \"...\"},
    {\"type\": \"send_email\", \"subject\": \"...\", \"body\": \"...\"},
    {\"type\": \"notify_admin\", \"message\": \"...\"}
  ]
}

For \"status_changed\" the \"to\" field is optional; omit it to match any \
destination status. \"conditions\" and \"actions\" may be empty arrays. \
Include only what the description asks for.";

/// Abstraction over the genai chat call so tests can inject canned replies.
#[async_trait]
pub trait ChatExecutor: Send + Sync {
    async fn exec_chat(
        &self,
        model: &str,
        request: ChatRequest,
        options: Option<&ChatOptions>,
    ) -> Result<ChatResponse, GenaiError>;
}

#[async_trait]
impl ChatExecutor for GenaiClient {
    async fn exec_chat(
        &self,
        model: &str,
        request: ChatRequest,
        options: Option<&ChatOptions>,
    ) -> Result<ChatResponse, GenaiError> {
        GenaiClient::exec_chat(self, model, request, options).await
    }
}

/// Rule generator that asks a chat model to describe the rule as JSON.
///
/// Replies are decoded through [`RuleSketch::from_json`], so a reply that
/// is valid JSON but only partially well-formed still yields whatever
/// fields survived. Only transport failures and non-JSON replies surface
/// as errors.
pub struct GenaiRuleGenerator {
    chat: Arc<dyn ChatExecutor>,
    model: String,
}

impl GenaiRuleGenerator {
    /// Create a generator backed by a real genai client.
    ///
    /// Provider credentials are resolved from the environment by the genai
    /// crate itself (e.g. `OPENAI_API_KEY`).
    #[must_use]
    pub fn new(model: impl Into<String>) -> Self {
        Self::with_executor(Arc::new(GenaiClient::default()), model)
    }

    /// Create a generator with an injected chat executor.
    #[must_use]
    pub fn with_executor(chat: Arc<dyn ChatExecutor>, model: impl Into<String>) -> Self {
        Self {
            chat,
            model: model.into(),
        }
    }

    fn build_request(prompt: &str) -> ChatRequest {
        ChatRequest::from_messages(vec![
            GenaiChatMessage::system(SYSTEM_PROMPT),
            GenaiChatMessage::user(prompt),
        ])
    }

    fn build_options() -> ChatOptions {
        ChatOptions::default()
            .with_temperature(TEMPERATURE)
            .with_max_tokens(MAX_TOKENS)
            .with_response_format(ChatResponseFormat::JsonMode)
    }
}

impl RuleGenerator for GenaiRuleGenerator {
    async fn generate(&self, prompt: &str) -> Result<RuleSketch, DealflowError> {
        let request = Self::build_request(prompt);
        let options = Self::build_options();

        let response = self
            .chat
            .exec_chat(&self.model, request, Some(&options))
            .await
            .map_err(GeneratorError::from)?;

        let text = response
            .first_text()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .ok_or(GeneratorError::EmptyReply)?;

        let sketch = parse_reply(text)?;
        tracing::debug!(model = %self.model, usable = sketch.is_usable(), "decoded rule sketch");
        Ok(sketch)
    }
}

/// Decode a reply into a sketch, tolerating markdown code fences.
fn parse_reply(text: &str) -> Result<RuleSketch, GeneratorError> {
    let value: serde_json::Value = serde_json::from_str(strip_fences(text))?;
    Ok(RuleSketch::from_json(&value))
}

/// Models in JSON mode occasionally still wrap the payload in a fenced
/// block. Strip one outer ```...``` pair if present.
fn strip_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use genai::{ModelIden, adapter::AdapterKind, chat::Usage};
    use genai::chat::MessageContent;

    use dealflow_domain::rule::{Action, Trigger};

    use super::*;

    fn canned_response(text: &str) -> ChatResponse {
        ChatResponse {
            content: MessageContent::from_text(text),
            reasoning_content: None,
            model_iden: ModelIden::new(AdapterKind::OpenAI, DEFAULT_MODEL),
            provider_model_iden: ModelIden::new(AdapterKind::OpenAI, DEFAULT_MODEL),
            usage: Usage::default(),
            captured_raw_body: None,
        }
    }

    struct StubChatExecutor {
        responses: Mutex<Vec<Result<ChatResponse, GenaiError>>>,
        calls: Mutex<Vec<(String, ChatRequest, Option<ChatOptions>)>>,
    }

    impl StubChatExecutor {
        fn new(response: Result<ChatResponse, GenaiError>) -> Self {
            Self {
                responses: Mutex::new(vec![response]),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ChatExecutor for StubChatExecutor {
        async fn exec_chat(
            &self,
            model: &str,
            request: ChatRequest,
            options: Option<&ChatOptions>,
        ) -> Result<ChatResponse, GenaiError> {
            self.calls
                .lock()
                .unwrap()
                .push((model.to_string(), request, options.cloned()));
            self.responses
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Err(GenaiError::Internal("stub missing response".into())))
        }
    }

    #[tokio::test]
    async fn should_decode_well_formed_reply_into_sketch() {
        let reply = serde_json::json!({
            "name": "Hot deal alert",
            "trigger": {"type": "status_changed", "to": "Negotiation"},
            "conditions": [{"field": "deal_value", "op": "gt", "value": 50000.0}],
            "actions": [{"type": "notify_admin", "message": "Watch this one."}]
        });
        let stub = Arc::new(StubChatExecutor::new(Ok(canned_response(
            &reply.to_string(),
        ))));
        let generator = GenaiRuleGenerator::with_executor(stub, DEFAULT_MODEL);

        let sketch = generator
            .generate("alert me on big deals entering negotiation")
            .await
            .unwrap();

        assert_eq!(sketch.name.as_deref(), Some("Hot deal alert"));
        assert_eq!(
            sketch.trigger,
            Some(Trigger::StatusChanged {
                to: Some("Negotiation".to_string())
            })
        );
        assert_eq!(sketch.conditions.len(), 1);
        assert_eq!(
            sketch.actions,
            vec![Action::NotifyAdmin {
                message: "Watch this one.".to_string()
            }]
        );
        assert!(sketch.is_usable());
    }

    #[tokio::test]
    async fn should_send_system_prompt_and_json_mode_options() {
        let stub = Arc::new(StubChatExecutor::new(Ok(canned_response("{}"))));
        let generator = GenaiRuleGenerator::with_executor(stub.clone(), "test-model");

        generator.generate("anything").await.unwrap();

        let calls = stub.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        let (model, request, options) = &calls[0];
        assert_eq!(model, "test-model");
        assert_eq!(request.messages.len(), 2);
        assert!(matches!(
            request.messages[0].role,
            genai::chat::ChatRole::System
        ));
        assert_eq!(
            request.messages[1].content.first_text(),
            Some("anything")
        );
        let options = options.as_ref().unwrap();
        assert!(matches!(
            options.response_format,
            Some(ChatResponseFormat::JsonMode)
        ));
        assert_eq!(options.max_tokens, Some(MAX_TOKENS));
    }

    #[tokio::test]
    async fn should_surface_chat_failure_as_generation_error() {
        let stub = Arc::new(StubChatExecutor::new(Err(GenaiError::Internal(
            "provider down".into(),
        ))));
        let generator = GenaiRuleGenerator::with_executor(stub, DEFAULT_MODEL);

        let err = generator.generate("whatever").await.unwrap_err();
        assert!(matches!(err, DealflowError::Generation(_)));
    }

    #[tokio::test]
    async fn should_error_on_non_json_reply() {
        let stub = Arc::new(StubChatExecutor::new(Ok(canned_response(
            "Sure! Here is your rule in prose form.",
        ))));
        let generator = GenaiRuleGenerator::with_executor(stub, DEFAULT_MODEL);

        let err = generator.generate("whatever").await.unwrap_err();
        assert!(matches!(err, DealflowError::Generation(_)));
    }

    #[tokio::test]
    async fn should_yield_unusable_sketch_for_json_without_name() {
        let stub = Arc::new(StubChatExecutor::new(Ok(canned_response(
            r#"{"trigger": {"type": "lead_stale"}}"#,
        ))));
        let generator = GenaiRuleGenerator::with_executor(stub, DEFAULT_MODEL);

        let sketch = generator.generate("whatever").await.unwrap();
        assert!(!sketch.is_usable());
        assert_eq!(sketch.trigger, Some(Trigger::LeadStale));
    }

    #[test]
    fn should_strip_markdown_fences_around_reply() {
        let fenced = "```json\n{\"name\": \"Fenced\"}\n```";
        let sketch = parse_reply(fenced).unwrap();
        assert_eq!(sketch.name.as_deref(), Some("Fenced"));

        let bare = "{\"name\": \"Bare\"}";
        let sketch = parse_reply(bare).unwrap();
        assert_eq!(sketch.name.as_deref(), Some("Bare"));
    }
}
