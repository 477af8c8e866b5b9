//! JSON REST handlers for automation rules.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use dealflow_app::dry_run::{self, DryRunReport};
use dealflow_app::editor::suggest_rule;
use dealflow_app::ports::{ContactRepository, RuleGenerator, RuleRepository};
use dealflow_domain::error::{DealflowError, ValidationError};
use dealflow_domain::event::{Event, EventType};
use dealflow_domain::id::{ContactId, RuleId};
use dealflow_domain::rule::{Action, Condition, Rule, RuleDraft, RuleSketch, Trigger};

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for creating a rule. Everything is optional: an empty
/// body yields the same rule a blank editor draft would.
#[derive(Deserialize)]
pub struct CreateRuleRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub trigger: Option<Trigger>,
    #[serde(default)]
    pub conditions: Vec<Condition>,
    #[serde(default)]
    pub actions: Vec<Action>,
}

/// Request body for replacing a rule.
#[derive(Deserialize)]
pub struct UpdateRuleRequest {
    pub name: String,
    pub enabled: bool,
    pub trigger: Trigger,
    #[serde(default)]
    pub conditions: Vec<Condition>,
    #[serde(default)]
    pub actions: Vec<Action>,
}

/// Request body for the generate endpoint.
#[derive(Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
}

/// Request body for the dry-run endpoint: the hypothetical event to
/// evaluate the rule against.
#[derive(Deserialize)]
pub struct DryRunRequest {
    pub event_type: EventType,
    #[serde(default)]
    pub contact_id: Option<ContactId>,
    #[serde(default)]
    pub data: serde_json::Value,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Rule>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get/update/toggle endpoints.
pub enum GetResponse {
    Ok(Json<Rule>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Rule>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    NoContent,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// Possible responses from the generate endpoint.
///
/// Generation is best-effort: a failed or unusable generation is a `200`
/// with a `null` suggestion, never an error.
pub enum GenerateResponse {
    Ok(Json<Option<RuleDraft>>),
}

impl IntoResponse for GenerateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the dry-run endpoint.
pub enum DryRunResponse {
    Ok(Json<DryRunReport>),
}

impl IntoResponse for DryRunResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

fn parse_id(id: &str) -> Result<RuleId, ApiError> {
    RuleId::from_str(id).map_err(|_| {
        ApiError::from(DealflowError::Validation(ValidationError::InvalidId {
            given: id.to_string(),
        }))
    })
}

/// `GET /api/rules` — list all rules in insertion order.
pub async fn list<RR, CR, G>(
    State(state): State<AppState<RR, CR, G>>,
) -> Result<ListResponse, ApiError>
where
    RR: RuleRepository + Send + Sync + 'static,
    CR: ContactRepository + Send + Sync + 'static,
    G: RuleGenerator + Send + Sync + 'static,
{
    let rules = state.rule_service.list_rules().await?;
    Ok(ListResponse::Ok(Json(rules)))
}

/// `GET /api/rules/:id` — get rule by ID.
pub async fn get<RR, CR, G>(
    State(state): State<AppState<RR, CR, G>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    RR: RuleRepository + Send + Sync + 'static,
    CR: ContactRepository + Send + Sync + 'static,
    G: RuleGenerator + Send + Sync + 'static,
{
    let rule = state.rule_service.get_rule(parse_id(&id)?).await?;
    Ok(GetResponse::Ok(Json(rule)))
}

/// `POST /api/rules` — create a new rule.
pub async fn create<RR, CR, G>(
    State(state): State<AppState<RR, CR, G>>,
    Json(req): Json<CreateRuleRequest>,
) -> Result<CreateResponse, ApiError>
where
    RR: RuleRepository + Send + Sync + 'static,
    CR: ContactRepository + Send + Sync + 'static,
    G: RuleGenerator + Send + Sync + 'static,
{
    let mut builder = Rule::builder();
    if let Some(name) = req.name {
        builder = builder.name(name);
    }
    if let Some(enabled) = req.enabled {
        builder = builder.enabled(enabled);
    }
    if let Some(trigger) = req.trigger {
        builder = builder.trigger(trigger);
    }
    for c in req.conditions {
        builder = builder.condition(c);
    }
    for a in req.actions {
        builder = builder.action(a);
    }

    let created = state.rule_service.upsert_rule(builder.build()).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PUT /api/rules/:id` — replace an existing rule.
pub async fn update<RR, CR, G>(
    State(state): State<AppState<RR, CR, G>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateRuleRequest>,
) -> Result<GetResponse, ApiError>
where
    RR: RuleRepository + Send + Sync + 'static,
    CR: ContactRepository + Send + Sync + 'static,
    G: RuleGenerator + Send + Sync + 'static,
{
    let rule_id = parse_id(&id)?;

    // Verify it exists; a PUT must not mint a rule under a client-chosen id.
    state.rule_service.get_rule(rule_id).await?;

    let mut builder = Rule::builder()
        .id(rule_id)
        .name(req.name)
        .enabled(req.enabled)
        .trigger(req.trigger);
    for c in req.conditions {
        builder = builder.condition(c);
    }
    for a in req.actions {
        builder = builder.action(a);
    }

    let updated = state.rule_service.upsert_rule(builder.build()).await?;
    Ok(GetResponse::Ok(Json(updated)))
}

/// `DELETE /api/rules/:id` — delete a rule.
pub async fn delete<RR, CR, G>(
    State(state): State<AppState<RR, CR, G>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    RR: RuleRepository + Send + Sync + 'static,
    CR: ContactRepository + Send + Sync + 'static,
    G: RuleGenerator + Send + Sync + 'static,
{
    state.rule_service.delete_rule(parse_id(&id)?).await?;
    Ok(DeleteResponse::NoContent)
}

/// `POST /api/rules/:id/toggle` — flip a rule's enabled flag.
pub async fn toggle<RR, CR, G>(
    State(state): State<AppState<RR, CR, G>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    RR: RuleRepository + Send + Sync + 'static,
    CR: ContactRepository + Send + Sync + 'static,
    G: RuleGenerator + Send + Sync + 'static,
{
    let toggled = state.rule_service.toggle_rule(parse_id(&id)?).await?;
    Ok(GetResponse::Ok(Json(toggled)))
}

/// `POST /api/rules/generate` — sketch a rule from a natural-language
/// prompt.
pub async fn generate<RR, CR, G>(
    State(state): State<AppState<RR, CR, G>>,
    Json(req): Json<GenerateRequest>,
) -> GenerateResponse
where
    RR: RuleRepository + Send + Sync + 'static,
    CR: ContactRepository + Send + Sync + 'static,
    G: RuleGenerator + Send + Sync + 'static,
{
    let suggestion = suggest_rule(state.generator.as_ref(), &req.prompt)
        .await
        .map(RuleSketch::into_draft);
    GenerateResponse::Ok(Json(suggestion))
}

/// `POST /api/rules/:id/dry-run` — evaluate a rule against a hypothetical
/// event without side effects.
pub async fn dry_run<RR, CR, G>(
    State(state): State<AppState<RR, CR, G>>,
    Path(id): Path<String>,
    Json(req): Json<DryRunRequest>,
) -> Result<DryRunResponse, ApiError>
where
    RR: RuleRepository + Send + Sync + 'static,
    CR: ContactRepository + Send + Sync + 'static,
    G: RuleGenerator + Send + Sync + 'static,
{
    let rule = state.rule_service.get_rule(parse_id(&id)?).await?;

    let contact = match req.contact_id {
        Some(contact_id) => match state.contact_service.get_contact(contact_id).await {
            Ok(contact) => Some(contact),
            // An unknown contact is part of the question being asked, not
            // a client error: conditions report as unevaluable.
            Err(DealflowError::NotFound(_)) => None,
            Err(err) => return Err(err.into()),
        },
        None => None,
    };

    let event = Event::new(req.event_type, req.contact_id, req.data);
    let report = dry_run::dry_run(&rule, &event, contact.as_ref());
    Ok(DryRunResponse::Ok(Json(report)))
}
