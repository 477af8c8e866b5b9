//! JSON REST handlers for pipeline contacts.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use dealflow_app::ports::{ContactRepository, RuleGenerator, RuleRepository};
use dealflow_domain::contact::Contact;
use dealflow_domain::error::{DealflowError, ValidationError};
use dealflow_domain::id::ContactId;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for creating a contact.
#[derive(Deserialize)]
pub struct CreateContactRequest {
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub deal_value: Option<f64>,
    #[serde(default)]
    pub credit_score: Option<i64>,
    #[serde(default)]
    pub industry: Option<String>,
}

/// Request body for updating a contact's editable fields.
#[derive(Deserialize)]
pub struct UpdateContactRequest {
    pub name: String,
    pub deal_value: f64,
    pub credit_score: i64,
    pub industry: String,
}

/// Request body for moving a contact to a new pipeline stage.
#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// Request body for recording a document upload.
#[derive(Deserialize)]
pub struct RecordDocumentRequest {
    pub filename: String,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Contact>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get/update endpoints.
pub enum GetResponse {
    Ok(Json<Contact>),
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
    Created(Json<Contact>),
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

fn parse_id(id: &str) -> Result<ContactId, ApiError> {
    ContactId::from_str(id).map_err(|_| {
        ApiError::from(DealflowError::Validation(ValidationError::InvalidId {
            given: id.to_string(),
        }))
    })
}

/// `GET /api/contacts` — list all contacts.
pub async fn list<RR, CR, G>(
    State(state): State<AppState<RR, CR, G>>,
) -> Result<ListResponse, ApiError>
where
    RR: RuleRepository + Send + Sync + 'static,
    CR: ContactRepository + Send + Sync + 'static,
    G: RuleGenerator + Send + Sync + 'static,
{
    let contacts = state.contact_service.list_contacts().await?;
    Ok(ListResponse::Ok(Json(contacts)))
}

/// `GET /api/contacts/:id` — get contact by ID.
pub async fn get<RR, CR, G>(
    State(state): State<AppState<RR, CR, G>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    RR: RuleRepository + Send + Sync + 'static,
    CR: ContactRepository + Send + Sync + 'static,
    G: RuleGenerator + Send + Sync + 'static,
{
    let contact = state.contact_service.get_contact(parse_id(&id)?).await?;
    Ok(GetResponse::Ok(Json(contact)))
}

/// `POST /api/contacts` — create a new contact.
pub async fn create<RR, CR, G>(
    State(state): State<AppState<RR, CR, G>>,
    Json(req): Json<CreateContactRequest>,
) -> Result<CreateResponse, ApiError>
where
    RR: RuleRepository + Send + Sync + 'static,
    CR: ContactRepository + Send + Sync + 'static,
    G: RuleGenerator + Send + Sync + 'static,
{
    let mut builder = Contact::builder().name(req.name);
    if let Some(status) = req.status {
        builder = builder.status(status);
    }
    if let Some(deal_value) = req.deal_value {
        builder = builder.deal_value(deal_value);
    }
    if let Some(credit_score) = req.credit_score {
        builder = builder.credit_score(credit_score);
    }
    if let Some(industry) = req.industry {
        builder = builder.industry(industry);
    }

    let contact = builder.build()?;
    let created = state.contact_service.create_contact(contact).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PUT /api/contacts/:id` — update a contact's editable fields.
///
/// Pipeline stage moves go through `PUT /api/contacts/:id/status` so the
/// status-change event fires; this endpoint leaves `status` alone.
pub async fn update<RR, CR, G>(
    State(state): State<AppState<RR, CR, G>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateContactRequest>,
) -> Result<GetResponse, ApiError>
where
    RR: RuleRepository + Send + Sync + 'static,
    CR: ContactRepository + Send + Sync + 'static,
    G: RuleGenerator + Send + Sync + 'static,
{
    let mut contact = state.contact_service.get_contact(parse_id(&id)?).await?;
    contact.name = req.name;
    contact.deal_value = req.deal_value;
    contact.credit_score = req.credit_score;
    contact.industry = req.industry;
    contact.touch(dealflow_domain::time::now());

    let updated = state.contact_service.update_contact(contact).await?;
    Ok(GetResponse::Ok(Json(updated)))
}

/// `DELETE /api/contacts/:id` — delete a contact.
pub async fn delete<RR, CR, G>(
    State(state): State<AppState<RR, CR, G>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    RR: RuleRepository + Send + Sync + 'static,
    CR: ContactRepository + Send + Sync + 'static,
    G: RuleGenerator + Send + Sync + 'static,
{
    state.contact_service.delete_contact(parse_id(&id)?).await?;
    Ok(DeleteResponse::NoContent)
}

/// `PUT /api/contacts/:id/status` — move a contact to a new stage.
pub async fn update_status<RR, CR, G>(
    State(state): State<AppState<RR, CR, G>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<GetResponse, ApiError>
where
    RR: RuleRepository + Send + Sync + 'static,
    CR: ContactRepository + Send + Sync + 'static,
    G: RuleGenerator + Send + Sync + 'static,
{
    let contact = state
        .contact_service
        .update_status(parse_id(&id)?, req.status)
        .await?;
    Ok(GetResponse::Ok(Json(contact)))
}

/// `POST /api/contacts/:id/documents` — record a document upload.
pub async fn record_document<RR, CR, G>(
    State(state): State<AppState<RR, CR, G>>,
    Path(id): Path<String>,
    Json(req): Json<RecordDocumentRequest>,
) -> Result<GetResponse, ApiError>
where
    RR: RuleRepository + Send + Sync + 'static,
    CR: ContactRepository + Send + Sync + 'static,
    G: RuleGenerator + Send + Sync + 'static,
{
    let contact = state
        .contact_service
        .record_document(parse_id(&id)?, req.filename)
        .await?;
    Ok(GetResponse::Ok(Json(contact)))
}

/// `POST /api/contacts/:id/offer-accepted` — record an accepted offer.
pub async fn accept_offer<RR, CR, G>(
    State(state): State<AppState<RR, CR, G>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    RR: RuleRepository + Send + Sync + 'static,
    CR: ContactRepository + Send + Sync + 'static,
    G: RuleGenerator + Send + Sync + 'static,
{
    let contact = state.contact_service.accept_offer(parse_id(&id)?).await?;
    Ok(GetResponse::Ok(Json(contact)))
}
