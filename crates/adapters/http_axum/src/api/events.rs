//! JSON REST handler for injecting domain events.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use dealflow_app::ports::{ContactRepository, EventPublisher as _, RuleGenerator, RuleRepository};
use dealflow_domain::event::{Event, EventType};
use dealflow_domain::id::ContactId;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for publishing an event onto the bus.
#[derive(Deserialize)]
pub struct PublishEventRequest {
    pub event_type: EventType,
    #[serde(default)]
    pub contact_id: Option<ContactId>,
    #[serde(default)]
    pub data: serde_json::Value,
}

/// Possible responses from the publish endpoint.
pub enum PublishResponse {
    Accepted(Json<Event>),
}

impl IntoResponse for PublishResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Accepted(json) => (StatusCode::ACCEPTED, json).into_response(),
        }
    }
}

/// `POST /api/events` — publish an event onto the in-process bus.
///
/// The rule engine picks it up asynchronously; the response only
/// acknowledges the publish.
pub async fn publish<RR, CR, G>(
    State(state): State<AppState<RR, CR, G>>,
    Json(req): Json<PublishEventRequest>,
) -> Result<PublishResponse, ApiError>
where
    RR: RuleRepository + Send + Sync + 'static,
    CR: ContactRepository + Send + Sync + 'static,
    G: RuleGenerator + Send + Sync + 'static,
{
    let event = Event::new(req.event_type, req.contact_id, req.data);
    state.event_bus.publish(event.clone()).await?;
    Ok(PublishResponse::Accepted(Json(event)))
}
