//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod contacts;
#[allow(clippy::missing_errors_doc)]
pub mod events;
#[allow(clippy::missing_errors_doc)]
pub mod rules;
pub mod sse;

use axum::Router;
use axum::routing::{get, post, put};

use dealflow_app::ports::{ContactRepository, RuleGenerator, RuleRepository};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<RR, CR, G>() -> Router<AppState<RR, CR, G>>
where
    RR: RuleRepository + Send + Sync + 'static,
    CR: ContactRepository + Send + Sync + 'static,
    G: RuleGenerator + Send + Sync + 'static,
{
    Router::new()
        // Rules
        .route(
            "/rules",
            get(rules::list::<RR, CR, G>).post(rules::create::<RR, CR, G>),
        )
        .route("/rules/generate", post(rules::generate::<RR, CR, G>))
        .route(
            "/rules/{id}",
            get(rules::get::<RR, CR, G>)
                .put(rules::update::<RR, CR, G>)
                .delete(rules::delete::<RR, CR, G>),
        )
        .route("/rules/{id}/toggle", post(rules::toggle::<RR, CR, G>))
        .route("/rules/{id}/dry-run", post(rules::dry_run::<RR, CR, G>))
        // Contacts
        .route(
            "/contacts",
            get(contacts::list::<RR, CR, G>).post(contacts::create::<RR, CR, G>),
        )
        .route(
            "/contacts/{id}",
            get(contacts::get::<RR, CR, G>)
                .put(contacts::update::<RR, CR, G>)
                .delete(contacts::delete::<RR, CR, G>),
        )
        .route(
            "/contacts/{id}/status",
            put(contacts::update_status::<RR, CR, G>),
        )
        .route(
            "/contacts/{id}/documents",
            post(contacts::record_document::<RR, CR, G>),
        )
        .route(
            "/contacts/{id}/offer-accepted",
            post(contacts::accept_offer::<RR, CR, G>),
        )
        // Events
        .route("/events", post(events::publish::<RR, CR, G>))
        .route("/events/stream", get(sse::stream::<RR, CR, G>))
}
