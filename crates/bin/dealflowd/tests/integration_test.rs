//! End-to-end smoke tests for the full dealflowd stack.
//!
//! Each test spins up the complete application (in-memory `SQLite`, real
//! repos, real services, real rule engine on the event bus, real axum
//! router) and exercises the HTTP layer via `tower::ServiceExt::oneshot`
//! — no TCP port is bound.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use dealflow_adapter_dispatch_log::LogActionDispatcher;
use dealflow_adapter_http_axum::router;
use dealflow_adapter_http_axum::state::AppState;
use dealflow_adapter_rulegen_genai::GenaiRuleGenerator;
use dealflow_adapter_storage_sqlite_sqlx::pool::Config;
use dealflow_adapter_storage_sqlite_sqlx::{SqliteContactRepository, SqliteRuleRepository};
use dealflow_app::event_bus::InProcessEventBus;
use dealflow_app::rule_engine::RuleEngine;
use dealflow_app::services::contact_service::ContactService;
use dealflow_app::services::rule_service::RuleService;

/// Build a fully-wired router backed by an in-memory `SQLite` database,
/// with the rule engine running against the event bus.
async fn app() -> axum::Router {
    let db = Config {
        database_url: "sqlite::memory:".to_string(),
    }
    .build()
    .await
    .expect("in-memory database should initialise");

    let pool = db.pool().clone();

    let event_bus = Arc::new(InProcessEventBus::new(256));

    let engine = RuleEngine::new(
        SqliteRuleRepository::new(pool.clone()),
        SqliteContactRepository::new(pool.clone()),
        Arc::new(LogActionDispatcher::new()),
        Arc::clone(&event_bus),
    );
    let engine_rx = event_bus.subscribe();
    tokio::spawn(async move { engine.run(engine_rx).await });

    let state = AppState::new(
        Arc::new(RuleService::new(SqliteRuleRepository::new(pool.clone()))),
        Arc::new(ContactService::new(
            SqliteContactRepository::new(pool),
            Arc::clone(&event_bus),
        )),
        Arc::new(GenaiRuleGenerator::new("test-model")),
        event_bus,
    );

    router::build(state)
}

async fn body_json(resp: axum::response::Response) -> serde_json::Value {
    serde_json::from_slice(&resp.into_body().collect().await.unwrap().to_bytes()).unwrap()
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_return_ok_when_health_check_called() {
    let resp = app()
        .await
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// API: full CRUD cycle for rules
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_complete_rule_crud_cycle() {
    let app = app().await;

    // Create rule
    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/rules",
            serde_json::json!({
                "name": "High value alert",
                "trigger": {"type": "status_changed", "to": "Negotiation"},
                "conditions": [{"field": "deal_value", "op": "gt", "value": 50000.0}],
                "actions": [{"type": "notify_admin", "message": "Big deal."}]
            }),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = body_json(resp).await;
    let rule_id = body["id"].as_str().unwrap().to_string();

    // List rules
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/rules")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], "High value alert");

    // Update rule
    let resp = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/rules/{rule_id}"),
            serde_json::json!({
                "name": "Renamed alert",
                "enabled": true,
                "trigger": {"type": "status_changed", "to": "Negotiation"},
                "conditions": [{"field": "deal_value", "op": "gt", "value": 50000.0}],
                "actions": [{"type": "notify_admin", "message": "Big deal."}]
            }),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["name"], "Renamed alert");

    // Toggle rule
    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/rules/{rule_id}/toggle"),
            serde_json::json!({}),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["enabled"], false);

    // Delete rule
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/rules/{rule_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    // Verify gone
    let resp = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/rules/{rule_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// API: contact pipeline moves
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_complete_contact_crud_cycle() {
    let app = app().await;

    // Create contact
    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/contacts",
            serde_json::json!({
                "name": "Acme Logistics",
                "deal_value": 75000.0,
                "credit_score": 710,
                "industry": "Transport"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = body_json(resp).await;
    assert_eq!(body["status"], "New Lead");
    let contact_id = body["id"].as_str().unwrap().to_string();

    // Move stage
    let resp = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/contacts/{contact_id}/status"),
            serde_json::json!({"status": "Underwriting"}),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["status"], "Underwriting");

    // Get contact
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/contacts/{contact_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["status"], "Underwriting");

    // Delete contact
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/contacts/{contact_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}

// ---------------------------------------------------------------------------
// Rule engine: pipeline move fires a matching rule end to end
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_fire_matching_rule_when_contact_moves_stage() {
    let app = app().await;

    // Contact that satisfies the rule's conditions.
    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/contacts",
            serde_json::json!({
                "name": "Big Fish Corp",
                "deal_value": 120000.0,
                "credit_score": 720
            }),
        ))
        .await
        .unwrap();
    let contact = body_json(resp).await;
    let contact_id = contact["id"].as_str().unwrap().to_string();

    // Rule watching for moves into Negotiation.
    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/rules",
            serde_json::json!({
                "name": "Negotiation alert",
                "trigger": {"type": "status_changed", "to": "Negotiation"},
                "conditions": [{"field": "deal_value", "op": "gt", "value": 50000.0}],
                "actions": [{"type": "create_task", "title": "Prep the paperwork"}]
            }),
        ))
        .await
        .unwrap();
    let rule = body_json(resp).await;
    let rule_id = rule["id"].as_str().unwrap().to_string();
    assert!(rule["last_fired"].is_null());

    // Move the contact; the engine picks up the event off the bus.
    let resp = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/contacts/{contact_id}/status"),
            serde_json::json!({"status": "Negotiation"}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    // The engine runs asynchronously; poll until the rule records a firing.
    let mut fired = false;
    for _ in 0..50 {
        tokio::time::sleep(Duration::from_millis(20)).await;
        let resp = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(format!("/api/rules/{rule_id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = body_json(resp).await;
        if !body["last_fired"].is_null() {
            fired = true;
            break;
        }
    }
    assert!(fired, "rule should have fired after the stage move");
}

// ---------------------------------------------------------------------------
// Dry run: no side effects, just a report
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_report_dry_run_without_firing_rule() {
    let app = app().await;

    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/rules",
            serde_json::json!({
                "name": "Stale lead nudge",
                "trigger": {"type": "lead_stale"},
                "actions": [{"type": "send_email", "subject": "Still there?", "body": "Checking in."}]
            }),
        ))
        .await
        .unwrap();
    let rule = body_json(resp).await;
    let rule_id = rule["id"].as_str().unwrap().to_string();

    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/rules/{rule_id}/dry-run"),
            serde_json::json!({"event_type": "lead_stale"}),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let report = body_json(resp).await;
    assert_eq!(report["trigger_matched"], true);
    assert_eq!(report["would_fire"], true);
    assert_eq!(report["planned_actions"][0], "send_email(Still there?)");

    // Dry runs never stamp last_fired.
    let resp = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/rules/{rule_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = body_json(resp).await;
    assert!(body["last_fired"].is_null());
}

// ---------------------------------------------------------------------------
// Generation: blank prompts short-circuit without touching the model
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_return_null_suggestion_for_blank_prompt() {
    let resp = app()
        .await
        .oneshot(json_request(
            "POST",
            "/api/rules/generate",
            serde_json::json!({"prompt": "   "}),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert!(body.is_null());
}
