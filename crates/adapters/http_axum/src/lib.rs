//! # dealflow-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a **REST-ish JSON API** for rules, contacts, and events
//!   (`/api/rules`, `/api/contacts`, `/api/events`, …)
//! - Expose the rule generator behind `POST /api/rules/generate` and the
//!   dry-run evaluator behind `POST /api/rules/{id}/dry-run`
//! - Stream live domain events over SSE at `GET /api/events/stream`
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results into HTTP responses
//!
//! ## Dependency rule
//! Depends on `dealflow-app` (for port traits and services) and
//! `dealflow-domain` (for domain types used in request/response mapping).
//! Never leaks axum types into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
