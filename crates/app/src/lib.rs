//! # dealflow-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `RuleRepository` — upsert, list, and remove automation rules
//!   - `ContactRepository` — CRUD for pipeline contacts
//!   - `ActionDispatcher` — perform rule actions (tasks, email, notifications)
//!   - `RuleGenerator` — produce rule sketches from natural-language prompts
//!   - `EventPublisher` — publish domain events
//! - Define **driving/inbound ports** as use-case structs:
//!   - `RuleService` / `ContactService` — CRUD orchestration
//!   - `RuleEngine` — match triggers, evaluate conditions, dispatch actions
//!   - `RuleEditor` — single-slot draft buffer for building rules
//!   - `StalenessMonitor` — flag idle leads and emit `lead_stale` events
//! - Provide **in-process infrastructure** (event bus, in-memory repositories)
//!   that doesn't need IO
//! - Orchestrate domain objects without knowing *how* persistence or IO works
//!
//! ## Dependency rule
//! Depends on `dealflow-domain` only (plus `tokio::sync` for channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod dry_run;
pub mod editor;
pub mod event_bus;
pub mod memory;
pub mod ports;
pub mod rule_engine;
pub mod services;
pub mod staleness;
