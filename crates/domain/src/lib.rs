//! # dealflow-domain
//!
//! Pure domain model for the dealflow pipeline-automation service.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Contacts** (the lead/deal records that rule conditions
//!   evaluate against)
//! - Define **Events** (pipeline happenings: status changes, document
//!   uploads, offer acceptances, staleness)
//! - Define **Rules** (trigger → condition → action automations), the
//!   draft edit buffer, and the untrusted partial-rule sketch
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod contact;
pub mod event;
pub mod rule;
