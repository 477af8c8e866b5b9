//! # dealflow-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `dealflow-app::ports`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `dealflow-app` (for port traits) and `dealflow-domain` (for
//! domain types). The `app` and `domain` crates must never reference this
//! adapter.

pub mod contact_repo;
pub mod error;
pub mod pool;
pub mod rule_repo;

pub use contact_repo::SqliteContactRepository;
pub use rule_repo::SqliteRuleRepository;
