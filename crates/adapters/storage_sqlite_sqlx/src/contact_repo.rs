//! `SQLite` implementation of [`ContactRepository`].

use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use dealflow_app::ports::ContactRepository;
use dealflow_domain::contact::Contact;
use dealflow_domain::error::DealflowError;
use dealflow_domain::id::ContactId;

use crate::error::StorageError;

struct Wrapper(Contact);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Contact> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let status: String = row.try_get("status")?;
        let deal_value: f64 = row.try_get("deal_value")?;
        let credit_score: i64 = row.try_get("credit_score")?;
        let industry: String = row.try_get("industry")?;
        let last_activity_str: String = row.try_get("last_activity")?;

        let id = ContactId::from_str(&id).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let last_activity = chrono::DateTime::parse_from_rfc3339(&last_activity_str)
            .map(|dt| dt.to_utc())
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(Contact {
            id,
            name,
            status,
            deal_value,
            credit_score,
            industry,
            last_activity,
        }))
    }
}

/// `SQLite`-backed contact repository.
pub struct SqliteContactRepository {
    pool: SqlitePool,
}

impl SqliteContactRepository {
    /// Create a new repository backed by the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl ContactRepository for SqliteContactRepository {
    async fn create(&self, contact: Contact) -> Result<Contact, DealflowError> {
        sqlx::query(
                "INSERT INTO contacts (id, name, status, deal_value, credit_score, industry, last_activity) VALUES (?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(contact.id.to_string())
            .bind(&contact.name)
            .bind(&contact.status)
            .bind(contact.deal_value)
            .bind(contact.credit_score)
            .bind(&contact.industry)
            .bind(contact.last_activity.to_rfc3339())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(contact)
    }

    async fn get_by_id(&self, id: ContactId) -> Result<Option<Contact>, DealflowError> {
        let row: Option<Wrapper> = sqlx::query_as("SELECT * FROM contacts WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(Wrapper::maybe(row))
    }

    async fn get_all(&self) -> Result<Vec<Contact>, DealflowError> {
        let rows: Vec<Wrapper> = sqlx::query_as("SELECT * FROM contacts ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn update(&self, contact: Contact) -> Result<Contact, DealflowError> {
        sqlx::query(
                "UPDATE contacts SET name = ?, status = ?, deal_value = ?, credit_score = ?, industry = ?, last_activity = ? WHERE id = ?",
            )
            .bind(&contact.name)
            .bind(&contact.status)
            .bind(contact.deal_value)
            .bind(contact.credit_score)
            .bind(&contact.industry)
            .bind(contact.last_activity.to_rfc3339())
            .bind(contact.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(contact)
    }

    async fn delete(&self, id: ContactId) -> Result<(), DealflowError> {
        sqlx::query("DELETE FROM contacts WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(())
    }
}
