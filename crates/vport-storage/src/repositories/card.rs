#![allow(async_fn_in_trait)]

use crate::error::{StorageError, StorageResult};
use crate::models::Card;
use chrono::Utc;
use sqlx::SqlitePool;

/// Repository trait for card whitelist operations
///
/// This trait defines the contract for card data access, enabling
/// testability through mock implementations and separation of concerns.
///
/// # Implementation Note
///
/// This trait uses native async trait methods (Edition 2024 feature),
/// eliminating the need for the async-trait crate while maintaining
/// full async/await support in trait methods.
pub trait CardRepository: Send + Sync {
    /// Find a card by its uid
    async fn find_by_uid(&self, uid: &str) -> StorageResult<Option<Card>>;

    /// Insert a card, or update name/level and re-enable it if it exists
    async fn upsert(&self, uid: &str, name: Option<&str>, level: &str) -> StorageResult<()>;

    /// Delete a card by uid
    async fn delete(&self, uid: &str) -> StorageResult<()>;

    /// Enable or disable a card without deleting its record
    async fn set_enabled(&self, uid: &str, enabled: bool) -> StorageResult<()>;

    /// List all cards, most recent first
    async fn list_all(&self) -> StorageResult<Vec<Card>>;

    /// Whether the uid exists and is enabled
    async fn is_allowed(&self, uid: &str) -> StorageResult<bool>;
}

/// SQLite implementation of CardRepository
#[derive(Debug, Clone)]
pub struct SqliteCardRepository {
    pool: SqlitePool,
}

impl SqliteCardRepository {
    /// Create a new SQLite card repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl CardRepository for SqliteCardRepository {
    async fn find_by_uid(&self, uid: &str) -> StorageResult<Option<Card>> {
        let card = sqlx::query_as::<_, Card>(
            r#"
            SELECT uid, name, level, enabled, created_at
            FROM cards
            WHERE uid = ?
            "#,
        )
        .bind(uid)
        .fetch_optional(&self.pool)
        .await?;

        Ok(card)
    }

    async fn upsert(&self, uid: &str, name: Option<&str>, level: &str) -> StorageResult<()> {
        sqlx::query(
            r#"
            INSERT INTO cards (uid, name, level, enabled, created_at)
            VALUES (?, ?, ?, 1, ?)
            ON CONFLICT(uid) DO UPDATE SET
                name = excluded.name,
                level = excluded.level,
                enabled = 1
            "#,
        )
        .bind(uid)
        .bind(name)
        .bind(level)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, uid: &str) -> StorageResult<()> {
        let result = sqlx::query("DELETE FROM cards WHERE uid = ?")
            .bind(uid)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::CardNotFound(uid.to_string()));
        }

        Ok(())
    }

    async fn set_enabled(&self, uid: &str, enabled: bool) -> StorageResult<()> {
        let result = sqlx::query("UPDATE cards SET enabled = ? WHERE uid = ?")
            .bind(enabled)
            .bind(uid)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::CardNotFound(uid.to_string()));
        }

        Ok(())
    }

    async fn list_all(&self) -> StorageResult<Vec<Card>> {
        let cards = sqlx::query_as::<_, Card>(
            r#"
            SELECT uid, name, level, enabled, created_at
            FROM cards
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(cards)
    }

    async fn is_allowed(&self, uid: &str) -> StorageResult<bool> {
        let enabled: Option<bool> =
            sqlx::query_scalar("SELECT enabled FROM cards WHERE uid = ?")
                .bind(uid)
                .fetch_optional(&self.pool)
                .await?;

        Ok(enabled.unwrap_or(false))
    }
}
