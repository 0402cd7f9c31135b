//! [`AccessGate`] implementation backed by the card whitelist.

use tracing::debug;
use vport_core::{AccessGate, CardId, Result};

use crate::repositories::{CardRepository, SqliteCardRepository};

/// Access gate that answers authorization queries from the `cards` table.
///
/// Enrollment (learn mode) upserts the identifier at the base "user" level
/// with the supplied label.
#[derive(Debug, Clone)]
pub struct StorageGate {
    cards: SqliteCardRepository,
}

impl StorageGate {
    pub fn new(cards: SqliteCardRepository) -> Self {
        Self { cards }
    }

    /// The repository this gate consults.
    pub fn repository(&self) -> &SqliteCardRepository {
        &self.cards
    }
}

impl AccessGate for StorageGate {
    async fn is_authorized(&self, card: &CardId) -> Result<bool> {
        let allowed = self.cards.is_allowed(card.as_str()).await?;
        debug!(card = %card, allowed, "whitelist lookup");
        Ok(allowed)
    }

    async fn enroll(&self, card: &CardId, label: &str) -> Result<()> {
        self.cards.upsert(card.as_str(), Some(label), "user").await?;
        Ok(())
    }
}
