use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A whitelisted card as stored in the `cards` table.
///
/// The `uid` column holds the validated 8-character uppercase hexadecimal
/// identifier exactly as the reader emits it, so lookups are a single
/// primary-key probe with no normalization at query time.
///
/// # Examples
///
/// ```
/// use vport_storage::models::Card;
/// use chrono::Utc;
///
/// let card = Card {
///     uid: "04A1B2C3".to_string(),
///     name: Some("front door fob".to_string()),
///     level: "user".to_string(),
///     enabled: true,
///     created_at: Utc::now(),
/// };
///
/// assert!(card.enabled);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Card {
    /// 8-character uppercase hexadecimal card identifier (primary key)
    pub uid: String,

    /// Human-readable label for the card holder
    pub name: Option<String>,

    /// Access level granted to the holder (e.g. "user", "admin")
    pub level: String,

    /// Whether the card is currently accepted
    ///
    /// Disabled cards keep their record but fail authorization.
    pub enabled: bool,

    /// Record creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Card {
    /// Display label, falling back to the uid when no name was recorded.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.uid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Card {
        Card {
            uid: "04A1B2C3".to_string(),
            name: Some("kitchen fob".to_string()),
            level: "admin".to_string(),
            enabled: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn display_name_prefers_label() {
        assert_eq!(sample().display_name(), "kitchen fob");
    }

    #[test]
    fn display_name_falls_back_to_uid() {
        let mut card = sample();
        card.name = None;
        assert_eq!(card.display_name(), "04A1B2C3");
    }
}
