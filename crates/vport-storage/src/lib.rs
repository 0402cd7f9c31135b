//! SQLite-backed card whitelist storage.
//!
//! This crate owns the `cards` table: the set of identifiers the door
//! accepts, with a label, an access level, and an enabled flag per card.
//! It exposes the pool wrapper ([`Database`]), the repository
//! ([`SqliteCardRepository`]), and the [`StorageGate`] adapter that plugs
//! the whitelist into the reader loop as its access gate.
//!
//! # Examples
//!
//! ```no_run
//! use vport_storage::{Database, DatabaseConfig, SqliteCardRepository, StorageGate};
//! use vport_storage::repositories::CardRepository;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::new(DatabaseConfig::new("vport.db")).await?;
//! let cards = SqliteCardRepository::new(db.pool().clone());
//!
//! cards.upsert("04A1B2C3", Some("front door fob"), "user").await?;
//! assert!(cards.is_allowed("04A1B2C3").await?);
//!
//! let gate = StorageGate::new(cards);
//! # let _ = gate;
//! # Ok(())
//! # }
//! ```

pub mod connection;
pub mod error;
pub mod gate;
pub mod models;
pub mod repositories;

pub use connection::{Database, DatabaseConfig};
pub use error::{StorageError, StorageResult};
pub use gate::StorageGate;
pub use models::Card;
pub use repositories::{CardRepository, SqliteCardRepository};
