//! Data access repositories.

mod card;

pub use card::{CardRepository, SqliteCardRepository};
