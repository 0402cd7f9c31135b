//! Database entity models.

mod card;

pub use card::Card;
