pub mod constants;
pub mod error;
pub mod gate;
pub mod types;

pub use error::{Error, Result};
pub use gate::AccessGate;
pub use types::CardId;

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
