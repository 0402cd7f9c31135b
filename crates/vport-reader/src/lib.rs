//! Serial card reader front-end.
//!
//! This crate drives a serial-attached card reader: it polls the port,
//! reassembles marker-delimited frames, extracts and validates card
//! identifiers, suppresses repeat reads, and hands accepted presentations
//! to an access gate for authorization.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use vport_reader::{CardReader, NullBuzzer, ReaderConfig, SerialPortLink};
//! # use vport_core::{AccessGate, CardId};
//! # struct Gate;
//! # impl AccessGate for Gate {
//! #     async fn is_authorized(&self, _: &CardId) -> vport_core::Result<bool> { Ok(true) }
//! #     async fn enroll(&self, _: &CardId, _: &str) -> vport_core::Result<()> { Ok(()) }
//! # }
//!
//! #[tokio::main]
//! async fn main() -> vport_core::Result<()> {
//!     let link = SerialPortLink::open("/dev/ttyUSB0", 9600)?;
//!     let reader = CardReader::new(link, Gate, NullBuzzer, ReaderConfig::default());
//!     let handle = reader.start(Arc::new(|card| println!("card {card} accepted")));
//!
//!     tokio::signal::ctrl_c().await?;
//!     handle.stop().await;
//!     Ok(())
//! }
//! ```

pub mod buzzer;
pub mod debounce;
pub mod link;
pub mod mock;
pub mod reader;

pub use buzzer::{AlertPattern, BeepStep, Buzzer, NullBuzzer};
pub use debounce::DebounceFilter;
pub use link::{SerialLink, SerialPortLink};
pub use mock::{MockLink, MockLinkHandle};
pub use reader::{CardCallback, CardReader, ReaderConfig, ReaderHandle};
