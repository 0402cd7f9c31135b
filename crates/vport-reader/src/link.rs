//! Serial link abstraction.
//!
//! The reader loop owns its serial device exclusively for its whole running
//! lifetime and drains it one byte at a time, only when the device reports
//! data ready. The [`SerialLink`] trait captures exactly that surface so the
//! loop can run against real hardware ([`SerialPortLink`]) or a scripted
//! in-memory link ([`mock::MockLink`](crate::mock::MockLink)) in tests.

use std::io::Read;
use std::time::Duration;
use vport_core::{Error, Result};

/// Byte-level serial device as seen by the reader loop.
///
/// Implementations are moved onto the reader's dedicated worker and accessed
/// from there only, hence `Send` without `Sync`.
pub trait SerialLink: Send {
    /// Number of bytes ready to read without blocking.
    ///
    /// # Errors
    ///
    /// Returns an error if the device cannot be queried; the reader loop
    /// logs it and keeps polling.
    fn bytes_available(&mut self) -> Result<usize>;

    /// Read a single byte.
    ///
    /// Returns `Ok(None)` when no byte arrived within the device's own short
    /// read timeout; the loop treats that the same as nothing available.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure; the reader loop logs it and
    /// continues with the next poll.
    fn read_byte(&mut self) -> Result<Option<u8>>;
}

/// Read timeout on the underlying port. Short, since availability is checked
/// before every read; this only bounds the race where bytes vanish between
/// the check and the read.
const PORT_READ_TIMEOUT: Duration = Duration::from_millis(100);

/// [`SerialLink`] backed by a real serial port.
pub struct SerialPortLink {
    port: Box<dyn serialport::SerialPort>,
    name: String,
}

impl SerialPortLink {
    /// Open the named port at the given baud rate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SerialOpen`] if the port cannot be opened. This is
    /// fatal for the reader instance that wanted it; retrying is the hosting
    /// application's decision.
    pub fn open(path: &str, baud_rate: u32) -> Result<Self> {
        let port = serialport::new(path, baud_rate)
            .timeout(PORT_READ_TIMEOUT)
            .open()
            .map_err(|e| Error::SerialOpen {
                port: path.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            port,
            name: path.to_string(),
        })
    }

    /// The port path this link was opened on.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl SerialLink for SerialPortLink {
    fn bytes_available(&mut self) -> Result<usize> {
        self.port
            .bytes_to_read()
            .map(|n| n as usize)
            .map_err(|e| Error::Serial(e.to_string()))
    }

    fn read_byte(&mut self) -> Result<Option<u8>> {
        let mut buf = [0u8; 1];
        match self.port.read(&mut buf) {
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(buf[0])),
            Err(e) if e.kind() == std::io::ErrorKind::TimedOut => Ok(None),
            Err(e) => Err(Error::Serial(e.to_string())),
        }
    }
}
