//! Scripted in-memory serial link for testing and development.

use crate::link::SerialLink;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use vport_core::{Error, Result};

#[derive(Debug, Default)]
struct MockState {
    pending: VecDeque<u8>,
    /// One-shot error injected by the handle; consumed by the next read.
    fail_next_read: bool,
}

/// In-memory [`SerialLink`] driven by a [`MockLinkHandle`].
///
/// Bytes fed through the handle become available to the link immediately, so
/// tests can script arbitrary wire traffic, including torn frames and
/// mid-stream read errors, without hardware.
///
/// # Examples
///
/// ```
/// use vport_reader::mock::MockLink;
/// use vport_reader::link::SerialLink;
///
/// let (mut link, handle) = MockLink::new();
/// handle.feed(&[0x02, b'A', 0x03]);
///
/// assert_eq!(link.bytes_available().unwrap(), 3);
/// assert_eq!(link.read_byte().unwrap(), Some(0x02));
/// ```
#[derive(Debug)]
pub struct MockLink {
    state: Arc<Mutex<MockState>>,
}

impl MockLink {
    /// Create a link plus the handle that scripts it.
    pub fn new() -> (Self, MockLinkHandle) {
        let state = Arc::new(Mutex::new(MockState::default()));
        (
            Self {
                state: Arc::clone(&state),
            },
            MockLinkHandle { state },
        )
    }
}

impl SerialLink for MockLink {
    fn bytes_available(&mut self) -> Result<usize> {
        Ok(self.state.lock().expect("mock link poisoned").pending.len())
    }

    fn read_byte(&mut self) -> Result<Option<u8>> {
        let mut state = self.state.lock().expect("mock link poisoned");
        if state.fail_next_read {
            state.fail_next_read = false;
            return Err(Error::Serial("injected read error".to_string()));
        }
        Ok(state.pending.pop_front())
    }
}

/// Control handle for a [`MockLink`].
///
/// Clonable; all clones script the same link.
#[derive(Debug, Clone)]
pub struct MockLinkHandle {
    state: Arc<Mutex<MockState>>,
}

impl MockLinkHandle {
    /// Make these bytes available on the link, in order.
    pub fn feed(&self, bytes: &[u8]) {
        self.state
            .lock()
            .expect("mock link poisoned")
            .pending
            .extend(bytes.iter().copied());
    }

    /// Arrange for the next `read_byte` call to fail once.
    pub fn inject_read_error(&self) {
        self.state.lock().expect("mock link poisoned").fail_next_read = true;
    }

    /// Bytes not yet consumed by the link.
    pub fn pending(&self) -> usize {
        self.state.lock().expect("mock link poisoned").pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feed_then_read_in_order() {
        let (mut link, handle) = MockLink::new();
        handle.feed(&[1, 2, 3]);

        assert_eq!(link.bytes_available().unwrap(), 3);
        assert_eq!(link.read_byte().unwrap(), Some(1));
        assert_eq!(link.read_byte().unwrap(), Some(2));
        assert_eq!(link.read_byte().unwrap(), Some(3));
        assert_eq!(link.read_byte().unwrap(), None);
    }

    #[test]
    fn injected_error_fires_once() {
        let (mut link, handle) = MockLink::new();
        handle.feed(&[7]);
        handle.inject_read_error();

        assert!(link.read_byte().is_err());
        assert_eq!(link.read_byte().unwrap(), Some(7));
    }

    #[test]
    fn handle_clones_share_the_stream() {
        let (mut link, handle) = MockLink::new();
        let other = handle.clone();

        handle.feed(&[1]);
        other.feed(&[2]);

        assert_eq!(link.read_byte().unwrap(), Some(1));
        assert_eq!(link.read_byte().unwrap(), Some(2));
        assert_eq!(handle.pending(), 0);
    }
}
