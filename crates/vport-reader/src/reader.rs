//! Card reader loop and event dispatch.
//!
//! The reader owns a serial link and runs two cooperating tasks:
//!
//! ```text
//! ┌─────────────────────────────┐        ┌──────────────────────────┐
//! │ Poll thread (blocking)      │        │ Dispatch task (async)    │
//! │                             │  mpsc  │                          │
//! │ serial ─► decoder ─► id ─► ─┼───────►│ gate ─► buzzer/callback  │
//! │           debounce          │        │                          │
//! └─────────────────────────────┘        └──────────────────────────┘
//! ```
//!
//! The poll thread does byte-level work only: framing, identifier
//! extraction, and debouncing. Everything that can block on I/O or run
//! arbitrary user code happens on the dispatch side, so a slow gate or
//! callback never stalls the serial port.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use vport_core::constants::{DEFAULT_DEBOUNCE_WINDOW, DEFAULT_POLL_INTERVAL};
use vport_core::{AccessGate, CardId, Error};
use vport_protocol::{FrameDecoder, extract_card_id};

use crate::buzzer::{AlertPattern, Buzzer};
use crate::debounce::DebounceFilter;
use crate::link::SerialLink;

/// Capacity of the channel between the poll thread and the dispatch task.
///
/// Card presentations are human-paced, so a small buffer is plenty; if it
/// ever fills, the poll thread blocks rather than dropping reads.
const EVENT_CHANNEL_CAPACITY: usize = 32;

/// Callback invoked for each presentation the gate lets through.
pub type CardCallback = Arc<dyn Fn(CardId) + Send + Sync>;

/// Reader loop configuration.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Window within which repeat reads of the same identifier are suppressed.
    pub debounce_window: Duration,

    /// Sleep between serial polls when no bytes are pending.
    pub poll_interval: Duration,

    /// Start with learn mode active.
    pub learn_mode: bool,

    /// Label attached to identifiers enrolled via learn mode.
    pub learn_label: String,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            debounce_window: DEFAULT_DEBOUNCE_WINDOW,
            poll_interval: DEFAULT_POLL_INTERVAL,
            learn_mode: false,
            learn_label: "auto-enrolled".to_string(),
        }
    }
}

/// State shared between the reader tasks and the handle.
struct ReaderShared {
    running: AtomicBool,
    learn_mode: AtomicBool,
}

/// A card reader bound to a serial link, an access gate, and a buzzer.
///
/// Created with [`CardReader::new`] and consumed by [`CardReader::start`],
/// which spawns the poll and dispatch tasks and returns a [`ReaderHandle`]
/// for runtime control.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use vport_reader::{CardReader, NullBuzzer, ReaderConfig, SerialPortLink};
/// # use vport_core::{AccessGate, CardId};
/// # #[derive(Clone)] struct Gate;
/// # impl AccessGate for Gate {
/// #     async fn is_authorized(&self, _: &CardId) -> vport_core::Result<bool> { Ok(true) }
/// #     async fn enroll(&self, _: &CardId, _: &str) -> vport_core::Result<()> { Ok(()) }
/// # }
///
/// #[tokio::main]
/// async fn main() -> vport_core::Result<()> {
///     let link = SerialPortLink::open("/dev/ttyUSB0", 9600)?;
///     let reader = CardReader::new(link, Gate, NullBuzzer, ReaderConfig::default());
///
///     let handle = reader.start(Arc::new(|card| {
///         println!("access granted for {card}");
///     }));
///
///     tokio::signal::ctrl_c().await?;
///     handle.stop().await;
///     Ok(())
/// }
/// ```
pub struct CardReader<L, G, B> {
    link: L,
    gate: Arc<G>,
    buzzer: Arc<B>,
    config: ReaderConfig,
}

impl<L, G, B> CardReader<L, G, B>
where
    L: SerialLink + 'static,
    G: AccessGate + 'static,
    B: Buzzer + 'static,
{
    /// Create a reader over the given link, gate, and buzzer.
    pub fn new(link: L, gate: G, buzzer: B, config: ReaderConfig) -> Self {
        Self {
            link,
            gate: Arc::new(gate),
            buzzer: Arc::new(buzzer),
            config,
        }
    }

    /// Spawn the poll and dispatch tasks and return a control handle.
    ///
    /// The poll thread runs on the blocking pool because serial reads are
    /// synchronous; the dispatch task runs on the async runtime. Both stop
    /// when [`ReaderHandle::stop`] is called.
    pub fn start(self, callback: CardCallback) -> ReaderHandle {
        let shared = Arc::new(ReaderShared {
            running: AtomicBool::new(true),
            learn_mode: AtomicBool::new(self.config.learn_mode),
        });

        let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);

        let poll_task = {
            let shared = Arc::clone(&shared);
            let link = self.link;
            let debounce_window = self.config.debounce_window;
            let poll_interval = self.config.poll_interval;
            tokio::task::spawn_blocking(move || {
                poll_loop(link, event_tx, shared, debounce_window, poll_interval);
            })
        };

        let dispatch_task = tokio::spawn(dispatch_loop(
            event_rx,
            Arc::clone(&self.gate),
            Arc::clone(&self.buzzer),
            callback,
            Arc::clone(&shared),
            self.config.learn_label,
        ));

        info!(
            debounce_ms = self.config.debounce_window.as_millis() as u64,
            poll_ms = self.config.poll_interval.as_millis() as u64,
            learn_mode = self.config.learn_mode,
            "card reader started"
        );

        ReaderHandle {
            shared,
            poll_task,
            dispatch_task,
        }
    }
}

/// Handle for controlling a running reader.
///
/// Dropping the handle does not stop the reader; call [`ReaderHandle::stop`]
/// for an orderly shutdown.
pub struct ReaderHandle {
    shared: Arc<ReaderShared>,
    poll_task: JoinHandle<()>,
    dispatch_task: JoinHandle<()>,
}

impl ReaderHandle {
    /// Toggle learn mode at runtime.
    ///
    /// Takes effect for the next presentation; identifiers already in
    /// flight are dispatched under the mode that was active when the gate
    /// consults this flag.
    pub fn set_learn_mode(&self, enabled: bool) {
        self.shared.learn_mode.store(enabled, Ordering::Relaxed);
        info!(enabled, "learn mode changed");
    }

    /// Whether learn mode is currently active.
    pub fn learn_mode(&self) -> bool {
        self.shared.learn_mode.load(Ordering::Relaxed)
    }

    /// Whether the reader loop is still running.
    pub fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::Relaxed)
    }

    /// Stop the reader and wait for both tasks to finish.
    ///
    /// The poll thread notices the flag within one poll interval and drops
    /// its channel sender; the dispatch task then drains remaining events
    /// and exits.
    pub async fn stop(self) {
        self.shared.running.store(false, Ordering::Relaxed);

        if let Err(e) = self.poll_task.await {
            error!(error = %e, "poll thread terminated abnormally");
        }
        if let Err(e) = self.dispatch_task.await {
            error!(error = %e, "dispatch task terminated abnormally");
        }

        info!("card reader stopped");
    }
}

/// Blocking poll loop: drain the serial link, frame, validate, debounce.
fn poll_loop<L: SerialLink>(
    mut link: L,
    event_tx: mpsc::Sender<CardId>,
    shared: Arc<ReaderShared>,
    debounce_window: Duration,
    poll_interval: Duration,
) {
    let mut decoder = FrameDecoder::new();
    let mut debounce = DebounceFilter::new(debounce_window);

    while shared.running.load(Ordering::Relaxed) {
        let pending = match link.bytes_available() {
            Ok(n) => n,
            Err(e) => {
                warn!(error = %e, "serial status check failed");
                std::thread::sleep(poll_interval);
                continue;
            }
        };

        for _ in 0..pending {
            let byte = match link.read_byte() {
                Ok(Some(b)) => b,
                Ok(None) => break,
                Err(e) => {
                    warn!(error = %e, "serial read failed, resynchronizing");
                    decoder.reset();
                    break;
                }
            };

            let Some(frame) = decoder.push(byte) else {
                continue;
            };

            let card = match extract_card_id(&frame) {
                Ok(card) => card,
                Err(Error::InvalidFrameLength { expected, actual }) => {
                    debug!(expected, actual, frame = %frame.hex_dump(), "runt or oversized frame dropped");
                    continue;
                }
                Err(e) => {
                    warn!(error = %e, frame = %frame.hex_dump(), "malformed frame dropped");
                    continue;
                }
            };

            if !debounce.accept(&card, Instant::now()) {
                debug!(card = %card, "repeat read suppressed");
                continue;
            }

            // Channel closes only when the dispatch task is gone, which
            // means shutdown is underway.
            if event_tx.blocking_send(card).is_err() {
                return;
            }
        }

        std::thread::sleep(poll_interval);
    }
}

/// Async dispatch loop: consult the gate, drive feedback, run the callback.
async fn dispatch_loop<G: AccessGate, B: Buzzer + 'static>(
    mut event_rx: mpsc::Receiver<CardId>,
    gate: Arc<G>,
    buzzer: Arc<B>,
    callback: CardCallback,
    shared: Arc<ReaderShared>,
    learn_label: String,
) {
    while let Some(card) = event_rx.recv().await {
        match gate.is_authorized(&card).await {
            Ok(true) => {
                info!(card = %card, "access granted");
                play_detached(&buzzer, AlertPattern::Success);
                invoke_callback(&callback, card);
            }
            Ok(false) if shared.learn_mode.load(Ordering::Relaxed) => {
                // The feedback pattern depends on the enrollment outcome
                // (Notification vs Error), so it plays after the gate answers
                // rather than up front.
                match gate.enroll(&card, &learn_label).await {
                    Ok(()) => {
                        info!(card = %card, label = %learn_label, "identifier enrolled");
                        play_detached(&buzzer, AlertPattern::Notification);
                        invoke_callback(&callback, card);
                    }
                    Err(e) => {
                        error!(card = %card, error = %e, "enrollment failed");
                        play_detached(&buzzer, AlertPattern::Error);
                    }
                }
            }
            Ok(false) => {
                warn!(card = %card, "access denied");
                play_detached(&buzzer, AlertPattern::Error);
            }
            Err(e) => {
                // A gate we cannot reach fails closed.
                error!(card = %card, error = %e, "gate check failed, denying access");
                play_detached(&buzzer, AlertPattern::Error);
            }
        }
    }
}

/// Play a feedback pattern without holding up dispatch.
fn play_detached<B: Buzzer + 'static>(buzzer: &Arc<B>, pattern: AlertPattern) {
    let buzzer = Arc::clone(buzzer);
    tokio::spawn(async move {
        if let Err(e) = buzzer.play(pattern).await {
            warn!(error = %e, ?pattern, "buzzer pattern failed");
        }
    });
}

/// Run the user callback, containing any panic it raises.
fn invoke_callback(callback: &CardCallback, card: CardId) {
    let uid = card.to_string();
    if catch_unwind(AssertUnwindSafe(|| callback(card))).is_err() {
        error!(card = %uid, "card callback panicked");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = ReaderConfig::default();
        assert_eq!(config.debounce_window, DEFAULT_DEBOUNCE_WINDOW);
        assert_eq!(config.poll_interval, DEFAULT_POLL_INTERVAL);
        assert!(!config.learn_mode);
    }

    #[test]
    fn callback_panic_is_contained() {
        let callback: CardCallback = Arc::new(|_| panic!("boom"));
        let card = CardId::parse("04A1B2C3").unwrap();
        // Must not propagate.
        invoke_callback(&callback, card);
    }
}
