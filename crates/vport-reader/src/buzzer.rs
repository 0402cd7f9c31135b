//! Audible feedback abstraction.
//!
//! The reader signals outcomes with short beep patterns. Patterns are data
//! ([`AlertPattern`] expands to [`BeepStep`] sequences); producing the actual
//! sound is behind the [`Buzzer`] trait so the GPIO-driven implementation on
//! the door unit and the logging stand-in used elsewhere are interchangeable.
//!
//! Alerts are always dispatched fire-and-forget by the reader: a slow buzzer
//! must never delay the next byte read.

use std::future::Future;
use vport_core::Result;

/// One burst of beeps: `repeats` beeps of `duration_ms` each, separated by
/// `gap_ms` of silence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BeepStep {
    pub duration_ms: u64,
    pub repeats: u32,
    pub gap_ms: u64,
}

const fn step(duration_ms: u64, repeats: u32, gap_ms: u64) -> BeepStep {
    BeepStep {
        duration_ms,
        repeats,
        gap_ms,
    }
}

/// Named alert patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum AlertPattern {
    /// One short beep: card accepted.
    Success,
    /// Three long beeps: card rejected.
    Error,
    /// Two medium beeps.
    Warning,
    /// Quick double beep: informational (e.g. learn-mode enrollment).
    Notification,
    /// Beep, pause, beep: reader came up.
    Startup,
}

const SUCCESS_STEPS: [BeepStep; 1] = [step(100, 1, 0)];
const ERROR_STEPS: [BeepStep; 1] = [step(300, 3, 50)];
const WARNING_STEPS: [BeepStep; 1] = [step(200, 2, 100)];
const NOTIFICATION_STEPS: [BeepStep; 1] = [step(50, 2, 20)];
const STARTUP_STEPS: [BeepStep; 2] = [step(100, 1, 50), step(100, 1, 0)];

impl AlertPattern {
    /// The beep sequence this pattern expands to.
    pub fn steps(&self) -> &'static [BeepStep] {
        match self {
            Self::Success => &SUCCESS_STEPS,
            Self::Error => &ERROR_STEPS,
            Self::Warning => &WARNING_STEPS,
            Self::Notification => &NOTIFICATION_STEPS,
            Self::Startup => &STARTUP_STEPS,
        }
    }
}

/// A device that can play alert patterns.
///
/// Methods return `impl Future + Send` rather than plain `async fn` so the
/// reader can play alerts from spawned tasks through a generic parameter.
pub trait Buzzer: Send + Sync {
    /// Play the pattern to completion.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying device fails; the reader logs the
    /// failure and moves on.
    fn play(&self, pattern: AlertPattern) -> impl Future<Output = Result<()>> + Send;
}

/// Buzzer that does nothing. Useful when the host has no sounder.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullBuzzer;

impl Buzzer for NullBuzzer {
    async fn play(&self, _pattern: AlertPattern) -> Result<()> {
        Ok(())
    }
}
