//! Gesture dispatch to the consumer

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::{Sender, TrySendError};

use crate::fmt::{info, warn};
use crate::gesture::GestureKind;

/// Consumer of gesture transitions.
///
/// Called synchronously from the sampling tick, so implementations must be
/// fast and must not block.
pub trait GestureReporter {
    /// Handles a new gesture.
    fn report(&mut self, gesture: GestureKind);
}

#[derive(Debug, Clone, Copy, Default)]
/// Reporter used until a consumer is attached. Discards every gesture.
pub struct NoopReporter;

impl GestureReporter for NoopReporter {
    fn report(&mut self, _gesture: GestureKind) {}
}

impl<F: FnMut(GestureKind)> GestureReporter for F {
    fn report(&mut self, gesture: GestureKind) {
        self(gesture)
    }
}

impl<M: RawMutex, const N: usize> GestureReporter for Sender<'_, M, GestureKind, N> {
    fn report(&mut self, gesture: GestureKind) {
        if let Err(TrySendError::Full(gesture)) = self.try_send(gesture) {
            warn!("gesture channel full, dropping {:?}", gesture);
        }
    }
}

#[derive(Debug, Clone)]
/// Forwards each distinct gesture once.
pub struct Dispatcher<R> {
    last_reported: GestureKind,
    reporter: R,
}

impl<R: GestureReporter> Dispatcher<R> {
    /// Creates a new dispatcher. Nothing has been reported yet, which counts as `Idle`.
    pub const fn new(reporter: R) -> Self {
        Self {
            last_reported: GestureKind::Idle,
            reporter,
        }
    }

    /// Reports `gesture` if it differs from the last one. Returns whether the reporter was invoked.
    pub fn report(&mut self, gesture: GestureKind) -> bool {
        if gesture == self.last_reported {
            return false;
        }

        self.last_reported = gesture;
        info!("reporting gesture {:?}", gesture);
        self.reporter.report(gesture);
        true
    }

    /// Last gesture handed to the reporter.
    pub fn last_reported(&self) -> GestureKind {
        self.last_reported
    }

    /// Returns the reporter.
    pub fn reporter_mut(&mut self) -> &mut R {
        &mut self.reporter
    }

    /// Replaces the reporter, keeping the de-duplication state.
    pub fn with_reporter<T: GestureReporter>(self, reporter: T) -> Dispatcher<T> {
        Dispatcher {
            last_reported: self.last_reported,
            reporter,
        }
    }
}

impl Default for Dispatcher<NoopReporter> {
    fn default() -> Self {
        Self::new(NoopReporter)
    }
}
