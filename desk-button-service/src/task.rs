//! Sampling clock integration
//!
//! Two ways to drive a [`Controller`] at its configured cadence: an async task
//! paced by an embassy [`Ticker`], or a static [`SharedController`] ticked
//! from a periodic timer interrupt.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_time::Ticker;

use crate::controller::Controller;
use crate::dispatch::{GestureReporter, NoopReporter};
use crate::fmt::info;
use crate::gesture::GestureKind;
use crate::sample::InputSource;

/// Runs the pipeline once per sampling period, forever.
pub async fn sample_task<S: InputSource, R: GestureReporter>(controller: &mut Controller<S, R>) -> ! {
    let period = controller.config().tick_period();
    info!("sampling buttons every {} us", period.as_micros());

    let mut ticker = Ticker::every(period);
    loop {
        ticker.next().await;
        controller.tick();
    }
}

/// Controller slot that can live in a `static` and be ticked from interrupt context.
pub struct SharedController<S, R = NoopReporter> {
    inner: Mutex<CriticalSectionRawMutex, RefCell<Option<Controller<S, R>>>>,
}

impl<S, R> SharedController<S, R> {
    /// Creates an empty slot. Ticks are ignored until [`SharedController::init`].
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(None)),
        }
    }
}

impl<S: InputSource, R: GestureReporter> SharedController<S, R> {
    /// Installs the controller, replacing any previous one.
    pub fn init(&self, controller: Controller<S, R>) {
        self.inner.lock(|slot| {
            slot.replace(Some(controller));
        });
    }

    /// Runs one pipeline tick. Call this from the sampling timer interrupt.
    pub fn tick(&self) {
        self.inner.lock(|slot| {
            if let Some(controller) = slot.borrow_mut().as_mut() {
                controller.tick();
            }
        });
    }

    /// Last reported gesture, if initialized.
    pub fn gesture(&self) -> Option<GestureKind> {
        self.inner.lock(|slot| slot.borrow().as_ref().map(Controller::gesture))
    }
}

impl<S, R> Default for SharedController<S, R> {
    fn default() -> Self {
        Self::new()
    }
}
