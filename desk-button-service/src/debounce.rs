//! Debounce Module

use crate::fmt::trace;
use crate::sample::RawSample;

#[derive(Debug, Clone)]
/// Struct representing a debouncer for both button lines.
///
/// A sample is confirmed once it has been seen `threshold` times in a row
/// after the last change. The counter restarts after every confirmation, so a
/// steady input is confirmed again every `threshold` samples. The save-hold
/// gesture relies on this re-confirmation.
pub struct Debouncer {
    count: u16,
    threshold: u16,
    last_sample: RawSample,
}

impl Debouncer {
    /// Creates a new Debouncer instance with the given threshold value. The lines start released.
    pub const fn new(threshold: u16) -> Self {
        Self {
            count: 0,
            threshold,
            last_sample: RawSample::RELEASED,
        }
    }

    /// Feeds one raw sample and returns whether [`Debouncer::stable`] should be delivered this tick.
    pub fn confirm(&mut self, raw: RawSample) -> bool {
        if raw != self.last_sample {
            self.last_sample = raw;
            self.count = 0;
            return false;
        }

        self.count += 1;
        if self.count >= self.threshold {
            self.count = 0;
            trace!("debounce confirmed {:?}", raw);
            true
        } else {
            false
        }
    }

    /// Last sample seen, which is the stable value on confirmed ticks.
    pub fn stable(&self) -> RawSample {
        self.last_sample
    }

    /// Identical samples seen since the last change or confirmation.
    pub fn count(&self) -> u16 {
        self.count
    }

    /// Samples required for a confirmation.
    pub fn threshold(&self) -> u16 {
        self.threshold
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const THRESHOLD: u16 = 5;
    const UP: RawSample = RawSample::new(true, false);
    const DOWN: RawSample = RawSample::new(false, true);

    #[test]
    fn change_restarts_the_count() {
        let mut debouncer = Debouncer::new(THRESHOLD);

        // Bounce between up and released, never stable long enough
        for i in 0..20 {
            let raw = if i % 2 == 0 { UP } else { RawSample::RELEASED };
            assert!(!debouncer.confirm(raw));
            assert_eq!(debouncer.count(), 0);
        }
    }

    #[test]
    fn suppressed_for_threshold_ticks_after_change() {
        let mut debouncer = Debouncer::new(THRESHOLD);

        // The changed sample itself plus THRESHOLD - 1 repeats are suppressed
        assert!(!debouncer.confirm(DOWN));
        for _ in 0..THRESHOLD - 1 {
            assert!(!debouncer.confirm(DOWN));
        }
        assert!(debouncer.confirm(DOWN));
        assert_eq!(debouncer.stable(), DOWN);
    }

    #[test]
    fn steady_input_is_reconfirmed_periodically() {
        let mut debouncer = Debouncer::new(THRESHOLD);
        assert!(!debouncer.confirm(UP));

        let held = 4 * THRESHOLD as usize;
        for tick in 1..=held {
            let confirmed = debouncer.confirm(UP);
            assert_eq!(confirmed, tick % THRESHOLD as usize == 0, "tick {}", tick);
            assert!(debouncer.count() <= debouncer.threshold());
        }
    }

    #[test]
    fn glitch_delays_confirmation() {
        let mut debouncer = Debouncer::new(THRESHOLD);
        assert!(!debouncer.confirm(UP));
        for _ in 0..THRESHOLD - 2 {
            assert!(!debouncer.confirm(UP));
        }

        // One glitchy sample, then the full settle time is needed again
        assert!(!debouncer.confirm(RawSample::RELEASED));
        assert!(!debouncer.confirm(UP));
        for _ in 0..THRESHOLD - 1 {
            assert!(!debouncer.confirm(UP));
        }
        assert!(debouncer.confirm(UP));
    }

    #[test]
    fn released_start_confirms_without_change() {
        let mut debouncer = Debouncer::new(THRESHOLD);

        for _ in 0..THRESHOLD - 1 {
            assert!(!debouncer.confirm(RawSample::RELEASED));
        }
        assert!(debouncer.confirm(RawSample::RELEASED));
    }
}
