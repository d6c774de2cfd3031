//! Timing configuration for the button pipeline
//!
//! All thresholds are counted in ticks, never in wall-clock time. The
//! debounce threshold counts raw samples; the save-hold threshold and the
//! double-click window count confirmed ticks, which arrive once every
//! `debounce_threshold` samples while the input is steady.

use core::fmt;

use embassy_time::Duration;

/// Reference sampling rate of the button lines, 250 us per sample.
pub const DEFAULT_SAMPLE_RATE_HZ: u32 = 4000;
/// Reference debounce settle time: 200 samples at 4000 Hz is 50 ms.
pub const DEFAULT_DEBOUNCE_THRESHOLD: u16 = 200;
/// Reference save-hold duration: 60 confirmed ticks at 20 Hz is 3 s.
pub const DEFAULT_SAVE_HOLD_THRESHOLD: u16 = 60;
/// Reference double-click window: 10 confirmed ticks at 20 Hz is 0.5 s.
pub const DEFAULT_DOUBLE_CLICK_WINDOW: u16 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Configuration rejected at construction time.
pub enum ConfigError {
    /// The sampling clock would never fire.
    ZeroSampleRate,
    /// The debouncer would confirm every sample, including glitches.
    ZeroDebounceThreshold,
    /// A save hold would trigger on the first confirmed tick of `Both`.
    ZeroSaveHoldThreshold,
    /// The double-click flags would never expire.
    ZeroDoubleClickWindow,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ConfigError::ZeroSampleRate => "sample rate must be non-zero",
            ConfigError::ZeroDebounceThreshold => "debounce threshold must be non-zero",
            ConfigError::ZeroSaveHoldThreshold => "save-hold threshold must be non-zero",
            ConfigError::ZeroDoubleClickWindow => "double-click window must be non-zero",
        };
        f.write_str(msg)
    }
}

impl core::error::Error for ConfigError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Struct holding the fixed thresholds of the pipeline.
pub struct Config {
    /// Frequency at which the sampling clock invokes the pipeline.
    pub sample_rate_hz: u32,
    /// Consecutive identical samples required to confirm a state.
    pub debounce_threshold: u16,
    /// Consecutive confirmed `Both` ticks required to enter `Save`.
    pub save_hold_threshold: u16,
    /// Confirmed ticks after a release during which a second press counts as a double click.
    pub double_click_window: u16,
}

impl Config {
    /// Reference configuration of the desk controller.
    pub const DEFAULT: Config = Config {
        sample_rate_hz: DEFAULT_SAMPLE_RATE_HZ,
        debounce_threshold: DEFAULT_DEBOUNCE_THRESHOLD,
        save_hold_threshold: DEFAULT_SAVE_HOLD_THRESHOLD,
        double_click_window: DEFAULT_DOUBLE_CLICK_WINDOW,
    };

    /// Creates a new configuration. Call [`Config::validate`] or hand it to a controller to check it.
    pub const fn new(
        sample_rate_hz: u32,
        debounce_threshold: u16,
        save_hold_threshold: u16,
        double_click_window: u16,
    ) -> Self {
        Self {
            sample_rate_hz,
            debounce_threshold,
            save_hold_threshold,
            double_click_window,
        }
    }

    /// Sets the sampling rate.
    pub const fn with_sample_rate_hz(mut self, sample_rate_hz: u32) -> Self {
        self.sample_rate_hz = sample_rate_hz;
        self
    }

    /// Sets the debounce threshold.
    pub const fn with_debounce_threshold(mut self, debounce_threshold: u16) -> Self {
        self.debounce_threshold = debounce_threshold;
        self
    }

    /// Sets the save-hold threshold.
    pub const fn with_save_hold_threshold(mut self, save_hold_threshold: u16) -> Self {
        self.save_hold_threshold = save_hold_threshold;
        self
    }

    /// Sets the double-click window.
    pub const fn with_double_click_window(mut self, double_click_window: u16) -> Self {
        self.double_click_window = double_click_window;
        self
    }

    /// Checks that every threshold is usable.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_rate_hz == 0 {
            Err(ConfigError::ZeroSampleRate)
        } else if self.debounce_threshold == 0 {
            Err(ConfigError::ZeroDebounceThreshold)
        } else if self.save_hold_threshold == 0 {
            Err(ConfigError::ZeroSaveHoldThreshold)
        } else if self.double_click_window == 0 {
            Err(ConfigError::ZeroDoubleClickWindow)
        } else {
            Ok(())
        }
    }

    /// Period of the sampling clock.
    ///
    /// # Panics
    ///
    /// Panics if `sample_rate_hz` is zero. Configurations accepted by
    /// [`Config::validate`] never panic.
    pub fn tick_period(&self) -> Duration {
        Duration::from_hz(self.sample_rate_hz as u64)
    }

    /// Period between confirmed ticks while the input is held steady.
    ///
    /// # Panics
    ///
    /// Panics under the same condition as [`Config::tick_period`].
    pub fn confirm_period(&self) -> Duration {
        self.tick_period() * self.debounce_threshold as u32
    }
}

const _: () = assert!(Config::DEFAULT.validate().is_ok());

impl Default for Config {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_matches_reference_timing() {
        let config = Config::default();

        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.tick_period(), Duration::from_micros(250));
        assert_eq!(config.confirm_period(), Duration::from_millis(50));
    }

    #[test]
    fn zero_thresholds_are_rejected() {
        let config = Config::DEFAULT;

        assert_eq!(
            config.with_sample_rate_hz(0).validate(),
            Err(ConfigError::ZeroSampleRate)
        );
        assert_eq!(
            config.with_debounce_threshold(0).validate(),
            Err(ConfigError::ZeroDebounceThreshold)
        );
        assert_eq!(
            config.with_save_hold_threshold(0).validate(),
            Err(ConfigError::ZeroSaveHoldThreshold)
        );
        assert_eq!(
            config.with_double_click_window(0).validate(),
            Err(ConfigError::ZeroDoubleClickWindow)
        );
    }

    #[test]
    #[should_panic]
    fn tick_period_of_zero_rate_panics() {
        let config = Config::new(0, 1, 1, 1);

        assert_eq!(config.validate(), Err(ConfigError::ZeroSampleRate));
        let _ = config.tick_period();
    }

    #[test]
    fn builder_overrides_single_field() {
        let config = Config::DEFAULT.with_double_click_window(20);

        assert_eq!(config.double_click_window, 20);
        assert_eq!(config.debounce_threshold, DEFAULT_DEBOUNCE_THRESHOLD);
        assert_eq!(config.save_hold_threshold, DEFAULT_SAVE_HOLD_THRESHOLD);
        assert_eq!(config.sample_rate_hz, DEFAULT_SAMPLE_RATE_HZ);
    }
}
