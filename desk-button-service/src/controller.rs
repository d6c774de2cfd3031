//! Per-tick button pipeline

use crate::config::{Config, ConfigError};
use crate::debounce::Debouncer;
use crate::dispatch::{Dispatcher, GestureReporter, NoopReporter};
use crate::fmt::info;
use crate::gesture::{GestureKind, GestureRecognizer};
use crate::sample::InputSource;

/// Owns the input source, the pipeline state and the reporter.
///
/// [`Controller::tick`] must be called at the configured sample rate for the
/// thresholds to match their real-time durations.
pub struct Controller<S, R = NoopReporter> {
    config: Config,
    source: S,
    debouncer: Debouncer,
    recognizer: GestureRecognizer,
    dispatcher: Dispatcher<R>,
}

impl<S: InputSource> Controller<S> {
    /// Creates a new controller reporting to a [`NoopReporter`] until [`Controller::with_reporter`] is used.
    pub fn new(config: Config, source: S) -> Result<Self, ConfigError> {
        config.validate()?;
        info!(
            "button controller at {} Hz, debounce {}, save hold {}, double click {}",
            config.sample_rate_hz,
            config.debounce_threshold,
            config.save_hold_threshold,
            config.double_click_window,
        );

        Ok(Self {
            config,
            source,
            debouncer: Debouncer::new(config.debounce_threshold),
            recognizer: GestureRecognizer::new(config.save_hold_threshold, config.double_click_window),
            dispatcher: Dispatcher::new(NoopReporter),
        })
    }
}

impl<S: InputSource, R: GestureReporter> Controller<S, R> {
    /// Attaches the gesture consumer.
    pub fn with_reporter<T: GestureReporter>(self, reporter: T) -> Controller<S, T> {
        Controller {
            config: self.config,
            source: self.source,
            debouncer: self.debouncer,
            recognizer: self.recognizer,
            dispatcher: self.dispatcher.with_reporter(reporter),
        }
    }

    /// Samples the lines once and runs the pipeline.
    pub fn tick(&mut self) {
        let raw = self.source.sample();
        if !self.debouncer.confirm(raw) {
            return;
        }

        let gesture = self.recognizer.step(self.debouncer.stable());
        self.dispatcher.report(gesture);
    }

    /// Returns the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Last reported gesture.
    pub fn gesture(&self) -> GestureKind {
        self.dispatcher.last_reported()
    }

    /// Returns the debouncer.
    pub fn debouncer(&self) -> &Debouncer {
        &self.debouncer
    }

    /// Returns the gesture recognizer.
    pub fn recognizer(&self) -> &GestureRecognizer {
        &self.recognizer
    }

    /// Returns the input source.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Returns the reporter.
    pub fn reporter_mut(&mut self) -> &mut R {
        self.dispatcher.reporter_mut()
    }
}
