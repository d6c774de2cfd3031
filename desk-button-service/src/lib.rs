//! Debounce and gesture recognition for the two-button control of a motorized desk
//!
//! Each sampling tick runs a strict pipeline: the raw state of the up and down
//! lines is debounced, confirmed states advance a gesture state machine, and
//! gesture changes are reported once to a consumer.

#![no_std]
#![warn(missing_docs)]

mod fmt;

pub mod config;
pub mod controller;
pub mod debounce;
pub mod dispatch;
pub mod gesture;
pub mod sample;
pub mod task;

pub use config::{Config, ConfigError};
pub use controller::Controller;
pub use dispatch::{GestureReporter, NoopReporter};
pub use gesture::GestureKind;
pub use sample::{ActiveState, ButtonPins, InputSource, RawSample};
pub use task::{sample_task, SharedController};
