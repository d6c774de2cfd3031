//! Gesture recognition over debounced button states

use crate::fmt::debug;
use crate::sample::{InputShape, RawSample};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Enum representing the gestures recognized from the two buttons.
///
/// This is also the state of the recognizer.
pub enum GestureKind {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Up button pressed.
    Up,
    /// Down button pressed.
    Down,
    /// Up button pressed a second time within the double-click window.
    DoubleUp,
    /// Down button pressed a second time within the double-click window.
    DoubleDown,
    /// Both buttons held for the save-hold duration.
    Save,
}

#[derive(Debug, Clone)]
/// State machine turning confirmed button states into gestures.
///
/// Must only be stepped on confirmed ticks: the save-hold counter and the
/// double-click timer both count confirmed ticks.
pub struct GestureRecognizer {
    current: GestureKind,
    save_hold_count: u16,
    double_click_timer: u16,
    awaiting_second_up: bool,
    awaiting_second_down: bool,
    save_hold_threshold: u16,
    double_click_window: u16,
}

impl GestureRecognizer {
    /// Creates a new recognizer in `Idle`.
    pub const fn new(save_hold_threshold: u16, double_click_window: u16) -> Self {
        Self {
            current: GestureKind::Idle,
            save_hold_count: 0,
            double_click_timer: 0,
            awaiting_second_up: false,
            awaiting_second_down: false,
            save_hold_threshold,
            double_click_window,
        }
    }

    /// Advances the state machine with one confirmed sample and returns the current gesture.
    pub fn step(&mut self, stable: RawSample) -> GestureKind {
        if self.double_click_timer > 0 {
            self.double_click_timer -= 1;
            if self.double_click_timer == 0 {
                self.awaiting_second_up = false;
                self.awaiting_second_down = false;
            }
        }

        let shape = stable.shape();
        let next = match self.current {
            GestureKind::Idle => self.step_idle(shape),
            GestureKind::Save => match shape {
                InputShape::Both => GestureKind::Save,
                _ => GestureKind::Idle,
            },
            GestureKind::Up => match shape {
                InputShape::UpOnly => GestureKind::Up,
                InputShape::DownOnly => GestureKind::Down,
                InputShape::Neither => {
                    self.awaiting_second_up = true;
                    self.double_click_timer = self.double_click_window;
                    GestureKind::Idle
                }
                InputShape::Both => GestureKind::Idle,
            },
            GestureKind::Down => match shape {
                InputShape::DownOnly => GestureKind::Down,
                InputShape::UpOnly => GestureKind::Up,
                InputShape::Neither => {
                    self.awaiting_second_down = true;
                    self.double_click_timer = self.double_click_window;
                    GestureKind::Idle
                }
                InputShape::Both => GestureKind::Idle,
            },
            // Sticky until fully released
            GestureKind::DoubleUp | GestureKind::DoubleDown => match shape {
                InputShape::Neither => GestureKind::Idle,
                _ => self.current,
            },
        };

        if next != self.current {
            debug!("gesture {:?} -> {:?} on {:?}", self.current, next, shape);
            self.current = next;
        }

        self.current
    }

    fn step_idle(&mut self, shape: InputShape) -> GestureKind {
        if shape != InputShape::Both {
            self.save_hold_count = 0;
        }

        match shape {
            InputShape::UpOnly if self.awaiting_second_up => {
                self.awaiting_second_up = false;
                self.double_click_timer = 0;
                GestureKind::DoubleUp
            }
            InputShape::UpOnly => GestureKind::Up,
            InputShape::DownOnly if self.awaiting_second_down => {
                self.awaiting_second_down = false;
                self.double_click_timer = 0;
                GestureKind::DoubleDown
            }
            InputShape::DownOnly => GestureKind::Down,
            InputShape::Both => {
                self.save_hold_count = self.save_hold_count.saturating_add(1);
                if self.save_hold_count >= self.save_hold_threshold {
                    self.save_hold_count = 0;
                    GestureKind::Save
                } else {
                    GestureKind::Idle
                }
            }
            InputShape::Neither => GestureKind::Idle,
        }
    }

    /// Current gesture, which is also the state of the machine.
    pub fn current(&self) -> GestureKind {
        self.current
    }

    /// Consecutive confirmed `Both` ticks seen from `Idle`.
    pub fn save_hold_count(&self) -> u16 {
        self.save_hold_count
    }

    /// Confirmed ticks left in the double-click window.
    pub fn double_click_timer(&self) -> u16 {
        self.double_click_timer
    }

    /// A second up press would be a double click.
    pub fn awaiting_second_up(&self) -> bool {
        self.awaiting_second_up
    }

    /// A second down press would be a double click.
    pub fn awaiting_second_down(&self) -> bool {
        self.awaiting_second_down
    }
}
