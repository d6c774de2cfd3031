//! Raw button samples and the sources producing them

use embedded_hal_1::digital::InputPin;

use crate::fmt::warn;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// One tick's unfiltered reading of the up and down lines. `true` means pressed.
pub struct RawSample {
    /// The up line is pressed.
    pub up_active: bool,
    /// The down line is pressed.
    pub down_active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Mutually exclusive shapes of a sample.
pub enum InputShape {
    /// Only the up line is pressed.
    UpOnly,
    /// Only the down line is pressed.
    DownOnly,
    /// Both lines are pressed.
    Both,
    /// No line is pressed.
    Neither,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Enum representing if the button lines are active low or active high.
pub enum ActiveState {
    /// A low level means pressed.
    #[default]
    ActiveLow,
    /// A high level means pressed.
    ActiveHigh,
}

impl ActiveState {
    /// Translates an electrical level into "pressed".
    pub const fn is_pressed(self, is_high: bool) -> bool {
        match self {
            ActiveState::ActiveLow => !is_high,
            ActiveState::ActiveHigh => is_high,
        }
    }
}

impl RawSample {
    /// Both lines released.
    pub const RELEASED: RawSample = RawSample::new(false, false);

    /// Creates a sample from logical line activity.
    pub const fn new(up_active: bool, down_active: bool) -> Self {
        Self { up_active, down_active }
    }

    /// Creates a sample from electrical line levels.
    pub const fn from_levels(up_high: bool, down_high: bool, active_state: ActiveState) -> Self {
        Self::new(active_state.is_pressed(up_high), active_state.is_pressed(down_high))
    }

    /// Classifies the sample.
    pub const fn shape(&self) -> InputShape {
        match (self.up_active, self.down_active) {
            (true, false) => InputShape::UpOnly,
            (false, true) => InputShape::DownOnly,
            (true, true) => InputShape::Both,
            (false, false) => InputShape::Neither,
        }
    }
}

/// Producer of one raw sample per tick, typically a GPIO read.
pub trait InputSource {
    /// Reads the current state of both lines.
    fn sample(&mut self) -> RawSample;
}

impl<F: FnMut() -> RawSample> InputSource for F {
    fn sample(&mut self) -> RawSample {
        self()
    }
}

#[derive(Debug)]
/// The up and down lines wired to two GPIO inputs.
pub struct ButtonPins<U, D> {
    up: U,
    down: D,
    active_state: ActiveState,
}

impl<U: InputPin, D: InputPin> ButtonPins<U, D> {
    /// Creates a new `ButtonPins` instance with the given GPIO pins and active state.
    pub fn new(up: U, down: D, active_state: ActiveState) -> Self {
        Self { up, down, active_state }
    }

    /// Returns the pins.
    pub fn release(self) -> (U, D) {
        (self.up, self.down)
    }

    fn read_line<P: InputPin>(pin: &mut P, active_state: ActiveState, line: &str) -> bool {
        match pin.is_high() {
            Ok(is_high) => active_state.is_pressed(is_high),
            Err(_) => {
                warn!("{} line read failed, treating as released", line);
                false
            }
        }
    }
}

impl<U: InputPin, D: InputPin> InputSource for ButtonPins<U, D> {
    fn sample(&mut self) -> RawSample {
        let up_active = Self::read_line(&mut self.up, self.active_state, "up");
        let down_active = Self::read_line(&mut self.down, self.active_state, "down");

        RawSample::new(up_active, down_active)
    }
}

#[cfg(test)]
mod test {
    extern crate std;

    use embedded_hal_mock::eh1::digital::{Mock as PinMock, State, Transaction};
    use embedded_hal_mock::eh1::MockError;
    use std::io::ErrorKind;

    use super::*;

    #[test]
    fn shapes_cover_all_combinations() {
        assert_eq!(RawSample::new(true, false).shape(), InputShape::UpOnly);
        assert_eq!(RawSample::new(false, true).shape(), InputShape::DownOnly);
        assert_eq!(RawSample::new(true, true).shape(), InputShape::Both);
        assert_eq!(RawSample::RELEASED.shape(), InputShape::Neither);
    }

    #[test]
    fn active_low_levels_are_inverted() {
        assert_eq!(
            RawSample::from_levels(false, true, ActiveState::ActiveLow),
            RawSample::new(true, false)
        );
        assert_eq!(
            RawSample::from_levels(false, true, ActiveState::ActiveHigh),
            RawSample::new(false, true)
        );
    }

    #[test]
    fn pins_sample_active_low() {
        let up = PinMock::new(&[Transaction::get(State::Low), Transaction::get(State::High)]);
        let down = PinMock::new(&[Transaction::get(State::High), Transaction::get(State::Low)]);
        let mut pins = ButtonPins::new(up, down, ActiveState::default());

        assert_eq!(pins.sample(), RawSample::new(true, false));
        assert_eq!(pins.sample(), RawSample::new(false, true));

        let (mut up, mut down) = pins.release();
        up.done();
        down.done();
    }

    #[test]
    fn pin_error_reads_as_released() {
        let up = PinMock::new(&[Transaction::get(State::Low).with_error(MockError::Io(ErrorKind::Other))]);
        let down = PinMock::new(&[Transaction::get(State::Low)]);
        let mut pins = ButtonPins::new(up, down, ActiveState::ActiveLow);

        assert_eq!(pins.sample(), RawSample::new(false, true));

        let (mut up, mut down) = pins.release();
        up.done();
        down.done();
    }

    #[test]
    fn closures_are_sources() {
        let mut source = || RawSample::new(true, true);

        assert_eq!(source.sample().shape(), InputShape::Both);
    }
}
