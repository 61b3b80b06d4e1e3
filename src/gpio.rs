//! # GPIO Adapter
//!
//! Implements the [`Platform`] boundary over `embedded-hal` digital pins:
//! two LED outputs, one button input, and a delay provider for the tick
//! wait. This is the seam to real hardware — any HAL whose pins implement
//! the `embedded-hal` 1.0 digital traits plugs in here unchanged.
//!
//! The wiring is fixed at construction; `configure_pin` validates the
//! startup configuration against it and rejects pins that do not exist or
//! directions and pulls the wiring cannot satisfy.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, PinState, StatefulOutputPin};

use crate::config::TICK_MS;
use crate::error::Error;
use crate::hal::{Direction, Level, PinId, Platform, Pull};

impl From<Level> for PinState {
    fn from(level: Level) -> Self {
        match level {
            Level::Low => PinState::Low,
            Level::High => PinState::High,
        }
    }
}

/// A two-LED, one-button board behind the [`Platform`] boundary.
pub struct PinBoard<L1, L2, B, D> {
    led1: (PinId, L1),
    led2: (PinId, L2),
    button: (PinId, B),
    delay: D,
}

impl<L1, L2, B, D> PinBoard<L1, L2, B, D>
where
    L1: StatefulOutputPin,
    L2: StatefulOutputPin,
    B: InputPin,
    D: DelayNs,
{
    /// Wire up the board. Each pin is tagged with the id workloads will
    /// address it by.
    pub fn new(led1: (PinId, L1), led2: (PinId, L2), button: (PinId, B), delay: D) -> Self {
        Self {
            led1,
            led2,
            button,
            delay,
        }
    }

    fn read_output<P: StatefulOutputPin>(pin: &mut P) -> Level {
        match pin.is_set_high() {
            Ok(true) => Level::High,
            _ => Level::Low,
        }
    }
}

impl<L1, L2, B, D> Platform for PinBoard<L1, L2, B, D>
where
    L1: StatefulOutputPin,
    L2: StatefulOutputPin,
    B: InputPin,
    D: DelayNs,
{
    fn configure_pin(&mut self, pin: PinId, direction: Direction, pull: Pull)
        -> Result<(), Error>
    {
        if pin == self.led1.0 || pin == self.led2.0 {
            if direction != Direction::Output {
                return Err(Error::InvalidPin(pin));
            }
            // Outputs drive the line; a pull resistor has no meaning here.
            if pull != Pull::None {
                return Err(Error::InvalidPull);
            }
            Ok(())
        } else if pin == self.button.0 {
            if direction != Direction::Input {
                return Err(Error::InvalidPin(pin));
            }
            Ok(())
        } else {
            Err(Error::InvalidPin(pin))
        }
    }

    fn set_pin(&mut self, pin: PinId, level: Level) {
        if pin == self.led1.0 {
            let _ = self.led1.1.set_state(level.into());
        } else if pin == self.led2.0 {
            let _ = self.led2.1.set_state(level.into());
        }
    }

    fn read_pin(&mut self, pin: PinId) -> Level {
        if pin == self.button.0 {
            match self.button.1.is_low() {
                Ok(true) => Level::Low,
                // A read failure on a pulled-up button reads as released.
                _ => Level::High,
            }
        } else if pin == self.led1.0 {
            Self::read_output(&mut self.led1.1)
        } else if pin == self.led2.0 {
            Self::read_output(&mut self.led2.1)
        } else {
            Level::Low
        }
    }

    fn wait_for_tick(&mut self) {
        self.delay.delay_ms(TICK_MS);
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::{ErrorType, OutputPin};

    #[derive(Default)]
    struct TestLed {
        high: bool,
    }

    impl ErrorType for TestLed {
        type Error = Infallible;
    }

    impl OutputPin for TestLed {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.high = true;
            Ok(())
        }
    }

    impl StatefulOutputPin for TestLed {
        fn is_set_high(&mut self) -> Result<bool, Infallible> {
            Ok(self.high)
        }

        fn is_set_low(&mut self) -> Result<bool, Infallible> {
            Ok(!self.high)
        }
    }

    struct TestButton {
        high: bool,
    }

    impl ErrorType for TestButton {
        type Error = Infallible;
    }

    impl InputPin for TestButton {
        fn is_high(&mut self) -> Result<bool, Infallible> {
            Ok(self.high)
        }

        fn is_low(&mut self) -> Result<bool, Infallible> {
            Ok(!self.high)
        }
    }

    struct NoDelay;

    impl DelayNs for NoDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    fn board() -> PinBoard<TestLed, TestLed, TestButton, NoDelay> {
        PinBoard::new(
            (PinId(2), TestLed::default()),
            (PinId(4), TestLed::default()),
            (PinId(0), TestButton { high: true }),
            NoDelay,
        )
    }

    #[test]
    fn test_configure_accepts_wired_roles() {
        let mut b = board();
        assert!(b.configure_pin(PinId(2), Direction::Output, Pull::None).is_ok());
        assert!(b.configure_pin(PinId(4), Direction::Output, Pull::None).is_ok());
        assert!(b.configure_pin(PinId(0), Direction::Input, Pull::Up).is_ok());
    }

    #[test]
    fn test_configure_rejects_unknown_pin() {
        let mut b = board();
        assert_eq!(
            b.configure_pin(PinId(13), Direction::Output, Pull::None),
            Err(Error::InvalidPin(PinId(13)))
        );
    }

    #[test]
    fn test_configure_rejects_wrong_direction() {
        let mut b = board();
        assert_eq!(
            b.configure_pin(PinId(2), Direction::Input, Pull::Up),
            Err(Error::InvalidPin(PinId(2)))
        );
        assert_eq!(
            b.configure_pin(PinId(0), Direction::Output, Pull::None),
            Err(Error::InvalidPin(PinId(0)))
        );
    }

    #[test]
    fn test_configure_rejects_pull_on_output() {
        let mut b = board();
        assert_eq!(
            b.configure_pin(PinId(2), Direction::Output, Pull::Up),
            Err(Error::InvalidPull)
        );
    }

    #[test]
    fn test_set_and_read_levels() {
        let mut b = board();
        b.set_pin(PinId(2), Level::High);
        assert_eq!(b.read_pin(PinId(2)), Level::High);
        assert_eq!(b.read_pin(PinId(4)), Level::Low);
        b.set_pin(PinId(2), Level::Low);
        assert_eq!(b.read_pin(PinId(2)), Level::Low);
    }

    #[test]
    fn test_button_reads_through() {
        let mut b = board();
        assert_eq!(b.read_pin(PinId(0)), Level::High);
        b.button.1.high = false;
        assert_eq!(b.read_pin(PinId(0)), Level::Low);
    }

    #[test]
    fn test_write_to_input_is_ignored() {
        let mut b = board();
        b.set_pin(PinId(0), Level::Low);
        assert_eq!(b.read_pin(PinId(0)), Level::High);
    }
}
