//! # Platform Boundary
//!
//! The contract between the kernel and the board it runs on. GPIO drivers,
//! interrupt controllers, and board bring-up live behind this trait; the
//! kernel and the workloads only ever see numbered pins, logic levels, and
//! a tick source.
//!
//! Two implementations ship with the crate:
//!
//! - [`crate::gpio::PinBoard`] — real hardware, generic over
//!   `embedded-hal` digital pins and a delay provider
//! - [`crate::sim::SimBoard`] — a deterministic simulation with a virtual
//!   clock and scripted button presses, used by the tests and the demo

use crate::error::Error;

/// A GPIO pin number, as printed on the board's schematic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinId(pub u8);

/// Logic level of a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

impl Level {
    #[inline]
    pub fn is_high(self) -> bool {
        self == Level::High
    }

    #[inline]
    pub fn is_low(self) -> bool {
        self == Level::Low
    }
}

/// Signal direction of a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Input,
    Output,
}

/// Internal pull resistor configuration for an input pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pull {
    None,
    Up,
    Down,
}

/// Platform services consumed by the kernel.
///
/// `configure_pin` is the only fallible operation, and it is only called
/// during startup — a configuration error is fatal before any task runs.
/// `set_pin` and `read_pin` are infallible at runtime: repeated reads with
/// no intervening write return the same level.
pub trait Platform {
    /// Configure a pin's direction and pull mode. Called once per pin at
    /// startup, before the scheduler is handed control.
    fn configure_pin(&mut self, pin: PinId, direction: Direction, pull: Pull)
        -> Result<(), Error>;

    /// Drive an output pin to the given level. Writes to unconfigured or
    /// input pins are ignored.
    fn set_pin(&mut self, pin: PinId, level: Level);

    /// Sample the current level of a pin.
    fn read_pin(&mut self, pin: PinId) -> Level;

    /// Block until the next tick boundary. On hardware this is a timer
    /// wait; in simulation it advances the virtual clock by one tick.
    fn wait_for_tick(&mut self);
}
