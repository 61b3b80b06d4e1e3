//! # Simulated Board
//!
//! A deterministic [`Platform`] implementation: a virtual tick clock, a
//! pin-level store, and a button press script. The same kernel binary
//! logic that would drive real GPIO runs here tick for tick, which is how
//! the scheduling contract (preemption latency, starvation bounds, blink
//! cadence) is verified without hardware.
//!
//! Time only advances through `wait_for_tick`, so a test controls exactly
//! when each press window opens relative to the scheduler's ticks.

use heapless::Vec;

use crate::error::Error;
use crate::hal::{Direction, Level, PinId, Platform, Pull};
use crate::task::Tick;

/// Highest pin number the simulated package exposes.
const PIN_COUNT: u8 = 32;

/// Maximum scripted press windows.
const SCRIPT_CAPACITY: usize = 8;

#[derive(Debug, Clone, Copy)]
struct SimPin {
    id: PinId,
    direction: Direction,
    pull: Pull,
    level: Level,
}

#[derive(Debug, Clone, Copy)]
struct PressWindow {
    pin: PinId,
    from: Tick,
    until: Tick,
}

/// A simulated GPIO bank with a scriptable clock and button.
pub struct SimBoard {
    pins: Vec<SimPin, { PIN_COUNT as usize }>,
    windows: Vec<PressWindow, SCRIPT_CAPACITY>,
    periodic: Option<(PinId, Tick, Tick)>,
    tick: Tick,
}

impl SimBoard {
    pub const fn new() -> Self {
        Self {
            pins: Vec::new(),
            windows: Vec::new(),
            periodic: None,
            tick: 0,
        }
    }

    /// Current simulated tick.
    pub fn tick(&self) -> Tick {
        self.tick
    }

    /// Script a button press: the pin reads Low (active-low wiring) from
    /// tick `at` for `hold` ticks.
    pub fn press(&mut self, pin: PinId, at: Tick, hold: Tick) {
        let _ = self.windows.push(PressWindow {
            pin,
            from: at,
            until: at + hold,
        });
    }

    /// Script a recurring press: `hold` ticks Low at the end of every
    /// `every`-tick period, starting with the first period (so the button
    /// idles released at startup).
    pub fn press_every(&mut self, pin: PinId, every: Tick, hold: Tick) {
        self.periodic = Some((pin, every, hold));
    }

    fn pressed(&self, pin: PinId) -> bool {
        let scripted = self
            .windows
            .iter()
            .any(|w| w.pin == pin && w.from <= self.tick && self.tick < w.until);
        let periodic = match self.periodic {
            Some((p, every, hold)) => {
                p == pin && every > 0 && self.tick % every >= every.saturating_sub(hold)
            }
            None => false,
        };
        scripted || periodic
    }

    fn idle_level(pull: Pull) -> Level {
        match pull {
            Pull::Up => Level::High,
            Pull::Down | Pull::None => Level::Low,
        }
    }

    fn find(&mut self, pin: PinId) -> Option<&mut SimPin> {
        self.pins.iter_mut().find(|p| p.id == pin)
    }
}

impl Default for SimBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for SimBoard {
    fn configure_pin(&mut self, pin: PinId, direction: Direction, pull: Pull)
        -> Result<(), Error>
    {
        if pin.0 >= PIN_COUNT {
            return Err(Error::InvalidPin(pin));
        }
        if direction == Direction::Output && pull != Pull::None {
            return Err(Error::InvalidPull);
        }

        let level = match direction {
            Direction::Output => Level::Low,
            Direction::Input => Self::idle_level(pull),
        };
        let configured = SimPin {
            id: pin,
            direction,
            pull,
            level,
        };
        match self.pins.iter().position(|p| p.id == pin) {
            Some(i) => self.pins[i] = configured,
            // Capacity equals the pin count, so a valid id always fits.
            None => {
                let _ = self.pins.push(configured);
            }
        }
        Ok(())
    }

    fn set_pin(&mut self, pin: PinId, level: Level) {
        if let Some(p) = self.find(pin) {
            if p.direction == Direction::Output {
                p.level = level;
            }
        }
    }

    fn read_pin(&mut self, pin: PinId) -> Level {
        let tick_pressed = self.pressed(pin);
        match self.find(pin) {
            Some(p) if p.direction == Direction::Input => {
                if tick_pressed {
                    Level::Low
                } else {
                    Self::idle_level(p.pull)
                }
            }
            Some(p) => p.level,
            None => Level::Low,
        }
    }

    fn wait_for_tick(&mut self) {
        self.tick += 1;
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
