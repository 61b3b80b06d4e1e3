//! # Demonstration Workloads
//!
//! Four workloads sharing one core, standing in for a small embedded
//! system's sensor, processing, actuator, and safety duties:
//!
//! | Workload     | Priority | Behavior |
//! |--------------|----------|----------|
//! | `sensor`     | 2        | LED1 100 ms on / 900 ms off per reading |
//! | `processing` | 1        | 5 compute chunks, yielding between chunks, then 500 ms off |
//! | `actuator`   | 2        | LED2 200 ms on / 800 ms off per command |
//! | `emergency`  | 5        | polls the button every tick; flashes both LEDs on a press |
//!
//! The emergency watcher outranks everything: a button press reaches it
//! within one tick even while the processing task is mid-batch. The
//! sensor and actuator share a priority, exercising the FIFO tie-break.
//! The processing task is lowest priority and still progresses, because
//! every other task takes at most one step per tick.

use crate::config::ms_to_ticks;
use crate::error::Error;
use crate::hal::{Direction, Level, PinId, Platform, Pull};
use crate::sync::Shared;
use crate::task::{Suspend, Workload};

// ---------------------------------------------------------------------------
// Board wiring
// ---------------------------------------------------------------------------

/// Sensor activity LED.
pub const LED1: PinId = PinId(2);
/// Actuator activity LED.
pub const LED2: PinId = PinId(4);
/// Emergency button, wired active-low with the internal pull-up.
pub const BUTTON: PinId = PinId(0);

pub const SENSOR_PRIORITY: u8 = 2;
pub const PROCESSING_PRIORITY: u8 = 1;
pub const ACTUATOR_PRIORITY: u8 = 2;
pub const EMERGENCY_PRIORITY: u8 = 5;

/// Compute chunks per processing batch. One chunk is one bounded unit of
/// work — at most a tick's worth — so the batch can be preempted at every
/// chunk boundary on any CPU speed.
pub const CHUNKS_PER_BATCH: u32 = 5;

const CHUNK_ITERATIONS: u32 = 4096;

/// Configure the demonstration pin set. Fatal on error, before any task
/// runs.
pub fn configure_pins<P: Platform>(board: &mut P) -> Result<(), Error> {
    board.configure_pin(LED1, Direction::Output, Pull::None)?;
    board.configure_pin(LED2, Direction::Output, Pull::None)?;
    board.configure_pin(BUTTON, Direction::Input, Pull::Up)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Sensor
// ---------------------------------------------------------------------------

/// **Sensor Reading** (priority 2)
///
/// Pulses LED1 for 100 ms once a second, one reading per cycle. Each step
/// flips the LED and sleeps, so a full cycle costs two dispatches.
pub struct SensorTask {
    lit: bool,
    readings: u32,
}

impl SensorTask {
    pub const fn new() -> Self {
        Self {
            lit: false,
            readings: 0,
        }
    }

    /// Completed readings so far.
    pub fn readings(&self) -> u32 {
        self.readings
    }
}

impl Default for SensorTask {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Platform> Workload<P> for SensorTask {
    fn step(&mut self, pins: &Shared<P>) -> Suspend {
        if self.lit {
            pins.with_mut(|b| b.set_pin(LED1, Level::Low));
            self.lit = false;
            Suspend::Sleep(ms_to_ticks(900))
        } else {
            log::info!(target: "sensor", "reading sensor");
            pins.with_mut(|b| b.set_pin(LED1, Level::High));
            self.lit = true;
            self.readings += 1;
            Suspend::Sleep(ms_to_ticks(100))
        }
    }
}

// ---------------------------------------------------------------------------
// Processing
// ---------------------------------------------------------------------------

/// **Data Processing** (priority 1)
///
/// The heavy computation, split into [`CHUNKS_PER_BATCH`] bounded chunks
/// with a voluntary yield between them. Lowest priority: it soaks up
/// whatever CPU the periodic and polling tasks leave behind, and the
/// yields keep its preemption granularity at one chunk.
pub struct ProcessingTask {
    chunk: u32,
    batches: u32,
    scratch: u32,
}

impl ProcessingTask {
    pub const fn new() -> Self {
        Self {
            chunk: 0,
            batches: 0,
            scratch: 0,
        }
    }

    /// Completed batches so far.
    pub fn batches(&self) -> u32 {
        self.batches
    }

    fn crunch(&mut self) {
        for i in 0..CHUNK_ITERATIONS {
            self.scratch = self.scratch.wrapping_add(i.wrapping_mul(i));
        }
    }
}

impl Default for ProcessingTask {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Platform> Workload<P> for ProcessingTask {
    fn step(&mut self, _pins: &Shared<P>) -> Suspend {
        if self.chunk == 0 {
            log::info!(target: "processing", "processing data");
        }
        self.crunch();
        self.chunk += 1;

        if self.chunk < CHUNKS_PER_BATCH {
            Suspend::Yield
        } else {
            self.chunk = 0;
            self.batches += 1;
            Suspend::Sleep(ms_to_ticks(500))
        }
    }
}

// ---------------------------------------------------------------------------
// Actuator
// ---------------------------------------------------------------------------

/// **Actuator Control** (priority 2)
///
/// Pulses LED2 for 200 ms once a second, one command per cycle. Same
/// priority as the sensor — the tie breaks FIFO by ready-time, so the two
/// never reorder spuriously within a tick.
pub struct ActuatorTask {
    driven: bool,
    commands: u32,
}

impl ActuatorTask {
    pub const fn new() -> Self {
        Self {
            driven: false,
            commands: 0,
        }
    }

    /// Completed commands so far.
    pub fn commands(&self) -> u32 {
        self.commands
    }
}

impl Default for ActuatorTask {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Platform> Workload<P> for ActuatorTask {
    fn step(&mut self, pins: &Shared<P>) -> Suspend {
        if self.driven {
            pins.with_mut(|b| b.set_pin(LED2, Level::Low));
            self.driven = false;
            Suspend::Sleep(ms_to_ticks(800))
        } else {
            log::info!(target: "actuator", "driving actuator");
            pins.with_mut(|b| b.set_pin(LED2, Level::High));
            self.driven = true;
            self.commands += 1;
            Suspend::Sleep(ms_to_ticks(200))
        }
    }
}

// ---------------------------------------------------------------------------
// Emergency
// ---------------------------------------------------------------------------

/// **Emergency Response** (priority 5)
///
/// Polls the button every tick and, on a press, raises both LEDs for
/// 100 ms. Highest priority: it preempts whatever is running at the next
/// tick boundary, bounding response latency at one tick — against the
/// seconds a monolithic polling loop would need (see
/// [`crate::baseline::SingleLoop`]).
///
/// Both LED writes happen inside one guard acquisition, so no other
/// task's pin sequence can interleave with the flash.
pub struct EmergencyTask {
    flashing: bool,
    responses: u32,
}

impl EmergencyTask {
    pub const fn new() -> Self {
        Self {
            flashing: false,
            responses: 0,
        }
    }

    /// Presses answered so far.
    pub fn responses(&self) -> u32 {
        self.responses
    }
}

impl Default for EmergencyTask {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Platform> Workload<P> for EmergencyTask {
    fn step(&mut self, pins: &Shared<P>) -> Suspend {
        if self.flashing {
            pins.with_mut(|b| {
                b.set_pin(LED1, Level::Low);
                b.set_pin(LED2, Level::Low);
            });
            self.flashing = false;
            return Suspend::Sleep(1);
        }

        let pressed = pins.with_mut(|b| b.read_pin(BUTTON)).is_low();
        if pressed {
            log::warn!(target: "emergency", "button pressed, responding");
            pins.with_mut(|b| {
                b.set_pin(LED1, Level::High);
                b.set_pin(LED2, Level::High);
            });
            self.flashing = true;
            self.responses += 1;
            Suspend::Sleep(ms_to_ticks(100))
        } else {
            Suspend::Sleep(1)
        }
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimBoard;

    fn shared_board() -> Shared<SimBoard> {
        let mut board = SimBoard::new();
        configure_pins(&mut board).unwrap();
        Shared::new(board)
    }

    #[test]
    fn test_configure_pins_on_sim_board() {
        let mut board = SimBoard::new();
        assert!(configure_pins(&mut board).is_ok());
    }

    #[test]
    fn test_sensor_alternates_pulse_and_gap() {
        let board = shared_board();
        let mut sensor = SensorTask::new();

        assert_eq!(sensor.step(&board), Suspend::Sleep(ms_to_ticks(100)));
        assert_eq!(board.with_mut(|b| b.read_pin(LED1)), Level::High);
        assert_eq!(sensor.step(&board), Suspend::Sleep(ms_to_ticks(900)));
        assert_eq!(board.with_mut(|b| b.read_pin(LED1)), Level::Low);
        assert_eq!(sensor.readings(), 1);
    }

    #[test]
    fn test_processing_yields_between_chunks() {
        let board = shared_board();
        let mut processing = ProcessingTask::new();

        for _ in 0..CHUNKS_PER_BATCH - 1 {
            assert_eq!(processing.step(&board), Suspend::Yield);
        }
        assert_eq!(processing.step(&board), Suspend::Sleep(ms_to_ticks(500)));
        assert_eq!(processing.batches(), 1);
    }

    #[test]
    fn test_actuator_alternates_pulse_and_gap() {
        let board = shared_board();
        let mut actuator = ActuatorTask::new();

        assert_eq!(actuator.step(&board), Suspend::Sleep(ms_to_ticks(200)));
        assert_eq!(board.with_mut(|b| b.read_pin(LED2)), Level::High);
        assert_eq!(actuator.step(&board), Suspend::Sleep(ms_to_ticks(800)));
        assert_eq!(board.with_mut(|b| b.read_pin(LED2)), Level::Low);
        assert_eq!(actuator.commands(), 1);
    }

    #[test]
    fn test_emergency_polls_every_tick_when_idle() {
        let board = shared_board();
        let mut emergency = EmergencyTask::new();

        assert_eq!(emergency.step(&board), Suspend::Sleep(1));
        assert_eq!(emergency.responses(), 0);
    }

    #[test]
    fn test_emergency_flashes_both_leds_on_press() {
        let board = shared_board();
        let mut emergency = EmergencyTask::new();
        board.with_mut(|b| b.press(BUTTON, 0, 1));

        assert_eq!(emergency.step(&board), Suspend::Sleep(ms_to_ticks(100)));
        assert_eq!(board.with_mut(|b| b.read_pin(LED1)), Level::High);
        assert_eq!(board.with_mut(|b| b.read_pin(LED2)), Level::High);
        assert_eq!(emergency.responses(), 1);

        // Next step ends the flash and resumes polling.
        assert_eq!(emergency.step(&board), Suspend::Sleep(1));
        assert_eq!(board.with_mut(|b| b.read_pin(LED1)), Level::Low);
        assert_eq!(board.with_mut(|b| b.read_pin(LED2)), Level::Low);
    }
}
