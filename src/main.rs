//! # QuantOS Demonstration
//!
//! Runs the four-workload preemptive demonstration on the simulated board,
//! paced at real time: one 10 ms wall-clock tick per scheduler tick, with
//! a scripted button press every five seconds.
//!
//! | Workload     | Priority | Observable behavior |
//! |--------------|----------|---------------------|
//! | `sensor`     | 2        | "reading sensor" once a second |
//! | `processing` | 1        | "processing data" between the others' slots |
//! | `actuator`   | 2        | "driving actuator" once a second |
//! | `emergency`  | 5        | warning plus LED flash within 10 ms of a press |
//!
//! The startup routine configures the pins, registers the workloads, and
//! hands the CPU to the scheduler's run loop, which never returns.

use std::io::Write;
use std::thread;
use std::time::{Duration, Instant};

use quantos::config::TICK_MS;
use quantos::sim::SimBoard;
use quantos::workloads::{
    configure_pins, ActuatorTask, EmergencyTask, ProcessingTask, SensorTask, ACTUATOR_PRIORITY,
    BUTTON, EMERGENCY_PRIORITY, PROCESSING_PRIORITY, SENSOR_PRIORITY,
};
use quantos::{Direction, Error, Kernel, Level, PinId, Platform, Pull};

// ---------------------------------------------------------------------------
// Console logger
// ---------------------------------------------------------------------------

/// Minimal `log` sink: `LEVEL (ms) tag: message` on stdout.
struct ConsoleLogger {
    start: Instant,
}

impl log::Log for ConsoleLogger {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        let elapsed = self.start.elapsed().as_millis();
        let mut out = std::io::stdout().lock();
        let _ = writeln!(
            out,
            "{} ({elapsed}) {}: {}",
            match record.level() {
                log::Level::Error => "E",
                log::Level::Warn => "W",
                log::Level::Info => "I",
                log::Level::Debug => "D",
                log::Level::Trace => "T",
            },
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {}
}

// ---------------------------------------------------------------------------
// Real-time pacing
// ---------------------------------------------------------------------------

/// Wraps the simulated board so each tick takes one real tick period.
struct PacedBoard {
    sim: SimBoard,
}

impl Platform for PacedBoard {
    fn configure_pin(&mut self, pin: PinId, direction: Direction, pull: Pull)
        -> Result<(), Error>
    {
        self.sim.configure_pin(pin, direction, pull)
    }

    fn set_pin(&mut self, pin: PinId, level: Level) {
        self.sim.set_pin(pin, level)
    }

    fn read_pin(&mut self, pin: PinId) -> Level {
        self.sim.read_pin(pin)
    }

    fn wait_for_tick(&mut self) {
        thread::sleep(Duration::from_millis(TICK_MS as u64));
        self.sim.wait_for_tick();
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    let logger: &'static ConsoleLogger = Box::leak(Box::new(ConsoleLogger {
        start: Instant::now(),
    }));
    log::set_logger(logger).expect("logger already installed");
    log::set_max_level(log::LevelFilter::Info);

    let mut board = PacedBoard {
        sim: SimBoard::new(),
    };
    configure_pins(&mut board).expect("pin configuration failed");
    // Press the button for 150 ms every 5 seconds.
    board.sim.press_every(BUTTON, 500, 15);

    let mut sensor = SensorTask::new();
    let mut processing = ProcessingTask::new();
    let mut actuator = ActuatorTask::new();
    let mut emergency = EmergencyTask::new();

    let mut kernel = Kernel::new(board);
    kernel
        .spawn("sensor", SENSOR_PRIORITY, &mut sensor)
        .expect("spawn sensor");
    kernel
        .spawn("processing", PROCESSING_PRIORITY, &mut processing)
        .expect("spawn processing");
    kernel
        .spawn("actuator", ACTUATOR_PRIORITY, &mut actuator)
        .expect("spawn actuator");
    kernel
        .spawn("emergency", EMERGENCY_PRIORITY, &mut emergency)
        .expect("spawn emergency");

    log::info!(target: "demo", "multitasking system started");
    kernel.run()
}
