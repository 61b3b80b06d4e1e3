//! # Single-Loop Baseline
//!
//! The non-preemptive reference design: every duty of the system — sensor
//! pulse, heavy computation, actuator pulse, button check — folded into
//! one monolithic polling loop, exactly as a first-cut firmware would
//! write it.
//!
//! The button is checked once per full cycle, so a press during the
//! computation phase sits unobserved until the computation *and* the
//! actuator phase finish: worst-case response latency is the sum of every
//! other phase (about 1.6 s plus the computation here), against the
//! one-tick bound of the preemptive design. The contrast between this
//! loop and [`crate::workloads`] under the same kernel is the whole
//! demonstration.

use crate::config::ms_to_ticks;
use crate::hal::{Level, Platform};
use crate::sync::Shared;
use crate::task::{Suspend, Workload};
use crate::workloads::{BUTTON, LED1, LED2};

/// Compute chunks per cycle — twice the preemptive design's batch, as in
/// the original monolith.
pub const COMPUTE_CHUNKS: u32 = 10;

const CHUNK_ITERATIONS: u32 = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    SensorPulse,
    SensorGap,
    Compute,
    ActuatorPulse,
    ActuatorGap,
    ButtonCheck,
}

/// The monolithic polling loop, expressed as one workload so it runs
/// under the same kernel and clock as the preemptive design.
pub struct SingleLoop {
    phase: Phase,
    chunk: u32,
    scratch: u32,
    cycles: u32,
    observed_presses: u32,
}

impl SingleLoop {
    pub const fn new() -> Self {
        Self {
            phase: Phase::SensorPulse,
            chunk: 0,
            scratch: 0,
            cycles: 0,
            observed_presses: 0,
        }
    }

    /// Full cycles completed so far.
    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    /// Button presses observed at the end-of-cycle check.
    pub fn observed_presses(&self) -> u32 {
        self.observed_presses
    }

    fn crunch(&mut self) {
        for i in 0..CHUNK_ITERATIONS {
            self.scratch = self.scratch.wrapping_add(i.wrapping_mul(i));
        }
    }
}

impl Default for SingleLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Platform> Workload<P> for SingleLoop {
    fn step(&mut self, pins: &Shared<P>) -> Suspend {
        match self.phase {
            Phase::SensorPulse => {
                log::info!(target: "single", "reading sensor");
                pins.with_mut(|b| b.set_pin(LED1, Level::High));
                self.phase = Phase::SensorGap;
                Suspend::Sleep(ms_to_ticks(500))
            }
            Phase::SensorGap => {
                pins.with_mut(|b| b.set_pin(LED1, Level::Low));
                self.phase = Phase::Compute;
                Suspend::Sleep(ms_to_ticks(500))
            }
            Phase::Compute => {
                if self.chunk == 0 {
                    log::info!(target: "single", "processing data");
                }
                self.crunch();
                self.chunk += 1;
                if self.chunk == COMPUTE_CHUNKS {
                    self.chunk = 0;
                    self.phase = Phase::ActuatorPulse;
                }
                Suspend::Yield
            }
            Phase::ActuatorPulse => {
                log::info!(target: "single", "driving actuator");
                pins.with_mut(|b| b.set_pin(LED2, Level::High));
                self.phase = Phase::ActuatorGap;
                Suspend::Sleep(ms_to_ticks(300))
            }
            Phase::ActuatorGap => {
                pins.with_mut(|b| b.set_pin(LED2, Level::Low));
                self.phase = Phase::ButtonCheck;
                Suspend::Sleep(ms_to_ticks(300))
            }
            Phase::ButtonCheck => {
                if pins.with_mut(|b| b.read_pin(BUTTON)).is_low() {
                    log::warn!(target: "single", "button pressed (delayed response)");
                    self.observed_presses += 1;
                }
                self.cycles += 1;
                self.phase = Phase::SensorPulse;
                Suspend::Yield
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::Scheduler;
    use crate::sim::SimBoard;
    use crate::task::Tick;
    use crate::workloads::configure_pins;

    fn shared_board() -> Shared<SimBoard> {
        let mut board = SimBoard::new();
        configure_pins(&mut board).unwrap();
        Shared::new(board)
    }

    /// Drive the loop under the scheduler for one tick.
    fn run_tick(sched: &mut Scheduler, single: &mut SingleLoop, board: &Shared<SimBoard>) {
        sched.begin_tick();
        while let Some(id) = sched.dispatch_next() {
            let directive = single.step(board);
            sched.complete(id, directive);
        }
        sched.end_tick();
        board.with_mut(|b| b.wait_for_tick());
    }

    #[test]
    fn test_phase_directive_sequence() {
        let board = shared_board();
        let mut single = SingleLoop::new();

        assert_eq!(single.step(&board), Suspend::Sleep(ms_to_ticks(500)));
        assert_eq!(board.with_mut(|b| b.read_pin(LED1)), Level::High);
        assert_eq!(single.step(&board), Suspend::Sleep(ms_to_ticks(500)));
        assert_eq!(board.with_mut(|b| b.read_pin(LED1)), Level::Low);
        for _ in 0..COMPUTE_CHUNKS {
            assert_eq!(single.step(&board), Suspend::Yield);
        }
        assert_eq!(single.step(&board), Suspend::Sleep(ms_to_ticks(300)));
        assert_eq!(board.with_mut(|b| b.read_pin(LED2)), Level::High);
        assert_eq!(single.step(&board), Suspend::Sleep(ms_to_ticks(300)));
        assert_eq!(board.with_mut(|b| b.read_pin(LED2)), Level::Low);
        assert_eq!(single.step(&board), Suspend::Yield);
        assert_eq!(single.cycles(), 1);
    }

    #[test]
    fn test_press_during_compute_is_observed_late() {
        let board = shared_board();
        let mut single = SingleLoop::new();
        let mut sched = Scheduler::new();
        sched.register("single", 1).unwrap();

        // Cycle layout in ticks: sensor pulse [0, 50), sensor gap
        // [50, 100), compute [100, 110), actuator pulse and gap
        // [110, 170), button check at 170.
        let press_at: Tick = 101;
        board.with_mut(|b| b.press(BUTTON, press_at, 200));

        let mut response_at: Option<Tick> = None;
        for _ in 0..250 {
            run_tick(&mut sched, &mut single, &board);
            if single.observed_presses() > 0 && response_at.is_none() {
                response_at = Some(sched.tick() - 1);
            }
        }

        let response_at = response_at.expect("press never observed");
        let latency = response_at - press_at;
        // The press sat through the rest of the computation and the whole
        // actuator phase — versus the one-tick bound of the preemptive
        // design.
        assert_eq!(response_at, 170);
        assert!(latency >= 60);
    }

    #[test]
    fn test_press_outside_check_tick_is_missed() {
        let board = shared_board();
        let mut single = SingleLoop::new();
        let mut sched = Scheduler::new();
        sched.register("single", 1).unwrap();

        // Held for 20 ticks early in the cycle, released long before the
        // button check: the monolith never notices.
        board.with_mut(|b| b.press(BUTTON, 10, 20));
        for _ in 0..250 {
            run_tick(&mut sched, &mut single, &board);
        }
        assert!(single.cycles() >= 1);
        assert_eq!(single.observed_presses(), 0);
    }
}
