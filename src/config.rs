//! # QuantOS Configuration
//!
//! Compile-time constants governing the scheduler and system behavior.
//! All limits are fixed at compile time — no dynamic allocation.

use crate::task::Tick;

/// Maximum number of tasks the system can manage simultaneously.
/// This bounds the fixed-capacity task table; registering past it
/// fails with `Error::CapacityExceeded` before any task runs.
pub const MAX_TASKS: usize = 8;

/// Scheduler tick period in milliseconds. The tick is the minimum time
/// quantum for re-evaluating which task should run, and therefore the
/// worst-case preemption latency: a higher-priority task whose wake
/// condition becomes true reaches the CPU within one tick.
pub const TICK_MS: u32 = 10;

/// Scheduler tick frequency derived from `TICK_MS`.
pub const TICK_HZ: u32 = 1000 / TICK_MS;

/// Convert a millisecond duration to scheduler ticks.
///
/// Rounds up, with a minimum of one tick: a task asking to sleep is
/// ineligible to run until *at least* the requested duration has elapsed.
pub const fn ms_to_ticks(ms: u32) -> Tick {
    let ticks = ms.div_ceil(TICK_MS);
    if ticks == 0 {
        1
    } else {
        ticks as Tick
    }
}

/// Convert a tick count back to milliseconds.
pub const fn ticks_to_ms(ticks: Tick) -> u64 {
    ticks * TICK_MS as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ms_to_ticks_rounds_up() {
        assert_eq!(ms_to_ticks(10), 1);
        assert_eq!(ms_to_ticks(100), 10);
        assert_eq!(ms_to_ticks(15), 2);
        assert_eq!(ms_to_ticks(1), 1);
    }

    #[test]
    fn test_ms_to_ticks_minimum_one() {
        assert_eq!(ms_to_ticks(0), 1);
    }

    #[test]
    fn test_ticks_to_ms() {
        assert_eq!(ticks_to_ms(1), 10);
        assert_eq!(ticks_to_ms(90), 900);
    }

    #[test]
    fn test_tick_rate() {
        assert_eq!(TICK_HZ, 100);
    }
}
