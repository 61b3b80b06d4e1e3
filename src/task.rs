//! # Task Model
//!
//! Defines the task model for QuantOS: the per-task state machine, the
//! suspension directives a task body can return, the [`Workload`] trait
//! that task bodies implement, and the task control block the scheduler
//! keeps for each of them.
//!
//! A task body is a *resumable unit of execution*. Instead of an infinite
//! loop on its own stack, it is an object whose `step()` runs one bounded
//! unit of work — up to the next suspension point — and returns a
//! [`Suspend`] directive saying when it wants the CPU again. Progress
//! between steps lives in the object's own fields, so suspending a task
//! preserves it for resumption by construction.

use core::cmp::Ordering;

use crate::hal::Platform;
use crate::sync::Shared;

/// Scheduler time, counted in ticks since start.
pub type Tick = u64;

/// Task identifier: the task's index in the scheduler's table.
pub type TaskId = usize;

// ---------------------------------------------------------------------------
// Task state machine
// ---------------------------------------------------------------------------

/// Execution state of a task.
///
/// ```text
///              wake_at reached          dispatched
///   ┌──────────┐                ┌─────────┐              ┌─────────┐
///   │ Sleeping │ ─────────────► │  Ready  │ ───────────► │ Running │
///   └──────────┘                └─────────┘              └─────────┘
///        ▲                           ▲                        │
///        │         Suspend::Sleep    │    Suspend::Yield      │
///        └───────────────────────────┼────────────────────────┤
///                                    │                        │
///                                    │     Suspend::Stop      ▼
///                                    │                  ┌─────────┐
///                                    └───────────────── │ Stopped │
///                                        (terminal)     └─────────┘
/// ```
///
/// Tasks are created Sleeping with a wake time of tick 0, so they become
/// Ready at the first tick in registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    /// Not eligible to run until its wake tick arrives.
    Sleeping,
    /// Eligible to run, waiting for the scheduler to select it.
    Ready,
    /// Currently executing on the CPU.
    Running,
    /// Terminal: will never be scheduled again.
    Stopped,
}

// ---------------------------------------------------------------------------
// Suspension directives
// ---------------------------------------------------------------------------

/// What a task body wants to happen after the current unit of work.
///
/// These are the only suspension points in the system; a task that never
/// returns from `step()` would hang the core, exactly as a task that never
/// calls a blocking primitive would on a real kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suspend {
    /// Sleep for at least this many ticks. A request of zero is rounded up
    /// to one tick.
    Sleep(Tick),
    /// Stay Ready but cede the CPU until the next tick, letting equal- and
    /// higher-priority tasks run. Used between chunks of a long
    /// computation.
    Yield,
    /// Enter the terminal Stopped state.
    Stop,
}

// ---------------------------------------------------------------------------
// Workload trait
// ---------------------------------------------------------------------------

/// A repeatable unit of work, stepped by the kernel once per dispatch.
///
/// `step()` must be bounded: it runs to its next suspension point and
/// returns. Pin access goes through the shared guard; a complete pin
/// sequence belongs inside one `with_mut` closure so it cannot interleave
/// with another task's sequence.
pub trait Workload<P: Platform> {
    fn step(&mut self, pins: &Shared<P>) -> Suspend;
}

// ---------------------------------------------------------------------------
// Task control block
// ---------------------------------------------------------------------------

/// Scheduler bookkeeping for one task. The body itself is owned by the
/// kernel, keyed by the same [`TaskId`].
#[derive(Debug, Clone, Copy)]
pub struct Tcb {
    /// Index in the scheduler's task table.
    pub id: TaskId,

    /// Human-readable name, used as the log tag.
    pub name: &'static str,

    /// Static priority. Higher values preempt lower; never adjusted at
    /// runtime.
    pub priority: u8,

    /// Current execution state.
    pub state: TaskState,

    /// Tick at which a Sleeping task becomes Ready.
    pub wake_at: Tick,

    /// Monotonic sequence number stamped each time the task enters Ready.
    /// Breaks priority ties FIFO by ready-time.
    pub ready_seq: u64,

    /// Whether this task has already been dispatched during the current
    /// tick. Cleared at every tick boundary.
    pub dispatched: bool,

    /// Total number of dispatches.
    pub runs: u64,

    /// Number of voluntary yields.
    pub yields: u64,
}

impl Tcb {
    /// Create a control block for a freshly registered task: Sleeping,
    /// due at tick 0.
    pub const fn new(id: TaskId, name: &'static str, priority: u8) -> Self {
        Self {
            id,
            name,
            priority,
            state: TaskState::Sleeping,
            wake_at: 0,
            ready_seq: 0,
            dispatched: false,
            runs: 0,
            yields: 0,
        }
    }

    /// Whether the scheduler may select this task during the current tick.
    #[inline]
    pub fn is_dispatchable(&self) -> bool {
        self.state == TaskState::Ready && !self.dispatched
    }
}

/// Dispatch ordering between two tasks contending for the CPU.
///
/// `Ordering::Less` means `a` runs first: higher priority wins, and equal
/// priorities fall back to FIFO by ready-time. This comparator — not an
/// opaque kernel — is the scheduling policy, and it is total for any pair
/// of tasks with distinct ready sequence numbers.
pub fn dispatch_order(a: &Tcb, b: &Tcb) -> Ordering {
    b.priority
        .cmp(&a.priority)
        .then(a.ready_seq.cmp(&b.ready_seq))
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn ready(id: TaskId, priority: u8, ready_seq: u64) -> Tcb {
        let mut tcb = Tcb::new(id, "t", priority);
        tcb.state = TaskState::Ready;
        tcb.ready_seq = ready_seq;
        tcb
    }

    #[test]
    fn test_new_tcb_is_due_immediately() {
        let tcb = Tcb::new(3, "sensor", 2);
        assert_eq!(tcb.state, TaskState::Sleeping);
        assert_eq!(tcb.wake_at, 0);
        assert_eq!(tcb.priority, 2);
        assert!(!tcb.is_dispatchable());
    }

    #[test]
    fn test_higher_priority_dispatches_first() {
        let high = ready(0, 5, 10);
        let low = ready(1, 1, 1);
        assert_eq!(dispatch_order(&high, &low), Ordering::Less);
        assert_eq!(dispatch_order(&low, &high), Ordering::Greater);
    }

    #[test]
    fn test_ties_break_fifo_by_ready_time() {
        let first = ready(0, 2, 7);
        let second = ready(1, 2, 8);
        assert_eq!(dispatch_order(&first, &second), Ordering::Less);
        assert_eq!(dispatch_order(&second, &first), Ordering::Greater);
    }

    #[test]
    fn test_dispatchable_excludes_already_dispatched() {
        let mut tcb = ready(0, 2, 1);
        assert!(tcb.is_dispatchable());
        tcb.dispatched = true;
        assert!(!tcb.is_dispatchable());
    }

    #[test]
    fn test_dispatchable_excludes_stopped() {
        let mut tcb = ready(0, 2, 1);
        tcb.state = TaskState::Stopped;
        assert!(!tcb.is_dispatchable());
    }
}
