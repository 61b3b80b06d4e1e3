//! # Scheduler
//!
//! The scheduling state machine for QuantOS: a fixed-priority, preemptive
//! policy over a fixed-capacity task table. This module holds no task
//! bodies and touches no hardware — it decides *which* task runs, and the
//! kernel runs it — so every invariant here is testable in isolation.
//!
//! ## Scheduling Algorithm
//!
//! Each tick proceeds in three phases, driven by the kernel:
//!
//! 1. **`begin_tick()`**: every Sleeping task whose wake tick has arrived
//!    becomes Ready (stamped with a fresh ready sequence number), and the
//!    per-tick dispatch flags are cleared.
//! 2. **`dispatch_next()` / `complete()`**, repeated: the highest-priority
//!    undispatched Ready task (FIFO by ready-time on ties) becomes
//!    Running; when its unit of work finishes, its suspension directive
//!    moves it to Sleeping, Ready, or Stopped. Each task is dispatched at
//!    most once per tick.
//! 3. **`end_tick()`**: statistics are folded in and the tick counter
//!    advances.
//!
//! At most one task is ever Running, and it is always the maximum-priority
//! dispatchable task — preemption latency is bounded by one tick because a
//! unit of work is bounded by one tick.

use core::cmp::Ordering;

use heapless::Vec;

use crate::config::MAX_TASKS;
use crate::error::Error;
use crate::task::{dispatch_order, Suspend, TaskId, TaskState, Tcb, Tick};

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

/// Aggregate scheduler statistics.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchedulerStats {
    /// Ticks elapsed since start.
    pub total_ticks: u64,
    /// Total task dispatches across all ticks.
    pub dispatches: u64,
    /// Ticks during which no task was dispatched.
    pub idle_ticks: u64,
}

// ---------------------------------------------------------------------------
// Scheduler
// ---------------------------------------------------------------------------

/// Fixed-priority preemptive scheduler state.
pub struct Scheduler {
    /// Task control blocks, indexed by [`TaskId`].
    tasks: Vec<Tcb, MAX_TASKS>,

    /// The task currently Running, if any.
    current: Option<TaskId>,

    /// Current tick number. Tick `n` covers the interval
    /// `[n * TICK_MS, (n + 1) * TICK_MS)`.
    tick: Tick,

    /// Monotonic counter for ready-time stamps.
    next_ready_seq: u64,

    /// Dispatches performed during the current tick.
    dispatched_this_tick: u32,

    /// Aggregate statistics.
    stats: SchedulerStats,
}

impl Scheduler {
    pub const fn new() -> Self {
        Self {
            tasks: Vec::new(),
            current: None,
            tick: 0,
            next_ready_seq: 0,
            dispatched_this_tick: 0,
            stats: SchedulerStats {
                total_ticks: 0,
                dispatches: 0,
                idle_ticks: 0,
            },
        }
    }

    /// Register a new task.
    ///
    /// The task starts Sleeping with a wake time of tick 0, so it becomes
    /// Ready at the first tick boundary, in registration order.
    ///
    /// # Returns
    /// - `Ok(task_id)` — the task's index in the table
    /// - `Err(Error::CapacityExceeded)` — the table is full
    pub fn register(&mut self, name: &'static str, priority: u8) -> Result<TaskId, Error> {
        let id = self.tasks.len();
        self.tasks
            .push(Tcb::new(id, name, priority))
            .map_err(|_| Error::CapacityExceeded)?;
        Ok(id)
    }

    /// Start a new tick: wake due sleepers and reset per-tick flags.
    pub fn begin_tick(&mut self) {
        self.dispatched_this_tick = 0;
        for tcb in self.tasks.iter_mut() {
            tcb.dispatched = false;
            if tcb.state == TaskState::Sleeping && tcb.wake_at <= self.tick {
                self.next_ready_seq += 1;
                tcb.state = TaskState::Ready;
                tcb.ready_seq = self.next_ready_seq;
            }
        }
    }

    /// Select the next task to run during this tick.
    ///
    /// Picks the minimum of [`dispatch_order`] over all dispatchable tasks:
    /// highest priority first, FIFO by ready-time on ties. Marks it Running.
    /// Returns `None` when every Ready task has had its step this tick —
    /// the CPU is idle for the remainder of the quantum.
    pub fn dispatch_next(&mut self) -> Option<TaskId> {
        debug_assert!(self.current.is_none(), "previous dispatch not completed");

        let mut best: Option<usize> = None;
        for (i, tcb) in self.tasks.iter().enumerate() {
            if !tcb.is_dispatchable() {
                continue;
            }
            match best {
                None => best = Some(i),
                Some(b) => {
                    if dispatch_order(tcb, &self.tasks[b]) == Ordering::Less {
                        best = Some(i);
                    }
                }
            }
        }

        let id = best?;
        let tcb = &mut self.tasks[id];
        tcb.state = TaskState::Running;
        tcb.dispatched = true;
        tcb.runs += 1;
        self.dispatched_this_tick += 1;
        self.stats.dispatches += 1;
        self.current = Some(id);
        Some(id)
    }

    /// Apply a finished unit of work's suspension directive.
    pub fn complete(&mut self, id: TaskId, directive: Suspend) {
        debug_assert_eq!(self.current, Some(id), "completing a task that is not running");
        self.current = None;

        self.next_ready_seq += 1;
        let seq = self.next_ready_seq;
        let tick = self.tick;

        let tcb = &mut self.tasks[id];
        debug_assert_eq!(tcb.state, TaskState::Running);
        match directive {
            Suspend::Sleep(ticks) => {
                tcb.state = TaskState::Sleeping;
                tcb.wake_at = tick + if ticks == 0 { 1 } else { ticks };
            }
            Suspend::Yield => {
                tcb.state = TaskState::Ready;
                tcb.ready_seq = seq;
                tcb.yields += 1;
            }
            Suspend::Stop => {
                tcb.state = TaskState::Stopped;
            }
        }
    }

    /// Close out the current tick and advance the clock.
    pub fn end_tick(&mut self) {
        if self.dispatched_this_tick == 0 {
            self.stats.idle_ticks += 1;
        }
        self.stats.total_ticks += 1;
        self.tick += 1;
    }

    /// Current tick number.
    pub fn tick(&self) -> Tick {
        self.tick
    }

    /// The task currently Running, if any.
    pub fn current(&self) -> Option<TaskId> {
        self.current
    }

    /// Aggregate statistics.
    pub fn stats(&self) -> &SchedulerStats {
        &self.stats
    }

    /// All task control blocks, indexed by [`TaskId`].
    pub fn tasks(&self) -> &[Tcb] {
        &self.tasks
    }

    /// Control block for one task.
    pub fn task(&self, id: TaskId) -> &Tcb {
        &self.tasks[id]
    }

    /// True once every registered task has reached the Stopped state.
    pub fn all_stopped(&self) -> bool {
        !self.tasks.is_empty() && self.tasks.iter().all(|t| t.state == TaskState::Stopped)
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
