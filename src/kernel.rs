//! # Kernel
//!
//! Top-level API for QuantOS. The kernel owns the scheduler, the workload
//! bodies, and the shared board handle, and drives them tick by tick.
//!
//! ## Startup Sequence
//!
//! ```text
//! main()
//!   ├─► board.configure_pin(..)?   ← Validate pins (×N, fatal on error)
//!   ├─► Kernel::new(board)
//!   ├─► kernel.spawn(..)?          ← Register workloads (×N)
//!   └─► kernel.run()               ← Hand over the CPU (no return)
//!         └─► loop { run_tick() }
//! ```
//!
//! The kernel is an ordinary value, not a global: tests build one per
//! scenario, drive it for an exact number of ticks with [`Kernel::run_for`],
//! and inspect the scheduler and board afterwards.

use heapless::Vec;

use crate::config::MAX_TASKS;
use crate::error::Error;
use crate::hal::Platform;
use crate::scheduler::Scheduler;
use crate::sync::Shared;
use crate::task::{TaskId, Workload};

/// The kernel: scheduler, task bodies, and the board they share.
///
/// Workload bodies are borrowed for the kernel's lifetime rather than
/// owned, keeping the whole system heap-free; after the kernel is dropped
/// the caller can read results back out of its workload objects.
pub struct Kernel<'a, P: Platform> {
    sched: Scheduler,
    bodies: Vec<&'a mut dyn Workload<P>, MAX_TASKS>,
    board: Shared<P>,
}

impl<'a, P: Platform> Kernel<'a, P> {
    /// Wrap a configured board. Pin configuration happens before this —
    /// see the startup sequence above.
    pub fn new(board: P) -> Self {
        Self {
            sched: Scheduler::new(),
            bodies: Vec::new(),
            board: Shared::new(board),
        }
    }

    /// Register a workload under the given name and priority.
    ///
    /// Higher priority values preempt lower ones. The task becomes Ready
    /// at the first tick boundary after `run` begins.
    ///
    /// # Returns
    /// - `Ok(task_id)` — the task's index in the scheduler table
    /// - `Err(Error::CapacityExceeded)` — the task table is full
    pub fn spawn(
        &mut self,
        name: &'static str,
        priority: u8,
        body: &'a mut dyn Workload<P>,
    ) -> Result<TaskId, Error> {
        let id = self.sched.register(name, priority)?;
        self.bodies.push(body).map_err(|_| Error::CapacityExceeded)?;
        log::debug!(target: "kernel", "task {} registered at priority {}", name, priority);
        Ok(id)
    }

    /// Execute one full scheduler tick: wake due sleepers, step every
    /// dispatchable task in priority order, then wait out the quantum.
    pub fn run_tick(&mut self) {
        self.sched.begin_tick();
        while let Some(id) = self.sched.dispatch_next() {
            let directive = self.bodies[id].step(&self.board);
            self.sched.complete(id, directive);
        }
        self.sched.end_tick();
        self.board.with_mut(|b| b.wait_for_tick());
    }

    /// Run for at most `ticks` ticks, stopping early once every task has
    /// reached the Stopped state. Simulation and test entry point.
    pub fn run_for(&mut self, ticks: u64) {
        for _ in 0..ticks {
            if self.sched.all_stopped() {
                break;
            }
            self.run_tick();
        }
    }

    /// Hand the CPU to the scheduler. Never returns.
    pub fn run(&mut self) -> ! {
        log::info!(target: "kernel", "scheduler started with {} tasks", self.sched.tasks().len());
        loop {
            self.run_tick();
        }
    }

    /// The shared board handle, for inspection and scripting.
    pub fn board(&self) -> &Shared<P> {
        &self.board
    }

    /// The scheduler state, for inspection.
    pub fn scheduler(&self) -> &Scheduler {
        &self.sched
    }
}

// ---------------------------------------------------------------------------
// Integration tests: the observable scheduling contract
// ---------------------------------------------------------------------------
