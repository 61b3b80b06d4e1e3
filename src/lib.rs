//! # QuantOS — Quantum Operating System
//!
//! A deterministic, fixed-priority, preemptive multitasking kernel for
//! microcontroller-style workloads, built around the scheduler's time
//! quantum (the *tick*).
//!
//! ## Overview
//!
//! QuantOS runs a fixed set of periodic and polling workloads on a single
//! CPU core so that:
//!
//! - **A higher-priority workload interrupts lower-priority ones within one
//!   tick** (10 ms in the default configuration), no matter what the rest
//!   of the system is doing
//! - **Lower-priority workloads still make progress** — each task is
//!   dispatched at most once per tick, so a fast poller cannot monopolize
//!   the CPU
//! - **Every scheduling decision is deterministic** and reproducible on a
//!   simulated board, tick for tick
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │        Workloads (workloads.rs · baseline.rs)           │
//! │    sensor · processing · actuator · emergency · poll    │
//! ├────────────────────────────────────────────────────────┤
//! │                 Kernel API (kernel.rs)                  │
//! │        new() · spawn() · run_tick() · run()             │
//! ├──────────────┬────────────────────┬───────────────────┤
//! │  Scheduler   │   Task Model       │  Pin Guard        │
//! │  scheduler.rs│   task.rs          │  sync.rs          │
//! │  ─ begin_tick│   ─ TaskState      │  ─ Shared<T>      │
//! │  ─ dispatch  │   ─ Suspend        │  ─ with_mut()     │
//! │  ─ complete  │   ─ Workload       │                   │
//! ├──────────────┴────────────────────┴───────────────────┤
//! │           Platform boundary (hal.rs)                    │
//! │    configure_pin · set_pin · read_pin · wait_for_tick  │
//! ├────────────────────────────────────────────────────────┤
//! │   gpio.rs (embedded-hal pins)  ·  sim.rs (simulation)   │
//! └────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Execution Model
//!
//! Task bodies are *resumable units of execution*: objects implementing
//! [`task::Workload`], whose `step()` performs one bounded unit of work and
//! then returns a [`task::Suspend`] directive (timed sleep, voluntary
//! yield, or stop). There are no per-task stacks and no context-switch
//! assembly — a suspension point is an ordinary function return, which is
//! what makes single-threaded, tick-accurate simulation possible.
//!
//! At every tick boundary the scheduler wakes all due sleepers, then
//! dispatches Ready tasks in strict priority order (FIFO by ready-time on
//! ties), at most one step per task per tick. A long computation is split
//! into tick-sized chunks with a yield between chunks, so preemption
//! granularity is exactly one tick regardless of CPU speed.
//!
//! ## Memory Model
//!
//! - **No heap**: the task table is a fixed-capacity `heapless::Vec`
//! - **No `alloc`**: pure `core`, plus `std` in the demo binary only
//! - **Borrowed task bodies**: workloads live in the caller's stack frame
//!   and are lent to the kernel for its lifetime
//! - **Shared pins**: all pin access goes through `sync::Shared`, a scoped
//!   mutual-exclusion guard, so multi-step pin sequences never interleave

#![cfg_attr(not(test), no_std)]

pub mod baseline;
pub mod config;
pub mod error;
pub mod gpio;
pub mod hal;
pub mod kernel;
pub mod scheduler;
pub mod sim;
pub mod sync;
pub mod task;
pub mod workloads;

pub use error::Error;
pub use hal::{Direction, Level, PinId, Platform, Pull};
pub use kernel::Kernel;
pub use sync::Shared;
pub use task::{Suspend, TaskId, TaskState, Tick, Workload};
