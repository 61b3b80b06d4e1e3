//! # Synchronization Primitives
//!
//! Scoped mutual exclusion for state shared between tasks — in this system,
//! the pin bank. The two output pins and the input pin are mutable state
//! that any task may touch, so every access goes through [`Shared`]: a
//! closure takes the guard, performs a complete pin sequence, and release
//! is guaranteed when the closure returns. A preempted task can therefore
//! never leave another task's multi-step pin sequence half-interleaved.
//!
//! Acquisition is scoped per *sequence*, not per individual read or write:
//! a workload that must raise two pins together does both inside one
//! `with_mut` call.

use core::cell::RefCell;

/// A shared resource handle with scoped acquisition.
///
/// Single-core, suspension points only at `step()` returns — so exclusion
/// is enforced by construction and checked at runtime: re-entrant
/// acquisition is a programming error and panics.
///
/// # Usage
/// ```ignore
/// board.with_mut(|pins| {
///     pins.set_pin(LED1, Level::High);
///     pins.set_pin(LED2, Level::High);
/// });
/// ```
pub struct Shared<T> {
    inner: RefCell<T>,
}

impl<T> Shared<T> {
    /// Wrap a resource for shared access.
    pub const fn new(value: T) -> Self {
        Self {
            inner: RefCell::new(value),
        }
    }

    /// Access the resource immutably for the duration of the closure.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow())
    }

    /// Access the resource mutably for the duration of the closure.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.inner.borrow_mut())
    }

    /// Consume the guard and return the inner resource.
    pub fn into_inner(self) -> T {
        self.inner.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_reads() {
        let shared = Shared::new(42u32);
        assert_eq!(shared.with(|v| *v), 42);
    }

    #[test]
    fn test_with_mut_writes() {
        let shared = Shared::new(0u32);
        shared.with_mut(|v| *v = 7);
        assert_eq!(shared.with(|v| *v), 7);
        assert_eq!(shared.into_inner(), 7);
    }

    #[test]
    fn test_sequence_is_scoped() {
        let shared = Shared::new([0u8; 2]);
        let len = shared.with_mut(|pins| {
            pins[0] = 1;
            pins[1] = 1;
            pins.len()
        });
        assert_eq!(len, 2);
        assert_eq!(shared.with(|pins| *pins), [1, 1]);
    }

    #[test]
    #[should_panic(expected = "already borrowed")]
    fn test_reentrant_acquisition_panics() {
        let shared = Shared::new(0u32);
        shared.with(|_| {
            let _ = shared.inner.borrow_mut();
        });
    }
}
