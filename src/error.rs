//! # Startup Errors
//!
//! Every fallible operation in QuantOS happens before the scheduler starts:
//! pin configuration and task registration. Once tasks are running there is
//! no error path — task bodies are infinite loops over infallible platform
//! services. Workloads that add real sensor or actuator I/O are expected to
//! retry transient failures locally rather than propagate them to the
//! scheduler.

use core::fmt;

use crate::hal::PinId;

/// A fatal startup error, reported before any task runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The task table is full (`config::MAX_TASKS` reached).
    CapacityExceeded,
    /// The pin does not exist on this board, or cannot be configured in
    /// the requested direction.
    InvalidPin(PinId),
    /// The pull mode is incompatible with the requested pin direction.
    InvalidPull,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::CapacityExceeded => write!(f, "task capacity exceeded"),
            Error::InvalidPin(pin) => write!(f, "invalid pin {}", pin.0),
            Error::InvalidPull => write!(f, "invalid pull mode"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Error::CapacityExceeded), "task capacity exceeded");
        assert_eq!(format!("{}", Error::InvalidPin(PinId(4))), "invalid pin 4");
        assert_eq!(format!("{}", Error::InvalidPull), "invalid pull mode");
    }
}
