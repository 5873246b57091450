use std::fmt::{Display, Formatter};

/// Current state of a scope guard
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GuardState {
    /// The action will run once the guard's trigger condition holds at drop
    Armed,
    /// The action will never run; there is no way back to `Armed`
    Disarmed,
}

impl GuardState {
    pub(crate) fn from_armed(armed: bool) -> Self {
        if armed {
            GuardState::Armed
        } else {
            GuardState::Disarmed
        }
    }

    pub fn is_armed(&self) -> bool {
        *self == GuardState::Armed
    }
}

impl Display for GuardState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GuardState::Armed => f.write_str("armed"),
            GuardState::Disarmed => f.write_str("disarmed"),
        }
    }
}
