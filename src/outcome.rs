use std::any::Any;
use std::fmt::{Display, Formatter};
use std::panic::{self, AssertUnwindSafe};

/// Unwind depth of the calling thread, compared against a guard's baseline.
///
/// A second panic escaping while one is already unwinding aborts the process,
/// so the observable depth is either 0 or 1.
pub type Depth = isize;

#[inline]
pub(crate) fn unwind_depth() -> Depth {
    std::thread::panicking() as Depth
}

/// How a scope was left, for code that reports failure through `Result`
/// instead of unwinding.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Outcome {
    Success,
    Failure,
}

impl Outcome {
    /// Outcome implied by the calling thread's unwind state
    pub fn current() -> Self {
        if std::thread::panicking() {
            Outcome::Failure
        } else {
            Outcome::Success
        }
    }

    /// Outcome of a result: `Err` is a failure
    pub fn of<T, E>(result: &Result<T, E>) -> Self {
        match result {
            Ok(_) => Outcome::Success,
            Err(_) => Outcome::Failure,
        }
    }

    pub fn is_success(&self) -> bool {
        *self == Outcome::Success
    }

    pub fn is_failure(&self) -> bool {
        *self == Outcome::Failure
    }
}

impl<T, E> From<&Result<T, E>> for Outcome {
    fn from(result: &Result<T, E>) -> Self {
        Outcome::of(result)
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Success => f.write_str("success"),
            Outcome::Failure => f.write_str("failure"),
        }
    }
}

/// Renders a panic payload the way the default panic hook does
pub fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "Box<dyn Any>"
    }
}

/// Runs `action`, swallowing any panic it raises.
///
/// Used from destructors, which must not let a panic escape while the stack
/// may already be unwinding.
pub(crate) fn run_suppressed<F: FnOnce()>(kind: &str, action: F) {
    if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(action)) {
        log::warn!(
            "{} action panicked, panic suppressed: {}",
            kind,
            panic_message(payload.as_ref())
        );
    }
}
