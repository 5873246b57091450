use crate::outcome::{self, Depth, Outcome};

/// Decides when a [`ScopeGuard`](crate::guard::ScopeGuard) runs its action.
///
/// A guard stores a baseline taken from [`arm`](Trigger::arm) at construction
/// and compares it with the unwind depth at drop. Releasing the guard replaces
/// the baseline with [`RELEASED`](Trigger::RELEASED), which never fires.
pub trait Trigger {
    /// Type name used by `Debug`
    const NAME: &'static str;
    /// Short label used when a suppressed panic is logged
    const KIND: &'static str;
    const RELEASED: Depth;
    /// Whether a panic from the action may escape a drop on a clean exit
    const PROPAGATES_PANICS: bool = false;

    fn arm() -> Depth;

    fn should_fire(baseline: Depth, current: Depth) -> bool;

    /// Whether an explicit outcome fires an armed guard
    fn fires_on(outcome: Outcome) -> bool;
}

/// Run on every scope exit, normal or unwinding.
#[derive(Debug)]
pub enum OnExit {}

/// Run only when a panic started unwinding after the guard was armed.
#[derive(Debug)]
pub enum OnUnwind {}

/// Run only when no new panic is unwinding.
#[derive(Debug)]
pub enum OnSuccess {}

impl Trigger for OnExit {
    const NAME: &'static str = "ExitGuard";
    const KIND: &'static str = "exit";
    const RELEASED: Depth = Depth::MIN;

    #[inline]
    fn arm() -> Depth {
        0
    }

    #[inline]
    fn should_fire(baseline: Depth, _current: Depth) -> bool {
        baseline != Self::RELEASED
    }

    fn fires_on(_outcome: Outcome) -> bool {
        true
    }
}

impl Trigger for OnUnwind {
    const NAME: &'static str = "FailGuard";
    const KIND: &'static str = "fail";
    const RELEASED: Depth = Depth::MAX;

    #[inline]
    fn arm() -> Depth {
        outcome::unwind_depth()
    }

    #[inline]
    fn should_fire(baseline: Depth, current: Depth) -> bool {
        current > baseline
    }

    fn fires_on(outcome: Outcome) -> bool {
        outcome.is_failure()
    }
}

impl Trigger for OnSuccess {
    const NAME: &'static str = "SuccessGuard";
    const KIND: &'static str = "success";
    const RELEASED: Depth = Depth::MIN;
    const PROPAGATES_PANICS: bool = true;

    #[inline]
    fn arm() -> Depth {
        outcome::unwind_depth()
    }

    #[inline]
    fn should_fire(baseline: Depth, current: Depth) -> bool {
        current <= baseline
    }

    fn fires_on(outcome: Outcome) -> bool {
        outcome.is_success()
    }
}
