use crate::outcome::{self, Depth, Outcome};
use crate::state::GuardState;
use crate::trigger::{OnExit, OnSuccess, OnUnwind, Trigger};
use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;

/// Runs its action when dropped, whether the scope is left normally or by
/// unwinding.
///
/// ```
/// use scope_exit::ExitGuard;
/// use std::cell::Cell;
///
/// let closed = Cell::new(false);
/// {
///     let _guard = ExitGuard::new(|| closed.set(true));
/// }
/// assert!(closed.get());
/// ```
pub type ExitGuard<F> = ScopeGuard<F, OnExit>;

/// Runs its action only if a panic started unwinding through its scope after
/// the guard was created.
///
/// The unwind depth is sampled at construction, so a guard created inside a
/// destructor that runs during unwinding does not fire for that earlier panic.
pub type FailGuard<F> = ScopeGuard<F, OnUnwind>;

/// Runs its action only if no new panic is unwinding through its scope when
/// it is dropped.
///
/// On a clean exit a panic raised by the action propagates out of the drop.
/// If the guard fires while an older panic is already unwinding, the action's
/// panic is suppressed instead, since a second escaping panic aborts.
pub type SuccessGuard<F> = ScopeGuard<F, OnSuccess>;

/// Clones `action`, running the original once if the clone panics.
///
/// The panic keeps unwinding after the fallback ran, so the caller never sees
/// a half-built guard and the action is still not lost.
fn clone_or_run<F: Fn() + Clone>(action: &F) -> F {
    let mut fallback = FailGuard::new(|| action());
    let copy = action.clone();
    fallback.release();
    copy
}

/// Guard that runs its action on drop when the trigger `T` says so
#[must_use = "the action runs when the guard is dropped, binding to `_` drops it immediately"]
pub struct ScopeGuard<F: FnOnce(), T: Trigger> {
    action: Option<F>,
    baseline: Depth,
    trigger: PhantomData<T>,
}

impl<F: FnOnce(), T: Trigger> ScopeGuard<F, T> {
    pub fn new(action: F) -> ScopeGuard<F, T> {
        Self {
            action: Some(action),
            baseline: T::arm(),
            trigger: PhantomData,
        }
    }

    /// Builds a guard around a clone of `action`.
    ///
    /// If cloning panics, `action` itself is invoked once before the panic
    /// propagates.
    pub fn from_ref(action: &F) -> ScopeGuard<F, T>
    where
        F: Fn() + Clone,
    {
        Self::new(clone_or_run(action))
    }

    /// Disarms the guard for good
    pub fn release(&mut self) {
        self.baseline = T::RELEASED;
    }

    pub fn state(&self) -> GuardState {
        GuardState::from_armed(self.baseline != T::RELEASED)
    }

    /// Moves the guard's duty into a new guard holding a clone of the action.
    ///
    /// The new guard keeps the original baseline and `self` is disarmed. If
    /// the clone panics, `self` is left untouched.
    pub fn hand_off(&mut self) -> ScopeGuard<F, T>
    where
        F: Clone,
    {
        let action = self.action.clone();
        let baseline = self.baseline;
        self.release();
        Self {
            action,
            baseline,
            trigger: PhantomData,
        }
    }

    /// Settles the guard against an explicit outcome instead of the unwind
    /// state. A panic from the action propagates to the caller.
    pub fn conclude(self, outcome: Outcome) {
        let armed = self.state().is_armed();
        let action = self.into_inner();
        if armed && T::fires_on(outcome) {
            action();
        }
    }

    /// Concludes with the outcome of `result` and hands the result back.
    ///
    /// ```
    /// use scope_exit::FailGuard;
    /// use std::cell::Cell;
    ///
    /// let rolled_back = Cell::new(false);
    /// let guard = FailGuard::new(|| rolled_back.set(true));
    /// let result: Result<(), &str> = guard.finish(Err("write failed"));
    /// assert!(result.is_err());
    /// assert!(rolled_back.get());
    /// ```
    pub fn finish<R, E>(self, result: Result<R, E>) -> Result<R, E> {
        self.conclude(Outcome::of(&result));
        result
    }

    /// Defuses the guard and gives the action back
    pub fn into_inner(mut self) -> F {
        self.action
            .take()
            .expect("action is only taken by into_inner or drop")
    }
}

impl<F: FnOnce(), T: Trigger> Debug for ScopeGuard<F, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(T::NAME)
            .field("state", &self.state())
            .field("baseline", &self.baseline)
            .finish()
    }
}

impl<F: FnOnce(), T: Trigger> Drop for ScopeGuard<F, T> {
    fn drop(&mut self) {
        if let Some(action) = self.action.take() {
            if T::should_fire(self.baseline, outcome::unwind_depth()) {
                if T::PROPAGATES_PANICS && !std::thread::panicking() {
                    action();
                } else {
                    outcome::run_suppressed(T::KIND, action);
                }
            }
        }
    }
}
