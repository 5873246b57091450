/// Runs the given closure when the current scope is left, normally or by unwinding.
///
/// ```
/// use std::cell::Cell;
///
/// let released = Cell::new(false);
/// {
///     scope_exit::defer!(|| released.set(true));
///     assert!(!released.get());
/// }
/// assert!(released.get());
/// ```
#[macro_export]
macro_rules! defer {
    ($func:block) => {
       let _guard = $crate::ExitGuard::new(|| $func);
    };
    ($func:expr) => {
        let _guard = $crate::ExitGuard::new($func);
    };
    { $($func:expr$(;)?)+ } => {
       let _guard = $crate::ExitGuard::new(|| {$($func;)+});
    }
}

/// Runs the given closure only if the current scope is left by a panic.
#[macro_export]
macro_rules! defer_on_unwind {
    ($func:block) => {
       let _guard = $crate::FailGuard::new(|| $func);
    };
    ($func:expr) => {
        let _guard = $crate::FailGuard::new($func);
    };
    { $($func:expr$(;)?)+ } => {
       let _guard = $crate::FailGuard::new(|| {$($func;)+});
    }
}

/// Runs the given closure only if the current scope is left without a panic.
#[macro_export]
macro_rules! defer_on_success {
    ($func:block) => {
       let _guard = $crate::SuccessGuard::new(|| $func);
    };
    ($func:expr) => {
        let _guard = $crate::SuccessGuard::new($func);
    };
    { $($func:expr$(;)?)+ } => {
       let _guard = $crate::SuccessGuard::new(|| {$($func;)+});
    }
}
