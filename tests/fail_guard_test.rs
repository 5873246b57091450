use scope_exit::{defer_on_unwind, FailGuard, GuardState, Outcome};
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};

fn incr(counter: &AtomicUsize) {
    counter.fetch_add(1, Ordering::SeqCst);
}

/// Builds a FailGuard from inside its own destructor.
struct GuardInDrop<'a>(&'a AtomicUsize);

impl Drop for GuardInDrop<'_> {
    fn drop(&mut self) {
        let _guard = FailGuard::new(|| incr(self.0));
    }
}

#[derive(Debug)]
struct FailingClone;

impl Clone for FailingClone {
    fn clone(&self) -> Self {
        panic!("action clone failed");
    }
}

#[test]
fn test_fail_guard_normal_exit_does_not_fire() {
    let counter = AtomicUsize::new(0);
    {
        let _guard = FailGuard::new(|| incr(&counter));
    }
    assert_eq!(counter.load(Ordering::SeqCst), 0);
}

#[test]
fn test_fail_guard_fires_on_panic() {
    let counter = AtomicUsize::new(0);
    let result = panic::catch_unwind(|| {
        let _guard = FailGuard::new(|| incr(&counter));
        assert_eq!(counter.load(Ordering::SeqCst), 0);
        panic!("boom");
    });
    assert!(result.is_err());
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[test]
fn test_fail_guard_ignores_unwinding_that_started_before_it() {
    let counter = AtomicUsize::new(0);
    let result = panic::catch_unwind(|| {
        let _outer = GuardInDrop(&counter);
        panic!("boom");
    });
    assert!(result.is_err());
    assert_eq!(counter.load(Ordering::SeqCst), 0);
}

#[test]
fn test_fail_guard_release_is_idempotent() {
    let counter = AtomicUsize::new(0);
    let result = panic::catch_unwind(|| {
        let mut guard = FailGuard::new(|| incr(&counter));
        guard.release();
        guard.release();
        assert_eq!(guard.state(), GuardState::Disarmed);
        panic!("boom");
    });
    assert!(result.is_err());
    assert_eq!(counter.load(Ordering::SeqCst), 0);
}

#[test]
fn test_fail_guard_move_fires_once() {
    let counter = AtomicUsize::new(0);
    let first = FailGuard::new(|| incr(&counter));
    let result = panic::catch_unwind(AssertUnwindSafe(move || {
        let _second = first;
        panic!("boom");
    }));
    assert!(result.is_err());
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[test]
fn test_fail_guard_hand_off() {
    let counter = AtomicUsize::new(0);
    let mut first = FailGuard::new(|| incr(&counter));
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        let _second = first.hand_off();
        panic!("boom");
    }));
    assert!(result.is_err());
    assert_eq!(counter.load(Ordering::SeqCst), 1);
    assert_eq!(first.state(), GuardState::Disarmed);

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        let _third = first.hand_off();
        panic!("boom");
    }));
    assert!(result.is_err());
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[test]
fn test_fail_guard_from_ref_clone_panics() {
    let counter = AtomicUsize::new(0);
    let hits = &counter;
    let fragile = FailingClone;
    let action = move || {
        let _ = &fragile;
        incr(hits);
    };
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        let _guard = FailGuard::from_ref(&action);
    }));
    assert!(result.is_err());
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[test]
fn test_fail_guard_suppresses_action_panic() {
    let counter = AtomicUsize::new(0);
    let result = panic::catch_unwind(|| {
        let _guard = FailGuard::new(|| {
            incr(&counter);
            panic!("rollback failed");
        });
        panic!("boom");
    });
    let payload = result.unwrap_err();
    assert_eq!(scope_exit::outcome::panic_message(payload.as_ref()), "boom");
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[test]
fn test_fail_guard_conclude() {
    let counter = AtomicUsize::new(0);
    FailGuard::new(|| incr(&counter)).conclude(Outcome::Success);
    assert_eq!(counter.load(Ordering::SeqCst), 0);
    FailGuard::new(|| incr(&counter)).conclude(Outcome::Failure);
    assert_eq!(counter.load(Ordering::SeqCst), 1);

    let mut released = FailGuard::new(|| incr(&counter));
    released.release();
    released.conclude(Outcome::Failure);
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[test]
fn test_fail_guard_finish_with_result() {
    fn write_all(counter: &AtomicUsize, fail: bool) -> Result<usize, String> {
        let rollback = FailGuard::new(|| incr(counter));
        let result = if fail {
            Err("disk full".to_string())
        } else {
            Ok(4)
        };
        rollback.finish(result)
    }

    let counter = AtomicUsize::new(0);
    assert_eq!(write_all(&counter, false), Ok(4));
    assert_eq!(counter.load(Ordering::SeqCst), 0);
    assert_eq!(write_all(&counter, true), Err("disk full".to_string()));
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[test]
fn test_defer_on_unwind_macro() {
    let counter = AtomicUsize::new(0);
    {
        defer_on_unwind!(|| incr(&counter));
    }
    assert_eq!(counter.load(Ordering::SeqCst), 0);

    let result = panic::catch_unwind(|| {
        defer_on_unwind!(|| incr(&counter));
        panic!("boom");
    });
    assert!(result.is_err());
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[test]
fn test_fail_guard_hand_off_clone_panics() {
    let counter = AtomicUsize::new(0);
    let hits = &counter;
    let fragile = FailingClone;
    let result = panic::catch_unwind(AssertUnwindSafe(move || {
        let mut guard = FailGuard::new(move || {
            let _ = &fragile;
            incr(hits);
        });
        let _moved = guard.hand_off();
    }));
    assert!(result.is_err());
    // the untouched source fired while unwinding
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}
