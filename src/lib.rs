//! Scope exit guards and a unique resource wrapper.
//!
//! [`ExitGuard`], [`FailGuard`] and [`SuccessGuard`] run an action when their
//! scope is left, always, only while unwinding from a panic, or only on a
//! clean exit. [`UniqueResource`] pairs a handle with its deleter and disposes
//! it exactly once.

mod defer;
pub mod guard;
pub mod outcome;
pub mod resource;
pub mod state;
pub mod trigger;

pub use guard::{ExitGuard, FailGuard, ScopeGuard, SuccessGuard};
pub use outcome::Outcome;
pub use resource::{make_checked, Deleter, UniqueResource};
pub use state::GuardState;
pub use trigger::Trigger;
