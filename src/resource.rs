use crate::guard::FailGuard;
use std::fmt::{Debug, Formatter};
use std::mem;
use std::ops::Deref;

/// Disposal routine for a resource of type `R`.
///
/// Implemented for every `Fn(&R)`, so closures and fn items work directly.
/// A deleter must not panic.
pub trait Deleter<R: ?Sized> {
    fn delete(&self, resource: &R);
}

impl<R: ?Sized, F: Fn(&R)> Deleter<R> for F {
    fn delete(&self, resource: &R) {
        self(resource)
    }
}

/// UniqueResource owns a handle together with its deleter and calls the
/// deleter exactly once when ownership ends.
///
/// Ownership ends on drop, on [`reset`](UniqueResource::reset), or when a new
/// handle is installed with [`reset_to`](UniqueResource::reset_to). A handle
/// that was [`release`](UniqueResource::release)d is never disposed.
///
/// ```
/// use scope_exit::UniqueResource;
/// use std::cell::Cell;
///
/// let closed = Cell::new(0);
/// {
///     let fd = UniqueResource::new(3, |_: &i32| closed.set(closed.get() + 1));
///     assert_eq!(*fd.get(), 3);
/// }
/// assert_eq!(closed.get(), 1);
/// ```
#[must_use]
pub struct UniqueResource<R, D: Deleter<R>> {
    resource: R,
    deleter: D,
    owns: bool,
}

impl<R, D: Deleter<R>> UniqueResource<R, D> {
    pub fn new(resource: R, deleter: D) -> Self {
        Self {
            resource,
            deleter,
            owns: true,
        }
    }

    /// Like [`make_checked`]: an `invalid` handle is stored but never owned.
    pub fn checked<S>(resource: R, invalid: &S, deleter: D) -> Self
    where
        R: PartialEq<S>,
        S: ?Sized,
    {
        let owns = resource != *invalid;
        Self {
            resource,
            deleter,
            owns,
        }
    }

    /// Builds an owning wrapper from clones of `resource` and `deleter`.
    ///
    /// If cloning the resource panics, `deleter` is called on `resource`. If
    /// cloning the deleter panics, `deleter` is called on the resource clone.
    /// Either way the panic then propagates.
    pub fn cloned(resource: &R, deleter: &D) -> Self
    where
        R: Clone,
        D: Clone,
    {
        let mut rollback = FailGuard::new(|| deleter.delete(resource));
        let installed = resource.clone();
        rollback.release();
        drop(rollback);

        let mut rollback = FailGuard::new(|| deleter.delete(&installed));
        let deleter = deleter.clone();
        rollback.release();
        drop(rollback);

        Self::new(installed, deleter)
    }

    /// Moves ownership into a new wrapper built from clones of the handle and
    /// the deleter. `self` keeps its handle but no longer owns it.
    ///
    /// If the resource clone panics nothing changes. If the deleter clone
    /// panics, the handle is disposed through `self`'s deleter (when `self`
    /// owned it) and `self` is left non-owning.
    pub fn hand_off(&mut self) -> Self
    where
        R: Clone,
        D: Clone,
    {
        let resource = self.resource.clone();
        let owns = mem::replace(&mut self.owns, false);
        let mut rollback = FailGuard::new(|| {
            if owns {
                self.deleter.delete(&resource);
            }
        });
        let deleter = self.deleter.clone();
        rollback.release();
        drop(rollback);
        Self {
            resource,
            deleter,
            owns,
        }
    }

    /// Disposes the current handle, then takes over `other`'s handle, deleter
    /// and ownership by cloning. `other` ends up non-owning.
    ///
    /// Plain assignment (`*this = other`) is the move path and needs no clones.
    pub fn assign_from(&mut self, other: &mut Self)
    where
        R: Clone,
        D: Clone,
    {
        self.reset();
        self.resource.clone_from(&other.resource);
        self.deleter.clone_from(&other.deleter);
        self.owns = mem::replace(&mut other.owns, false);
    }

    /// Gives up ownership without disposing; the handle stays readable
    pub fn release(&mut self) {
        self.owns = false;
    }

    /// Disposes the handle now if it is owned
    pub fn reset(&mut self) {
        if self.owns {
            self.owns = false;
            self.deleter.delete(&self.resource);
        }
    }

    /// Disposes the current handle and takes ownership of `resource`
    pub fn reset_to(&mut self, resource: R) {
        self.reset();
        self.resource = resource;
        self.owns = true;
    }

    /// Disposes the current handle and takes ownership of a copy of `resource`.
    ///
    /// The copy is made with `clone_from`, never by moving out of the caller.
    /// If it panics, the deleter is called on `resource` before the panic
    /// propagates.
    pub fn reset_from(&mut self, resource: &R)
    where
        R: Clone,
    {
        self.reset();
        let mut rollback = FailGuard::new(|| self.deleter.delete(resource));
        self.resource.clone_from(resource);
        rollback.release();
        drop(rollback);
        self.owns = true;
    }

    pub fn get(&self) -> &R {
        &self.resource
    }

    pub fn deleter(&self) -> &D {
        &self.deleter
    }

    /// Whether a disposal is still owed
    pub fn owns(&self) -> bool {
        self.owns
    }
}

/// Wraps `resource` unless it equals `invalid`.
///
/// An invalid handle is still stored, so [`UniqueResource::get`] returns it,
/// but the deleter is never called on it.
pub fn make_checked<R, S, D>(resource: R, invalid: &S, deleter: D) -> UniqueResource<R, D>
where
    R: PartialEq<S>,
    S: ?Sized,
    D: Deleter<R>,
{
    UniqueResource::checked(resource, invalid, deleter)
}

impl<R: Default, D: Deleter<R> + Default> Default for UniqueResource<R, D> {
    fn default() -> Self {
        Self {
            resource: R::default(),
            deleter: D::default(),
            owns: false,
        }
    }
}

impl<R: Debug, D: Deleter<R>> Debug for UniqueResource<R, D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UniqueResource")
            .field("resource", &self.resource)
            .field("owns", &self.owns)
            .finish()
    }
}

impl<R: Deref, D: Deleter<R>> Deref for UniqueResource<R, D> {
    type Target = R::Target;

    fn deref(&self) -> &Self::Target {
        self.resource.deref()
    }
}

impl<R, D: Deleter<R>> Drop for UniqueResource<R, D> {
    fn drop(&mut self) {
        self.reset();
    }
}
