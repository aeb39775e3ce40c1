//! Shared ownership handle with an observable owner count, and generic swap.

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

/// A value with any number of owning handles.
///
/// Cloning a `Shared` adds an owner; dropping one removes it. The value is
/// released when the last owner goes away.
pub struct Shared<T> {
    inner: Rc<RefCell<T>>,
}

impl<T> Shared<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(value)),
        }
    }

    /// Number of handles currently owning the value.
    pub fn owners(&self) -> usize {
        Rc::strong_count(&self.inner)
    }

    /// Whether both handles own the same value.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn borrow(&self) -> Ref<'_, T> {
        self.inner.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.inner.borrow_mut()
    }
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Shared<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shared")
            .field("value", &*self.inner.borrow())
            .field("owners", &self.owners())
            .finish()
    }
}

/// Exchange two values in place.
pub fn swap_values<T>(a: &mut T, b: &mut T) {
    std::mem::swap(a, b);
}

/// Exchange the values owned by two handles.
///
/// Swapping a handle with itself (or with a clone of itself) leaves the value unchanged.
pub fn swap_shared<T>(a: &Shared<T>, b: &Shared<T>) {
    if a.ptr_eq(b) {
        return;
    }
    swap_values(&mut *a.borrow_mut(), &mut *b.borrow_mut());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swap_values_exchanges_any_kind() {
        let (mut a, mut b) = (5_i64, 10_i64);
        swap_values(&mut a, &mut b);
        assert_eq!((a, b), (10, 5));

        let (mut a, mut b) = (String::from("left"), String::from("right"));
        swap_values(&mut a, &mut b);
        assert_eq!((a.as_str(), b.as_str()), ("right", "left"));
    }

    #[test]
    fn owner_count_tracks_clones_and_drops() {
        let value = Shared::new(3.14_f64);
        assert_eq!(value.owners(), 1);
        let alias = value.clone();
        assert_eq!(value.owners(), 2);
        assert_eq!(alias.owners(), 2);
        drop(alias);
        assert_eq!(value.owners(), 1);
    }

    #[test]
    fn swap_shared_exchanges_independent_values() {
        let a = Shared::new(3.14_f64);
        let b = Shared::new(2.71_f64);
        swap_shared(&a, &b);
        assert_eq!(*a.borrow(), 2.71);
        assert_eq!(*b.borrow(), 3.14);
        assert_eq!((a.owners(), b.owners()), (1, 1));
    }

    #[test]
    fn swap_shared_with_alias_is_a_no_op() {
        let a = Shared::new(7_i64);
        let alias = a.clone();
        swap_shared(&a, &alias);
        assert_eq!(*a.borrow(), 7);
        assert_eq!(alias.owners(), 2);
    }

    #[test]
    fn writes_through_one_owner_are_seen_by_the_other() {
        let a = Shared::new(vec![1, 2]);
        let alias = a.clone();
        alias.borrow_mut().push(3);
        assert_eq!(*a.borrow(), vec![1, 2, 3]);
    }
}
