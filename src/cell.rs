//! Application-owned state cells.
//!
//! DESIGN
//! ======
//! The sync engine writes session and theme state through [`StateCell`] rather
//! than module-level globals. The browser client backs the cells with reactive
//! signals; native code and tests use [`LocalCell`].

#[cfg(test)]
#[path = "cell_test.rs"]
mod cell_test;

use std::cell::RefCell;
use std::rc::Rc;

/// A single-value slot the engine publishes into.
pub trait StateCell<T> {
    /// Current value.
    fn get(&self) -> T;
    /// Replace the value wholesale.
    fn set(&self, value: T);
}

/// Shared in-process cell. Clones observe the same value.
#[derive(Debug, Default)]
pub struct LocalCell<T> {
    inner: Rc<RefCell<T>>,
}

impl<T> LocalCell<T> {
    #[must_use]
    pub fn new(value: T) -> Self {
        Self { inner: Rc::new(RefCell::new(value)) }
    }
}

impl<T> Clone for LocalCell<T> {
    fn clone(&self) -> Self {
        Self { inner: Rc::clone(&self.inner) }
    }
}

impl<T: Clone> StateCell<T> for LocalCell<T> {
    fn get(&self) -> T {
        self.inner.borrow().clone()
    }

    fn set(&self, value: T) {
        *self.inner.borrow_mut() = value;
    }
}
