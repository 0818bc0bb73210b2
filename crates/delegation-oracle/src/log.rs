use crate::Value;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A shared, append-only record of values observed inside a generator.
///
/// Cloning a log produces another handle to the same record, so a log can be
/// captured by a program and inspected by the test which drives it.
#[derive(Clone, Default)]
pub struct Log {
    inner: Rc<RefCell<Vec<Value>>>,
}

impl Log {
    /// Construct a new empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value to the log.
    pub fn push(&self, value: Value) {
        self.inner.borrow_mut().push(value);
    }

    /// Get a copy of everything recorded so far.
    pub fn snapshot(&self) -> Vec<Value> {
        self.inner.borrow().clone()
    }

    /// Clear the log.
    pub fn clear(&self) {
        self.inner.borrow_mut().clear();
    }

    /// The number of recorded values.
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    /// Test if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}

impl fmt::Debug for Log {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.borrow().iter()).finish()
    }
}
