//! Previous-value tracking.
//!
//! A `RetentionCell` holds two values: the one committed at the end of the
//! last cycle, and the one staged during the current cycle. `track` reads the
//! former and stages the latter; `commit` promotes the staged value. Callers
//! must only commit once the cycle's output exists, which is what
//! `use_previous` arranges through `side_effect`.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::{remember, remember_with_key, side_effect};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellState {
    /// Nothing committed yet.
    Uninitialized,
    /// Holds the value of the last committed cycle.
    Initialized,
}

pub struct RetentionCell<T> {
    current: RefCell<Option<T>>,
    pending: RefCell<Option<T>>,
}

impl<T> Default for RetentionCell<T> {
    fn default() -> Self {
        Self {
            current: RefCell::new(None),
            pending: RefCell::new(None),
        }
    }
}

impl<T> RetentionCell<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value committed by the previous cycle and stages `value`
    /// for the next one. The staged value is not observable until `commit`.
    pub fn track(&self, value: T) -> Option<T>
    where
        T: Clone,
    {
        let previous = self.current.borrow().clone();
        *self.pending.borrow_mut() = Some(value);
        previous
    }

    /// Promotes the staged value. No-op when nothing is staged.
    pub fn commit(&self) {
        let staged = self.pending.borrow_mut().take();
        if let Some(value) = staged {
            *self.current.borrow_mut() = Some(value);
        }
    }

    pub fn peek(&self) -> Option<T>
    where
        T: Clone,
    {
        self.current.borrow().clone()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.borrow().is_some()
    }

    pub fn state(&self) -> CellState {
        if self.current.borrow().is_some() {
            CellState::Initialized
        } else {
            CellState::Uninitialized
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.state() == CellState::Initialized
    }
}

impl<T: fmt::Debug> fmt::Debug for RetentionCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetentionCell")
            .field("current", &*self.current.borrow())
            .field("pending", &*self.pending.borrow())
            .finish()
    }
}

/// The value passed to this call on the previous rendering cycle, or `None`
/// on the first one.
///
/// ```rust
/// use hindsight_core::*;
///
/// let mut sched = Scheduler::new();
/// let mut seen = Vec::new();
/// for n in [10, 20, 30] {
///     sched
///         .repose(
///             |_| {
///                 seen.push(use_previous(n));
///                 View::new(0, ViewKind::Column)
///             },
///             |_| (Scene::default(), Vec::new(), Vec::new()),
///         )
///         .unwrap();
/// }
/// assert_eq!(seen, vec![None, Some(10), Some(20)]);
/// ```
pub fn use_previous<T: Clone + 'static>(value: T) -> Option<T> {
    let cell = remember(RetentionCell::<T>::new);
    retain(cell, value)
}

/// Key-based `use_previous`, for call sites under conditional composition.
pub fn use_previous_with_key<T: Clone + 'static>(key: impl Into<String>, value: T) -> Option<T> {
    let cell = remember_with_key(key, RetentionCell::<T>::new);
    retain(cell, value)
}

fn retain<T: Clone + 'static>(cell: Rc<RetentionCell<T>>, value: T) -> Option<T> {
    let previous = cell.track(value);
    side_effect(move || cell.commit());
    previous
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_hides_staged_value() {
        let cell = RetentionCell::new();
        assert_eq!(cell.track(1), None);
        assert_eq!(cell.track(2), None);
        assert_eq!(cell.state(), CellState::Uninitialized);

        cell.commit();
        assert_eq!(cell.state(), CellState::Initialized);
        assert_eq!(cell.peek(), Some(2));
        assert_eq!(cell.track(3), Some(2));
    }

    #[test]
    fn test_commit_without_pending_is_noop() {
        let cell: RetentionCell<i32> = RetentionCell::new();
        cell.commit();
        assert!(!cell.is_initialized());

        cell.track(7);
        cell.commit();
        cell.commit();
        assert_eq!(cell.peek(), Some(7));
        assert!(!cell.has_pending());
    }
}
