//! Cleanup registry for a mounted root.
//!
//! Every `Scheduler` owns one `Scope`. While the root composes, that scope is
//! the *active* one on the thread, and `on_dispose` hands cleanups to it.
//! They run once, when the scheduler unmounts.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Cleanup = Box<dyn FnOnce()>;

thread_local! {
    static ACTIVE: RefCell<Option<Weak<Cleanups>>> = const { RefCell::new(None) };
}

#[derive(Default)]
struct Cleanups(RefCell<Vec<Cleanup>>);

impl Cleanups {
    fn drain(&self) -> Vec<Cleanup> {
        std::mem::take(&mut *self.0.borrow_mut())
    }
}

impl Drop for Cleanups {
    // A scope dropped without `dispose` still honours what was registered.
    fn drop(&mut self) {
        for cleanup in self.drain() {
            cleanup();
        }
    }
}

#[derive(Clone, Default)]
pub struct Scope {
    cleanups: Rc<Cleanups>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` with this scope active. The previously active scope is put
    /// back when `f` returns or unwinds.
    pub fn run<R>(&self, f: impl FnOnce() -> R) -> R {
        let _active = Activation::enter(self);
        f()
    }

    pub fn add_disposer(&self, cleanup: impl FnOnce() + 'static) {
        self.cleanups.0.borrow_mut().push(Box::new(cleanup));
    }

    /// Cleanups waiting for `dispose`.
    pub fn disposer_count(&self) -> usize {
        self.cleanups.0.borrow().len()
    }

    /// Runs the registered cleanups in registration order.
    pub fn dispose(self) {
        let cleanups = self.cleanups.drain();
        log::trace!("disposing scope: {} cleanup(s)", cleanups.len());
        for cleanup in cleanups {
            cleanup();
        }
    }
}

struct Activation {
    prev: Option<Weak<Cleanups>>,
}

impl Activation {
    fn enter(scope: &Scope) -> Self {
        let prev = ACTIVE.with(|a| a.borrow_mut().replace(Rc::downgrade(&scope.cleanups)));
        Self { prev }
    }
}

impl Drop for Activation {
    fn drop(&mut self) {
        let prev = self.prev.take();
        ACTIVE.with(|a| *a.borrow_mut() = prev);
    }
}

pub fn current_scope() -> Option<Scope> {
    ACTIVE.with(|a| {
        a.borrow()
            .as_ref()
            .and_then(Weak::upgrade)
            .map(|cleanups| Scope { cleanups })
    })
}

/// Registers `cleanup` on the active scope. Returns `false`, dropping
/// `cleanup` unrun, when no scope is active.
pub fn on_dispose(cleanup: impl FnOnce() + 'static) -> bool {
    match current_scope() {
        Some(scope) => {
            scope.add_disposer(cleanup);
            true
        }
        None => {
            log::debug!("on_dispose: no active scope; cleanup will not run");
            false
        }
    }
}
