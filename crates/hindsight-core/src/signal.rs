use std::cell::RefCell;
use std::rc::Rc;

use crate::runtime::{self, Invalidator};

pub type SubId = usize;

/// Observable value. A signal created while a composition is running belongs
/// to that composition's scheduler: writing it schedules the next frame.
pub struct Signal<T>(Rc<RefCell<Inner<T>>>);

struct Inner<T> {
    value: T,
    subs: Vec<Box<dyn Fn(&T)>>,
    invalidator: Option<Invalidator>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> Signal<T> {
    pub fn new(value: T) -> Self {
        Self(Rc::new(RefCell::new(Inner {
            value,
            subs: Vec::new(),
            invalidator: runtime::current_invalidator(),
        })))
    }

    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.0.borrow().value.clone()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.0.borrow().value)
    }

    pub fn set(&self, v: T) {
        self.0.borrow_mut().value = v;
        self.notify();
    }

    pub fn update<F: FnOnce(&mut T)>(&self, f: F) {
        f(&mut self.0.borrow_mut().value);
        self.notify();
    }

    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> SubId {
        let mut inner = self.0.borrow_mut();
        inner.subs.push(Box::new(f));
        inner.subs.len() - 1
    }

    // Subscribers get a shared borrow, so they may call `get`/`with`.
    fn notify(&self) {
        let inner = self.0.borrow();
        if let Some(inv) = &inner.invalidator {
            inv.invalidate();
        }
        let vref = &inner.value;
        for s in &inner.subs {
            s(vref);
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Signal").field(&self.0.borrow().value).finish()
    }
}

pub fn signal<T>(t: T) -> Signal<T> {
    Signal::new(t)
}
