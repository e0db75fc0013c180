use std::cell::{Cell, RefCell};

use crate::{on_dispose, remember, runtime};

/// Cleanup handed back by a `disposable_effect` body.
#[must_use = "a Dispose only runs when returned from an effect or run explicitly"]
pub struct Dispose(Box<dyn FnOnce()>);

impl Dispose {
    pub fn new(f: impl FnOnce() + 'static) -> Self {
        Self(Box::new(f))
    }

    pub fn run(self) {
        (self.0)()
    }
}

/// Reads better at the end of an effect body than `Dispose::new`.
pub fn on_unmount(f: impl FnOnce() + 'static) -> Dispose {
    Dispose::new(f)
}

/// Runs after the current frame has been rendered and before the next
/// composition starts. Effects run in the order they were queued.
///
/// Outside of a composition there is no frame to wait for, so `effect` runs
/// immediately.
pub fn side_effect(effect: impl FnOnce() + 'static) {
    if let Err(effect) = runtime::enqueue_effect(Box::new(effect)) {
        log::debug!("side_effect: no active composition; running immediately");
        effect();
    }
}

/// Post-commit effect with cleanup; re-runs when `key` changes and cleans up
/// on key change or unmount.
pub fn disposable_effect<K: PartialEq + Clone + 'static>(
    key: K,
    effect: impl FnOnce() -> Dispose + 'static,
) {
    // Slot-based. Keep call order stable or the slots shift.
    let last_key = remember(|| RefCell::new(None::<K>));
    let cleanup_slot = remember(|| RefCell::new(None::<Dispose>));
    let installed = remember(|| Cell::new(false));

    // One unmount hook per callsite; it runs whatever cleanup is current.
    if !installed.replace(true) {
        let cleanup_slot = cleanup_slot.clone();
        on_dispose(move || {
            let cleanup = cleanup_slot.borrow_mut().take();
            if let Some(d) = cleanup {
                d.run();
            }
        });
    }

    let changed = last_key.borrow().as_ref() != Some(&key);
    if changed {
        *last_key.borrow_mut() = Some(key);
        side_effect(move || {
            let stale = cleanup_slot.borrow_mut().take();
            if let Some(d) = stale {
                d.run();
            }
            let d = effect();
            *cleanup_slot.borrow_mut() = Some(d);
        });
    }
}
