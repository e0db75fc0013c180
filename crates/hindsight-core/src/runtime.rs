use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use smallvec::SmallVec;
use web_time::Instant;

use crate::error::RuntimeError;
use crate::scope::Scope;
use crate::{Scene, View, ViewId, semantics::Role};

thread_local! {
    static COMPOSER: RefCell<Option<Composer>> = const { RefCell::new(None) };
}

pub type Effect = Box<dyn FnOnce()>;

/// Slot storage for one component tree. Owned by a `Scheduler` and installed
/// on the thread only while that scheduler composes.
#[derive(Default)]
pub struct Composer {
    pub slots: Vec<Box<dyn Any>>,
    pub cursor: usize,
    pub keyed_slots: HashMap<String, Box<dyn Any>>,
    pending_effects: SmallVec<[Effect; 4]>,
    invalidator: Invalidator,
}

impl Composer {
    fn take_effects(&mut self) -> SmallVec<[Effect; 4]> {
        std::mem::take(&mut self.pending_effects)
    }
}

/// Shared "needs another frame" flag.
#[derive(Clone, Default)]
pub struct Invalidator(Rc<Cell<bool>>);

impl Invalidator {
    pub fn invalidate(&self) {
        self.0.set(true);
    }

    pub fn is_invalid(&self) -> bool {
        self.0.get()
    }

    fn clear(&self) {
        self.0.set(false);
    }
}

pub struct ComposeGuard {
    scope: Scope,
    outer: Option<Composer>,
    finished: bool,
}

impl ComposeGuard {
    /// Installs `composer` as the active composition on this thread. Any
    /// composition already active is parked and restored by `finish`.
    pub fn begin(mut composer: Composer, scope: Scope) -> Self {
        composer.cursor = 0;
        let outer = COMPOSER.with(|c| c.borrow_mut().replace(composer));
        ComposeGuard {
            scope,
            outer,
            finished: false,
        }
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn finish(mut self) -> Composer {
        self.finished = true;
        let outer = self.outer.take();
        COMPOSER
            .with(|c| std::mem::replace(&mut *c.borrow_mut(), outer))
            .unwrap_or_default()
    }
}

impl Drop for ComposeGuard {
    fn drop(&mut self) {
        if !self.finished {
            // Unwinding out of a composition; its slots are lost.
            let outer = self.outer.take();
            let lost = COMPOSER.with(|c| std::mem::replace(&mut *c.borrow_mut(), outer));
            if let Some(lost) = lost {
                log::error!(
                    "composition unwound: dropping {} slot(s), {} keyed slot(s), {} queued effect(s)",
                    lost.slots.len(),
                    lost.keyed_slots.len(),
                    lost.pending_effects.len()
                );
            }
        }
    }
}

fn with_composer<R>(f: impl FnOnce(&mut Composer) -> R) -> Option<R> {
    COMPOSER.with(|c| c.borrow_mut().as_mut().map(f))
}

pub fn is_composing() -> bool {
    COMPOSER.with(|c| c.borrow().is_some())
}

pub fn current_invalidator() -> Option<Invalidator> {
    with_composer(|c| c.invalidator.clone())
}

/// Queues `effect` on the active composition, or hands it back when there
/// is none.
pub(crate) fn enqueue_effect(effect: Effect) -> Result<(), Effect> {
    COMPOSER.with(|c| match c.borrow_mut().as_mut() {
        Some(composer) => {
            composer.pending_effects.push(effect);
            Ok(())
        }
        None => Err(effect),
    })
}

enum SlotLookup<T> {
    Hit(Rc<T>),
    Miss { cursor: usize },
}

/// Slot-based remember (sequential composition only)
///
/// `init` runs with no borrow held, so it may itself call `remember` or
/// `signal`.
pub fn remember<T: 'static>(init: impl FnOnce() -> T) -> Rc<T> {
    let lookup = with_composer(|c| {
        let cursor = c.cursor;
        c.cursor += 1;
        match c.slots.get(cursor) {
            Some(slot) => match slot.downcast_ref::<Rc<T>>() {
                Some(rc) => SlotLookup::Hit(rc.clone()),
                None => {
                    log::warn!(
                        "remember: slot {} type changed; replacing. \
                         If this is due to conditional composition, prefer remember_with_key.",
                        cursor
                    );
                    SlotLookup::Miss { cursor }
                }
            },
            None => SlotLookup::Miss { cursor },
        }
    });

    match lookup {
        Some(SlotLookup::Hit(rc)) => rc,
        Some(SlotLookup::Miss { cursor }) => {
            let rc: Rc<T> = Rc::new(init());
            let stored = rc.clone();
            with_composer(move |c| {
                if cursor < c.slots.len() {
                    c.slots[cursor] = Box::new(stored);
                } else {
                    c.slots.push(Box::new(stored));
                }
            });
            rc
        }
        None => {
            log::warn!("remember: called outside composition; value will not be retained");
            Rc::new(init())
        }
    }
}

/// Like `remember`, but refuses to run outside a composition.
pub fn try_remember<T: 'static>(init: impl FnOnce() -> T) -> Result<Rc<T>, RuntimeError> {
    if !is_composing() {
        return Err(RuntimeError::NotComposing);
    }
    Ok(remember(init))
}

/// Key-based remember
pub fn remember_with_key<T: 'static>(key: impl Into<String>, init: impl FnOnce() -> T) -> Rc<T> {
    let key = key.into();
    let existing = with_composer(|c| match c.keyed_slots.get(&key) {
        Some(slot) => match slot.downcast_ref::<Rc<T>>() {
            Some(rc) => Some(rc.clone()),
            None => {
                log::warn!(
                    "remember_with_key: key '{}' reused with a different type; replacing.",
                    key
                );
                None
            }
        },
        None => None,
    });

    match existing {
        Some(Some(rc)) => rc,
        Some(None) => {
            let rc: Rc<T> = Rc::new(init());
            let stored = rc.clone();
            with_composer(move |c| {
                c.keyed_slots.insert(key, Box::new(stored));
            });
            rc
        }
        None => {
            log::warn!("remember_with_key: '{key}' used outside composition; value will not be retained");
            Rc::new(init())
        }
    }
}

pub fn remember_state<T: 'static>(init: impl FnOnce() -> T) -> Rc<RefCell<T>> {
    remember(|| RefCell::new(init()))
}

pub fn remember_state_with_key<T: 'static>(
    key: impl Into<String>,
    init: impl FnOnce() -> T,
) -> Rc<RefCell<T>> {
    remember_with_key(key, || RefCell::new(init()))
}

/// Output of one rendering cycle: scene plus input and semantics.
pub struct Frame {
    pub number: u64,
    pub scene: Scene,
    pub hit_regions: Vec<HitRegion>,
    pub semantics_nodes: Vec<SemNode>,
    pub metrics: FrameMetrics,
}

impl Frame {
    pub fn text(&self) -> String {
        self.scene.to_string()
    }
}

#[derive(Clone)]
pub struct HitRegion {
    pub id: ViewId,
    pub label: String,
    pub line: usize,
    pub on_click: Option<Rc<dyn Fn()>>,
}

impl std::fmt::Debug for HitRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HitRegion")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("line", &self.line)
            .field("clickable", &self.on_click.is_some())
            .finish()
    }
}

/// Flattened semantics node produced by layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SemNode {
    /// Stable id, shared with the associated `HitRegion`.
    pub id: ViewId,
    pub role: Role,
    pub label: Option<String>,
    pub line: usize,
    pub enabled: bool,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct FrameMetrics {
    pub compose_ms: f32,
    pub render_ms: f32,
    pub effects_run: usize,
    pub slots: usize,
}

pub struct Scheduler {
    composer: Composer,
    scope: Scope,
    frame_no: u64,
    unmounted: bool,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            composer: Composer::default(),
            scope: Scope::new(),
            frame_no: 0,
            unmounted: false,
        }
    }

    /// Frames produced so far.
    pub fn frame_no(&self) -> u64 {
        self.frame_no
    }

    pub fn is_mounted(&self) -> bool {
        self.frame_no > 0 && !self.unmounted
    }

    pub fn invalidator(&self) -> Invalidator {
        self.composer.invalidator.clone()
    }

    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    /// True before the first frame and after anything invalidated the last
    /// one.
    pub fn needs_recompose(&self) -> bool {
        !self.unmounted && (self.frame_no == 0 || self.composer.invalidator.is_invalid())
    }

    /// Runs one rendering cycle.
    ///
    /// `build_root` composes the tree, `render` turns it into output, and
    /// only then are the effects queued during composition run.
    pub fn repose<F>(
        &mut self,
        mut build_root: F,
        render: impl FnOnce(&View) -> (Scene, Vec<HitRegion>, Vec<SemNode>),
    ) -> Result<Frame, RuntimeError>
    where
        F: FnMut(&mut Scheduler) -> View,
    {
        if self.unmounted {
            return Err(RuntimeError::Unmounted {
                frames: self.frame_no,
            });
        }
        if self.frame_no == 0 {
            log::info!("mounting root composition");
        }

        let t0 = Instant::now();
        // Writes made while composing must still schedule the next frame.
        self.composer.invalidator.clear();
        let guard = ComposeGuard::begin(std::mem::take(&mut self.composer), self.scope.clone());
        let scope = guard.scope().clone();
        let root = scope.run(|| build_root(self));
        self.composer = guard.finish();
        let compose_ms = t0.elapsed().as_secs_f32() * 1000.0;

        let t1 = Instant::now();
        let (scene, hits, sem) = render(&root);
        let render_ms = t1.elapsed().as_secs_f32() * 1000.0;

        // Output exists; now the post-commit work.
        let effects = self.composer.take_effects();
        let effects_run = effects.len();
        for effect in effects {
            effect();
        }

        self.frame_no += 1;
        let metrics = FrameMetrics {
            compose_ms,
            render_ms,
            effects_run,
            slots: self.composer.slots.len() + self.composer.keyed_slots.len(),
        };
        log::debug!(
            "frame {}: compose {:.3} ms, render {:.3} ms, {} effect(s), {} slot(s)",
            self.frame_no,
            metrics.compose_ms,
            metrics.render_ms,
            metrics.effects_run,
            metrics.slots
        );

        Ok(Frame {
            number: self.frame_no,
            scene,
            hit_regions: hits,
            semantics_nodes: sem,
            metrics,
        })
    }

    /// Runs every cleanup registered on the root scope and drops all slots.
    /// The scheduler refuses to compose afterwards.
    pub fn unmount(&mut self) {
        if self.unmounted {
            return;
        }
        self.unmounted = true;
        let scope = std::mem::take(&mut self.scope);
        scope.dispose();
        let composer = std::mem::take(&mut self.composer);
        drop(composer);
        if self.frame_no > 0 {
            log::info!("unmounted after {} frame(s)", self.frame_no);
        }
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.unmount();
    }
}
