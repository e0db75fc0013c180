//! # Slots, Effects, and Previous Values
//!
//! Hindsight is a tiny declarative runtime. A component is a plain function
//! that returns a `View`; it is called again on every rendering cycle, so any
//! state it needs across cycles has to live outside the call. There are four
//! pieces:
//!
//! - `remember*`: slot storage bound to composition.
//! - `Signal<T>`: observable value; writing it schedules a new cycle.
//! - `side_effect`: work deferred until the frame's output exists.
//! - `use_previous`: the value a component saw on the previous cycle.
//!
//! ## Remembered state
//!
//! ```rust
//! use hindsight_core::*;
//!
//! fn Counter() -> View {
//!     let count = remember(|| signal(0)); // Rc<Signal<i32>>
//!     View::new(0, ViewKind::Text {
//!         text: format!("Count = {}", count.get()),
//!     })
//! }
//! ```
//!
//! - `remember` and `remember_state` are order‑based: the Nth call in a
//!   composition always refers to the Nth stored value.
//! - `remember_with_key` and `remember_state_with_key` are key‑based and
//!   stable across conditional branches.
//!
//! ## Post-commit effects
//!
//! `side_effect` queues a closure on the active composition. The `Scheduler`
//! runs the queue after the frame has been rendered and before the next
//! composition starts:
//!
//! ```rust
//! use hindsight_core::*;
//!
//! let mut sched = Scheduler::new();
//! let frame = sched
//!     .repose(
//!         |_| {
//!             side_effect(|| log::debug!("frame painted"));
//!             View::new(0, ViewKind::Column)
//!         },
//!         |_| (Scene::default(), Vec::new(), Vec::new()),
//!     )
//!     .unwrap();
//! assert_eq!(frame.metrics.effects_run, 1);
//! ```
//!
//! ## Previous values
//!
//! `use_previous(value)` returns whatever was passed on the previous cycle,
//! or `None` on the first one. The update is itself a `side_effect`, so the
//! value passed in the current cycle is never visible until the next one.
//!
//! ## Cleanup
//!
//! `disposable_effect` and `on_dispose` register cleanups on the scheduler's
//! root `Scope`. They run when the scheduler is unmounted.

pub mod effects;
pub mod error;
pub mod prelude;
pub mod previous;
pub mod runtime;
pub mod scope;
pub mod semantics;
pub mod signal;
pub mod view;

pub use effects::*;
pub use error::*;
pub use prelude::*;
pub use previous::*;
pub use runtime::*;
pub use semantics::*;
pub use signal::*;
pub use view::*;
