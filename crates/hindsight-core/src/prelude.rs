pub use crate::effects::{Dispose, disposable_effect, on_unmount, side_effect};
pub use crate::error::*;
pub use crate::previous::{CellState, RetentionCell, use_previous, use_previous_with_key};
pub use crate::runtime::{
    ComposeGuard, Frame, FrameMetrics, HitRegion, Invalidator, Scheduler, SemNode, remember,
    remember_state, remember_state_with_key, remember_with_key, try_remember,
};
pub use crate::scope::{Scope, current_scope, on_dispose};
pub use crate::semantics::{Role, Semantics};
pub use crate::signal::{Signal, signal};
pub use crate::view::{Callback, Scene, SceneNode, View, ViewId, ViewKind};
