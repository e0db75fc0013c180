use std::collections::HashSet;

use hindsight_core::*;

/// Lays `root` out as lines of text and paints it.
///
/// Columns and boxes put each child on its own line; rows keep children on
/// the current line. Views without a pinned id get one in tree order, so ids
/// are stable as long as the tree shape is. Generated ids never take an id
/// pinned anywhere in the tree; a pinned id seen twice is kept by the first
/// view and the second gets a generated one.
pub fn layout_and_paint(root: &View) -> (Scene, Vec<HitRegion>, Vec<SemNode>) {
    let mut cx = PaintCx::default();
    collect_pinned(root, &mut cx.pinned);
    cx.paint(root);
    log::trace!(
        "layout_and_paint: {} node(s), {} hit region(s)",
        cx.scene.nodes.len(),
        cx.hits.len()
    );
    (cx.scene, cx.hits, cx.sem)
}

fn collect_pinned(view: &View, pinned: &mut HashSet<ViewId>) {
    if view.id != 0 {
        pinned.insert(view.id);
    }
    for child in &view.children {
        collect_pinned(child, pinned);
    }
}

#[derive(Default)]
struct PaintCx {
    next_id: ViewId,
    pinned: HashSet<ViewId>,
    assigned: HashSet<ViewId>,
    line: usize,
    // Something was emitted on `line`.
    line_used: bool,
    scene: Scene,
    hits: Vec<HitRegion>,
    sem: Vec<SemNode>,
}

impl PaintCx {
    fn id_for(&mut self, view: &View) -> ViewId {
        if view.id != 0 {
            if self.assigned.insert(view.id) {
                return view.id;
            }
            log::warn!("view id {} pinned more than once; assigning a fresh one", view.id);
        }
        loop {
            self.next_id += 1;
            let id = self.next_id;
            if !self.pinned.contains(&id) && self.assigned.insert(id) {
                return id;
            }
        }
    }

    fn paint(&mut self, view: &View) {
        let id = self.id_for(view);
        let line = self.line;
        let mut own_text = None;

        match &view.kind {
            ViewKind::Text { text } => {
                self.scene.nodes.push(SceneNode::Text {
                    line,
                    text: text.clone(),
                });
                self.line_used = true;
                own_text = Some(text);
            }
            ViewKind::Button { text, on_click } => {
                self.scene.nodes.push(SceneNode::Button {
                    line,
                    id,
                    label: text.clone(),
                });
                self.hits.push(HitRegion {
                    id,
                    label: text.clone(),
                    line,
                    on_click: on_click.clone(),
                });
                self.line_used = true;
                own_text = Some(text);
            }
            ViewKind::Column | ViewKind::Box => {
                self.break_line();
                for child in &view.children {
                    self.paint(child);
                    self.break_line();
                }
            }
            ViewKind::Row => {
                for child in &view.children {
                    self.paint(child);
                }
            }
        }

        if let Some(s) = &view.semantics {
            self.sem.push(SemNode {
                id,
                role: s.role,
                label: s.label.clone().or_else(|| own_text.cloned()),
                line,
                enabled: s.enabled,
            });
        }
    }

    fn break_line(&mut self) {
        if self.line_used {
            self.line += 1;
            self.line_used = false;
        }
    }
}
