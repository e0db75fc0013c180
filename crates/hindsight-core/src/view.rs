use std::fmt;
use std::rc::Rc;

pub type ViewId = u64;

pub type Callback = Rc<dyn Fn()>;

#[derive(Clone)]
pub enum ViewKind {
    Box,
    Row,
    Column,
    Text {
        text: String,
    },
    Button {
        text: String,
        on_click: Option<Callback>,
    },
}

impl fmt::Debug for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewKind::Box => write!(f, "Box"),
            ViewKind::Row => write!(f, "Row"),
            ViewKind::Column => write!(f, "Column"),
            ViewKind::Text { text } => f.debug_struct("Text").field("text", text).finish(),
            ViewKind::Button { text, on_click } => f
                .debug_struct("Button")
                .field("text", text)
                .field("on_click", &on_click.as_ref().map(|_| "<callback>"))
                .finish(),
        }
    }
}

/// A node of the declarative tree returned by a component.
///
/// `id` is 0 unless the caller pins one; layout assigns ids in tree order.
#[derive(Clone, Debug)]
pub struct View {
    pub id: ViewId,
    pub kind: ViewKind,
    pub children: Vec<View>,
    pub semantics: Option<crate::semantics::Semantics>,
}

impl View {
    pub fn new(id: ViewId, kind: ViewKind) -> Self {
        View {
            id,
            kind,
            children: vec![],
            semantics: None,
        }
    }
    pub fn with_id(mut self, id: ViewId) -> Self {
        self.id = id;
        self
    }
    pub fn with_children(mut self, kids: Vec<View>) -> Self {
        self.children = kids;
        self
    }
    pub fn child(mut self, kid: View) -> Self {
        self.children.push(kid);
        self
    }
    pub fn semantics(mut self, s: crate::semantics::Semantics) -> Self {
        self.semantics = Some(s);
        self
    }
}

/// Rendered output of one frame: text runs placed on lines.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Scene {
    pub nodes: Vec<SceneNode>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SceneNode {
    Text { line: usize, text: String },
    Button { line: usize, id: ViewId, label: String },
}

impl SceneNode {
    pub fn line(&self) -> usize {
        match self {
            SceneNode::Text { line, .. } | SceneNode::Button { line, .. } => *line,
        }
    }
}

impl Scene {
    /// Runs sharing a line are joined with a single space.
    pub fn lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = Vec::new();
        for node in &self.nodes {
            let line = node.line();
            if lines.len() <= line {
                lines.resize(line + 1, String::new());
            }
            let out = &mut lines[line];
            if !out.is_empty() {
                out.push(' ');
            }
            match node {
                SceneNode::Text { text, .. } => out.push_str(text),
                SceneNode::Button { label, .. } => {
                    out.push('[');
                    out.push_str(label);
                    out.push(']');
                }
            }
        }
        lines
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines().join("\n"))
    }
}
