//! Rendered view tree for the editing surface.
//!
//! The view is an arena of addressable nodes with parent links: one surface
//! root, one flat line container per document line, and text leaves.
//! Decoration text (indent padding, heading hashes) is presentation-only and
//! never counts toward logical columns.

pub mod mapper;

pub use mapper::{to_logical_position, to_view_position};

use crate::error::NoteError;
use crate::model::{Document, Line};
use serde::{Deserialize, Serialize};

/// Index of a node inside a [`RenderedView`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub usize);

/// Whether a text leaf carries logical content or presentation markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextRole {
    Content,
    Decoration,
}

/// Structural attributes a line container carries so the model can be
/// rebuilt from the view alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineAttrs {
    pub index: usize,
    pub indentation: usize,
    pub section_level: u8,
    pub format_needed: bool,
    pub file_raw: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    Surface { trailing_newline: bool },
    Line(LineAttrs),
    Text { text: String, role: TextRole },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewNode {
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub kind: NodeKind,
}

/// Caret addressed against the rendered view.
///
/// `offset` is a char offset inside text nodes and a child index inside
/// container nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViewCaret {
    pub node: NodeId,
    pub offset: usize,
}

impl ViewCaret {
    pub fn new(node: NodeId, offset: usize) -> Self {
        Self { node, offset }
    }
}

/// Arena-backed rendered surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedView {
    nodes: Vec<ViewNode>,
}

const ROOT: NodeId = NodeId(0);

impl RenderedView {
    /// Render a document into a fresh view tree.
    pub fn render(document: &Document) -> Self {
        let mut view = Self {
            nodes: vec![ViewNode {
                parent: None,
                children: Vec::new(),
                kind: NodeKind::Surface {
                    trailing_newline: document.has_trailing_newline(),
                },
            }],
        };
        for (index, line) in document.lines().iter().enumerate() {
            view.push_line(index, line);
        }
        view
    }

    fn push_node(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(ViewNode {
            parent: Some(parent),
            children: Vec::new(),
            kind,
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    fn push_text(&mut self, parent: NodeId, text: String, role: TextRole) {
        if !text.is_empty() {
            self.push_node(parent, NodeKind::Text { text, role });
        }
    }

    fn push_line(&mut self, index: usize, line: &Line) {
        let container = self.push_node(
            ROOT,
            NodeKind::Line(LineAttrs {
                index,
                indentation: line.indentation,
                section_level: line.heading_level().unwrap_or(0),
                format_needed: line.is_format_needed,
                file_raw: line.file_raw.clone(),
            }),
        );
        if line.is_format_needed {
            self.push_text(container, line.file_raw.clone(), TextRole::Content);
            return;
        }
        self.push_text(container, " ".repeat(line.indentation), TextRole::Decoration);
        self.push_text(container, line.heading_marker(), TextRole::Decoration);
        self.push_text(container, line.inner_text.clone(), TextRole::Content);
    }

    /// The surface root node.
    pub fn root(&self) -> NodeId {
        ROOT
    }

    pub fn node(&self, id: NodeId) -> Option<&ViewNode> {
        self.nodes.get(id.0)
    }

    /// Line containers in document order.
    pub fn line_nodes(&self) -> &[NodeId] {
        self.nodes
            .first()
            .map(|root| root.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn line_count(&self) -> usize {
        self.line_nodes().len()
    }

    /// Container node for a line index.
    pub fn line_node(&self, index: usize) -> Option<NodeId> {
        self.line_nodes().get(index).copied()
    }

    /// Nearest line container at or above `id`, with its line index.
    pub fn enclosing_line(&self, id: NodeId) -> Option<(usize, NodeId)> {
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.node(node_id)?;
            if let NodeKind::Line(attrs) = &node.kind {
                return Some((attrs.index, node_id));
            }
            current = node.parent;
        }
        None
    }

    /// Text leaves under `id` in document order.
    pub fn text_leaves(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_text_leaves(id, &mut out);
        out
    }

    fn collect_text_leaves(&self, id: NodeId, out: &mut Vec<NodeId>) {
        let Some(node) = self.node(id) else {
            return;
        };
        match &node.kind {
            NodeKind::Text { .. } => out.push(id),
            _ => {
                for child in &node.children {
                    self.collect_text_leaves(*child, out);
                }
            }
        }
    }

    /// Chars of logical content held by a text node (`0` for decoration).
    pub(crate) fn content_len(&self, id: NodeId) -> usize {
        match self.node(id).map(|node| &node.kind) {
            Some(NodeKind::Text {
                text,
                role: TextRole::Content,
            }) => text.chars().count(),
            _ => 0,
        }
    }

    /// Logical content of one line container.
    pub fn line_content(&self, line: NodeId) -> String {
        let mut out = String::new();
        for leaf in self.text_leaves(line) {
            if let Some(NodeKind::Text {
                text,
                role: TextRole::Content,
            }) = self.node(leaf).map(|node| &node.kind)
            {
                out.push_str(text);
            }
        }
        out
    }

    /// Everything the surface displays, decoration included, one line per row.
    pub fn plain_text(&self) -> String {
        self.line_nodes()
            .iter()
            .map(|line| {
                self.text_leaves(*line)
                    .into_iter()
                    .filter_map(|leaf| match self.node(leaf).map(|node| &node.kind) {
                        Some(NodeKind::Text { text, .. }) => Some(text.as_str()),
                        _ => None,
                    })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Rebuild the document model from the line containers.
    pub fn to_document(&self) -> Document {
        let trailing_newline = matches!(
            self.node(ROOT).map(|node| &node.kind),
            Some(NodeKind::Surface {
                trailing_newline: true
            })
        );
        let lines = self
            .line_nodes()
            .iter()
            .filter_map(|id| {
                let NodeKind::Line(attrs) = &self.node(*id)?.kind else {
                    return None;
                };
                let content = self.line_content(*id);
                let line = if attrs.format_needed {
                    Line::passthrough(&attrs.file_raw)
                } else {
                    Line {
                        inner_text: content,
                        file_raw: attrs.file_raw.clone(),
                        indentation: attrs.indentation,
                        is_heading: attrs.section_level > 0,
                        section_level: attrs.section_level,
                        is_format_needed: false,
                    }
                };
                Some(line)
            })
            .collect();
        Document::from_lines(lines, trailing_newline)
    }

    /// Split a text node at a char offset, as a surface does when it wraps
    /// part of a run in new markup. Plain text is unchanged.
    ///
    /// # Returns
    /// The id of the new node holding the tail, or `None` when `id` is not a
    /// text node or `offset` is not strictly inside it.
    pub fn split_text(&mut self, id: NodeId, offset: usize) -> Option<NodeId> {
        let node = self.node(id)?;
        let parent = node.parent?;
        let NodeKind::Text { text, role } = &node.kind else {
            return None;
        };
        let len = text.chars().count();
        if offset == 0 || offset >= len {
            return None;
        }
        let split_at = crate::model::line::char_to_byte(text, offset);
        let tail = text[split_at..].to_string();
        let head = text[..split_at].to_string();
        let role = *role;

        let new_id = NodeId(self.nodes.len());
        self.nodes.push(ViewNode {
            parent: Some(parent),
            children: Vec::new(),
            kind: NodeKind::Text { text: tail, role },
        });
        self.nodes[id.0].kind = NodeKind::Text { text: head, role };
        let siblings = &mut self.nodes[parent.0].children;
        let position = siblings.iter().position(|child| *child == id)?;
        siblings.insert(position + 1, new_id);
        Some(new_id)
    }

    /// Serialize the view as snapshot markup.
    pub fn to_markup(&self) -> Result<String, NoteError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode snapshot markup produced by [`RenderedView::to_markup`].
    pub fn from_markup(markup: &str) -> Result<Self, NoteError> {
        Ok(serde_json::from_str(markup)?)
    }
}
