//! Graph data model shared by the reconciliation engine and its hosts.
//!
//! The engine only ever mutates slot membership, slot labels, widgets and
//! node titles. Geometry (`pos`/`size`) and link routing are owned by the
//! host; links are registered on the [`Graph`] and slots hold weak ids into
//! that registry.

use serde::{Deserialize, Serialize};

use crate::ids::{LinkId, NodeId};
use crate::kinds::NodeKind;

/// Which side of a node a connection change touched.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotSide {
    Input,
    Output,
}

/// A user-editable value carried by a [`Widget`].
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data")]
pub enum WidgetValue {
    Text(String),
    Bool(bool),
    Number(f64),
    /// Current choice of a selector widget; kept a member of its options.
    Select(String),
}

impl WidgetValue {
    /// Stringified view, used when a value crosses widget shapes (a text
    /// widget upgraded to a selector keeps its old value as the seed choice)
    /// and when values are rendered into titles.
    pub fn as_text(&self) -> String {
        match self {
            WidgetValue::Text(s) | WidgetValue::Select(s) => s.clone(),
            WidgetValue::Bool(b) => b.to_string(),
            WidgetValue::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() {
                    format!("{}", *n as i64)
                } else {
                    n.to_string()
                }
            }
        }
    }

    /// True for anything a host toggle/checkbox would consider on.
    pub fn is_truthy(&self) -> bool {
        match self {
            WidgetValue::Bool(b) => *b,
            WidgetValue::Number(n) => *n != 0.0,
            WidgetValue::Text(s) | WidgetValue::Select(s) => !s.is_empty(),
        }
    }
}

/// A named, user-editable control on a node.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Widget {
    pub name: String,
    pub value: WidgetValue,
    /// Choices for `Select` widgets; empty for other shapes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl Widget {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: WidgetValue::Text(value.into()),
            options: Vec::new(),
        }
    }

    pub fn toggle(name: impl Into<String>, value: bool) -> Self {
        Self {
            name: name.into(),
            value: WidgetValue::Bool(value),
            options: Vec::new(),
        }
    }

    pub fn number(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value: WidgetValue::Number(value),
            options: Vec::new(),
        }
    }

    pub fn select(name: impl Into<String>, value: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            name: name.into(),
            value: WidgetValue::Select(value.into()),
            options,
        }
    }

    #[inline]
    pub fn is_select(&self) -> bool {
        matches!(self.value, WidgetValue::Select(_))
    }
}

/// A typed input port.
///
/// `link` is a weak reference resolved through the graph's link registry;
/// `label` is presentation-only and recomputed by the label resolver on
/// every pass, so it is never authoritative state.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Slot {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<LinkId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Slot {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            link: None,
            label: None,
        }
    }

    #[inline]
    pub fn is_connected(&self) -> bool {
        self.link.is_some()
    }

    /// Label shown next to the slot; defaults to the slot name.
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }
}

/// A registered connection between an output and an input slot.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Link {
    pub id: LinkId,
    pub origin: NodeId,
    pub origin_slot: usize,
    pub dest: NodeId,
    pub dest_slot: usize,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub pos: [f32; 2],
    #[serde(default)]
    pub size: [f32; 2],
    #[serde(default)]
    pub inputs: Vec<Slot>,
    #[serde(default)]
    pub widgets: Vec<Widget>,
}

impl Node {
    pub fn new(id: NodeId, kind: NodeKind, title: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            title: title.into(),
            pos: [0.0, 0.0],
            size: [0.0, 0.0],
            inputs: Vec::new(),
            widgets: Vec::new(),
        }
    }

    /// Linear scan; widget lists are short and ordered.
    pub fn widget(&self, name: &str) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.name == name)
    }

    pub fn widget_mut(&mut self, name: &str) -> Option<&mut Widget> {
        self.widgets.iter_mut().find(|w| w.name == name)
    }

    pub fn widget_position(&self, name: &str) -> Option<usize> {
        self.widgets.iter().position(|w| w.name == name)
    }

    pub fn input(&self, index: usize) -> Option<&Slot> {
        self.inputs.get(index)
    }
}

/// The whole editor document: nodes plus the link registry.
///
/// Lookups are linear; editor graphs stay small and the `Vec` layout keeps
/// the serialized form an ordinary JSON array.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Graph {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub links: Vec<Link>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn link(&self, id: LinkId) -> Option<&Link> {
        self.links.iter().find(|l| l.id == id)
    }

    /// Walk a slot's weak link id to the node on its origin side. Either hop
    /// can fail on a half-restored graph; callers fall back to defaults.
    pub fn resolve_origin(&self, link: LinkId) -> Option<&Node> {
        let link = self.link(link)?;
        self.node(link.origin)
    }

    pub fn insert_node(&mut self, node: Node) {
        self.nodes.push(node);
    }

    pub fn remove_node(&mut self, id: NodeId) -> Option<Node> {
        let pos = self.nodes.iter().position(|n| n.id == id)?;
        Some(self.nodes.remove(pos))
    }

    /// Ids of every link touching `id` on either side.
    pub fn incident_links(&self, id: NodeId) -> Vec<LinkId> {
        self.links
            .iter()
            .filter(|l| l.origin == id || l.dest == id)
            .map(|l| l.id)
            .collect()
    }

    /// Register a link and point the destination slot at it. Callers
    /// validate endpoints beforehand; a missing slot leaves the registry
    /// entry in place and the slot untouched.
    pub fn add_link(&mut self, link: Link) {
        if let Some(slot) = self
            .node_mut(link.dest)
            .and_then(|n| n.inputs.get_mut(link.dest_slot))
        {
            slot.link = Some(link.id);
        }
        self.links.push(link);
    }

    /// Unregister a link and clear the destination slot that references it.
    pub fn remove_link(&mut self, id: LinkId) -> Option<Link> {
        let pos = self.links.iter().position(|l| l.id == id)?;
        let link = self.links.remove(pos);
        if let Some(slot) = self
            .node_mut(link.dest)
            .and_then(|n| n.inputs.get_mut(link.dest_slot))
        {
            if slot.link == Some(id) {
                slot.link = None;
            }
        }
        Some(link)
    }
}
