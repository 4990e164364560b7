//! Configurator auto-title: mirror the node's own `trigger` widget into its
//! title, so the canvas and downstream slot labels agree on the name.

use crate::events::{EditorCx, EditorEvent, NodeBehavior};
use crate::ids::NodeId;
use crate::kinds::NodeKind;
use crate::text::clean_label;

pub struct TitleSync {
    kind: NodeKind,
}

impl TitleSync {
    pub fn new() -> Self {
        Self {
            kind: NodeKind::Configurator,
        }
    }

    fn sync_title(&self, cx: &mut EditorCx<'_>, node_id: NodeId) {
        let Some(node) = cx.graph.node(node_id) else {
            return;
        };
        if node.kind != self.kind {
            return;
        }
        // Nodes without the widget keep whatever title they have.
        let Some(widget) = node.widget("trigger") else {
            return;
        };
        let cleaned = clean_label(&widget.value.as_text());
        let title = if cleaned.is_empty() {
            self.kind.placeholder_title().to_string()
        } else {
            cleaned
        };
        if node.title == title {
            return;
        }
        if let Some(node) = cx.graph.node_mut(node_id) {
            node.title = title;
        }
        cx.mark_dirty();
    }
}

impl Default for TitleSync {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeBehavior for TitleSync {
    fn name(&self) -> &'static str {
        "title-sync/configurator"
    }

    fn on_event(&mut self, cx: &mut EditorCx<'_>, event: &EditorEvent) {
        match event {
            EditorEvent::NodeCreated { node } | EditorEvent::Configured { node } => {
                self.sync_title(cx, *node);
            }
            EditorEvent::WidgetChanged { node, widget } if widget == "trigger" => {
                self.sync_title(cx, *node);
            }
            _ => {}
        }
    }
}
