//! Preset node upkeep: keep the `preset` choice a member of its option list
//! and derive the node title from the active mode.
//!
//! With `manual_override` on, the title shows the manual dimensions;
//! otherwise it shows the (possibly just repaired) preset choice.

use crate::events::{EditorCx, EditorEvent, NodeBehavior};
use crate::ids::NodeId;
use crate::kinds::NodeKind;
use crate::types::WidgetValue;

pub struct PresetTitle {
    kind: NodeKind,
}

impl PresetTitle {
    pub fn new() -> Self {
        Self {
            kind: NodeKind::Preset,
        }
    }

    fn refresh(&self, cx: &mut EditorCx<'_>, node_id: NodeId) {
        let Some(node) = cx.graph.node(node_id) else {
            return;
        };
        if node.kind != self.kind {
            return;
        }

        // A selector value outside its options is pulled back to the first
        // option. Widgets of another shape (or with no options to offer)
        // are left as they are.
        let mut repaired: Option<String> = None;
        if let Some(widget) = node.widget("preset") {
            if widget.is_select() && !widget.options.is_empty() {
                let current = widget.value.as_text();
                if !widget.options.iter().any(|o| *o == current) {
                    repaired = Some(widget.options[0].clone());
                }
            }
        }

        let base = self.kind.placeholder_title();
        let manual = node
            .widget("manual_override")
            .map(|w| w.value.is_truthy())
            .unwrap_or(false);
        let suffix = if manual {
            let width = node
                .widget("width")
                .map(|w| w.value.as_text())
                .unwrap_or_default();
            let height = node
                .widget("height")
                .map(|w| w.value.as_text())
                .unwrap_or_default();
            format!("Manual {}×{}", width, height)
        } else {
            repaired
                .clone()
                .or_else(|| node.widget("preset").map(|w| w.value.as_text()))
                .unwrap_or_default()
        };
        let title = if suffix.is_empty() {
            base.to_string()
        } else {
            format!("{} ({})", base, suffix)
        };

        let title_changed = node.title != title;
        if repaired.is_none() && !title_changed {
            return;
        }

        let Some(node) = cx.graph.node_mut(node_id) else {
            return;
        };
        if let Some(value) = repaired {
            if let Some(widget) = node.widget_mut("preset") {
                widget.value = WidgetValue::Select(value);
            }
        }
        if title_changed {
            node.title = title;
        }
        cx.mark_dirty();
    }
}

impl Default for PresetTitle {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeBehavior for PresetTitle {
    fn name(&self) -> &'static str {
        "preset-title"
    }

    fn on_event(&mut self, cx: &mut EditorCx<'_>, event: &EditorEvent) {
        match event {
            EditorEvent::NodeCreated { node }
            | EditorEvent::Configured { node }
            | EditorEvent::WidgetChanged { node, .. } => {
                self.refresh(cx, *node);
            }
            _ => {}
        }
    }
}
