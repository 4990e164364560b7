//! The dynamic slot-family behavior shared by every family-bearing kind.
//!
//! One instance is installed per kind; the family spec from the registry is
//! the only thing that differs between them. Structural work (grow, shrink,
//! renumber) runs on creation, connection changes and configure; the tick
//! and the widget-change push path refresh labels and the selector only.

use hashbrown::HashMap;

use crate::events::{EditorCx, EditorEvent, NodeBehavior};
use crate::ids::NodeId;
use crate::kinds::{FamilySpec, NodeKind};
use crate::reconcile;
use crate::types::SlotSide;

pub struct DynamicSlots {
    kind: NodeKind,
    family: FamilySpec,
    /// Wall time of the last tick-driven refresh, per node.
    last_refresh: HashMap<NodeId, u64>,
}

impl DynamicSlots {
    /// Behavior instance for one kind; `None` when the kind has no family.
    pub fn for_kind(kind: NodeKind) -> Option<Self> {
        kind.family().map(|family| Self {
            kind,
            family,
            last_refresh: HashMap::new(),
        })
    }

    fn is_mine(&self, cx: &EditorCx<'_>, node: NodeId) -> bool {
        cx.graph
            .node(node)
            .map(|n| n.kind == self.kind)
            .unwrap_or(false)
    }

    fn run_full(&self, cx: &mut EditorCx<'_>, node: NodeId) {
        if reconcile::run_full(cx.graph, node, &self.family) {
            cx.mark_dirty();
        }
    }

    /// Labels and selector for every node of this kind whose refresh window
    /// has elapsed. Early nodes are skipped, never queued.
    fn tick(&mut self, cx: &mut EditorCx<'_>, now_ms: u64) {
        let ids: Vec<NodeId> = cx
            .graph
            .nodes
            .iter()
            .filter(|n| n.kind == self.kind)
            .map(|n| n.id)
            .collect();
        for id in ids {
            let due = match self.last_refresh.get(&id) {
                Some(&last) => now_ms.saturating_sub(last) >= cx.config.label_refresh_ms,
                None => true,
            };
            if !due {
                continue;
            }
            self.last_refresh.insert(id, now_ms);
            if reconcile::run_labels_only(cx.graph, id, &self.family) {
                cx.mark_dirty();
            }
        }
    }

    /// Push-path refresh: an upstream node's `trigger` widget changed, so
    /// every node of this kind fed by it re-resolves labels immediately
    /// instead of waiting out the next tick window.
    fn refresh_dependents(&self, cx: &mut EditorCx<'_>, origin: NodeId) {
        let mut dependents: Vec<NodeId> = cx
            .graph
            .links
            .iter()
            .filter(|l| l.origin == origin)
            .map(|l| l.dest)
            .collect();
        dependents.sort();
        dependents.dedup();
        for id in dependents {
            if !self.is_mine(cx, id) {
                continue;
            }
            if reconcile::run_labels_only(cx.graph, id, &self.family) {
                cx.mark_dirty();
            }
        }
    }
}

impl NodeBehavior for DynamicSlots {
    fn name(&self) -> &'static str {
        match self.kind {
            NodeKind::Selector => "dynamic-slots/selector",
            NodeKind::Concat => "dynamic-slots/concat",
            NodeKind::Mixer => "dynamic-slots/mixer",
            _ => "dynamic-slots",
        }
    }

    fn on_event(&mut self, cx: &mut EditorCx<'_>, event: &EditorEvent) {
        match event {
            EditorEvent::NodeCreated { node } | EditorEvent::Configured { node } => {
                if self.is_mine(cx, *node) {
                    self.run_full(cx, *node);
                }
            }
            EditorEvent::ConnectionsChanged { node, side, .. } => {
                // Output-side notifications never reconcile the origin.
                if *side == SlotSide::Input && self.is_mine(cx, *node) {
                    self.run_full(cx, *node);
                }
            }
            EditorEvent::WidgetChanged { node, widget } => {
                if widget == "trigger" {
                    self.refresh_dependents(cx, *node);
                }
            }
            EditorEvent::Tick { now_ms } => self.tick(cx, *now_ms),
            EditorEvent::NodeRemoved { node } => {
                self.last_refresh.remove(node);
            }
        }
    }
}
