//! The reconciliation pipeline.
//!
//! Order matters and is fixed: slot structure first, then labels (they read
//! the structure), then the selector widget (it reads the labels). Each
//! stage is idempotent, so the pipeline as a whole is too.

pub mod labels;
pub mod selector;
pub mod slots;

pub use labels::{refresh_labels, resolve_label};
pub use selector::sync_selector;
pub use slots::reconcile_family;

use crate::ids::NodeId;
use crate::kinds::FamilySpec;
use crate::types::Graph;

/// Full pipeline for one node: structure, labels, selector.
/// Reports whether this run changed anything; a vanished node is a no-op.
pub fn run_full(graph: &mut Graph, node_id: NodeId, family: &FamilySpec) -> bool {
    let mut changed = match graph.node_mut(node_id) {
        Some(node) => reconcile_family(node, family),
        None => return false,
    };
    changed |= refresh_labels(graph, node_id, family);
    if let Some(node) = graph.node_mut(node_id) {
        changed |= sync_selector(node, family);
    }
    changed
}

/// Presentation-only refresh: labels and selector, never structure.
/// This is the tick path; growth and shrink stay on connection events.
pub fn run_labels_only(graph: &mut Graph, node_id: NodeId, family: &FamilySpec) -> bool {
    let mut changed = refresh_labels(graph, node_id, family);
    if let Some(node) = graph.node_mut(node_id) {
        changed |= sync_selector(node, family);
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::LinkId;
    use crate::kinds::NodeKind;
    use crate::types::{Link, Node, Widget};

    #[test]
    fn full_pipeline_is_idempotent_across_stages() {
        let mut graph = Graph::new();
        let mut origin = Node::new(NodeId(0), NodeKind::Configurator, "Configurator");
        origin.widgets.push(Widget::text("trigger", "Dark Fantasy Style"));
        graph.insert_node(origin);
        graph.insert_node(NodeKind::Selector.instantiate(NodeId(1)));

        let family = NodeKind::Selector.family().expect("family");
        assert!(run_full(&mut graph, NodeId(1), &family));

        graph.add_link(Link {
            id: LinkId(0),
            origin: NodeId(0),
            origin_slot: 0,
            dest: NodeId(1),
            dest_slot: 0,
        });
        assert!(run_full(&mut graph, NodeId(1), &family));

        let snapshot = serde_json::to_string(graph.node(NodeId(1)).expect("node"))
            .expect("serialize node");
        assert!(!run_full(&mut graph, NodeId(1), &family));
        let again = serde_json::to_string(graph.node(NodeId(1)).expect("node"))
            .expect("serialize node");
        assert_eq!(snapshot, again);
    }

    #[test]
    fn labels_only_path_leaves_structure_alone() {
        let mut graph = Graph::new();
        graph.insert_node(NodeKind::Selector.instantiate(NodeId(1)));
        let family = NodeKind::Selector.family().expect("family");
        run_full(&mut graph, NodeId(1), &family);

        // Forge a connected last slot; only a full pass may grow the family.
        graph
            .node_mut(NodeId(1))
            .expect("node")
            .inputs
            .last_mut()
            .expect("seeded slot")
            .link = Some(LinkId(42));
        run_labels_only(&mut graph, NodeId(1), &family);
        assert_eq!(graph.node(NodeId(1)).expect("node").inputs.len(), 1);

        run_full(&mut graph, NodeId(1), &family);
        assert_eq!(graph.node(NodeId(1)).expect("node").inputs.len(), 2);
    }
}
