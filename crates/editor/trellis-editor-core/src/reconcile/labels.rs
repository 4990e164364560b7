//! Label resolution: derive a human-readable label for a connected slot from
//! the node on the other end of its link.

use crate::ids::NodeId;
use crate::kinds::FamilySpec;
use crate::text::clean_label;
use crate::types::{Graph, Slot};

/// Resolve the display label for one slot. `None` means "use the default",
/// which is the slot's own name.
///
/// Read-only and infallible: a dangling link id, a missing origin node, or a
/// widget of an unexpected shape all land on the default. First match wins:
/// the origin's non-empty `trigger` widget, then the origin's title when it
/// differs from its kind's placeholder.
pub fn resolve_label(graph: &Graph, slot: &Slot) -> Option<String> {
    let link = slot.link?;
    let origin = graph.resolve_origin(link)?;

    if let Some(widget) = origin.widget("trigger") {
        let label = clean_label(&widget.value.as_text());
        if !label.is_empty() {
            return Some(label);
        }
        // Whitespace-only cleans to empty and falls through to the title.
    }

    let title = clean_label(&origin.title);
    if !title.is_empty() && title != origin.kind.placeholder_title() {
        return Some(title);
    }
    None
}

/// Recompute the labels of every family slot (and the fixed lead, when the
/// kind has one) on `node_id`. Labels are derived state: each pass starts
/// from the default, so stale labels never survive a disconnect.
///
/// Runs in two phases, resolving against the shared graph first and writing
/// back after, and reports whether anything actually changed.
pub fn refresh_labels(graph: &mut Graph, node_id: NodeId, family: &FamilySpec) -> bool {
    let Some(node) = graph.node(node_id) else {
        return false;
    };

    let mut updates: Vec<(usize, Option<String>)> = Vec::new();
    for (i, slot) in node.inputs.iter().enumerate() {
        let owned = family.owns(&slot.name)
            || family.lead.map(|l| l.name == slot.name).unwrap_or(false);
        if !owned {
            continue;
        }
        let resolved = resolve_label(graph, slot);
        if resolved != slot.label {
            updates.push((i, resolved));
        }
    }
    if updates.is_empty() {
        return false;
    }

    let Some(node) = graph.node_mut(node_id) else {
        return false;
    };
    for (i, label) in updates {
        if let Some(slot) = node.inputs.get_mut(i) {
            slot.label = label;
        }
    }
    true
}
