//! Slot list control: keep a node's slot family at "every connected slot
//! plus exactly one trailing free slot".
//!
//! Every function here is total and idempotent; a second run over an already
//! reconciled node changes nothing and reports `false`.

use crate::kinds::FamilySpec;
use crate::types::{Node, Slot};

/// Indices into `node.inputs` of the family's slots, in list order.
fn family_positions(node: &Node, family: &FamilySpec) -> Vec<usize> {
    node.inputs
        .iter()
        .enumerate()
        .filter(|(_, slot)| family.owns(&slot.name))
        .map(|(i, _)| i)
        .collect()
}

fn family_len(node: &Node, family: &FamilySpec) -> usize {
    node.inputs
        .iter()
        .filter(|slot| family.owns(&slot.name))
        .count()
}

/// Length of the unconnected run at the tail of the family.
fn trailing_unconnected(node: &Node, family: &FamilySpec) -> usize {
    node.inputs
        .iter()
        .filter(|slot| family.owns(&slot.name))
        .rev()
        .take_while(|slot| !slot.is_connected())
        .count()
}

/// Restore the family's fixed lead input when a kind declares one. A missing
/// lead is inserted at slot index 0; an existing one is left where the saved
/// graph put it.
fn ensure_lead(node: &mut Node, family: &FamilySpec) -> bool {
    let Some(lead) = family.lead else {
        return false;
    };
    if node.inputs.iter().any(|slot| slot.name == lead.name) {
        return false;
    }
    node.inputs.insert(0, Slot::new(lead.name, lead.ty));
    true
}

/// Guarantee at least one family slot and positional names `<prefix>_1..k`.
/// Renumbering renames in place and never reorders, so connected slots keep
/// their indices (and therefore their registered links).
fn ensure_named(node: &mut Node, family: &FamilySpec) -> bool {
    let positions = family_positions(node, family);
    if positions.is_empty() {
        node.inputs.push(Slot::new(family.slot_name(1), family.ty));
        return true;
    }
    let misnamed = positions
        .iter()
        .enumerate()
        .any(|(i, &p)| node.inputs[p].name != family.slot_name(i + 1));
    if !misnamed {
        return false;
    }
    for (i, &p) in positions.iter().enumerate() {
        node.inputs[p].name = family.slot_name(i + 1);
    }
    true
}

/// One full structural pass: seed, renumber, grow behind the last connected
/// slot, then collapse the trailing free run to exactly one slot.
pub fn reconcile_family(node: &mut Node, family: &FamilySpec) -> bool {
    let mut changed = ensure_lead(node, family);
    changed |= ensure_named(node, family);

    let last_connected = node
        .inputs
        .iter()
        .filter(|slot| family.owns(&slot.name))
        .last()
        .map(Slot::is_connected)
        .unwrap_or(false);
    if last_connected {
        let next = family_len(node, family) + 1;
        node.inputs.push(Slot::new(family.slot_name(next), family.ty));
        changed = true;
    }

    // Collapses several stale free slots in a single pass (bulk restore),
    // but never drops the family below one slot.
    while trailing_unconnected(node, family) > 1 {
        let positions = family_positions(node, family);
        if positions.len() <= 1 {
            break;
        }
        let Some(&last) = positions.last() else {
            break;
        };
        node.inputs.remove(last);
        changed = true;
    }

    changed
}
