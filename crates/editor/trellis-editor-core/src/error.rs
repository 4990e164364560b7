//! Errors surfaced by the host-facing mutation API.
//!
//! Reconciliation itself never fails; everything here flags misuse of the
//! session surface (dangling ids, bad indices) so hosts hear about their own
//! bugs instead of silently corrupting the graph.

use thiserror::Error;

use crate::ids::{LinkId, NodeId};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditorError {
    #[error("unknown node id {0}")]
    NodeNotFound(NodeId),
    #[error("unknown link id {0}")]
    LinkNotFound(LinkId),
    #[error("node {node} has no input slot {slot}")]
    SlotOutOfRange { node: NodeId, slot: usize },
    #[error("node {node} has no widget named {name:?}")]
    WidgetNotFound { node: NodeId, name: String },
}
