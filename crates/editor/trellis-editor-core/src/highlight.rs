//! Execution highlight: session-scoped tracking of the node the backend is
//! currently executing, plus the overlay rectangle hosts draw around it.
//!
//! Backend progress events arrive in several historical shapes; id
//! extraction is tolerant of all of them. Everything here is presentation
//! state owned by the session and shares nothing with reconciliation.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::ids::NodeId;
use crate::types::Graph;

/// Height of a node's title bar in graph units; the overlay covers it.
pub const NODE_TITLE_HEIGHT: f32 = 30.0;

/// Host-tunable overlay settings. Values are clamped on use, so an
/// out-of-range settings store cannot produce a degenerate overlay.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightSettings {
    pub enabled: bool,
    /// Glow strength, 1..10.
    pub strength: f64,
    /// Extra graph units around the node rect, 0..40.
    pub padding: f64,
    /// Overlay opacity, 0.1..1.0.
    pub opacity: f64,
}

impl Default for HighlightSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            strength: 4.0,
            padding: 10.0,
            opacity: 0.85,
        }
    }
}

fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    if !v.is_finite() {
        return lo;
    }
    v.clamp(lo, hi)
}

impl HighlightSettings {
    pub fn clamped(self) -> Self {
        Self {
            enabled: self.enabled,
            strength: clamp(self.strength, 1.0, 10.0),
            padding: clamp(self.padding, 0.0, 40.0),
            opacity: clamp(self.opacity, 0.1, 1.0),
        }
    }
}

/// Padded overlay rectangle in graph space, title bar included.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HighlightRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

fn id_from_value(value: &JsonValue) -> Option<u64> {
    match value {
        JsonValue::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f as u64)),
        JsonValue::String(s) => {
            let digits: String = s
                .trim()
                .chars()
                .take_while(|c| c.is_ascii_digit())
                .collect();
            digits.parse().ok()
        }
        _ => None,
    }
}

/// Pull a node id out of a loosely shaped backend payload: a bare number, a
/// numeric string, or an object keyed `node`, `node_id`, `nodeId` or
/// `current_node`.
pub fn extract_node_id(detail: &JsonValue) -> Option<NodeId> {
    let raw = match detail {
        JsonValue::Object(map) => ["node", "node_id", "nodeId", "current_node"]
            .iter()
            .find_map(|key| map.get(*key).and_then(id_from_value)),
        other => id_from_value(other),
    };
    raw.map(NodeId)
}

#[derive(Debug, Default)]
pub struct ExecHighlight {
    executing: Option<NodeId>,
    pub settings: HighlightSettings,
}

impl ExecHighlight {
    pub fn new(settings: HighlightSettings) -> Self {
        Self {
            executing: None,
            settings,
        }
    }

    pub fn executing(&self) -> Option<NodeId> {
        self.executing
    }

    pub fn set_executing(&mut self, node: Option<NodeId>) {
        self.executing = node;
    }

    /// `executing` progress event: a resolvable id moves the highlight, an
    /// explicit null clears it, an unparseable payload changes nothing.
    pub fn observe_executing(&mut self, detail: &JsonValue) {
        if detail.is_null() {
            self.executing = None;
        } else if let Some(id) = extract_node_id(detail) {
            self.executing = Some(id);
        }
    }

    /// `executed` event: the glow stays on the node that just finished.
    pub fn observe_executed(&mut self, detail: &JsonValue) {
        if let Some(id) = extract_node_id(detail) {
            self.executing = Some(id);
        }
    }

    /// End-of-run and error events always clear.
    pub fn observe_finished(&mut self) {
        self.executing = None;
    }

    /// Drop the highlight if `node` holds it (called on node removal).
    pub fn forget(&mut self, node: NodeId) {
        if self.executing == Some(node) {
            self.executing = None;
        }
    }

    /// Overlay rectangle for the executing node, or `None` while hidden
    /// (disabled, nothing executing, or the node is gone).
    pub fn overlay_rect(&self, graph: &Graph) -> Option<HighlightRect> {
        let settings = self.settings.clamped();
        if !settings.enabled {
            return None;
        }
        let node = graph.node(self.executing?)?;
        let pad = settings.padding as f32;
        Some(HighlightRect {
            x: node.pos[0] - pad,
            y: node.pos[1] - NODE_TITLE_HEIGHT - pad,
            width: node.size[0] + pad * 2.0,
            height: node.size[1] + NODE_TITLE_HEIGHT + pad * 2.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinds::NodeKind;
    use serde_json::json;

    #[test]
    fn extracts_ids_from_every_payload_shape() {
        assert_eq!(extract_node_id(&json!(7)), Some(NodeId(7)));
        assert_eq!(extract_node_id(&json!("12")), Some(NodeId(12)));
        assert_eq!(extract_node_id(&json!(" 12 ")), Some(NodeId(12)));
        assert_eq!(extract_node_id(&json!({ "node": 3 })), Some(NodeId(3)));
        assert_eq!(extract_node_id(&json!({ "node_id": "4" })), Some(NodeId(4)));
        assert_eq!(extract_node_id(&json!({ "nodeId": 5 })), Some(NodeId(5)));
        assert_eq!(
            extract_node_id(&json!({ "current_node": 6 })),
            Some(NodeId(6))
        );
        assert_eq!(extract_node_id(&json!("")), None);
        assert_eq!(extract_node_id(&json!({ "other": 1 })), None);
        assert_eq!(extract_node_id(&json!(null)), None);
    }

    #[test]
    fn executing_event_transitions() {
        let mut hl = ExecHighlight::default();
        hl.observe_executing(&json!(2));
        assert_eq!(hl.executing(), Some(NodeId(2)));

        // Unparseable payloads leave the highlight where it was.
        hl.observe_executing(&json!({ "progress": 0.5 }));
        assert_eq!(hl.executing(), Some(NodeId(2)));

        hl.observe_executing(&json!(null));
        assert_eq!(hl.executing(), None);

        hl.observe_executed(&json!("9"));
        assert_eq!(hl.executing(), Some(NodeId(9)));

        hl.observe_finished();
        assert_eq!(hl.executing(), None);
    }

    #[test]
    fn settings_are_clamped() {
        let settings = HighlightSettings {
            enabled: true,
            strength: 99.0,
            padding: -3.0,
            opacity: f64::NAN,
        }
        .clamped();
        assert_eq!(settings.strength, 10.0);
        assert_eq!(settings.padding, 0.0);
        assert_eq!(settings.opacity, 0.1);
    }

    #[test]
    fn overlay_rect_pads_and_covers_the_title_bar() {
        let mut graph = Graph::new();
        let mut node = NodeKind::Selector.instantiate(NodeId(1));
        node.pos = [100.0, 200.0];
        node.size = [140.0, 60.0];
        graph.insert_node(node);

        let mut hl = ExecHighlight::default();
        hl.set_executing(Some(NodeId(1)));
        let rect = hl.overlay_rect(&graph).expect("visible overlay");
        assert_eq!(rect.x, 90.0);
        assert_eq!(rect.y, 160.0);
        assert_eq!(rect.width, 160.0);
        assert_eq!(rect.height, 110.0);
    }

    #[test]
    fn hidden_when_disabled_or_node_missing() {
        let graph = Graph::new();
        let mut hl = ExecHighlight::default();
        assert!(hl.overlay_rect(&graph).is_none());

        hl.set_executing(Some(NodeId(1)));
        assert!(hl.overlay_rect(&graph).is_none());

        hl.settings.enabled = false;
        assert!(hl.overlay_rect(&graph).is_none());
    }
}
