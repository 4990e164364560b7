//! Scenario tests for the title, preset, and highlight collaborators.

use pretty_assertions::assert_eq;
use serde_json::json;
use trellis_editor_core::{
    EditorSession, Graph, HighlightRect, NodeId, NodeKind, SessionConfig, WidgetValue,
};

fn session() -> EditorSession {
    EditorSession::new(SessionConfig::default())
}

fn title(session: &EditorSession, node: NodeId) -> String {
    session.graph().node(node).expect("node").title.clone()
}

/// it should mirror the trigger text into the configurator title, normalized
#[test]
fn configurator_title_tracks_trigger_text() {
    let mut session = session();
    let node = session.create_node(NodeKind::Configurator);
    assert_eq!(title(&session, node), "Configurator");

    session
        .set_widget_value(
            node,
            "trigger",
            WidgetValue::Text("  Neon   Noir  ".to_string()),
        )
        .expect("set trigger");
    assert_eq!(title(&session, node), "Neon Noir");

    session
        .set_widget_value(node, "trigger", WidgetValue::Text("   ".to_string()))
        .expect("clear trigger");
    assert_eq!(title(&session, node), "Configurator");
}

/// it should suffix the preset title with the current selection
#[test]
fn preset_title_follows_the_selection() {
    let mut session = session();
    let node = session.create_node(NodeKind::Preset);
    assert_eq!(title(&session, node), "Preset (512×512)");

    session
        .set_widget_value(node, "preset", WidgetValue::Select("768×512".to_string()))
        .expect("pick preset");
    assert_eq!(title(&session, node), "Preset (768×512)");
}

/// it should title with manual dimensions while the override is on
#[test]
fn manual_override_wins_over_preset() {
    let mut session = session();
    let node = session.create_node(NodeKind::Preset);
    session
        .set_widget_value(node, "width", WidgetValue::Number(640.0))
        .expect("set width");
    session
        .set_widget_value(node, "height", WidgetValue::Number(480.0))
        .expect("set height");
    assert_eq!(title(&session, node), "Preset (512×512)");

    session
        .set_widget_value(node, "manual_override", WidgetValue::Bool(true))
        .expect("enable override");
    assert_eq!(title(&session, node), "Preset (Manual 640×480)");

    session
        .set_widget_value(node, "manual_override", WidgetValue::Bool(false))
        .expect("disable override");
    assert_eq!(title(&session, node), "Preset (512×512)");
}

/// it should pull a stale selection back to the first published option
#[test]
fn published_options_repair_the_selection() {
    let mut session = session();
    let node = session.create_node(NodeKind::Preset);

    session
        .set_widget_options(
            node,
            "preset",
            vec!["640×640".to_string(), "1280×720".to_string()],
        )
        .expect("publish options");

    let widget = session
        .graph()
        .node(node)
        .expect("node")
        .widget("preset")
        .expect("widget")
        .clone();
    assert_eq!(widget.value, WidgetValue::Select("640×640".to_string()));
    assert_eq!(title(&session, node), "Preset (640×640)");
}

/// it should leave the selection alone when the published list is empty
#[test]
fn empty_option_lists_never_clobber_the_value() {
    let mut session = session();
    let node = session.create_node(NodeKind::Preset);

    session
        .set_widget_options(node, "preset", Vec::new())
        .expect("publish nothing");

    let widget = session
        .graph()
        .node(node)
        .expect("node")
        .widget("preset")
        .expect("widget")
        .clone();
    assert_eq!(widget.value, WidgetValue::Select("512×512".to_string()));
    assert_eq!(title(&session, node), "Preset (512×512)");
}

/// it should track execution events and pad the overlay over the title bar
#[test]
fn highlight_follows_execution_events() {
    let doc = json!({
        "nodes": [
            {
                "id": 0,
                "type": "configurator",
                "title": "Configurator",
                "pos": [100.0, 200.0],
                "size": [140.0, 60.0],
                "widgets": [
                    { "name": "trigger", "value": { "type": "Text", "data": "" } }
                ]
            }
        ],
        "links": []
    });
    let graph: Graph = serde_json::from_value(doc).expect("decode document");
    let mut session = session();
    session.load_graph(graph);

    session.highlight_mut().observe_executing(&json!({ "node": 0 }));
    let rect = session.highlight_rect().expect("overlay visible");
    assert_eq!(
        rect,
        HighlightRect {
            x: 90.0,
            y: 160.0,
            width: 160.0,
            height: 110.0,
        }
    );

    // Bare string ids come from cached-run notifications.
    session.highlight_mut().observe_executed(&json!("0"));
    assert!(session.highlight_rect().is_some());

    // A null payload means the run moved past any node.
    session.highlight_mut().observe_executing(&json!(null));
    assert_eq!(session.highlight_rect(), None);

    session.highlight_mut().observe_executed(&json!({ "node_id": 0 }));
    session.highlight_mut().settings.enabled = false;
    assert_eq!(session.highlight_rect(), None);
}
