#![cfg(target_arch = "wasm32")]
use trellis_editor_wasm::{get_node_kinds_json, WasmEditor};
use wasm_bindgen_test::*;

use serde_json::json;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn selector_flow_over_the_boundary() {
    let mut editor = WasmEditor::new();
    let origin = editor
        .create_node("configurator")
        .expect("create configurator");
    editor
        .set_widget_value(origin, "trigger", "\"Dark Fantasy Style\"")
        .expect("set trigger");
    let selector = editor.create_node("selector").expect("create selector");
    editor.connect(origin, 0, selector, 0).expect("connect");

    let graph: serde_json::Value = serde_json::from_str(&editor.graph_json()).expect("graph json");
    let inputs = graph["nodes"][1]["inputs"].as_array().expect("inputs");
    assert_eq!(inputs.len(), 2);
    assert_eq!(inputs[0]["label"], "Dark Fantasy Style");
    assert!(editor.take_dirty());
}

#[wasm_bindgen_test]
fn document_round_trips_through_load() {
    let mut editor = WasmEditor::new();
    editor.create_node("preset").expect("create preset");
    let saved = editor.graph_json();

    let mut restored = WasmEditor::new();
    restored.load_graph(&saved).expect("load saved document");
    assert_eq!(restored.graph_json(), saved);
}

#[wasm_bindgen_test]
fn registry_is_available_to_the_palette() {
    let parsed: serde_json::Value =
        serde_json::from_str(&get_node_kinds_json()).expect("registry json");
    assert_eq!(parsed["kinds"].as_array().expect("kinds").len(), 5);
}

#[wasm_bindgen_test]
fn highlight_round_trip() {
    let mut editor = WasmEditor::new();
    let node = editor.create_node("configurator").expect("create");

    editor
        .notify_executing(&json!({ "node": node }).to_string())
        .expect("executing payload");
    assert!(editor.highlight_rect_json().is_some());

    editor.notify_finished();
    assert!(editor.highlight_rect_json().is_none());
}
