use trellis_editor_core::{
    registry, EditorSession, HighlightSettings, LinkId, NodeId, NodeKind, SessionConfig,
    WidgetValue,
};
use wasm_bindgen::prelude::*;

/// Fold host-side JSON shorthand into the tagged `WidgetValue` form: bare
/// strings, numbers and booleans become `Text`/`Number`/`Bool`, and
/// already-tagged objects pass through untouched.
fn normalize_widget_value_json(value: serde_json::Value) -> serde_json::Value {
    use serde_json::{json, Value as JsonValue};

    match value {
        JsonValue::String(s) => json!({ "type": "Text", "data": s }),
        JsonValue::Number(n) => json!({ "type": "Number", "data": n }),
        JsonValue::Bool(b) => json!({ "type": "Bool", "data": b }),
        other => other,
    }
}

fn parse_widget_value(value_json: &str) -> Result<WidgetValue, JsValue> {
    let raw: serde_json::Value =
        serde_json::from_str(value_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let normalized = normalize_widget_value_json(raw);
    serde_json::from_value(normalized).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn parse_kind(kind: &str) -> Result<NodeKind, JsValue> {
    serde_json::from_value(serde_json::Value::String(kind.to_string()))
        .map_err(|_| JsValue::from_str(&format!("unknown node kind '{kind}'")))
}

fn err_to_js(e: trellis_editor_core::EditorError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Holds a persistent session so reconciliation state (per-node refresh
/// stamps, highlight tracking) survives across calls without copying the
/// graph through the wasm boundary on every event.
#[wasm_bindgen]
pub struct WasmEditor {
    session: EditorSession,
}

impl Default for WasmEditor {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl WasmEditor {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmEditor {
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();
        WasmEditor {
            session: EditorSession::new(SessionConfig::default()),
        }
    }

    /// Editor with a `SessionConfig` override, e.g. `{"label_refresh_ms":100}`.
    #[wasm_bindgen]
    pub fn with_config(config_json: &str) -> Result<WasmEditor, JsValue> {
        let config: SessionConfig =
            serde_json::from_str(config_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();
        Ok(WasmEditor {
            session: EditorSession::new(config),
        })
    }

    /// Replace the document with a deserialized graph and run the configure
    /// pass over every restored node.
    #[wasm_bindgen]
    pub fn load_graph(&mut self, json_str: &str) -> Result<(), JsValue> {
        let graph =
            serde_json::from_str(json_str).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.session.load_graph(graph);
        Ok(())
    }

    /// Current document as JSON.
    #[wasm_bindgen]
    pub fn graph_json(&self) -> String {
        serde_json::to_string(self.session.graph()).unwrap()
    }

    #[wasm_bindgen]
    pub fn create_node(&mut self, kind: &str) -> Result<f64, JsValue> {
        let kind = parse_kind(kind)?;
        Ok(self.session.create_node(kind).0 as f64)
    }

    #[wasm_bindgen]
    pub fn remove_node(&mut self, node: f64) -> Result<(), JsValue> {
        self.session
            .remove_node(NodeId(node as u64))
            .map_err(err_to_js)
    }

    /// Connect an output to an input slot; returns the link id.
    #[wasm_bindgen]
    pub fn connect(
        &mut self,
        origin: f64,
        origin_slot: usize,
        dest: f64,
        dest_slot: usize,
    ) -> Result<f64, JsValue> {
        self.session
            .connect(
                NodeId(origin as u64),
                origin_slot,
                NodeId(dest as u64),
                dest_slot,
            )
            .map(|link| link.0 as f64)
            .map_err(err_to_js)
    }

    #[wasm_bindgen]
    pub fn disconnect(&mut self, link: f64) -> Result<(), JsValue> {
        self.session
            .disconnect(LinkId(link as u64))
            .map_err(err_to_js)
    }

    /// Set a widget value from JSON. Bare strings, numbers and booleans are
    /// accepted alongside the tagged form.
    #[wasm_bindgen]
    pub fn set_widget_value(
        &mut self,
        node: f64,
        widget: &str,
        value_json: &str,
    ) -> Result<(), JsValue> {
        let value = parse_widget_value(value_json)?;
        self.session
            .set_widget_value(NodeId(node as u64), widget, value)
            .map_err(err_to_js)
    }

    /// Replace a selector widget's option list from a JSON string array.
    #[wasm_bindgen]
    pub fn set_widget_options(
        &mut self,
        node: f64,
        widget: &str,
        options_json: &str,
    ) -> Result<(), JsValue> {
        let options: Vec<String> =
            serde_json::from_str(options_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.session
            .set_widget_options(NodeId(node as u64), widget, options)
            .map_err(err_to_js)
    }

    #[wasm_bindgen]
    pub fn set_title(&mut self, node: f64, title: &str) -> Result<(), JsValue> {
        self.session
            .set_title(NodeId(node as u64), title)
            .map_err(err_to_js)
    }

    #[wasm_bindgen]
    pub fn configure_node(&mut self, node: f64) -> Result<(), JsValue> {
        self.session
            .configure_node(NodeId(node as u64))
            .map_err(err_to_js)
    }

    #[wasm_bindgen]
    pub fn configure_all(&mut self) {
        self.session.configure_all();
    }

    /// Redraw-driven poll. `now_ms` defaults to `Date.now()`.
    #[wasm_bindgen]
    pub fn tick(&mut self, now_ms: Option<f64>) {
        let now = now_ms.unwrap_or_else(js_sys::Date::now);
        self.session.tick(now as u64);
    }

    /// True when anything changed since the last call; clears the flag.
    #[wasm_bindgen]
    pub fn take_dirty(&mut self) -> bool {
        self.session.take_dirty()
    }

    /// Feed an execution-start notification. The payload is the raw event
    /// detail (object, bare id, or null); unrecognized shapes are ignored.
    #[wasm_bindgen]
    pub fn notify_executing(&mut self, detail_json: &str) -> Result<(), JsValue> {
        let detail: serde_json::Value =
            serde_json::from_str(detail_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.session.highlight_mut().observe_executing(&detail);
        Ok(())
    }

    #[wasm_bindgen]
    pub fn notify_executed(&mut self, detail_json: &str) -> Result<(), JsValue> {
        let detail: serde_json::Value =
            serde_json::from_str(detail_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.session.highlight_mut().observe_executed(&detail);
        Ok(())
    }

    /// A run ended, in success or error; drop the highlight.
    #[wasm_bindgen]
    pub fn notify_finished(&mut self) {
        self.session.highlight_mut().observe_finished();
    }

    #[wasm_bindgen]
    pub fn set_highlight_settings(&mut self, settings_json: &str) -> Result<(), JsValue> {
        let settings: HighlightSettings =
            serde_json::from_str(settings_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.session.highlight_mut().settings = settings.clamped();
        Ok(())
    }

    /// Overlay rectangle for the executing node as JSON, or `undefined` when
    /// nothing should be drawn.
    #[wasm_bindgen]
    pub fn highlight_rect_json(&self) -> Option<String> {
        self.session
            .highlight_rect()
            .map(|rect| serde_json::to_string(&rect).unwrap())
    }
}

/// Expose the node kind registry as JSON for palette/tooling UI.
#[wasm_bindgen]
pub fn get_node_kinds_json() -> String {
    serde_json::to_string(&registry()).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_should_normalize_widget_value_shorthand() {
        let text = normalize_widget_value_json(serde_json::json!("hello"));
        assert_eq!(text, serde_json::json!({ "type": "Text", "data": "hello" }));

        let number = normalize_widget_value_json(serde_json::json!(2.5));
        assert_eq!(number, serde_json::json!({ "type": "Number", "data": 2.5 }));

        let tagged = serde_json::json!({ "type": "Bool", "data": true });
        assert_eq!(normalize_widget_value_json(tagged.clone()), tagged);
    }

    #[test]
    fn it_should_parse_shorthand_into_widget_values() {
        let parsed = parse_widget_value("\"boost\"").expect("text value");
        assert_eq!(parsed, WidgetValue::Text("boost".to_string()));

        let parsed = parse_widget_value("true").expect("bool value");
        assert_eq!(parsed, WidgetValue::Bool(true));
    }

    #[test]
    fn registry_exposes_every_kind() {
        let raw = get_node_kinds_json();
        let parsed: serde_json::Value = serde_json::from_str(&raw).expect("valid registry json");
        let kinds = parsed["kinds"].as_array().expect("kinds array");
        assert!(kinds.iter().any(|k| k["kind"] == "selector"));
        assert!(kinds.iter().any(|k| k["kind"] == "preset"));
    }
}
