//! Static registry of the node kinds this engine ships behaviors for.
//!
//! The registry mirrors what the backend declares per kind: widget seeds,
//! fixed inputs, outputs, and the slot family (if any). Hosts read it to
//! build their palette; behaviors read it to parameterize reconciliation.

use serde::{Deserialize, Serialize};

use crate::ids::NodeId;
use crate::types::{Node, Slot, Widget, WidgetValue};

#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Authoring node for one configuration; labels downstream slots via its
    /// `trigger` widget or title.
    Configurator,
    /// Collects configurations through a growing `cfg` family with an
    /// `active` selector widget.
    Selector,
    /// Joins text through a growing `text` family behind a fixed `trigger`
    /// lead input.
    Concat,
    /// Blends tracks through a growing `track` family with a `solo`
    /// selector widget.
    Mixer,
    /// Resolution preset picker with a manual-override pair.
    Preset,
}

/// Companion selector widget of a slot family.
#[derive(Debug, Copy, Clone, Serialize, PartialEq, Eq)]
pub struct SelectorSpec {
    pub widget: &'static str,
    /// Sole option offered while nothing is connected.
    pub placeholder: &'static str,
}

/// A fixed input preceding the family, held at slot index 0.
#[derive(Debug, Copy, Clone, Serialize, PartialEq, Eq)]
pub struct LeadSpec {
    pub name: &'static str,
    pub ty: &'static str,
}

/// Variable-arity slot family carried by a kind.
#[derive(Debug, Copy, Clone, Serialize, PartialEq, Eq)]
pub struct FamilySpec {
    pub prefix: &'static str,
    pub ty: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selector: Option<SelectorSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lead: Option<LeadSpec>,
}

impl FamilySpec {
    /// `<prefix>_<n>` name for the 1-based family position.
    pub fn slot_name(&self, n: usize) -> String {
        format!("{}_{}", self.prefix, n)
    }

    /// True when `name` belongs to this family.
    pub fn owns(&self, name: &str) -> bool {
        name.strip_prefix(self.prefix)
            .map(|rest| rest.starts_with('_'))
            .unwrap_or(false)
    }

    /// 1-based position parsed from a family slot name. Malformed suffixes
    /// fall back to 1 rather than failing.
    pub fn slot_index(&self, name: &str) -> usize {
        name.rsplit_once('_')
            .and_then(|(_, n)| n.parse().ok())
            .unwrap_or(1)
    }
}

/// Seed for a widget created alongside a fresh node.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WidgetSpec {
    pub name: &'static str,
    pub value: WidgetValue,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<&'static str>,
}

#[derive(Debug, Copy, Clone, Serialize, PartialEq, Eq)]
pub struct OutputSpec {
    pub name: &'static str,
    pub ty: &'static str,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct KindSpec {
    pub kind: NodeKind,
    /// Default title of a fresh node; also the placeholder compared against
    /// by the label resolver's title rule.
    pub title: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<FamilySpec>,
    pub widgets: Vec<WidgetSpec>,
    pub outputs: Vec<OutputSpec>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Registry {
    pub version: &'static str,
    pub kinds: Vec<KindSpec>,
}

fn w_text(name: &'static str, value: &str) -> WidgetSpec {
    WidgetSpec {
        name,
        value: WidgetValue::Text(value.to_string()),
        options: Vec::new(),
    }
}

fn w_toggle(name: &'static str, value: bool) -> WidgetSpec {
    WidgetSpec {
        name,
        value: WidgetValue::Bool(value),
        options: Vec::new(),
    }
}

fn w_number(name: &'static str, value: f64) -> WidgetSpec {
    WidgetSpec {
        name,
        value: WidgetValue::Number(value),
        options: Vec::new(),
    }
}

fn w_select(name: &'static str, value: &str, options: Vec<&'static str>) -> WidgetSpec {
    WidgetSpec {
        name,
        value: WidgetValue::Select(value.to_string()),
        options,
    }
}

impl NodeKind {
    pub const ALL: [NodeKind; 5] = [
        NodeKind::Configurator,
        NodeKind::Selector,
        NodeKind::Concat,
        NodeKind::Mixer,
        NodeKind::Preset,
    ];

    pub fn placeholder_title(self) -> &'static str {
        match self {
            NodeKind::Configurator => "Configurator",
            NodeKind::Selector => "Selector",
            NodeKind::Concat => "Concat",
            NodeKind::Mixer => "Mixer",
            NodeKind::Preset => "Preset",
        }
    }

    /// Slot family carried by this kind, if any.
    pub fn family(self) -> Option<FamilySpec> {
        match self {
            NodeKind::Selector => Some(FamilySpec {
                prefix: "cfg",
                ty: "CFG",
                selector: Some(SelectorSpec {
                    widget: "active",
                    placeholder: "1: (connect a cfg)",
                }),
                lead: None,
            }),
            NodeKind::Concat => Some(FamilySpec {
                prefix: "text",
                ty: "STRING",
                selector: None,
                lead: Some(LeadSpec {
                    name: "trigger",
                    ty: "STRING",
                }),
            }),
            NodeKind::Mixer => Some(FamilySpec {
                prefix: "track",
                ty: "TRACK",
                selector: Some(SelectorSpec {
                    widget: "solo",
                    placeholder: "1: (connect a track)",
                }),
                lead: None,
            }),
            NodeKind::Configurator | NodeKind::Preset => None,
        }
    }

    pub fn spec(self) -> KindSpec {
        let (widgets, outputs) = match self {
            NodeKind::Configurator => (
                vec![
                    w_select("source", "(none)", vec!["(none)"]),
                    w_text("trigger", ""),
                    w_number("strength", 1.0),
                    w_number("balance", 1.0),
                ],
                vec![OutputSpec {
                    name: "cfg",
                    ty: "CFG",
                }],
            ),
            // `active` starts as plain text, exactly as the backend declares
            // it; the selector synchronizer upgrades it on first touch.
            NodeKind::Selector => (
                vec![w_text("active", "1")],
                vec![OutputSpec {
                    name: "selected",
                    ty: "CFG",
                }],
            ),
            NodeKind::Concat => (
                vec![w_text("separator", ", "), w_toggle("trim_parts", true)],
                vec![OutputSpec {
                    name: "text",
                    ty: "STRING",
                }],
            ),
            NodeKind::Mixer => (
                vec![w_text("solo", "1")],
                vec![OutputSpec {
                    name: "mix",
                    ty: "TRACK",
                }],
            ),
            NodeKind::Preset => (
                vec![
                    w_select(
                        "preset",
                        "512×512",
                        vec!["512×512", "768×512", "512×768", "1024×1024"],
                    ),
                    w_toggle("manual_override", false),
                    w_number("width", 512.0),
                    w_number("height", 512.0),
                ],
                vec![
                    OutputSpec {
                        name: "width",
                        ty: "NUMBER",
                    },
                    OutputSpec {
                        name: "height",
                        ty: "NUMBER",
                    },
                ],
            ),
        };

        KindSpec {
            kind: self,
            title: self.placeholder_title(),
            family: self.family(),
            widgets,
            outputs,
        }
    }

    /// Build a fresh node with this kind's seed widgets and fixed inputs.
    /// Family slots are seeded by the first reconciliation pass, not here.
    pub fn instantiate(self, id: NodeId) -> Node {
        let spec = self.spec();
        let mut node = Node::new(id, self, spec.title);
        if let Some(lead) = spec.family.and_then(|f| f.lead) {
            node.inputs.push(Slot::new(lead.name, lead.ty));
        }
        node.widgets = spec
            .widgets
            .into_iter()
            .map(|w| Widget {
                name: w.name.to_string(),
                value: w.value,
                options: w.options.into_iter().map(str::to_string).collect(),
            })
            .collect();
        node
    }
}

pub fn registry() -> Registry {
    Registry {
        version: "1",
        kinds: NodeKind::ALL.iter().map(|k| k.spec()).collect(),
    }
}
