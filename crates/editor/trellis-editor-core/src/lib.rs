//! Trellis Editor Core (host-agnostic)
//!
//! Reconciliation engine for node graphs with variable-arity slot families:
//! slot growth and shrink, upstream label resolution, dependent selector
//! widgets, title and preset upkeep, execution highlighting, and the session
//! surface hosts drive all of it through.

pub mod behaviors;
pub mod config;
pub mod error;
pub mod events;
pub mod highlight;
pub mod ids;
pub mod kinds;
pub mod reconcile;
pub mod session;
pub mod text;
pub mod types;

// Re-exports for consumers (adapters)
pub use behaviors::{DynamicSlots, PresetTitle, TitleSync};
pub use config::SessionConfig;
pub use error::EditorError;
pub use events::{BehaviorSet, EditorCx, EditorEvent, NodeBehavior};
pub use highlight::{extract_node_id, ExecHighlight, HighlightRect, HighlightSettings};
pub use ids::{IdAllocator, LinkId, NodeId};
pub use kinds::{registry, FamilySpec, KindSpec, NodeKind, Registry};
pub use reconcile::{run_full, run_labels_only};
pub use session::EditorSession;
pub use text::{clean_label, LABEL_MAX_LEN};
pub use types::{Graph, Link, Node, Slot, SlotSide, Widget, WidgetValue};
