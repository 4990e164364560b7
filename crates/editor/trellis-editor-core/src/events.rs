//! Lifecycle events and the ordered observer list they dispatch through.
//!
//! Canvas editors usually extend node behavior by capturing the previous
//! handler and calling it first. Here that chain is explicit: behaviors are
//! installed into a [`BehaviorSet`] and every event visits them in
//! installation order, so "runs before" is a property of the list rather
//! than of closure nesting.

use log::debug;

use crate::config::SessionConfig;
use crate::ids::{LinkId, NodeId};
use crate::types::{Graph, SlotSide};

/// One lifecycle notification delivered to every installed behavior.
#[derive(Clone, Debug, PartialEq)]
pub enum EditorEvent {
    /// A node was created and seeded from its kind spec.
    NodeCreated { node: NodeId },
    /// A link on `side` of `node` was established (`connected`) or removed.
    ConnectionsChanged {
        node: NodeId,
        side: SlotSide,
        slot: usize,
        connected: bool,
        link: LinkId,
    },
    /// Saved state was applied to `node`; derived state may be stale.
    Configured { node: NodeId },
    /// `node` was removed, after its links were torn down. Behaviors drop
    /// any per-node bookkeeping they hold.
    NodeRemoved { node: NodeId },
    /// A widget value changed through the session API.
    WidgetChanged { node: NodeId, widget: String },
    /// Redraw-driven poll; `now_ms` is host wall time in milliseconds.
    Tick { now_ms: u64 },
}

/// Mutable view of the session handed to behaviors for one dispatch.
pub struct EditorCx<'a> {
    pub graph: &'a mut Graph,
    pub config: &'a SessionConfig,
    dirty: &'a mut bool,
}

impl<'a> EditorCx<'a> {
    pub(crate) fn new(
        graph: &'a mut Graph,
        config: &'a SessionConfig,
        dirty: &'a mut bool,
    ) -> Self {
        Self {
            graph,
            config,
            dirty,
        }
    }

    /// Fire-and-forget display invalidation toward the host.
    pub fn mark_dirty(&mut self) {
        *self.dirty = true;
    }
}

/// A unit of editor behavior subscribed to lifecycle events.
///
/// Implementations decide per event whether it concerns them; unhandled
/// events are simply ignored. Behaviors own any per-node bookkeeping they
/// need (throttle timestamps and the like).
pub trait NodeBehavior {
    /// Stable name used in logs.
    fn name(&self) -> &'static str;

    fn on_event(&mut self, cx: &mut EditorCx<'_>, event: &EditorEvent);
}

/// Ordered observer list. Installation order is dispatch order.
#[derive(Default)]
pub struct BehaviorSet {
    entries: Vec<Box<dyn NodeBehavior>>,
}

impl BehaviorSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn install(&mut self, behavior: Box<dyn NodeBehavior>) {
        log::info!("installing behavior {}", behavior.name());
        self.entries.push(behavior);
    }

    pub fn dispatch(&mut self, cx: &mut EditorCx<'_>, event: &EditorEvent) {
        if !matches!(event, EditorEvent::Tick { .. }) {
            debug!("dispatch {:?}", event);
        }
        for behavior in &mut self.entries {
            behavior.on_event(cx, event);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Recorder {
        name: &'static str,
        seen: std::rc::Rc<std::cell::RefCell<Vec<&'static str>>>,
    }

    impl NodeBehavior for Recorder {
        fn name(&self) -> &'static str {
            self.name
        }

        fn on_event(&mut self, _cx: &mut EditorCx<'_>, _event: &EditorEvent) {
            self.seen.borrow_mut().push(self.name);
        }
    }

    #[test]
    fn dispatch_follows_installation_order() {
        let seen = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let mut set = BehaviorSet::new();
        set.install(Box::new(Recorder {
            name: "first",
            seen: seen.clone(),
        }));
        set.install(Box::new(Recorder {
            name: "second",
            seen: seen.clone(),
        }));

        let mut graph = Graph::new();
        let config = SessionConfig::default();
        let mut dirty = false;
        let mut cx = EditorCx::new(&mut graph, &config, &mut dirty);
        set.dispatch(&mut cx, &EditorEvent::Tick { now_ms: 0 });

        assert_eq!(*seen.borrow(), vec!["first", "second"]);
    }
}
