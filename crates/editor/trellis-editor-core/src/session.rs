//! The editor session: owns the graph, the behavior list and presentation
//! state, and exposes every host entry point.
//!
//! Hosts mutate the graph exclusively through the session so each change
//! produces exactly one round of behavior dispatch. Reading is unrestricted
//! via [`EditorSession::graph`].

use log::debug;

use crate::behaviors;
use crate::config::SessionConfig;
use crate::error::EditorError;
use crate::events::{BehaviorSet, EditorCx, EditorEvent, NodeBehavior};
use crate::highlight::{ExecHighlight, HighlightRect};
use crate::ids::{IdAllocator, LinkId, NodeId};
use crate::kinds::NodeKind;
use crate::types::{Graph, Link, SlotSide, WidgetValue};

pub struct EditorSession {
    graph: Graph,
    config: SessionConfig,
    behaviors: BehaviorSet,
    highlight: ExecHighlight,
    ids: IdAllocator,
    dirty: bool,
}

impl EditorSession {
    /// Session with the stock behavior set installed.
    pub fn new(config: SessionConfig) -> Self {
        let mut session = Self::bare(config);
        for behavior in behaviors::standard() {
            session.install(behavior);
        }
        session
    }

    /// Session without any behaviors; hosts compose their own via
    /// [`EditorSession::install`].
    pub fn bare(config: SessionConfig) -> Self {
        Self {
            graph: Graph::new(),
            config,
            behaviors: BehaviorSet::new(),
            highlight: ExecHighlight::default(),
            ids: IdAllocator::new(),
            dirty: false,
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn highlight(&self) -> &ExecHighlight {
        &self.highlight
    }

    pub fn highlight_mut(&mut self) -> &mut ExecHighlight {
        &mut self.highlight
    }

    /// Overlay rectangle for the currently executing node, if visible.
    pub fn highlight_rect(&self) -> Option<HighlightRect> {
        self.highlight.overlay_rect(&self.graph)
    }

    /// Append a behavior to the dispatch order.
    pub fn install(&mut self, behavior: Box<dyn NodeBehavior>) {
        self.behaviors.install(behavior);
    }

    /// True when anything changed since the last call; clears the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    fn dispatch(&mut self, event: EditorEvent) {
        let mut cx = EditorCx::new(&mut self.graph, &self.config, &mut self.dirty);
        self.behaviors.dispatch(&mut cx, &event);
    }

    // --- Graph mutations -------------------------------------------------

    pub fn create_node(&mut self, kind: NodeKind) -> NodeId {
        let id = self.ids.alloc_node();
        debug!("create node {} ({:?})", id, kind);
        self.graph.insert_node(kind.instantiate(id));
        self.dispatch(EditorEvent::NodeCreated { node: id });
        id
    }

    /// Remove a node after tearing down its links. Surviving endpoints hear
    /// a disconnect for each severed link.
    pub fn remove_node(&mut self, id: NodeId) -> Result<(), EditorError> {
        if self.graph.node(id).is_none() {
            return Err(EditorError::NodeNotFound(id));
        }
        for link in self.graph.incident_links(id) {
            if let Some(removed) = self.graph.remove_link(link) {
                if removed.origin != id {
                    self.dispatch(EditorEvent::ConnectionsChanged {
                        node: removed.origin,
                        side: SlotSide::Output,
                        slot: removed.origin_slot,
                        connected: false,
                        link,
                    });
                }
                if removed.dest != id {
                    self.dispatch(EditorEvent::ConnectionsChanged {
                        node: removed.dest,
                        side: SlotSide::Input,
                        slot: removed.dest_slot,
                        connected: false,
                        link,
                    });
                }
            }
        }
        self.graph.remove_node(id);
        self.highlight.forget(id);
        self.dispatch(EditorEvent::NodeRemoved { node: id });
        Ok(())
    }

    /// Connect an output to an input slot. An input slot holds one link;
    /// connecting over an occupied slot replaces the old link in place, so
    /// the destination never observes a disconnected state in between.
    pub fn connect(
        &mut self,
        origin: NodeId,
        origin_slot: usize,
        dest: NodeId,
        dest_slot: usize,
    ) -> Result<LinkId, EditorError> {
        if self.graph.node(origin).is_none() {
            return Err(EditorError::NodeNotFound(origin));
        }
        let occupied = {
            let node = self
                .graph
                .node(dest)
                .ok_or(EditorError::NodeNotFound(dest))?;
            let slot = node.input(dest_slot).ok_or(EditorError::SlotOutOfRange {
                node: dest,
                slot: dest_slot,
            })?;
            slot.link
        };
        if let Some(old) = occupied {
            if let Some(removed) = self.graph.remove_link(old) {
                self.dispatch(EditorEvent::ConnectionsChanged {
                    node: removed.origin,
                    side: SlotSide::Output,
                    slot: removed.origin_slot,
                    connected: false,
                    link: old,
                });
            }
        }

        let id = self.ids.alloc_link();
        debug!("connect {}#{} -> {}#{} as link {}", origin, origin_slot, dest, dest_slot, id);
        self.graph.add_link(Link {
            id,
            origin,
            origin_slot,
            dest,
            dest_slot,
        });
        self.dispatch(EditorEvent::ConnectionsChanged {
            node: origin,
            side: SlotSide::Output,
            slot: origin_slot,
            connected: true,
            link: id,
        });
        self.dispatch(EditorEvent::ConnectionsChanged {
            node: dest,
            side: SlotSide::Input,
            slot: dest_slot,
            connected: true,
            link: id,
        });
        Ok(id)
    }

    pub fn disconnect(&mut self, link: LinkId) -> Result<(), EditorError> {
        let removed = self
            .graph
            .remove_link(link)
            .ok_or(EditorError::LinkNotFound(link))?;
        debug!("disconnect link {}", link);
        self.dispatch(EditorEvent::ConnectionsChanged {
            node: removed.origin,
            side: SlotSide::Output,
            slot: removed.origin_slot,
            connected: false,
            link,
        });
        self.dispatch(EditorEvent::ConnectionsChanged {
            node: removed.dest,
            side: SlotSide::Input,
            slot: removed.dest_slot,
            connected: false,
            link,
        });
        Ok(())
    }

    /// Host-side rename. Renames carry no event of their own, so dependents
    /// pick the new title up on the next tick.
    pub fn set_title(&mut self, node: NodeId, title: impl Into<String>) -> Result<(), EditorError> {
        let n = self
            .graph
            .node_mut(node)
            .ok_or(EditorError::NodeNotFound(node))?;
        n.title = title.into();
        self.dirty = true;
        Ok(())
    }

    pub fn set_widget_value(
        &mut self,
        node: NodeId,
        widget: &str,
        value: WidgetValue,
    ) -> Result<(), EditorError> {
        let n = self
            .graph
            .node_mut(node)
            .ok_or(EditorError::NodeNotFound(node))?;
        let w = n
            .widget_mut(widget)
            .ok_or_else(|| EditorError::WidgetNotFound {
                node,
                name: widget.to_string(),
            })?;
        w.value = value;
        self.dispatch(EditorEvent::WidgetChanged {
            node,
            widget: widget.to_string(),
        });
        Ok(())
    }

    /// Replace a selector widget's option list (backends publish these).
    /// Value repair runs through the usual widget-change dispatch.
    pub fn set_widget_options(
        &mut self,
        node: NodeId,
        widget: &str,
        options: Vec<String>,
    ) -> Result<(), EditorError> {
        let n = self
            .graph
            .node_mut(node)
            .ok_or(EditorError::NodeNotFound(node))?;
        let w = n
            .widget_mut(widget)
            .ok_or_else(|| EditorError::WidgetNotFound {
                node,
                name: widget.to_string(),
            })?;
        w.options = options;
        self.dispatch(EditorEvent::WidgetChanged {
            node,
            widget: widget.to_string(),
        });
        Ok(())
    }

    // --- Lifecycle -------------------------------------------------------

    /// Adopt a deserialized graph, then heal it: the id allocator resyncs
    /// past every restored id and every node gets a configure pass.
    pub fn load_graph(&mut self, graph: Graph) {
        self.ids.reset();
        self.ids.resync(
            graph.nodes.iter().map(|n| n.id),
            graph.links.iter().map(|l| l.id),
        );
        self.graph = graph;
        self.configure_all();
    }

    /// Configure pass over every node in id order. Bulk restoration calls
    /// this once after applying saved state.
    pub fn configure_all(&mut self) {
        let mut ids: Vec<NodeId> = self.graph.nodes.iter().map(|n| n.id).collect();
        ids.sort();
        for id in ids {
            self.dispatch(EditorEvent::Configured { node: id });
        }
    }

    pub fn configure_node(&mut self, node: NodeId) -> Result<(), EditorError> {
        if self.graph.node(node).is_none() {
            return Err(EditorError::NodeNotFound(node));
        }
        self.dispatch(EditorEvent::Configured { node });
        Ok(())
    }

    /// Redraw-driven poll; behaviors throttle themselves per node.
    pub fn tick(&mut self, now_ms: u64) {
        self.dispatch(EditorEvent::Tick { now_ms });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Node;

    fn connected_session() -> (EditorSession, NodeId, NodeId) {
        let mut session = EditorSession::new(SessionConfig::default());
        let origin = session.create_node(NodeKind::Configurator);
        session
            .set_widget_value(
                origin,
                "trigger",
                WidgetValue::Text("Dark Fantasy Style".to_string()),
            )
            .expect("set trigger");
        let dest = session.create_node(NodeKind::Selector);
        session.connect(origin, 0, dest, 0).expect("connect");
        (session, origin, dest)
    }

    fn node<'a>(session: &'a EditorSession, id: NodeId) -> &'a Node {
        session.graph().node(id).expect("node")
    }

    #[test]
    fn create_connect_grows_and_labels() {
        let (session, _origin, dest) = connected_session();
        let selector = node(&session, dest);
        assert_eq!(selector.inputs.len(), 2);
        assert_eq!(selector.inputs[0].label.as_deref(), Some("Dark Fantasy Style"));
        assert_eq!(
            selector.widget("active").expect("widget").options,
            vec!["1: Dark Fantasy Style"]
        );
    }

    #[test]
    fn take_dirty_reports_once() {
        let (mut session, _, _) = connected_session();
        assert!(session.take_dirty());
        assert!(!session.take_dirty());
    }

    #[test]
    fn disconnect_shrinks_back() {
        let (mut session, _origin, dest) = connected_session();
        let link = node(&session, dest).inputs[0].link.expect("connected");
        session.disconnect(link).expect("disconnect");
        let selector = node(&session, dest);
        assert_eq!(selector.inputs.len(), 1);
        assert_eq!(selector.inputs[0].label, None);
    }

    #[test]
    fn connect_over_occupied_slot_replaces_the_link() {
        let (mut session, _origin, dest) = connected_session();
        let second = session.create_node(NodeKind::Configurator);
        session
            .set_widget_value(second, "trigger", WidgetValue::Text("Other".to_string()))
            .expect("set trigger");

        session.connect(second, 0, dest, 0).expect("reconnect");
        let selector = node(&session, dest);
        assert_eq!(selector.inputs[0].label.as_deref(), Some("Other"));
        // One registered link per input slot.
        assert_eq!(session.graph().links.len(), 1);
    }

    #[test]
    fn remove_node_severs_links_and_notifies_survivors() {
        let (mut session, origin, dest) = connected_session();
        session.remove_node(origin).expect("remove origin");
        let selector = node(&session, dest);
        assert_eq!(selector.inputs.len(), 1);
        assert!(!selector.inputs[0].is_connected());
        assert_eq!(
            selector.widget("active").expect("widget").options,
            vec!["1: (connect a cfg)"]
        );
        assert!(session.graph().links.is_empty());
    }

    #[test]
    fn load_graph_configures_and_resyncs_ids() {
        let (session, _, _) = connected_session();
        let json = serde_json::to_string(session.graph()).expect("serialize");
        drop(session);

        let restored: Graph = serde_json::from_str(&json).expect("deserialize");
        let mut session = EditorSession::new(SessionConfig::default());
        session.load_graph(restored);

        let fresh = session.create_node(NodeKind::Mixer);
        assert!(
            session.graph().nodes.iter().filter(|n| n.id == fresh).count() == 1,
            "restored ids must not collide with fresh ones"
        );
    }

    #[test]
    fn mutations_on_unknown_ids_are_rejected() {
        let mut session = EditorSession::new(SessionConfig::default());
        assert_eq!(
            session.remove_node(NodeId(9)),
            Err(EditorError::NodeNotFound(NodeId(9)))
        );
        assert_eq!(
            session.disconnect(LinkId(3)),
            Err(EditorError::LinkNotFound(LinkId(3)))
        );
        let node = session.create_node(NodeKind::Selector);
        assert_eq!(
            session.connect(node, 0, node, 9),
            Err(EditorError::SlotOutOfRange { node, slot: 9 })
        );
    }
}
