//! Retained element tree with synchronous event dispatch.
//!
//! This is the widget layer's stand-in for a browser document:
//! - elements live in a grow-only arena addressed by [`NodeId`]
//! - document-level pointer-down listeners run capture phase before bubble
//! - element click listeners fire per node
//! - everything runs to completion on the caller's thread
//!
//! A `Document` is a cheap clonable handle; clones share the same tree and
//! listener registries, so closures can capture their own copy.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::events::{
    ClickListenerHandle, DispatchPhase, PointerDownEvent, PointerKind, PointerListenerHandle,
};
use crate::node::{NodeData, NodeId, NodeSnapshot};

type PointerHandler = Rc<dyn Fn(&PointerDownEvent)>;
type ClickHandler = Rc<dyn Fn()>;

struct PointerListener {
    handle: PointerListenerHandle,
    kind: PointerKind,
    phase: DispatchPhase,
    handler: PointerHandler,
}

struct ClickListener {
    handle: ClickListenerHandle,
    node: NodeId,
    handler: ClickHandler,
}

#[derive(Default)]
struct DocumentInner {
    nodes: RefCell<Vec<NodeData>>,
    pointer_listeners: RefCell<Vec<PointerListener>>,
    click_listeners: RefCell<Vec<ClickListener>>,
    next_handle: Cell<u64>,
}

#[derive(Clone, Default)]
pub struct Document {
    inner: Rc<DocumentInner>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Tree construction ────────────────────────────────────

    pub fn create_element(&self, tag: &str) -> NodeId {
        let mut nodes = self.inner.nodes.borrow_mut();
        let id = NodeId::new(nodes.len() as u32);
        nodes.push(NodeData::new(tag));
        id
    }

    /// Appends `child` as the last child of `parent`, detaching it from any
    /// previous parent first.
    pub fn append_child(&self, parent: NodeId, child: NodeId) {
        if let Some(old_parent) = self.parent(child) {
            self.remove_child(old_parent, child);
        }
        let mut nodes = self.inner.nodes.borrow_mut();
        nodes[parent.index() as usize].children.push(child);
        nodes[child.index() as usize].parent = Some(parent);
    }

    /// Detaches `child` from `parent`.
    ///
    /// Returns `true` if the tree changed. Removing a node that is not a
    /// child of `parent` is a no-op.
    pub fn remove_child(&self, parent: NodeId, child: NodeId) -> bool {
        let mut nodes = self.inner.nodes.borrow_mut();
        if nodes[child.index() as usize].parent != Some(parent) {
            return false;
        }
        nodes[parent.index() as usize]
            .children
            .retain(|c| *c != child);
        nodes[child.index() as usize].parent = None;
        true
    }

    // ── Element state ────────────────────────────────────────

    pub fn tag(&self, node: NodeId) -> String {
        self.inner.nodes.borrow()[node.index() as usize].tag.clone()
    }

    pub fn set_attribute(&self, node: NodeId, name: &str, value: &str) {
        self.inner.nodes.borrow_mut()[node.index() as usize]
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.inner.nodes.borrow()[node.index() as usize]
            .attributes
            .get(name)
            .cloned()
    }

    pub fn set_text(&self, node: NodeId, text: &str) {
        self.inner.nodes.borrow_mut()[node.index() as usize].text = Some(text.to_string());
    }

    pub fn text(&self, node: NodeId) -> Option<String> {
        self.inner.nodes.borrow()[node.index() as usize].text.clone()
    }

    pub fn add_class(&self, node: NodeId, class: &str) {
        let mut nodes = self.inner.nodes.borrow_mut();
        let classes = &mut nodes[node.index() as usize].classes;
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
    }

    pub fn remove_class(&self, node: NodeId, class: &str) {
        self.inner.nodes.borrow_mut()[node.index() as usize]
            .classes
            .retain(|c| c != class);
    }

    /// Adds or removes `class` so that membership matches `enabled`.
    pub fn set_class_enabled(&self, node: NodeId, class: &str, enabled: bool) {
        if enabled {
            self.add_class(node, class);
        } else {
            self.remove_class(node, class);
        }
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.inner.nodes.borrow()[node.index() as usize]
            .classes
            .iter()
            .any(|c| c == class)
    }

    /// Space-joined class list in insertion order.
    pub fn class_name(&self, node: NodeId) -> String {
        self.inner.nodes.borrow()[node.index() as usize]
            .classes
            .join(" ")
    }

    // ── Tree queries ─────────────────────────────────────────

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.inner.nodes.borrow()[node.index() as usize].parent
    }

    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.inner.nodes.borrow()[node.index() as usize]
            .children
            .clone()
    }

    pub fn child_count(&self, node: NodeId) -> usize {
        self.inner.nodes.borrow()[node.index() as usize].children.len()
    }

    /// True when `node == ancestor` or `ancestor` is on `node`'s parent
    /// chain. This is the containment test outside-click detection uses.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let nodes = self.inner.nodes.borrow();
        let mut current = Some(node);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = nodes[n.index() as usize].parent;
        }
        false
    }

    /// Finds an element by its `id` attribute. Linear scan; widget trees
    /// stay small.
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        let nodes = self.inner.nodes.borrow();
        for (index, data) in nodes.iter().enumerate() {
            if data.attributes.get("id").is_some_and(|v| v == id) {
                return Some(NodeId::new(index as u32));
            }
        }
        None
    }

    // ── Pointer-down listeners (document level) ──────────────

    pub fn on_pointer_down(
        &self,
        kind: PointerKind,
        phase: DispatchPhase,
        handler: impl Fn(&PointerDownEvent) + 'static,
    ) -> PointerListenerHandle {
        let handle = PointerListenerHandle(self.mint_handle());
        self.inner.pointer_listeners.borrow_mut().push(PointerListener {
            handle,
            kind,
            phase,
            handler: Rc::new(handler),
        });
        handle
    }

    /// Cancels one pointer-down registration. Unknown handles are ignored so
    /// cancellation is idempotent.
    pub fn cancel_pointer_down(&self, handle: PointerListenerHandle) {
        self.inner
            .pointer_listeners
            .borrow_mut()
            .retain(|l| l.handle != handle);
    }

    /// Number of live document-level pointer-down registrations. Lets tests
    /// verify that registration and cancellation stay exactly paired.
    pub fn pointer_listener_count(&self) -> usize {
        self.inner.pointer_listeners.borrow().len()
    }

    /// Dispatches a pointer-down at `target`: capture listeners first, then
    /// bubble, registration order within each phase.
    ///
    /// The listener list is snapshotted before any handler runs, so handlers
    /// may mutate the tree or the registries freely; a listener cancelled
    /// mid-dispatch still sees the event it was registered for.
    pub fn dispatch_pointer_down(&self, target: NodeId, kind: PointerKind) {
        let event = PointerDownEvent { target, kind };
        let snapshot: Vec<(DispatchPhase, PointerHandler)> = self
            .inner
            .pointer_listeners
            .borrow()
            .iter()
            .filter(|l| l.kind == kind)
            .map(|l| (l.phase, Rc::clone(&l.handler)))
            .collect();
        let (capture, bubble): (Vec<_>, Vec<_>) = snapshot
            .into_iter()
            .partition(|(phase, _)| *phase == DispatchPhase::Capture);
        for (_, handler) in capture.into_iter().chain(bubble) {
            handler(&event);
        }
    }

    // ── Click listeners (element level) ──────────────────────

    pub fn on_click(&self, node: NodeId, handler: impl Fn() + 'static) -> ClickListenerHandle {
        let handle = ClickListenerHandle(self.mint_handle());
        self.inner.click_listeners.borrow_mut().push(ClickListener {
            handle,
            node,
            handler: Rc::new(handler),
        });
        handle
    }

    pub fn cancel_click(&self, handle: ClickListenerHandle) {
        self.inner
            .click_listeners
            .borrow_mut()
            .retain(|l| l.handle != handle);
    }

    /// Runs the click handlers registered on `node`, in registration order.
    pub fn dispatch_click(&self, node: NodeId) {
        let snapshot: Vec<ClickHandler> = self
            .inner
            .click_listeners
            .borrow()
            .iter()
            .filter(|l| l.node == node)
            .map(|l| Rc::clone(&l.handler))
            .collect();
        for handler in snapshot {
            handler();
        }
    }

    // ── Snapshots ────────────────────────────────────────────

    /// Structural snapshot of the subtree rooted at `node`.
    pub fn snapshot(&self, node: NodeId) -> NodeSnapshot {
        let (tag, classes, attributes, text, children) = {
            let nodes = self.inner.nodes.borrow();
            let data = &nodes[node.index() as usize];
            (
                data.tag.clone(),
                data.classes.clone(),
                data.attributes.clone(),
                data.text.clone(),
                data.children.clone(),
            )
        };
        NodeSnapshot {
            tag,
            classes,
            attributes,
            text,
            children: children.iter().map(|c| self.snapshot(*c)).collect(),
        }
    }

    fn mint_handle(&self) -> u64 {
        let next = self.inner.next_handle.get();
        self.inner.next_handle.set(next + 1);
        next
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use pretty_assertions::assert_eq;

    use super::Document;
    use crate::events::{DispatchPhase, PointerKind};

    #[test]
    fn append_child_appends_last() {
        let doc = Document::new();
        let root = doc.create_element("div");
        let a = doc.create_element("span");
        let b = doc.create_element("span");
        doc.append_child(root, a);
        doc.append_child(root, b);

        assert_eq!(doc.children(root), vec![a, b]);
        assert_eq!(doc.parent(b), Some(root));
    }

    #[test]
    fn append_child_reparents() {
        let doc = Document::new();
        let first = doc.create_element("div");
        let second = doc.create_element("div");
        let child = doc.create_element("span");
        doc.append_child(first, child);
        doc.append_child(second, child);

        assert_eq!(doc.child_count(first), 0);
        assert_eq!(doc.children(second), vec![child]);
    }

    #[test]
    fn remove_child_of_non_child_is_noop() {
        let doc = Document::new();
        let root = doc.create_element("div");
        let other = doc.create_element("div");
        let child = doc.create_element("span");
        doc.append_child(root, child);

        assert!(!doc.remove_child(other, child));
        assert!(doc.remove_child(root, child));
        assert!(!doc.remove_child(root, child));
        assert_eq!(doc.parent(child), None);
    }

    #[test]
    fn contains_covers_self_and_descendants() {
        let doc = Document::new();
        let root = doc.create_element("div");
        let mid = doc.create_element("span");
        let leaf = doc.create_element("img");
        let outside = doc.create_element("div");
        doc.append_child(root, mid);
        doc.append_child(mid, leaf);

        assert!(doc.contains(root, root));
        assert!(doc.contains(root, leaf));
        assert!(!doc.contains(root, outside));
        assert!(!doc.contains(leaf, root));
    }

    #[test]
    fn class_toggling() {
        let doc = Document::new();
        let node = doc.create_element("div");
        doc.add_class(node, "a");
        doc.add_class(node, "b");
        doc.add_class(node, "a");

        assert_eq!(doc.class_name(node), "a b");

        doc.set_class_enabled(node, "b", false);
        assert!(!doc.has_class(node, "b"));
        doc.set_class_enabled(node, "b", true);
        assert_eq!(doc.class_name(node), "a b");
    }

    #[test]
    fn element_by_id_scans_attributes() {
        let doc = Document::new();
        let _other = doc.create_element("div");
        let host = doc.create_element("div");
        doc.set_attribute(host, "id", "host");

        assert_eq!(doc.element_by_id("host"), Some(host));
        assert_eq!(doc.element_by_id("missing"), None);
    }

    #[test]
    fn capture_listeners_run_before_bubble() {
        let doc = Document::new();
        let node = doc.create_element("div");
        let order = Rc::new(RefCell::new(Vec::new()));

        let o = Rc::clone(&order);
        doc.on_pointer_down(PointerKind::Mouse, DispatchPhase::Bubble, move |_| {
            o.borrow_mut().push("bubble");
        });
        let o = Rc::clone(&order);
        doc.on_pointer_down(PointerKind::Mouse, DispatchPhase::Capture, move |_| {
            o.borrow_mut().push("capture");
        });

        doc.dispatch_pointer_down(node, PointerKind::Mouse);
        assert_eq!(*order.borrow(), vec!["capture", "bubble"]);
    }

    #[test]
    fn pointer_dispatch_filters_by_kind() {
        let doc = Document::new();
        let node = doc.create_element("div");
        let hits = Rc::new(RefCell::new(0u32));

        let h = Rc::clone(&hits);
        doc.on_pointer_down(PointerKind::Touch, DispatchPhase::Capture, move |_| {
            *h.borrow_mut() += 1;
        });

        doc.dispatch_pointer_down(node, PointerKind::Mouse);
        assert_eq!(*hits.borrow(), 0);
        doc.dispatch_pointer_down(node, PointerKind::Touch);
        assert_eq!(*hits.borrow(), 1);
    }

    #[test]
    fn cancelled_pointer_listener_stops_firing() {
        let doc = Document::new();
        let node = doc.create_element("div");
        let hits = Rc::new(RefCell::new(0u32));

        let h = Rc::clone(&hits);
        let handle =
            doc.on_pointer_down(PointerKind::Mouse, DispatchPhase::Capture, move |_| {
                *h.borrow_mut() += 1;
            });
        assert_eq!(doc.pointer_listener_count(), 1);

        doc.dispatch_pointer_down(node, PointerKind::Mouse);
        doc.cancel_pointer_down(handle);
        assert_eq!(doc.pointer_listener_count(), 0);
        doc.dispatch_pointer_down(node, PointerKind::Mouse);

        assert_eq!(*hits.borrow(), 1);

        // Cancelling again is harmless.
        doc.cancel_pointer_down(handle);
    }

    #[test]
    fn listener_cancelled_mid_dispatch_still_sees_current_event() {
        let doc = Document::new();
        let node = doc.create_element("div");
        let hits = Rc::new(RefCell::new(0u32));

        let h = Rc::clone(&hits);
        let counted = doc.on_pointer_down(PointerKind::Mouse, DispatchPhase::Bubble, move |_| {
            *h.borrow_mut() += 1;
        });

        // Capture listener cancels the bubble listener during the gesture.
        // The dispatch snapshot was taken first, so the bubble listener
        // still observes this event; the next gesture it is gone.
        let d = doc.clone();
        doc.on_pointer_down(PointerKind::Mouse, DispatchPhase::Capture, move |_| {
            d.cancel_pointer_down(counted);
        });

        doc.dispatch_pointer_down(node, PointerKind::Mouse);
        doc.dispatch_pointer_down(node, PointerKind::Mouse);
        assert_eq!(*hits.borrow(), 1);
    }

    #[test]
    fn click_dispatch_targets_one_element() {
        let doc = Document::new();
        let a = doc.create_element("button");
        let b = doc.create_element("button");
        let hits = Rc::new(RefCell::new(Vec::new()));

        let h = Rc::clone(&hits);
        doc.on_click(a, move || h.borrow_mut().push("a"));
        let h = Rc::clone(&hits);
        let handle_b = doc.on_click(b, move || h.borrow_mut().push("b"));

        doc.dispatch_click(a);
        doc.dispatch_click(b);
        doc.cancel_click(handle_b);
        doc.dispatch_click(b);

        assert_eq!(*hits.borrow(), vec!["a", "b"]);
    }

    #[test]
    fn snapshot_reflects_structure() {
        let doc = Document::new();
        let root = doc.create_element("span");
        doc.add_class(root, "wrapper");
        let child = doc.create_element("div");
        doc.set_text(child, "hello");
        doc.set_attribute(child, "title", "greeting");
        doc.append_child(root, child);

        let snap = doc.snapshot(root);
        assert_eq!(snap.tag, "span");
        assert_eq!(snap.classes, vec!["wrapper"]);
        assert_eq!(snap.children.len(), 1);
        assert_eq!(snap.children[0].text.as_deref(), Some("hello"));

        let json = serde_json::to_string(&snap).unwrap();
        let back: crate::NodeSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snap);
    }
}
