//! Small binding layer between observables and the element tree.
//!
//! Plays the role a declarative binding engine would: each `bind_*` call
//! applies the current view-model state to the element immediately, then
//! keeps it synchronized, and [`Bindings::clean`] tears everything down in
//! one bulk operation.

use dom::{Document, NodeId};

use crate::observable::{Command, Observable};

/// Accumulates live bindings on a subtree so they can be released together.
#[derive(Default)]
pub struct Bindings {
    teardowns: Vec<Box<dyn FnOnce()>>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps membership of `class` on `node` equal to the observable.
    pub fn bind_class(
        &mut self,
        document: &Document,
        node: NodeId,
        class: &str,
        source: &Observable<bool>,
    ) {
        document.set_class_enabled(node, class, source.get());
        let doc = document.clone();
        let class = class.to_string();
        let id = source.subscribe(move |enabled| doc.set_class_enabled(node, &class, *enabled));
        let source = source.clone();
        self.teardowns.push(Box::new(move || source.unsubscribe(id)));
    }

    /// Keeps the attribute `name` on `node` equal to the observable string.
    pub fn bind_attribute(
        &mut self,
        document: &Document,
        node: NodeId,
        name: &str,
        source: &Observable<String>,
    ) {
        document.set_attribute(node, name, &source.get());
        let doc = document.clone();
        let name = name.to_string();
        let id = source.subscribe(move |value| doc.set_attribute(node, &name, value));
        let source = source.clone();
        self.teardowns.push(Box::new(move || source.unsubscribe(id)));
    }

    /// Runs `command` whenever `node` is clicked.
    pub fn bind_click(&mut self, document: &Document, node: NodeId, command: &Command) {
        let command = command.clone();
        let handle = document.on_click(node, move || command.execute());
        let doc = document.clone();
        self.teardowns.push(Box::new(move || doc.cancel_click(handle)));
    }

    pub fn len(&self) -> usize {
        self.teardowns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teardowns.is_empty()
    }

    /// Releases every subscription and listener created by this set of
    /// bindings. The set is empty (and reusable) afterwards.
    pub fn clean(&mut self) {
        for teardown in self.teardowns.drain(..) {
            teardown();
        }
    }
}

impl Drop for Bindings {
    fn drop(&mut self) {
        self.clean();
    }
}

/// Attaches a static vector-path icon to `node`: an `svg` child with a
/// single `path`, sized and view-boxed to `width` x `height`.
pub fn apply_svg_path(
    document: &Document,
    node: NodeId,
    path: &str,
    width: u32,
    height: u32,
) -> NodeId {
    let svg = document.create_element("svg");
    document.add_class(svg, "cesium-svgPath-svg");
    document.set_attribute(svg, "width", &width.to_string());
    document.set_attribute(svg, "height", &height.to_string());
    document.set_attribute(svg, "viewBox", &format!("0 0 {width} {height}"));
    let path_element = document.create_element("path");
    document.set_attribute(path_element, "d", path);
    document.append_child(svg, path_element);
    document.append_child(node, svg);
    svg
}
