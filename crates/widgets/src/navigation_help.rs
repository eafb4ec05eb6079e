//! Toolbar button that toggles a popover panel of mouse-navigation
//! instructions for the globe viewer.
//!
//! Behavior:
//! - the button click inverts `show_instructions` on the view-model
//! - a capture-phase pointer-down anywhere outside the widget closes the
//!   panel; pointer-downs inside it are left to the button's own click path
//! - `destroy` unregisters both document listeners, tears down the bindings
//!   and detaches the widget subtree; a second call is an error
//!
//! Class names and structure are kept byte-compatible with the stock globe
//! viewer stylesheets.

use dom::{DispatchPhase, Document, NodeId, PointerKind, PointerListenerHandle};
use tracing::{debug, trace};

use crate::assets::{
    AssetResolver, HELP_GLYPH_PATH, MOUSE_LEFT_ICON, MOUSE_MIDDLE_ICON, MOUSE_RIGHT_ICON,
};
use crate::binding::{apply_svg_path, Bindings};
use crate::error::WidgetError;
use crate::view_model::NavigationHelpButtonViewModel;

/// Host element reference: a node handle, or an `id` attribute value to
/// resolve against the document.
#[derive(Debug, Clone)]
pub enum ContainerRef {
    Node(NodeId),
    Id(String),
}

impl From<NodeId> for ContainerRef {
    fn from(node: NodeId) -> Self {
        ContainerRef::Node(node)
    }
}

impl From<&str> for ContainerRef {
    fn from(id: &str) -> Self {
        ContainerRef::Id(id.to_string())
    }
}

impl From<String> for ContainerRef {
    fn from(id: String) -> Self {
        ContainerRef::Id(id)
    }
}

/// Construction options for [`NavigationHelpButton`].
#[derive(Debug, Clone)]
pub struct NavigationHelpOptions {
    /// Element that will contain the widget. Required; resolved eagerly.
    pub container: ContainerRef,
    /// Whether the instructions panel starts open.
    pub instructions_initially_visible: bool,
}

impl NavigationHelpOptions {
    pub fn new(container: impl Into<ContainerRef>) -> Self {
        NavigationHelpOptions {
            container: container.into(),
            instructions_initially_visible: false,
        }
    }

    pub fn instructions_initially_visible(mut self, visible: bool) -> Self {
        self.instructions_initially_visible = visible;
        self
    }
}

struct InstructionRow {
    icon: &'static str,
    title_class: &'static str,
    title: &'static str,
    details: &'static [&'static str],
}

const INSTRUCTION_ROWS: [InstructionRow; 3] = [
    InstructionRow {
        icon: MOUSE_LEFT_ICON,
        title_class: "cesium-navigation-help-pan",
        title: "Pan view",
        details: &["Left click + drag"],
    },
    InstructionRow {
        icon: MOUSE_RIGHT_ICON,
        title_class: "cesium-navigation-help-zoom",
        title: "Zoom view",
        details: &["Right click + drag, or", "Mouse wheel scroll"],
    },
    InstructionRow {
        icon: MOUSE_MIDDLE_ICON,
        title_class: "cesium-navigation-help-rotate",
        title: "Rotate view",
        details: &["Middle click + drag, or", "CTRL + Left click + drag"],
    },
];

/// Single-button widget displaying instructions for navigating the globe
/// with the mouse.
pub struct NavigationHelpButton {
    document: Document,
    container: NodeId,
    view_model: NavigationHelpButtonViewModel,
    wrapper: NodeId,
    bindings: Bindings,
    outside_mouse: PointerListenerHandle,
    outside_touch: PointerListenerHandle,
    destroyed: bool,
}

impl NavigationHelpButton {
    /// Builds the widget inside the configured container.
    ///
    /// The container is resolved before anything else; on failure nothing
    /// has been constructed, appended or registered.
    pub fn new(
        document: &Document,
        options: NavigationHelpOptions,
        resolver: &dyn AssetResolver,
    ) -> Result<Self, WidgetError> {
        let container = match options.container {
            ContainerRef::Node(node) => node,
            ContainerRef::Id(id) => document
                .element_by_id(&id)
                .ok_or(WidgetError::ContainerNotFound(id))?,
        };

        let view_model = NavigationHelpButtonViewModel::new();
        if options.instructions_initially_visible {
            view_model.show_instructions.set(true);
        }

        let wrapper = document.create_element("span");
        document.add_class(wrapper, "cesium-navigationHelpButton-wrapper");
        document.append_child(container, wrapper);

        let button = document.create_element("button");
        document.set_attribute(button, "type", "button");
        document.add_class(button, "cesium-button");
        document.add_class(button, "cesium-toolbar-button");
        document.add_class(button, "cesium-navigation-help-button");
        apply_svg_path(document, button, HELP_GLYPH_PATH, 32, 32);
        document.append_child(wrapper, button);

        let instructions = build_instructions_panel(document, resolver);
        document.append_child(wrapper, instructions);

        let mut bindings = Bindings::new();
        bindings.bind_attribute(document, button, "title", &view_model.tooltip);
        bindings.bind_click(document, button, view_model.command());
        bindings.bind_class(
            document,
            instructions,
            "cesium-navigation-help-visible",
            &view_model.show_instructions,
        );

        let outside_mouse =
            register_outside_close(document, PointerKind::Mouse, wrapper, &view_model);
        let outside_touch =
            register_outside_close(document, PointerKind::Touch, wrapper, &view_model);

        debug!("navigation help button attached");

        Ok(NavigationHelpButton {
            document: document.clone(),
            container,
            view_model,
            wrapper,
            bindings,
            outside_mouse,
            outside_touch,
            destroyed: false,
        })
    }

    /// The parent container.
    pub fn container(&self) -> NodeId {
        self.container
    }

    /// The view model.
    pub fn view_model(&self) -> &NavigationHelpButtonViewModel {
        &self.view_model
    }

    /// Root element the widget owns inside the container.
    pub fn wrapper(&self) -> NodeId {
        self.wrapper
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Destroys the widget: unregisters both document listeners, releases
    /// the bindings and detaches the wrapper. Should be called when
    /// permanently removing the widget from layout.
    pub fn destroy(&mut self) -> Result<(), WidgetError> {
        if self.destroyed {
            return Err(WidgetError::AlreadyDestroyed);
        }
        self.teardown();
        Ok(())
    }

    fn teardown(&mut self) {
        self.document.cancel_pointer_down(self.outside_mouse);
        self.document.cancel_pointer_down(self.outside_touch);
        self.bindings.clean();
        self.document.remove_child(self.container, self.wrapper);
        self.destroyed = true;
        debug!("navigation help button destroyed");
    }
}

impl Drop for NavigationHelpButton {
    fn drop(&mut self) {
        if !self.destroyed {
            self.teardown();
        }
    }
}

/// Registers the capture-phase close handler for one pointer kind.
///
/// Capture phase guarantees the handler observes every pointer-down before
/// any click handler in the same gesture; targets inside the wrapper are
/// excluded, so the button's own toggle path is never raced.
fn register_outside_close(
    document: &Document,
    kind: PointerKind,
    wrapper: NodeId,
    view_model: &NavigationHelpButtonViewModel,
) -> PointerListenerHandle {
    let doc = document.clone();
    let show_instructions = view_model.show_instructions.clone();
    document.on_pointer_down(kind, DispatchPhase::Capture, move |event| {
        if !doc.contains(wrapper, event.target) {
            trace!(?kind, "pointer-down outside navigation help, closing");
            show_instructions.set(false);
        }
    })
}

fn build_instructions_panel(document: &Document, resolver: &dyn AssetResolver) -> NodeId {
    let panel = document.create_element("div");
    document.add_class(panel, "cesium-navigation-help");

    let table = document.create_element("table");
    document.append_child(panel, table);

    for row in &INSTRUCTION_ROWS {
        let tr = document.create_element("tr");

        let icon_cell = document.create_element("td");
        let img = document.create_element("img");
        document.set_attribute(img, "src", &resolver.resolve(row.icon));
        document.set_attribute(img, "width", "48");
        document.set_attribute(img, "height", "48");
        document.append_child(icon_cell, img);
        document.append_child(tr, icon_cell);

        let text_cell = document.create_element("td");
        let title = document.create_element("div");
        document.add_class(title, row.title_class);
        document.set_text(title, row.title);
        document.append_child(text_cell, title);
        for detail in row.details {
            let line = document.create_element("div");
            document.add_class(line, "cesium-navigation-help-details");
            document.set_text(line, detail);
            document.append_child(text_cell, line);
        }
        document.append_child(tr, text_cell);

        document.append_child(table, tr);
    }

    panel
}
