#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetError {
    /// The configured container id does not resolve to any element.
    ContainerNotFound(String),
    /// `destroy` was called on an already-destroyed widget.
    AlreadyDestroyed,
}

impl std::fmt::Display for WidgetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WidgetError::ContainerNotFound(id) => {
                write!(f, "element with id \"{id}\" does not exist in the document")
            }
            WidgetError::AlreadyDestroyed => write!(f, "widget was already destroyed"),
        }
    }
}

impl std::error::Error for WidgetError {}
