pub mod document;
pub mod events;
pub mod node;

pub use document::*;
pub use events::*;
pub use node::{NodeId, NodeSnapshot};
