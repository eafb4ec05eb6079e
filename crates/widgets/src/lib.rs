pub mod assets;
pub mod binding;
pub mod error;
pub mod navigation_help;
pub mod observable;
pub mod view_model;

pub use error::*;
pub use navigation_help::*;
pub use observable::*;
pub use view_model::*;
