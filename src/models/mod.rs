pub mod checklist;
pub mod document;
pub mod enums;
pub mod owner;
pub mod template;

pub use checklist::*;
pub use document::*;
pub use enums::*;
pub use owner::*;
pub use template::*;
