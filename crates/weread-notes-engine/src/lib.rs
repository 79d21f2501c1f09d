pub mod display;
pub mod reflection;
pub mod reformat;
pub mod targets;

// Re-export key types for easier usage
pub use display::{ConfirmFormat, FORMAT_DONE_NOTICE, LOADING_TEXT, PanelSection, ReflectionPanel};
pub use reflection::{
    ReflectionClient, ReflectionConfig, ReflectionError, ReflectionRequest,
};
pub use reformat::{FormattedNotes, Reformatter, book_name_from_markdown, reformat, reformat_notes};
pub use targets::{ReflectionTarget, reflection_targets};
