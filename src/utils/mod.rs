pub mod layout;
pub mod list_navigation;
pub mod text_input;

pub use layout::{center_popup, create_standard_layout};
pub use list_navigation::ListStateExt;
pub use text_input::TextInput;
