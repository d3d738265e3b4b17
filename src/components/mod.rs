pub mod footer;
pub mod header;
pub mod question_editor;

pub use footer::Footer;
pub use header::Header;
pub use question_editor::{EditorMode, QuestionEditor};
