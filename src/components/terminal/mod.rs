mod editor;
mod link_dialog;
mod output;
mod terminal;

pub use editor::EditorView;
pub use link_dialog::LinkDialog;
pub use output::Output;
pub use terminal::Terminal;
