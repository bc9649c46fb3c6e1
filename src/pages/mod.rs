mod editor;
mod preview;

pub use editor::EditorPage;
pub use preview::PreviewPage;
