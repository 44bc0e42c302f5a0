pub mod aggregator;
pub mod screen;

pub use aggregator::{initials, select_view, tab_counts};
pub use screen::{DirectoryScreen, ScreenState};
