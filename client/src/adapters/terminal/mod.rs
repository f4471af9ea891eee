//! Terminal adapter
//!
//! Render surface and confirmation prompt for the interactive driver: the
//! page is kept as an HTML snapshot on disk, prompts and notifications go
//! through the terminal.

pub mod confirm;
pub mod view;

pub use confirm::{InputLines, PromptConfirm};
pub use view::HtmlSnapshotView;
