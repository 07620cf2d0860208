// UI module - handles all TUI rendering using Ratatui
//
// Architecture:
// - layout: Calculates screen layout (header, panes, inputs, legend)
// - render: Main orchestration for the file dialog
// - folder_tree: Renders the left folder tree with the Recents row
// - file_list: Renders the file table for the bound folder
// - search: Renders search input box with query and match count
// - legend: Renders hotkey legend
// - dialogs: Renders error and help dialogs
// - toast: Renders toast notifications (brief pop-up messages)
// - wizard: Renders the repository wizard steps

pub mod dialogs;
pub mod file_list;
pub mod folder_tree;
pub mod layout;
pub mod legend;
pub mod render;
pub mod search;
pub mod toast;
pub mod wizard;

// Re-export main render functions for convenience
pub use render::render;
pub use wizard::render_wizard;
