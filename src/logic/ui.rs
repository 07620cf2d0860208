//! UI state transition logic
//!
//! Pure functions for focus cycling and toast timing.

/// Which pane receives keystrokes in the file dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Tree,
    Files,
    FileName, // Save mode name input
}

/// Cycle focus with Tab: Tree → Files → (FileName in save mode) → Tree
///
/// # Examples
/// ```
/// use repotui::logic::ui::{cycle_focus, Focus};
///
/// assert_eq!(cycle_focus(Focus::Tree, false), Focus::Files);
/// assert_eq!(cycle_focus(Focus::Files, false), Focus::Tree);
/// assert_eq!(cycle_focus(Focus::Files, true), Focus::FileName);
/// assert_eq!(cycle_focus(Focus::FileName, true), Focus::Tree);
/// ```
pub fn cycle_focus(current: Focus, has_name_input: bool) -> Focus {
    match current {
        Focus::Tree => Focus::Files,
        Focus::Files if has_name_input => Focus::FileName,
        Focus::Files | Focus::FileName => Focus::Tree,
    }
}

/// Toasts stay up for 1.5 seconds, errors for 4
pub fn should_dismiss_toast(elapsed_ms: u128, is_error: bool) -> bool {
    let limit = if is_error { 4000 } else { 1500 };
    elapsed_ms >= limit
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_input_skipped_in_open_mode() {
        assert_eq!(cycle_focus(Focus::FileName, false), Focus::Tree);
    }

    #[test]
    fn test_toast_timing() {
        assert!(!should_dismiss_toast(1499, false));
        assert!(should_dismiss_toast(1500, false));
        assert!(!should_dismiss_toast(3000, true));
        assert!(should_dismiss_toast(4000, true));
    }
}
