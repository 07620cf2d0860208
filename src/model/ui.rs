//! UI Model
//!
//! This sub-model contains all state related to the user interface:
//! focus, dialogs, the save-name input and transient messages.

use std::time::Instant;

use crate::logic::ui::Focus;

/// A transient status line message
#[derive(Clone, Debug)]
pub struct Toast {
    pub text: String,
    pub is_error: bool,
    pub shown_at: Instant,
}

#[derive(Clone, Debug)]
pub struct UiModel {
    // ============================================
    // PREFERENCES
    // ============================================
    /// Whether vim keybindings are enabled
    pub vim_mode: bool,

    /// First half of a `gg` sequence was typed
    pub pending_g: bool,

    // ============================================
    // FOCUS & INPUT
    // ============================================
    pub focus: Focus,

    /// Whether the search box is receiving keystrokes
    pub search_mode: bool,

    /// File name typed in save mode
    pub save_name: String,

    // ============================================
    // DIALOGS & MESSAGES
    // ============================================
    pub toast: Option<Toast>,

    /// Modal error that stays until dismissed
    pub error_dialog: Option<String>,

    pub show_help: bool,

    /// Whether app should quit
    pub should_quit: bool,
}

impl UiModel {
    pub fn new(vim_mode: bool) -> Self {
        Self {
            vim_mode,
            pending_g: false,
            focus: Focus::Tree,
            search_mode: false,
            save_name: String::new(),
            toast: None,
            error_dialog: None,
            show_help: false,
            should_quit: false,
        }
    }

    /// Check if any modal dialog is currently showing
    pub fn has_modal(&self) -> bool {
        self.error_dialog.is_some() || self.show_help
    }

    pub fn close_all_modals(&mut self) {
        self.error_dialog = None;
        self.show_help = false;
    }

    pub fn show_toast(&mut self, text: impl Into<String>) {
        self.toast = Some(Toast {
            text: text.into(),
            is_error: false,
            shown_at: Instant::now(),
        });
    }

    pub fn show_error_toast(&mut self, text: impl Into<String>) {
        self.toast = Some(Toast {
            text: text.into(),
            is_error: true,
            shown_at: Instant::now(),
        });
    }

    pub fn show_error_dialog(&mut self, text: impl Into<String>) {
        self.error_dialog = Some(text.into());
    }

    pub fn should_dismiss_toast(&self) -> bool {
        self.toast.as_ref().is_some_and(|t| {
            crate::logic::ui::should_dismiss_toast(t.shown_at.elapsed().as_millis(), t.is_error)
        })
    }

    pub fn dismiss_toast(&mut self) {
        self.toast = None;
    }
}
