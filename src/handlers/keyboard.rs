//! Keyboard Input Handler
//!
//! Handles key input for the file dialog. Modal states (error dialog, help,
//! inline rename, search box, save-name box) are checked first and swallow
//! the key.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use repotui::logic::ui::{cycle_focus, Focus};
use repotui::OpenMode;

use crate::app::App;

const PAGE: usize = 10;

/// Handle keyboard input
pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.model.ui.should_quit = true;
        return;
    }

    if app.model.ui.error_dialog.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            app.model.ui.error_dialog = None;
        }
        return;
    }

    if app.model.ui.show_help {
        app.model.ui.show_help = false;
        return;
    }

    if app.model.files.editing.is_some() {
        handle_rename_key(app, key);
        return;
    }

    if app.model.ui.search_mode {
        handle_search_key(app, key);
        return;
    }

    if app.model.ui.focus == Focus::FileName {
        handle_name_key(app, key);
        return;
    }

    let vim = app.model.ui.vim_mode;
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let pending_g = std::mem::take(&mut app.model.ui.pending_g);

    match key.code {
        KeyCode::Char('q') => app.model.ui.should_quit = true,
        KeyCode::Esc => {
            if app.model.search_query.is_empty() {
                app.model.ui.should_quit = true;
            } else {
                app.model.set_search("");
            }
        }
        KeyCode::Tab => {
            let has_name_input = app.model.mode == OpenMode::Save;
            app.model.ui.focus = cycle_focus(app.model.ui.focus, has_name_input);
        }
        KeyCode::Char('f') if ctrl && !vim => app.model.ui.search_mode = true,
        KeyCode::Char('/') if vim => app.model.ui.search_mode = true,
        KeyCode::Char('r') if ctrl => app.refresh(),
        KeyCode::Char('?') => app.model.ui.show_help = true,
        KeyCode::Char('s') => app.model.files.sort_cycle(),
        _ => match app.model.ui.focus {
            Focus::Tree => handle_tree_key(app, key, vim, ctrl, pending_g),
            Focus::Files | Focus::FileName => handle_files_key(app, key, vim, ctrl, pending_g),
        },
    }
}

fn handle_tree_key(app: &mut App, key: KeyEvent, vim: bool, ctrl: bool, pending_g: bool) {
    let tree = &mut app.model.tree;
    match key.code {
        KeyCode::Up => tree.cursor_up(),
        KeyCode::Down => tree.cursor_down(),
        KeyCode::Char('k') if vim => tree.cursor_up(),
        KeyCode::Char('j') if vim => tree.cursor_down(),
        KeyCode::PageUp => tree.cursor_page(PAGE, false),
        KeyCode::PageDown => tree.cursor_page(PAGE, true),
        KeyCode::Char('u') if vim && ctrl => tree.cursor_page(PAGE / 2, false),
        KeyCode::Char('d') if vim && ctrl => tree.cursor_page(PAGE / 2, true),
        KeyCode::Char('b') if vim && ctrl => tree.cursor_page(PAGE, false),
        KeyCode::Char('f') if vim && ctrl => tree.cursor_page(PAGE, true),
        KeyCode::Home => tree.cursor = 0,
        KeyCode::End => tree.cursor = tree.row_count().saturating_sub(1),
        KeyCode::Char('g') if vim && pending_g => tree.cursor = 0,
        KeyCode::Char('g') if vim => app.model.ui.pending_g = true,
        KeyCode::Char('G') if vim => tree.cursor = tree.row_count().saturating_sub(1),
        KeyCode::Char(' ') => tree.toggle_at_cursor(),
        KeyCode::Right => expand_at_cursor(app),
        KeyCode::Char('l') if vim => expand_at_cursor(app),
        KeyCode::Left => tree.collapse_or_parent(),
        KeyCode::Char('h') if vim => tree.collapse_or_parent(),
        KeyCode::Char('o') => {
            if let Some(repotui::model::TreeRow::Folder(idx)) = tree.cursor_row() {
                if let Some(event) = tree.select_and_toggle(idx) {
                    if let Err(e) = app.model.handle_tree_event(event) {
                        app.model.report(&e);
                    }
                }
            }
        }
        KeyCode::Enter => {
            app.model.tree_select_at_cursor();
            app.model.ui.focus = Focus::Files;
        }
        _ => {}
    }
}

/// Open a closed folder; on an open one step into its first child
fn expand_at_cursor(app: &mut App) {
    let tree = &mut app.model.tree;
    if let Some(repotui::model::TreeRow::Folder(idx)) = tree.cursor_row() {
        if tree.folders[idx].has_children && !tree.folders[idx].open {
            tree.toggle(idx);
        } else if tree.folders[idx].open {
            tree.cursor_down();
        }
    }
}

fn handle_files_key(app: &mut App, key: KeyEvent, vim: bool, ctrl: bool, pending_g: bool) {
    let files = &mut app.model.files;
    match key.code {
        KeyCode::Up => files.cursor_up(),
        KeyCode::Down => files.cursor_down(),
        KeyCode::Char('k') if vim => files.cursor_up(),
        KeyCode::Char('j') if vim => files.cursor_down(),
        KeyCode::PageUp => files.cursor_page(PAGE, false),
        KeyCode::PageDown => files.cursor_page(PAGE, true),
        KeyCode::Char('u') if vim && ctrl => files.cursor_page(PAGE / 2, false),
        KeyCode::Char('d') if vim && ctrl => files.cursor_page(PAGE / 2, true),
        KeyCode::Char('b') if vim && ctrl => files.cursor_page(PAGE, false),
        KeyCode::Char('f') if vim && ctrl => files.cursor_page(PAGE, true),
        KeyCode::Home => files.cursor_first(),
        KeyCode::End => files.cursor_last(),
        KeyCode::Char('g') if vim && pending_g => files.cursor_first(),
        KeyCode::Char('g') if vim => app.model.ui.pending_g = true,
        KeyCode::Char('G') if vim => files.cursor_last(),
        KeyCode::Char(' ') => {
            let requests = app.model.files_select_at_cursor();
            app.send_all(requests);
        }
        KeyCode::Enter => {
            if let Some(request) = app.model.files_commit_at_cursor() {
                app.send(request);
            }
        }
        KeyCode::Char('r') | KeyCode::F(2) => app.model.begin_rename(),
        KeyCode::Backspace | KeyCode::Left => go_to_parent(app),
        KeyCode::Char('h') if vim => go_to_parent(app),
        _ => {}
    }
}

fn go_to_parent(app: &mut App) {
    let parent = app.model.current_folder().and_then(|f| f.parent.clone());
    if let Some(parent) = parent {
        if let Err(e) = app.model.select_folder_by_path(&parent) {
            app.model.report(&e);
        }
    }
}

fn handle_rename_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.model.files.cancel_rename(),
        KeyCode::Enter => {
            if let Some(request) = app.model.finish_rename() {
                app.send(request);
            }
        }
        KeyCode::Backspace => app.model.files.edit_pop(),
        KeyCode::Char(c) => app.model.files.edit_push(c),
        _ => {}
    }
}

fn handle_search_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.model.ui.search_mode = false;
            app.model.set_search("");
        }
        KeyCode::Enter => app.model.ui.search_mode = false,
        KeyCode::Backspace => {
            let mut query = app.model.search_query.clone();
            query.pop();
            app.model.set_search(&query);
        }
        KeyCode::Char(c) => {
            let query = format!("{}{}", app.model.search_query, c);
            app.model.set_search(&query);
        }
        _ => {}
    }
}

fn handle_name_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.model.ui.focus = Focus::Files,
        KeyCode::Tab => app.model.ui.focus = cycle_focus(Focus::FileName, true),
        KeyCode::Enter => {
            if let Some(request) = app.model.confirm_save() {
                app.send(request);
            }
        }
        KeyCode::Backspace => {
            app.model.ui.save_name.pop();
        }
        KeyCode::Char(c) => app.model.ui.save_name.push(c),
        _ => {}
    }
}
