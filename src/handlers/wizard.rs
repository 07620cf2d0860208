//! Wizard Input Handler
//!
//! Key handling for each wizard step. Failures land in `wizard.error` and
//! are shown as a dialog until dismissed.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use repotui::model::wizard::WizardStep;

use crate::app::WizardApp;

pub fn handle_wizard_key(app: &mut WizardApp, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        app.wizard.close();
        return;
    }

    if app.wizard.error.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            app.wizard.error = None;
        }
        return;
    }

    if let Some(name) = app.confirm_delete.take() {
        if matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y')) {
            let result = app.wizard.delete(&name);
            app.wizard.record(result);
        }
        return;
    }

    match app.wizard.step {
        WizardStep::RepositoryList => handle_list_key(app, key),
        WizardStep::SelectType => handle_type_key(app, key),
        WizardStep::KettleFileDetails | WizardStep::PentahoDetails => {
            handle_details_key(app, key, ctrl)
        }
        WizardStep::Success => handle_success_key(app, key),
    }
}

fn handle_list_key(app: &mut WizardApp, key: KeyEvent) {
    let wizard = &mut app.wizard;
    let count = wizard.repositories.len();
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            wizard.repo_cursor = repotui::logic::navigation::prev_row(Some(wizard.repo_cursor), count)
                .unwrap_or(0);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            wizard.repo_cursor = repotui::logic::navigation::next_row(Some(wizard.repo_cursor), count)
                .unwrap_or(0);
        }
        KeyCode::Enter => {
            let result = wizard.connect();
            wizard.record(result);
        }
        KeyCode::Char('n') => wizard.create_new(),
        KeyCode::Char('d') | KeyCode::Delete => {
            app.confirm_delete = wizard.selected_repository().map(|r| r.name.clone());
        }
        KeyCode::Char('*') => {
            if let Some(name) = wizard.selected_repository().map(|r| r.name.clone()) {
                let result = wizard.set_default(&name);
                wizard.record(result);
            }
        }
        KeyCode::Esc | KeyCode::Char('q') => wizard.close(),
        _ => {}
    }
}

fn handle_type_key(app: &mut WizardApp, key: KeyEvent) {
    let wizard = &mut app.wizard;
    let count = wizard.types.len();
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            let idx = repotui::logic::navigation::prev_row(Some(wizard.type_cursor), count);
            wizard.select_repository(idx.unwrap_or(0));
        }
        KeyCode::Down | KeyCode::Char('j') => {
            let idx = repotui::logic::navigation::next_row(Some(wizard.type_cursor), count);
            wizard.select_repository(idx.unwrap_or(0));
        }
        KeyCode::Enter => {
            let result = wizard.get_started_at_cursor();
            wizard.record(result);
        }
        KeyCode::Esc | KeyCode::Char('q') => {
            if !wizard.back() {
                wizard.close();
            }
        }
        _ => {}
    }
}

fn handle_details_key(app: &mut WizardApp, key: KeyEvent, ctrl: bool) {
    let wizard = &mut app.wizard;
    let on_flag = wizard.focused_field().is_some_and(|f| f.is_flag());
    match key.code {
        KeyCode::Esc => {
            wizard.back();
        }
        KeyCode::Tab | KeyCode::Down => wizard.next_field(),
        KeyCode::BackTab | KeyCode::Up => wizard.prev_field(),
        KeyCode::Enter => {
            let result = wizard.finish();
            wizard.record(result);
        }
        KeyCode::Char('l') if ctrl && wizard.step == WizardStep::KettleFileDetails => {
            let result = wizard.select_location();
            wizard.record(result);
        }
        KeyCode::Char(' ') if on_flag => wizard.toggle_flag(),
        KeyCode::Char(c) if !ctrl && !on_flag => wizard.edit_push(c),
        KeyCode::Backspace => wizard.edit_pop(),
        _ => {}
    }
}

fn handle_success_key(app: &mut WizardApp, key: KeyEvent) {
    let wizard = &mut app.wizard;
    match key.code {
        KeyCode::Enter | KeyCode::Char('c') => {
            let result = wizard.connect();
            wizard.record(result);
        }
        KeyCode::Char('m') => {
            wizard.go(WizardStep::RepositoryList);
        }
        KeyCode::Esc | KeyCode::Char('q') => wizard.close(),
        _ => {}
    }
}
