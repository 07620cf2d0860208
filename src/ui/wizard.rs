//! Repository wizard screens
//!
//! One render function per step; the frame around them (title, hotkeys,
//! dialogs) is shared.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use repotui::model::wizard::{Field, FieldValue, WizardStep};
use repotui::model::Wizard;

use super::dialogs;
use crate::app::WizardApp;

fn hotkeys(step: WizardStep, can_go_back: bool) -> &'static str {
    match step {
        WizardStep::RepositoryList => "Enter:Connect  n:New  *:Default  d:Delete  q:Close",
        WizardStep::SelectType if can_go_back => "↑/↓:Choose  Enter:Get Started  Esc:Back",
        WizardStep::SelectType => "↑/↓:Choose  Enter:Get Started  Esc:Close",
        WizardStep::KettleFileDetails => {
            "Tab:Next field  Space:Toggle  ^L:Browse  Enter:Finish  Esc:Back"
        }
        WizardStep::PentahoDetails => "Tab:Next field  Space:Toggle  Enter:Finish  Esc:Back",
        WizardStep::Success => "Enter:Connect  m:Manage repositories  q:Close",
    }
}

fn highlight() -> Style {
    Style::default()
        .bg(Color::DarkGray)
        .add_modifier(Modifier::BOLD)
}

fn render_repository_list(f: &mut Frame, area: Rect, wizard: &Wizard) {
    let items: Vec<ListItem> = wizard
        .repositories
        .iter()
        .map(|repo| {
            let mut spans = vec![Span::raw(repo.name.clone())];
            if repo.is_default {
                spans.push(Span::styled(" (default)", Style::default().fg(Color::Green)));
            }
            spans.push(Span::styled(
                format!("  {}", repo.id),
                Style::default().fg(Color::Gray),
            ));
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Repositories"))
        .highlight_style(highlight())
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if !wizard.repositories.is_empty() {
        state.select(Some(wizard.repo_cursor));
    }
    f.render_stateful_widget(list, area, &mut state);
}

fn render_select_type(f: &mut Frame, area: Rect, wizard: &Wizard) {
    let items: Vec<ListItem> = wizard
        .types
        .iter()
        .map(|t| {
            ListItem::new(vec![
                Line::from(Span::styled(
                    t.name.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    format!("  {}", t.description),
                    Style::default().fg(Color::Gray),
                )),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("What type of repository do you want to connect to?"),
        )
        .highlight_style(highlight())
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if !wizard.types.is_empty() {
        state.select(Some(wizard.type_cursor));
    }
    f.render_stateful_widget(list, area, &mut state);
}

fn field_line(field: Field, value: FieldValue<'_>, focused: bool) -> Line<'static> {
    let label_style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let mut spans = vec![Span::styled(format!("{:<24}", field.label()), label_style)];
    match value {
        FieldValue::Text(text) => {
            spans.push(Span::raw(text.to_string()));
            if focused {
                spans.push(Span::styled("█", Style::default().fg(Color::Yellow)));
            }
        }
        FieldValue::Flag(on) => {
            spans.push(Span::raw(if on { "[x]" } else { "[ ]" }));
        }
    }
    Line::from(spans)
}

fn render_details(f: &mut Frame, area: Rect, wizard: &Wizard) {
    let mut lines: Vec<Line> = wizard
        .fields()
        .iter()
        .enumerate()
        .map(|(i, field)| field_line(*field, wizard.field_value(*field), i == wizard.field_cursor))
        .collect();

    if let Err(e) = wizard.can_finish() {
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            e.to_string(),
            Style::default().fg(Color::Yellow),
        )));
    }

    let title = wizard
        .selected_type
        .as_ref()
        .map(|t| t.name.clone())
        .unwrap_or_else(|| wizard.step.title().to_string());
    let details = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false });
    f.render_widget(details, area);
}

fn render_success(f: &mut Frame, area: Rect, wizard: &Wizard) {
    let name = wizard.created.clone().unwrap_or_default();
    let text = vec![
        Line::from(Span::styled(
            "Your repository connection was created.",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        Line::raw(format!("Name: {}", name)),
        Line::raw(""),
        Line::raw("Connect now, or go back to manage your repositories."),
    ];
    let success = Paragraph::new(text).block(Block::default().borders(Borders::ALL).title("Success"));
    f.render_widget(success, area);
}

/// Render the wizard screen
pub fn render_wizard(f: &mut Frame, app: &WizardApp) {
    let wizard = &app.wizard;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(f.area());

    let header = Line::from(vec![
        Span::styled(
            format!(" {} ", wizard.step.title()),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {}", wizard.status.clone().unwrap_or_default()),
            Style::default().fg(Color::Green),
        ),
    ]);
    f.render_widget(Paragraph::new(header), chunks[0]);

    match wizard.step {
        WizardStep::RepositoryList => render_repository_list(f, chunks[1], wizard),
        WizardStep::SelectType => render_select_type(f, chunks[1], wizard),
        WizardStep::KettleFileDetails | WizardStep::PentahoDetails => {
            render_details(f, chunks[1], wizard)
        }
        WizardStep::Success => render_success(f, chunks[1], wizard),
    }

    let legend = Paragraph::new(hotkeys(wizard.step, wizard.can_go_back()))
        .block(Block::default().borders(Borders::ALL).title("Hotkeys"))
        .style(Style::default().fg(Color::Gray));
    f.render_widget(legend, chunks[2]);

    if let Some(name) = &app.confirm_delete {
        dialogs::render_delete_confirmation(f, name);
    }

    if let Some(message) = &wizard.error {
        dialogs::render_error_dialog(f, message);
    }
}
