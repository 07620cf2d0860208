use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use repotui::api::FileRecord;
use repotui::logic::{file, formatting};
use repotui::model::FileList;
use repotui::SortState;

const TYPE_WIDTH: u16 = 15;
const DATE_WIDTH: u16 = 16;

/// Header text for the name column
fn name_header(sort: SortState) -> String {
    match sort {
        SortState::Unsorted => "Name".to_string(),
        state => format!("Name {}", state.as_str()),
    }
}

fn name_cell(record: &FileRecord, editing: Option<&str>, width: usize) -> Cell<'static> {
    let icon = if record.is_folder() { "📁 " } else { "  " };
    match editing {
        Some(buffer) => Cell::from(Line::from(vec![
            Span::raw(icon),
            Span::styled(
                buffer.to_string(),
                Style::default().fg(Color::Black).bg(Color::Yellow),
            ),
            Span::styled("█", Style::default().fg(Color::Yellow)),
        ])),
        None => Cell::from(format!(
            "{}{}",
            icon,
            formatting::truncate_to_width(&record.name, width.saturating_sub(3))
        )),
    }
}

/// Render the file table for the bound folder or the recent files
pub fn render_file_list(f: &mut Frame, area: Rect, files: &FileList, title: &str, is_focused: bool) {
    let name_width = area
        .width
        .saturating_sub(TYPE_WIDTH + DATE_WIDTH + 6) as usize;

    let rows: Vec<Row> = files
        .rows()
        .into_iter()
        .map(|record| {
            let editing = files
                .editing
                .as_ref()
                .filter(|e| &e.file == record)
                .map(|e| e.buffer.as_str());
            let is_selected = files.selected.as_ref() == Some(record);
            let style = if is_selected {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Row::new(vec![
                name_cell(record, editing, name_width),
                Cell::from(file::type_label(record).to_string()),
                Cell::from(formatting::format_last_saved(record.date)),
            ])
            .style(style)
        })
        .collect();

    let header = Row::new(vec![
        Cell::from(name_header(files.sort_state)),
        Cell::from("Type"),
        Cell::from("Last saved"),
    ])
    .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

    let border_color = if is_focused { Color::Cyan } else { Color::White };
    let empty = rows.is_empty();

    let table = Table::new(
        rows,
        [
            Constraint::Min(10),
            Constraint::Length(TYPE_WIDTH),
            Constraint::Length(DATE_WIDTH),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(if empty {
                format!("{} (empty)", title)
            } else {
                title.to_string()
            })
            .border_style(Style::default().fg(border_color)),
    )
    .row_highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("> ");

    let mut state = TableState::default();
    state.select(files.cursor);
    f.render_stateful_widget(table, area, &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_header_shows_sort() {
        assert_eq!(name_header(SortState::Unsorted), "Name");
        assert_eq!(name_header(SortState::Descending), "Name ▼");
        assert_eq!(name_header(SortState::Ascending), "Name ▲");
    }
}
