use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use repotui::messages::Selection;
use repotui::model::{FolderTree, TreeRow};

/// Expansion marker for a folder row
fn marker(has_children: bool, open: bool) -> &'static str {
    match (has_children, open) {
        (false, _) => "  ",
        (true, false) => "▸ ",
        (true, true) => "▾ ",
    }
}

/// Render the folder tree, Recents first
pub fn render_folder_tree(f: &mut Frame, area: Rect, tree: &FolderTree, is_focused: bool, loading: bool) {
    let selected_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);

    let items: Vec<ListItem> = tree
        .rows()
        .into_iter()
        .map(|row| match row {
            TreeRow::Recents => {
                let style = if tree.selection == Selection::Recents {
                    selected_style
                } else {
                    Style::default()
                };
                ListItem::new(Line::from(Span::styled("🕘 Recents", style)))
            }
            TreeRow::Folder(idx) => {
                let folder = &tree.folders[idx];
                let indent = "  ".repeat(folder.depth as usize);
                let is_selected = tree.selection.folder_path() == Some(folder.path.as_str());
                let style = if is_selected {
                    selected_style
                } else {
                    Style::default()
                };
                ListItem::new(Line::from(vec![
                    Span::raw(indent),
                    Span::styled(
                        marker(folder.has_children, folder.open),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(folder.name.clone(), style),
                ]))
            }
        })
        .collect();

    let title = if loading { "Folders (loading…)" } else { "Folders" };
    let border_color = if is_focused { Color::Cyan } else { Color::White };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(border_color)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(tree.cursor));
    f.render_stateful_widget(list, area, &mut state);
}
