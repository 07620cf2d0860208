use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use repotui::logic::ui::Focus;
use repotui::messages::Selection;
use repotui::OpenMode;

use super::{dialogs, file_list, folder_tree, layout, legend, search, toast};
use crate::app::App;

/// Title of the file pane for the current selection
fn files_title(selection: &Selection, count: usize) -> String {
    match selection {
        Selection::Recents => format!("Recents ({})", count),
        Selection::Folder(path) => format!("{} ({})", path, count),
    }
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![
        Span::styled(
            format!(" {} ", app.model.mode.title()),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(app.server_url.clone(), Style::default().fg(Color::Gray)),
    ];
    if app.model.loading.tree || app.model.loading.recents {
        spans.push(Span::styled("  loading…", Style::default().fg(Color::Yellow)));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_name_input(f: &mut Frame, area: Rect, app: &App) {
    let focused = app.model.ui.focus == Focus::FileName;
    let border_color = if focused { Color::Cyan } else { Color::Gray };
    let mut spans = vec![Span::raw(app.model.ui.save_name.clone())];
    if focused {
        spans.push(Span::styled("█", Style::default().fg(Color::Yellow)));
    }
    let input = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" File name (Enter: {}) ", app.model.mode.confirm_label()))
            .border_style(Style::default().fg(border_color)),
    );
    f.render_widget(input, area);
}

/// Main render function for the file dialog
pub fn render(f: &mut Frame, app: &App) {
    let size = f.area();
    let model = &app.model;

    let ctx = legend::LegendContext {
        vim_mode: model.ui.vim_mode,
        focus: model.ui.focus,
        mode: model.mode,
        search_mode: model.ui.search_mode,
        has_search_query: !model.search_query.is_empty(),
        editing: model.files.editing.is_some(),
    };
    let legend_height = legend::calculate_legend_height(size.width, ctx);
    let search_visible = model.ui.search_mode || !model.search_query.is_empty();
    let layout_info = layout::calculate_layout(
        size,
        legend_height,
        search_visible,
        model.mode == OpenMode::Save,
    );

    render_header(f, layout_info.header_area, app);

    folder_tree::render_folder_tree(
        f,
        layout_info.tree_area,
        &model.tree,
        model.ui.focus == Focus::Tree,
        model.loading.tree,
    );

    file_list::render_file_list(
        f,
        layout_info.files_area,
        &model.files,
        &files_title(&model.selection, model.files.row_count()),
        model.ui.focus == Focus::Files,
    );

    if let Some(area) = layout_info.search_area {
        search::render_search_input(
            f,
            area,
            &model.search_query,
            model.ui.search_mode,
            model.files.row_count(),
            model.ui.vim_mode,
        );
    }

    if let Some(area) = layout_info.name_area {
        render_name_input(f, area, app);
    }

    legend::render_legend(f, layout_info.legend_area, ctx);

    if let Some(t) = &model.ui.toast {
        toast::render_toast(f, size, &t.text, t.is_error);
    }

    if let Some(message) = &model.ui.error_dialog {
        dialogs::render_error_dialog(f, message);
    }

    if model.ui.show_help {
        dialogs::render_help(f, model.ui.vim_mode);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files_title() {
        assert_eq!(files_title(&Selection::Recents, 3), "Recents (3)");
        assert_eq!(
            files_title(&Selection::Folder("/public/etl".to_string()), 0),
            "/public/etl (0)"
        );
    }
}
