use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Rectangle of the given size centered in `area`
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_box(f: &mut Frame, text: String, title: &str, color: Color, width: u16, height: u16) {
    let area = centered(f.area(), width, height);
    let prompt = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title.to_string())
                .border_style(Style::default().fg(color)),
        )
        .style(Style::default().fg(Color::White).bg(Color::Black))
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, area);
    f.render_widget(prompt, area);
}

/// Render a modal error that stays until dismissed
pub fn render_error_dialog(f: &mut Frame, message: &str) {
    let height = 6 + (message.len() / 50) as u16;
    render_box(
        f,
        format!("{}\n\nPress Enter to dismiss", message),
        "Error",
        Color::Red,
        56,
        height,
    );
}

/// Render the keyboard help for the file dialog
pub fn render_help(f: &mut Frame, vim_mode: bool) {
    let nav = if vim_mode {
        "j/k or ↑/↓    move    gg/G   first/last    ^d/^u   half page"
    } else {
        "↑/↓           move    Home/End   first/last    PgUp/PgDn   page"
    };
    let text = format!(
        "{}\n\
         Tab           switch between folders, files and name box\n\n\
         Folders pane\n\
         Space         expand or collapse\n\
         ←/→           collapse / expand\n\
         Enter         show the folder's files\n\
         o             select and expand\n\n\
         Files pane\n\
         Space         select (folders are entered)\n\
         Enter         open or save\n\
         r, F2         rename inline\n\
         Backspace     parent folder\n\n\
         s             cycle name sort (none, Z-A, A-Z)\n\
         Ctrl-R        reload from server\n\
         q, Esc        quit\n\n\
         Press any key to close",
        nav
    );
    render_box(f, text, "Help", Color::Cyan, 70, 24);
}

/// Ask before deleting a repository
pub fn render_delete_confirmation(f: &mut Frame, name: &str) {
    render_box(
        f,
        format!("Delete repository {}?\n\nContinue? (y/n)", name),
        "Confirm Delete",
        Color::Red,
        50,
        7,
    );
}
