use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use repotui::logic::ui::Focus;
use repotui::OpenMode;

/// What the legend needs to know about the dialog
#[derive(Debug, Clone, Copy)]
pub struct LegendContext {
    pub vim_mode: bool,
    pub focus: Focus,
    pub mode: OpenMode,
    pub search_mode: bool,
    pub has_search_query: bool,
    pub editing: bool,
}

fn key(k: &'static str, label: &'static str) -> [Span<'static>; 2] {
    [
        Span::styled(k, Style::default().fg(Color::Yellow)),
        Span::raw(label),
    ]
}

/// Build hotkey spans (extracted for testability)
fn build_hotkey_spans(ctx: LegendContext) -> Vec<Span<'static>> {
    let mut spans = vec![];

    if ctx.editing {
        spans.extend(key("Enter", ":Rename  "));
        spans.extend(key("Esc", ":Cancel"));
        return spans;
    }

    if ctx.search_mode {
        spans.extend(key("Enter", ":Keep filter  "));
        spans.extend(key("Esc", ":Exit Search"));
        return spans;
    }

    if ctx.focus == Focus::FileName {
        spans.extend(key("Enter", ":Save  "));
        spans.extend(key("Tab", ":Next pane  "));
        spans.extend(key("Esc", ":Back to files"));
        return spans;
    }

    if ctx.vim_mode {
        spans.extend(key("hjkl", ":Nav  "));
        spans.extend(key("gg/G", ":First/Last  "));
        spans.extend(key("^d/^u", ":½Page  "));
    } else {
        spans.extend(key("↑/↓", ":Nav  "));
        spans.extend(key("PgUp/PgDn", ":Page  "));
    }
    spans.extend(key("Tab", ":Switch pane  "));

    match ctx.focus {
        Focus::Tree => {
            spans.extend(key("Space", ":Expand/Collapse  "));
            spans.extend(key("Enter", ":Show files  "));
            spans.extend(key("o", ":Select+Expand  "));
        }
        Focus::Files | Focus::FileName => {
            spans.extend(key("Space", ":Select  "));
            match ctx.mode {
                OpenMode::Open => spans.extend(key("Enter", ":Open  ")),
                OpenMode::Save => spans.extend(key("Enter", ":Save over  ")),
            }
            spans.extend(key("r", ":Rename  "));
            spans.extend(key("⌫", ":Parent  "));
        }
    }

    spans.extend(key("s", ":Sort  "));
    if ctx.has_search_query {
        spans.extend(key("Esc", ":Clear Search  "));
    } else {
        spans.extend(key(if ctx.vim_mode { "/" } else { "^F" }, ":Search  "));
    }
    spans.extend(key("^R", ":Refresh  "));
    spans.extend(key("?", ":Help  "));
    spans.extend(key("q", ":Quit"));
    spans
}

/// Build the legend paragraph (reusable for both rendering and height calculation)
pub fn build_legend_paragraph(ctx: LegendContext) -> Paragraph<'static> {
    Paragraph::new(vec![Line::from(build_hotkey_spans(ctx))])
        .block(Block::default().borders(Borders::ALL).title("Hotkeys"))
        .style(Style::default().fg(Color::Gray))
        .wrap(ratatui::widgets::Wrap { trim: false })
}

pub fn render_legend(f: &mut Frame, area: Rect, ctx: LegendContext) {
    f.render_widget(build_legend_paragraph(ctx), area);
}

/// Calculate required height for legend based on terminal width and content
pub fn calculate_legend_height(terminal_width: u16, ctx: LegendContext) -> u16 {
    // line_count() miscounts when a bordered block is attached
    let paragraph_for_counting = Paragraph::new(vec![Line::from(build_hotkey_spans(ctx))])
        .wrap(ratatui::widgets::Wrap { trim: false });

    let available_width = terminal_width.saturating_sub(2);
    let line_count = paragraph_for_counting.line_count(available_width);

    (line_count as u16).saturating_add(2).max(3)
}
