use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Layout information for rendering
pub struct LayoutInfo {
    /// Title bar with mode and server
    pub header_area: Rect,
    /// Folder tree pane
    pub tree_area: Rect,
    /// File table pane
    pub files_area: Rect,
    /// Search input area (if visible)
    pub search_area: Option<Rect>,
    /// File name input (save mode only)
    pub name_area: Option<Rect>,
    /// Hotkey legend area (full width)
    pub legend_area: Rect,
}

/// Calculate the screen layout for the file dialog
pub fn calculate_layout(
    terminal_size: Rect,
    legend_height: u16,
    search_visible: bool,
    save_mode: bool,
) -> LayoutInfo {
    let search_height = if search_visible { 3 } else { 0 };
    let name_height = if save_mode { 3 } else { 0 };

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),             // Header
            Constraint::Min(5),                // Tree + files
            Constraint::Length(search_height), // Search input
            Constraint::Length(name_height),   // Save name input
            Constraint::Length(legend_height), // Legend
        ])
        .split(terminal_size);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(main_chunks[1]);

    LayoutInfo {
        header_area: main_chunks[0],
        tree_area: panes[0],
        files_area: panes[1],
        search_area: search_visible.then_some(main_chunks[2]),
        name_area: save_mode.then_some(main_chunks[3]),
        legend_area: main_chunks[4],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_areas() {
        let area = Rect::new(0, 0, 100, 40);
        let open = calculate_layout(area, 3, false, false);
        assert!(open.search_area.is_none());
        assert!(open.name_area.is_none());

        let save = calculate_layout(area, 3, true, true);
        assert_eq!(save.search_area.map(|r| r.height), Some(3));
        assert_eq!(save.name_area.map(|r| r.height), Some(3));
        assert!(save.tree_area.width < save.files_area.width);
    }
}
