//! Cursor movement logic
//!
//! Pure functions for moving a row cursor through the folder tree and the
//! file list.

/// Move the cursor one row down, wrapping to the top
///
/// # Examples
/// ```
/// use repotui::logic::navigation::next_row;
///
/// assert_eq!(next_row(None, 0), None);
/// assert_eq!(next_row(None, 3), Some(0));
/// assert_eq!(next_row(Some(1), 3), Some(2));
/// assert_eq!(next_row(Some(2), 3), Some(0));
/// ```
pub fn next_row(current: Option<usize>, row_count: usize) -> Option<usize> {
    if row_count == 0 {
        return None;
    }

    Some(match current {
        Some(i) if i + 1 >= row_count => 0,
        Some(i) => i + 1,
        None => 0,
    })
}

/// Move the cursor one row up, wrapping to the bottom
///
/// # Examples
/// ```
/// use repotui::logic::navigation::prev_row;
///
/// assert_eq!(prev_row(None, 0), None);
/// assert_eq!(prev_row(Some(0), 3), Some(2));
/// assert_eq!(prev_row(Some(2), 3), Some(1));
/// ```
pub fn prev_row(current: Option<usize>, row_count: usize) -> Option<usize> {
    if row_count == 0 {
        return None;
    }

    Some(match current {
        Some(0) | None => row_count - 1,
        Some(i) => (i - 1).min(row_count - 1),
    })
}

/// Jump `page` rows down without wrapping
pub fn page_down(current: Option<usize>, row_count: usize, page: usize) -> Option<usize> {
    if row_count == 0 {
        return None;
    }
    Some((current.unwrap_or(0) + page).min(row_count - 1))
}

/// Jump `page` rows up without wrapping
pub fn page_up(current: Option<usize>, row_count: usize, page: usize) -> Option<usize> {
    if row_count == 0 {
        return None;
    }
    Some(current.unwrap_or(0).saturating_sub(page).min(row_count - 1))
}

/// Keep a cursor inside a list that may have shrunk
pub fn clamp_row(current: Option<usize>, row_count: usize) -> Option<usize> {
    match current {
        _ if row_count == 0 => None,
        Some(i) => Some(i.min(row_count - 1)),
        None => None,
    }
}
