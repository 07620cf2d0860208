//! Sorting comparison logic
//!
//! Pure functions for ordering file records by name and for stepping the
//! three-state sort.

use crate::api::FileRecord;
use crate::SortState;
use std::cmp::Ordering;

/// Case-insensitive name comparison, A before Z
pub fn compare_ascending(a: &FileRecord, b: &FileRecord) -> Ordering {
    a.name.to_lowercase().cmp(&b.name.to_lowercase())
}

/// Case-insensitive name comparison, Z before A
pub fn compare_descending(a: &FileRecord, b: &FileRecord) -> Ordering {
    compare_ascending(a, b).reverse()
}

/// Next state in the cycle: Unsorted → Descending → Ascending → Unsorted
///
/// # Examples
/// ```
/// use repotui::SortState;
/// use repotui::logic::sorting::next_sort_state;
///
/// assert_eq!(next_sort_state(SortState::Unsorted), SortState::Descending);
/// assert_eq!(next_sort_state(SortState::Descending), SortState::Ascending);
/// assert_eq!(next_sort_state(SortState::Ascending), SortState::Unsorted);
/// ```
pub fn next_sort_state(current: SortState) -> SortState {
    match current {
        SortState::Unsorted => SortState::Descending,
        SortState::Descending => SortState::Ascending,
        SortState::Ascending => SortState::Unsorted,
    }
}

/// Sort `items` in place for a sorted state
///
/// `Unsorted` leaves the slice alone; restoring the original order is the
/// caller's job since only it holds the snapshot.
pub fn sort_records(items: &mut [FileRecord], state: SortState) {
    match state {
        SortState::Unsorted => {}
        SortState::Descending => items.sort_by(compare_descending),
        SortState::Ascending => items.sort_by(compare_ascending),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_file(name: &str) -> FileRecord {
        FileRecord {
            name: name.to_string(),
            file_type: "transformation".to_string(),
            object_id: None,
            path: "/public".to_string(),
            parent: None,
            extension: None,
            date: None,
            in_result: true,
        }
    }

    fn names(items: &[FileRecord]) -> Vec<&str> {
        items.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn test_compare_is_case_insensitive() {
        let a = make_file("apple");
        let b = make_file("Banana");
        assert_eq!(compare_ascending(&a, &b), Ordering::Less);
        assert_eq!(compare_descending(&a, &b), Ordering::Greater);
    }

    #[test]
    fn test_compare_ties_are_equal() {
        let a = make_file("Report");
        let b = make_file("report");
        assert_eq!(compare_ascending(&a, &b), Ordering::Equal);
        assert_eq!(compare_descending(&a, &b), Ordering::Equal);
    }

    #[test]
    fn test_sort_descending_then_ascending() {
        let mut items = vec![make_file("banana"), make_file("Apple"), make_file("cherry")];

        sort_records(&mut items, SortState::Descending);
        assert_eq!(names(&items), vec!["cherry", "banana", "Apple"]);

        sort_records(&mut items, SortState::Ascending);
        assert_eq!(names(&items), vec!["Apple", "banana", "cherry"]);
    }

    #[test]
    fn test_unsorted_leaves_order() {
        let mut items = vec![make_file("b"), make_file("a")];
        sort_records(&mut items, SortState::Unsorted);
        assert_eq!(names(&items), vec!["b", "a"]);
    }

    #[test]
    fn test_stable_for_ties() {
        let mut first = make_file("same");
        first.path = "/one".to_string();
        let mut second = make_file("SAME");
        second.path = "/two".to_string();
        let mut items = vec![first, second];

        sort_records(&mut items, SortState::Ascending);
        assert_eq!(items[0].path, "/one");
        sort_records(&mut items, SortState::Descending);
        assert_eq!(items[0].path, "/one");
    }
}
