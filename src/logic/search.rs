//! Search Logic
//!
//! Pure functions for flagging files and folders that match the search box.

use crate::api::FileRecord;

/// Case-insensitive substring match of `query` against a name
///
/// # Examples
/// ```
/// use repotui::logic::search::search_matches;
///
/// assert!(search_matches("", "anything"));
/// assert!(search_matches("SALES", "load_sales.ktr"));
/// assert!(!search_matches("hr", "finance"));
/// ```
pub fn search_matches(query: &str, name: &str) -> bool {
    if query.is_empty() {
        return true; // Empty query matches everything
    }
    name.to_lowercase().contains(&query.to_lowercase())
}

/// Recompute `in_result` for every record
///
/// Returns how many records matched.
pub fn apply_search(items: &mut [FileRecord], query: &str) -> usize {
    let mut matches = 0;
    for item in items.iter_mut() {
        item.in_result = search_matches(query, &item.name);
        if item.in_result {
            matches += 1;
        }
    }
    matches
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_file(name: &str) -> FileRecord {
        FileRecord {
            name: name.to_string(),
            file_type: "job".to_string(),
            object_id: None,
            path: "/".to_string(),
            parent: None,
            extension: None,
            date: None,
            in_result: false,
        }
    }

    #[test]
    fn test_empty_query_matches_all() {
        let mut items = vec![make_file("a"), make_file("b")];
        assert_eq!(apply_search(&mut items, ""), 2);
        assert!(items.iter().all(|f| f.in_result));
    }

    #[test]
    fn test_no_match_clears_all() {
        let mut items = vec![make_file("alpha"), make_file("beta")];
        assert_eq!(apply_search(&mut items, "zzz"), 0);
        assert!(items.iter().all(|f| !f.in_result));
    }

    #[test]
    fn test_partial_match() {
        let mut items = vec![
            make_file("Load Sales"),
            make_file("load_hr"),
            make_file("Publish"),
        ];
        assert_eq!(apply_search(&mut items, "LOAD"), 2);
        assert!(items[0].in_result);
        assert!(items[1].in_result);
        assert!(!items[2].in_result);
    }

    #[test]
    fn test_wildcards_are_literal() {
        assert!(!search_matches("*", "file.ktr"));
        assert!(search_matches("*", "star*name"));
    }
}
