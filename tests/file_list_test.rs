//! File list sorting, search and selection behavior

use proptest::prelude::*;
use repotui::api::{FileRecord, FolderRecord, ObjectId};
use repotui::messages::FileListEvent;
use repotui::model::{Collection, FileList};
use repotui::SortState;

fn file(name: &str) -> FileRecord {
    FileRecord {
        name: name.to_string(),
        file_type: "transformation".to_string(),
        object_id: Some(ObjectId {
            id: format!("id-{}", name),
        }),
        path: format!("/public/{}.ktr", name),
        parent: Some("/public".to_string()),
        extension: Some(".ktr".to_string()),
        date: None,
        in_result: true,
    }
}

fn subfolder(name: &str) -> FileRecord {
    FileRecord {
        name: name.to_string(),
        file_type: "folder".to_string(),
        object_id: None,
        path: format!("/public/{}", name),
        parent: Some("/public".to_string()),
        extension: None,
        date: None,
        in_result: true,
    }
}

fn public_folder(children: &[&str], files: &[&str]) -> FolderRecord {
    FolderRecord {
        name: "public".to_string(),
        path: "/public".to_string(),
        parent: None,
        depth: 0,
        has_children: !children.is_empty(),
        open: false,
        visible: true,
        children: children.iter().map(|n| subfolder(n)).collect(),
        files: files.iter().map(|n| file(n)).collect(),
        object_id: None,
    }
}

fn names(list: &FileList) -> Vec<String> {
    list.rows().iter().map(|f| f.name.clone()).collect()
}

proptest! {
    #[test]
    fn three_sort_steps_restore_server_order(
        children in prop::collection::vec("[a-zA-Z0-9_]{1,8}", 0..6),
        files in prop::collection::vec("[a-zA-Z0-9_]{1,8}", 0..12),
    ) {
        let children: Vec<&str> = children.iter().map(String::as_str).collect();
        let files: Vec<&str> = files.iter().map(String::as_str).collect();
        let mut list = FileList::new();
        list.set_folder(Collection::folder(&public_folder(&children, &files)));
        let original = names(&list);

        list.sort_cycle();
        prop_assert_eq!(list.sort_state, SortState::Descending);
        let sorted = list.collection.files.iter().map(|f| f.name.to_lowercase()).collect::<Vec<_>>();
        prop_assert!(sorted.windows(2).all(|w| w[0] >= w[1]));

        list.sort_cycle();
        prop_assert_eq!(list.sort_state, SortState::Ascending);
        let sorted = list.collection.files.iter().map(|f| f.name.to_lowercase()).collect::<Vec<_>>();
        prop_assert!(sorted.windows(2).all(|w| w[0] <= w[1]));

        list.sort_cycle();
        prop_assert_eq!(list.sort_state, SortState::Unsorted);
        prop_assert_eq!(names(&list), original);
    }
}

#[test]
fn test_folders_listed_before_files() {
    let mut list = FileList::new();
    list.set_folder(Collection::folder(&public_folder(&["zeta"], &["alpha"])));
    list.sort_cycle();
    list.sort_cycle();
    assert_eq!(names(&list), vec!["zeta", "alpha"]);
}

#[test]
fn test_search_without_matches_empties_list() {
    let mut list = FileList::new();
    list.set_folder(Collection::recents(vec![file("sales"), file("hr")]));

    assert_eq!(list.search("payroll"), 0);
    assert!(list.rows().is_empty());
    assert!(list.cursor_file().is_none());
    assert!(list.select_at_cursor().is_empty());
    assert!(list.commit_at_cursor().is_none());

    assert_eq!(list.search(""), 2);
    assert_eq!(names(&list), vec!["sales", "hr"]);
}

#[test]
fn test_search_is_case_insensitive_and_kept_across_folders() {
    let mut list = FileList::new();
    list.set_folder(Collection::recents(vec![file("Load_Sales"), file("hr")]));
    assert_eq!(list.search("SALES"), 1);

    list.set_folder(Collection::folder(&public_folder(&["sales_archive"], &["budget"])));
    assert_eq!(list.search_query, "SALES");
    assert_eq!(names(&list), vec!["sales_archive"]);
}

#[test]
fn test_sort_restore_keeps_search_filter() {
    let mut list = FileList::new();
    list.set_folder(Collection::recents(vec![file("b_sales"), file("a"), file("c_sales")]));
    list.search("sales");
    for _ in 0..3 {
        list.sort_cycle();
    }
    assert_eq!(names(&list), vec!["b_sales", "c_sales"]);
}

#[test]
fn test_selecting_folder_emits_both_events() {
    let mut list = FileList::new();
    list.set_folder(Collection::folder(&public_folder(&["etl"], &[])));

    let events = list.select_at_cursor();
    assert_eq!(
        events,
        vec![
            FileListEvent::FileSelected(subfolder("etl")),
            FileListEvent::FolderSelected("/public/etl".to_string()),
        ]
    );
    assert_eq!(list.selected, Some(subfolder("etl")));
}

#[test]
fn test_commit_blocked_while_renaming_same_file() {
    let mut list = FileList::new();
    list.set_folder(Collection::recents(vec![file("sales")]));
    list.begin_rename().unwrap();
    assert!(list.commit_at_cursor().is_none());

    list.cancel_rename();
    assert_eq!(
        list.commit_at_cursor(),
        Some(FileListEvent::Commit(file("sales")))
    );
}

#[test]
fn test_rename_survives_sort_restore() {
    let mut list = FileList::new();
    list.set_folder(Collection::recents(vec![file("b"), file("a")]));
    list.cursor_first();
    list.begin_rename().unwrap();
    list.edit_pop();
    list.edit_push('z');
    let request = list.finish_rename().unwrap().unwrap();
    assert_eq!(request.new_name, "z");

    let oid = ObjectId {
        id: "new-id".to_string(),
    };
    assert!(list.apply_rename(&request, &oid));

    for _ in 0..3 {
        list.sort_cycle();
    }
    assert_eq!(names(&list), vec!["z", "a"]);
    assert_eq!(list.rows()[0].id(), Some("new-id"));
}
