//! Folder tree expansion invariants
//!
//! A folder row is shown exactly when every ancestor is open, no matter
//! which visible rows the user expands or collapses, or which folder is
//! selected by path.

use proptest::prelude::*;
use repotui::api::FolderRecord;
use repotui::logic::tree::ancestors_of;
use repotui::messages::Selection;
use repotui::model::{FolderTree, TreeRow};

fn folder(path: &str, depth: u32, has_children: bool) -> FolderRecord {
    let parent = path
        .rsplit_once('/')
        .map(|(p, _)| p)
        .filter(|p| !p.is_empty())
        .map(str::to_string);
    FolderRecord {
        name: path.rsplit('/').next().unwrap_or_default().to_string(),
        path: path.to_string(),
        parent,
        depth,
        has_children,
        open: false,
        visible: false,
        children: vec![],
        files: vec![],
        object_id: None,
    }
}

fn sample_tree() -> FolderTree {
    let mut tree = FolderTree::new();
    tree.load(vec![
        folder("/home", 0, true),
        folder("/home/admin", 1, true),
        folder("/home/admin/etl", 2, true),
        folder("/home/admin/etl/daily", 3, false),
        folder("/home/suzy", 1, false),
        folder("/public", 0, true),
        folder("/public/reports", 1, true),
        folder("/public/reports/q1", 2, false),
        folder("/publicity", 0, false),
    ]);
    tree
}

fn assert_visibility_invariant(tree: &FolderTree) {
    for (idx, f) in tree.folders.iter().enumerate() {
        let ancestors_open = ancestors_of(&tree.folders, idx)
            .iter()
            .all(|&a| tree.folders[a].open);
        assert_eq!(
            f.visible, ancestors_open,
            "{} visible={} but ancestors open={}",
            f.path, f.visible, ancestors_open
        );
    }
}

#[derive(Debug, Clone)]
enum Op {
    Toggle(usize),
    SelectPath(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..9).prop_map(Op::Toggle),
        (0usize..9).prop_map(Op::SelectPath),
    ]
}

proptest! {
    #[test]
    fn visibility_follows_open_ancestors(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let mut tree = sample_tree();
        assert_visibility_invariant(&tree);

        for op in ops {
            match op {
                Op::Toggle(idx) => {
                    // Only rendered rows can be toggled
                    if tree.folders[idx].visible {
                        tree.toggle(idx);
                    }
                }
                Op::SelectPath(idx) => {
                    let path = tree.folders[idx].path.clone();
                    tree.select_by_path(&path).unwrap();
                    prop_assert!(tree.folders[idx].visible);
                    prop_assert_eq!(&tree.selection, &Selection::Folder(path));
                }
            }
            assert_visibility_invariant(&tree);
        }
    }
}

#[test]
fn test_roots_visible_after_load() {
    let tree = sample_tree();
    let rows = tree.rows();
    assert_eq!(
        rows,
        vec![
            TreeRow::Recents,
            TreeRow::Folder(0),
            TreeRow::Folder(5),
            TreeRow::Folder(8)
        ]
    );
}

#[test]
fn test_collapse_closes_descendants() {
    let mut tree = sample_tree();
    tree.select_by_path("/home/admin/etl/daily").unwrap();
    assert!(tree.folders[2].open);

    tree.toggle(0);
    assert!(!tree.folders[0].open);
    assert!(!tree.folders[1].open);
    assert!(!tree.folders[2].open);

    // Re-expanding shows one level only
    tree.toggle(0);
    assert!(tree.folders[1].visible);
    assert!(!tree.folders[2].visible);
}

#[test]
fn test_sibling_prefix_not_treated_as_child() {
    let mut tree = sample_tree();
    tree.toggle(5);
    tree.toggle(5);
    assert!(tree.folders[8].visible, "/publicity is a root, not under /public");
}

#[test]
fn test_select_missing_path_leaves_state() {
    let mut tree = sample_tree();
    tree.select_by_path("/public/reports").unwrap();
    let before = tree.folders.clone();

    assert!(tree.select_by_path("/nope").is_err());
    assert_eq!(tree.folders, before);
    assert_eq!(
        tree.selection,
        Selection::Folder("/public/reports".to_string())
    );
}
