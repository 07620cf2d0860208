//! Folder tree visibility logic
//!
//! Pure functions over the flat, depth-annotated folder list. A folder row
//! is rendered only when `visible` is set; `visible` holds exactly when
//! every ancestor is `open`.

use crate::api::FolderRecord;

/// Whether `ancestor` is `path` or one of its ancestors, by whole segments
///
/// `/a` contains `/a/b` but not `/ab`.
///
/// # Examples
/// ```
/// use repotui::logic::tree::is_path_prefix;
///
/// assert!(is_path_prefix("/a", "/a/b"));
/// assert!(is_path_prefix("/", "/a"));
/// assert!(!is_path_prefix("/a", "/ab"));
/// ```
pub fn is_path_prefix(ancestor: &str, path: &str) -> bool {
    if !path.starts_with(ancestor) {
        return false;
    }
    ancestor.ends_with('/')
        || path.len() == ancestor.len()
        || path[ancestor.len()..].starts_with('/')
}

/// Find a folder by exact path
pub fn find_folder_index(folders: &[FolderRecord], path: &str) -> Option<usize> {
    folders.iter().position(|f| f.path == path)
}

/// Make every root folder visible (applied once when the tree arrives)
pub fn reveal_roots(folders: &mut [FolderRecord]) {
    for folder in folders.iter_mut().filter(|f| f.depth == 0) {
        folder.visible = true;
    }
}

/// Expand or collapse the folder at `idx`
///
/// Expanding shows direct children only. Collapsing hides every descendant
/// and clears their `open` flag, so re-expanding later reveals one level at
/// a time again.
pub fn toggle_folder(folders: &mut [FolderRecord], idx: usize) {
    let Some(folder) = folders.get_mut(idx) else {
        return;
    };
    if folder.has_children {
        folder.open = !folder.open;
    }

    let (path, depth, open) = (folder.path.clone(), folder.depth, folder.open);

    for (i, f) in folders.iter_mut().enumerate() {
        if i == idx || !is_path_prefix(&path, &f.path) {
            continue;
        }
        if open && f.depth == depth + 1 {
            f.visible = true;
        } else if !open && f.depth > depth {
            f.visible = false;
            f.open = false;
        }
    }
}

/// Open the folder at `idx` and show its direct children
fn open_with_children(folders: &mut [FolderRecord], idx: usize) {
    if folders[idx].has_children {
        folders[idx].open = true;
    }
    let path = folders[idx].path.clone();
    for f in folders.iter_mut() {
        if f.parent.as_deref() == Some(path.as_str()) {
            f.visible = true;
        }
    }
}

/// Open every folder on the ancestor chain of `parent_path` (inclusive)
///
/// Used when a folder is selected by path so that it ends up visible.
pub fn open_ancestors(folders: &mut [FolderRecord], parent_path: &str) {
    let mut chain: Vec<usize> = folders
        .iter()
        .enumerate()
        .filter(|(_, f)| is_path_prefix(&f.path, parent_path))
        .map(|(i, _)| i)
        .collect();
    // Shallow first so each level is shown before the next one opens
    chain.sort_by_key(|&i| folders[i].depth);

    for idx in chain {
        open_with_children(folders, idx);
    }
}

/// Indices of folders that are currently rendered, in list order
pub fn visible_indices(folders: &[FolderRecord]) -> Vec<usize> {
    folders
        .iter()
        .enumerate()
        .filter(|(_, f)| f.visible)
        .map(|(i, _)| i)
        .collect()
}

/// Strict ancestors of the folder at `idx`, found through `parent` links
pub fn ancestors_of(folders: &[FolderRecord], idx: usize) -> Vec<usize> {
    let mut result = Vec::new();
    let mut parent = folders.get(idx).and_then(|f| f.parent.clone());
    while let Some(p) = parent {
        match find_folder_index(folders, &p) {
            Some(i) if !result.contains(&i) => {
                result.push(i);
                parent = folders[i].parent.clone();
            }
            _ => break,
        }
    }
    result
}
