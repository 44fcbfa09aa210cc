use ignore::{DirEntry, WalkBuilder};
use log::{debug, trace, warn};
use std::path::{Component, Path};

use crate::constants::{SKIPPED_DIRS, has_ts_extension};

/// Decides which entries a project walk never visits.
///
/// Hidden entries (names starting with `.`) are always skipped; directories
/// named in `skip_dirs` are skipped along with everything below them.
#[derive(Debug, Clone)]
pub struct WalkFilter {
    pub skip_dirs: Vec<String>,
}

impl Default for WalkFilter {
    fn default() -> Self {
        Self { skip_dirs: SKIPPED_DIRS.iter().map(|d| d.to_string()).collect() }
    }
}

impl WalkFilter {
    pub fn skips(&self, name: &str, is_dir: bool) -> bool {
        name.starts_with('.') || (is_dir && self.skip_dirs.iter().any(|d| d == name))
    }

    fn skips_entry(&self, dent: &DirEntry) -> bool {
        // The walk root is never filtered, even when it is "."
        if dent.depth() == 0 {
            return false;
        }
        let is_dir = dent.file_type().is_some_and(|t| t.is_dir());
        self.skips(&dent.file_name().to_string_lossy(), is_dir)
    }
}

/// Collect TypeScript sources under `root` as `/`-separated paths relative to it.
///
/// Symlinked directories are followed. Unreadable subtrees and link loops are
/// logged and contribute nothing. Entries are visited
/// in file-name order so the result is stable across runs.
pub fn find_ts_files(root: &Path, filter: &WalkFilter) -> Vec<String> {
    debug!("Walking directory tree from root: {}", root.display());
    let entry_filter = filter.clone();
    let walker = WalkBuilder::new(root)
        .hidden(false)
        .ignore(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .parents(false)
        .follow_links(true)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(move |dent| !entry_filter.skips_entry(dent))
        .build();

    let mut files = Vec::new();
    for res in walker {
        let dent = match res {
            Ok(dent) => dent,
            Err(e) => {
                warn!("Error reading directory: {}", e);
                continue;
            }
        };
        let p = dent.path();
        if !p.is_file() {
            continue;
        }
        if !has_ts_extension(&dent.file_name().to_string_lossy()) {
            continue;
        }
        let Ok(rel_path) = p.strip_prefix(root) else {
            trace!("Skipping file outside of walk root: {}", p.display());
            continue;
        };
        let rel = to_slash(rel_path);
        trace!("Found TypeScript file: {}", rel);
        files.push(rel);
    }
    debug!("Collected {} TypeScript files", files.len());
    files
}

fn to_slash(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
