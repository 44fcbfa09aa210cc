use dashmap::DashMap;
use log::{debug, trace};
use rayon::prelude::*;
use std::{
    collections::HashSet,
    hash::Hash,
    path::{Path, PathBuf},
};

use transitype_core::{COMPILER_PACKAGE, MANIFEST_FILE, Manifest, PACKAGE_DIR_MARKER};

/// Finds the nearest directory, starting at `dir` itself, that contains a
/// `package.json`. The filesystem root is never considered.
///
/// `cache` remembers which directories have a manifest so sibling lookups
/// share the ancestor checks.
pub fn find_package_root(dir: &Path, cache: &DashMap<PathBuf, bool>) -> Option<PathBuf> {
    dir.ancestors()
        .take_while(|candidate| candidate.parent().is_some())
        .find(|candidate| has_manifest(candidate, cache))
        .map(Path::to_path_buf)
}

fn has_manifest(dir: &Path, cache: &DashMap<PathBuf, bool>) -> bool {
    if let Some(found) = cache.get(dir) {
        trace!("Cache hit for manifest lookup: {}", dir.display());
        return *found;
    }
    let found = dir.join(MANIFEST_FILE).is_file();
    cache.insert(dir.to_path_buf(), found);
    found
}

/// The part of `package_root` after the last `/node_modules/`, or the whole
/// path if it has no such segment.
pub fn package_name(package_root: &Path) -> String {
    let path = package_root.to_string_lossy();
    let marker = format!("/{}/", PACKAGE_DIR_MARKER);
    match path.rfind(&marker) {
        Some(idx) => path[idx + marker.len()..].to_string(),
        None => path.into_owned(),
    }
}

/// A package is misclassified when only `devDependencies` declares it.
/// The compiler package is exempt.
pub fn is_misclassified(manifest: &Manifest, name: &str) -> bool {
    name != COMPILER_PACKAGE
        && manifest.is_dev(name)
        && !manifest.is_runtime(name)
        && !manifest.is_peer(name)
}

/// Flag the packages, reached through the compiler's file list, that are
/// declared only as development dependencies. Names keep the order in which
/// their package was first reached.
pub fn classify(manifest: &Manifest, listed_files: &[String]) -> Vec<String> {
    let dirs = unique(
        listed_files.iter().filter_map(|file| Path::new(file).parent()).map(Path::to_path_buf),
    );
    debug!("Resolving package roots for {} directories", dirs.len());

    let cache: DashMap<PathBuf, bool> = DashMap::new();
    let roots: Vec<Option<PathBuf>> =
        dirs.par_iter().map(|dir| find_package_root(dir, &cache)).collect();
    let roots = unique(roots.into_iter().flatten());
    debug!("Found {} package roots ({} manifest lookups)", roots.len(), cache.len());

    let flagged = unique(roots.iter().map(|root| package_name(root)).filter(|name| {
        let flagged = is_misclassified(manifest, name);
        trace!("Package '{}' misclassified: {}", name, flagged);
        flagged
    }));
    debug!("Flagged {} packages", flagged.len());
    flagged
}

/// Removes repeated items, keeping the first occurrence of each.
fn unique<T: Eq + Hash + Clone>(items: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut seen = HashSet::new();
    items.into_iter().filter(|item| seen.insert(item.clone())).collect()
}
