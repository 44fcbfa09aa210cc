use log::{debug, trace};
use path_clean::clean;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    constants::{SOURCE_MAP_SUFFIX, has_ts_extension},
    schema,
};

/// The only part of a source map the check reads.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceMap {
    pub sources: Vec<String>,
}

/// Result of tracing one compiled entry point back to its TypeScript sources.
///
/// Every variant but `Found` is a recoverable condition that contributes no
/// files. The caller reports them; they are only logged at debug level here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceTrace {
    Found(Vec<PathBuf>),
    EntryMissing,
    MapMissing,
    InvalidMap(String),
    NoTypedSources,
}

impl SourceTrace {
    pub fn files(&self) -> &[PathBuf] {
        match self {
            SourceTrace::Found(files) => files,
            _ => &[],
        }
    }
}

/// Path of the source map that accompanies `entry`.
pub fn source_map_path(entry: &Path) -> PathBuf {
    let mut name = entry.as_os_str().to_owned();
    name.push(SOURCE_MAP_SUFFIX);
    PathBuf::from(name)
}

/// Trace a compiled entry point (relative to `root`) to the TypeScript files
/// listed in its source map that exist on disk.
pub fn trace_sources(root: &Path, entry: &str) -> SourceTrace {
    let entry_path = clean(root.join(entry));
    trace!("Tracing sources for entry point {}", entry_path.display());

    if !entry_path.is_file() {
        debug!("Entry point not found: {}", entry_path.display());
        return SourceTrace::EntryMissing;
    }

    let map_path = source_map_path(&entry_path);
    if !map_path.is_file() {
        debug!("No source map found for {}", entry_path.display());
        return SourceTrace::MapMissing;
    }

    let content = match fs::read_to_string(&map_path) {
        Ok(content) => content,
        Err(e) => {
            debug!("Error reading source map {}: {}", map_path.display(), e);
            return SourceTrace::InvalidMap(e.to_string());
        }
    };
    let subject = map_path.to_string_lossy();
    let source_map: SourceMap = match schema::parse(&subject, &content) {
        Ok(source_map) => source_map,
        Err(e) => {
            debug!("{}", e);
            return SourceTrace::InvalidMap(e.summary());
        }
    };

    let entry_dir = entry_path.parent().unwrap_or(root);
    let files: Vec<PathBuf> = source_map
        .sources
        .iter()
        .filter(|source| has_ts_extension(source))
        .map(|source| clean(entry_dir.join(source)))
        .filter(|resolved| {
            let exists = resolved.is_file();
            if !exists {
                trace!("Source listed in map does not exist: {}", resolved.display());
            }
            exists
        })
        .collect();

    if files.is_empty() {
        debug!("No TypeScript sources found in source map for {}", entry_path.display());
        return SourceTrace::NoTypedSources;
    }

    debug!("Found {} TypeScript source(s) for {}", files.len(), entry_path.display());
    SourceTrace::Found(files)
}
