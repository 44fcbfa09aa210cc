use anyhow::{Context, Result};
use log::{debug, trace};
use serde::Deserialize;
use std::{collections::HashMap, fs, path::Path};

use crate::{constants::MANIFEST_FILE, schema};

/// The fields of `package.json` the check relies on.
///
/// Every field is optional, but a dependency class that is present must map
/// package names to version-range strings. Version ranges are never parsed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    pub main: Option<String>,
    pub module: Option<String>,
    pub dependencies: Option<HashMap<String, String>>,
    #[serde(rename = "devDependencies")]
    pub dev_dependencies: Option<HashMap<String, String>>,
    #[serde(rename = "peerDependencies")]
    pub peer_dependencies: Option<HashMap<String, String>>,
}

impl Manifest {
    /// `main` and `module`, skipping absent fields and duplicates.
    pub fn entry_points(&self) -> Vec<String> {
        let mut entries: Vec<String> = Vec::new();
        for entry in [&self.main, &self.module].into_iter().flatten() {
            if !entries.contains(entry) {
                entries.push(entry.clone());
            }
        }
        entries
    }

    pub fn is_runtime(&self, name: &str) -> bool {
        contains(&self.dependencies, name)
    }

    pub fn is_dev(&self, name: &str) -> bool {
        contains(&self.dev_dependencies, name)
    }

    pub fn is_peer(&self, name: &str) -> bool {
        contains(&self.peer_dependencies, name)
    }
}

fn contains(class: &Option<HashMap<String, String>>, name: &str) -> bool {
    class.as_ref().is_some_and(|deps| deps.contains_key(name))
}

/// Parse manifest text, failing with the schema violations if it has the wrong shape.
pub fn parse_manifest(content: &str) -> Result<Manifest> {
    Ok(schema::parse(MANIFEST_FILE, content)?)
}

/// Read and validate `package.json` from `root`.
pub fn read_manifest(root: &Path) -> Result<Manifest> {
    let path = root.join(MANIFEST_FILE);
    debug!("Reading manifest from {}", path.display());
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let manifest = parse_manifest(&content)?;
    trace!(
        "Manifest: main={:?}, module={:?}, {} runtime, {} dev, {} peer dependencies",
        manifest.main,
        manifest.module,
        manifest.dependencies.as_ref().map_or(0, |d| d.len()),
        manifest.dev_dependencies.as_ref().map_or(0, |d| d.len()),
        manifest.peer_dependencies.as_ref().map_or(0, |d| d.len())
    );
    Ok(manifest)
}
