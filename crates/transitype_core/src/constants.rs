//! Constants for file names, extensions and compiler conventions.
//!
//! Everything the check needs to know about the layout of a TypeScript
//! package lives here so discovery, tracing and classification agree.
//!
//! ## Typed-Source Extensions
//!
//! - `.ts`, `.tsx`: TypeScript and TypeScript with JSX
//! - `.mts`, `.cts`: TypeScript ES module / CommonJS files
//!
//! Declaration files (`.d.ts`) end in `.ts` and count as typed sources.

use std::path::Path;

/// Project manifest file name
pub const MANIFEST_FILE: &str = "package.json";

/// The project's real compiler configuration, extended by the trace configuration
pub const TSCONFIG_FILE: &str = "tsconfig.json";

/// Temporary compiler configuration written for a single trace
pub const TRACE_CONFIG_FILE: &str = "tsconfig-check.json";

/// Suffix appended to a compiled file to find its source map
pub const SOURCE_MAP_SUFFIX: &str = ".map";

/// File extensions for TypeScript sources
pub const TS_EXTENSIONS: &[&str] = &[
    "ts",  // TypeScript
    "tsx", // TypeScript with JSX
    "mts", // TypeScript module
    "cts", // TypeScript CommonJS
];

/// Directory names never descended into when walking a project
pub const SKIPPED_DIRS: &[&str] = &["node_modules", "dist"];

/// Directory name under which package managers install packages
pub const PACKAGE_DIR_MARKER: &str = "node_modules";

/// The compiler's own package. Always a development dependency.
pub const COMPILER_PACKAGE: &str = "typescript";

/// Exit status `tsc` uses when diagnostics were reported
pub const TYPE_ERRORS_EXIT_CODE: i32 = 2;

/// Returns true if `name` ends with one of [`TS_EXTENSIONS`].
pub fn has_ts_extension(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| TS_EXTENSIONS.contains(&ext))
}
