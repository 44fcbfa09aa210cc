//! Core utilities for transitype.
//!
//! This crate provides the terminal-free building blocks of the transitive
//! type dependency check:
//! - Reading and validating `package.json`
//! - Walking a project for TypeScript sources
//! - Tracing compiled entry points back to sources through their source maps
//! - Shape validation for untyped JSON input

mod collector;
mod constants;
mod manifest;
mod schema;
mod sourcemap;

// Re-export public API
pub use collector::{WalkFilter, find_ts_files};
pub use constants::{
    COMPILER_PACKAGE, MANIFEST_FILE, PACKAGE_DIR_MARKER, SKIPPED_DIRS, SOURCE_MAP_SUFFIX,
    TRACE_CONFIG_FILE, TS_EXTENSIONS, TSCONFIG_FILE, TYPE_ERRORS_EXIT_CODE, has_ts_extension,
};
pub use manifest::{Manifest, parse_manifest, read_manifest};
pub use schema::{SchemaError, parse as parse_json, validate};
pub use sourcemap::{SourceMap, SourceTrace, source_map_path, trace_sources};
