//! Transitive type dependency check for TypeScript libraries.
//!
//! A library's published declarations can reference types from other
//! packages. When such a package is only listed in `devDependencies`,
//! consumers installing the library will not get it and the exported types
//! fail to resolve. This crate asks `tsc` which files the library's sources
//! pull in, maps them back to installed packages, and flags the packages
//! declared only as development dependencies.
//!
//! # Examples
//!
//! ```no_run
//! use transitype_check::{CheckResult, Config, Reporter, TerminalPrompt, run_transitive_check};
//! use std::io::BufWriter;
//!
//! # fn main() -> anyhow::Result<()> {
//! let cfg = Config {
//!     files: vec!["src/index.ts".to_string()],
//!     root: Some(std::path::PathBuf::from("/path/to/library")),
//!     tsc: "npx tsc".to_string(),
//! };
//!
//! let mut reporter = Reporter::new(BufWriter::new(std::io::stdout()));
//! let result = run_transitive_check(cfg, &mut TerminalPrompt::default(), &mut reporter)?;
//!
//! if let CheckResult::Checked { flagged, .. } = result {
//!     println!("{} misclassified packages", flagged.len());
//! }
//! # Ok(())
//! # }
//! ```

mod checker;
mod classifier;
mod config;
mod prompt;
mod reporter;
mod tracer;
mod types;

// Re-export public API
pub use checker::run_transitive_check;
pub use classifier::{classify, find_package_root, is_misclassified, package_name};
pub use config::Config;
pub use prompt::{FilePrompt, TerminalPrompt, prompt_for_files};
pub use reporter::Reporter;
pub use tracer::{Compiler, TraceConfig, TraceOutcome, parse_listed_files, trace_files};
pub use types::CheckResult;
