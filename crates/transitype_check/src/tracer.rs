use anyhow::{Context, Result, bail};
use log::{debug, info, trace, warn};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    process::Command,
};

use transitype_core::{TRACE_CONFIG_FILE, TSCONFIG_FILE, TYPE_ERRORS_EXIT_CODE};

/// How to launch the TypeScript compiler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compiler {
    program: String,
    leading_args: Vec<String>,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new("npx").arg("tsc")
    }
}

impl Compiler {
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into(), leading_args: Vec::new() }
    }

    /// Add an argument passed before the trace flags.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.leading_args.push(arg.into());
        self
    }

    /// Parse a whitespace separated command line such as `npx tsc`.
    pub fn from_command_line(line: &str) -> Result<Self> {
        let mut parts = line.split_whitespace();
        let Some(program) = parts.next() else {
            bail!("Compiler command is empty");
        };
        Ok(parts.fold(Self::new(program), |compiler, part| compiler.arg(part)))
    }

    pub fn display_command(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.leading_args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn list_files_command(&self, project: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.leading_args)
            .arg("--listFiles")
            .arg("--noEmit")
            .arg("--project")
            .arg(project);
        cmd
    }
}

/// Compiler configuration that restricts analysis to the traced files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceConfig {
    pub extends: String,
    pub include: Vec<String>,
}

impl TraceConfig {
    pub fn new(extends: &Path, include: Vec<String>) -> Result<Self> {
        if include.is_empty() {
            bail!("Cannot trace an empty list of files");
        }
        Ok(Self { extends: extends.to_string_lossy().into_owned(), include })
    }

    pub fn to_json(&self) -> Result<String> {
        let value = serde_json::to_value(self)?;
        let checked: TraceConfig = transitype_core::validate(TRACE_CONFIG_FILE, value)?;
        Ok(serde_json::to_string_pretty(&checked)?)
    }
}

/// A trace configuration on disk, removed when dropped.
struct TempConfigFile {
    path: PathBuf,
}

impl TempConfigFile {
    fn write(path: PathBuf, config: &TraceConfig) -> Result<Self> {
        let json = config.to_json()?;
        let file = Self { path };
        fs::write(&file.path, json)
            .with_context(|| format!("Failed to write {}", file.path.display()))?;
        debug!("Wrote trace configuration to {}", file.path.display());
        Ok(file)
    }
}

impl Drop for TempConfigFile {
    fn drop(&mut self) {
        if !self.path.exists() {
            return;
        }
        match fs::remove_file(&self.path) {
            Ok(()) => trace!("Removed {}", self.path.display()),
            Err(e) => warn!("Failed to remove {}: {}", self.path.display(), e),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceOutcome {
    /// Every file the compiler loaded, as printed by `--listFiles`
    Listed(Vec<String>),
    /// The compiler reported type errors; `output` is what it printed
    TypeErrors { output: String },
}

/// Run the compiler over `files` with a temporary configuration extending the
/// project's `tsconfig.json`, returning the files it loaded.
///
/// The temporary configuration is removed on every path out of this function.
pub fn trace_files(root: &Path, compiler: &Compiler, files: &[String]) -> Result<TraceOutcome> {
    let config = TraceConfig::new(&root.join(TSCONFIG_FILE), files.to_vec())?;
    let _config_file = TempConfigFile::write(root.join(TRACE_CONFIG_FILE), &config)?;

    info!("Running `{}` on {} file(s)", compiler.display_command(), files.len());
    let output = compiler
        .list_files_command(Path::new(TRACE_CONFIG_FILE))
        .current_dir(root)
        .output()
        .with_context(|| format!("Failed to run `{}`", compiler.display_command()))?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    match output.status.code() {
        Some(0) => {
            let listed = parse_listed_files(&stdout);
            debug!("Compiler loaded {} files", listed.len());
            Ok(TraceOutcome::Listed(listed))
        }
        Some(TYPE_ERRORS_EXIT_CODE) => {
            debug!("Compiler reported type errors");
            Ok(TraceOutcome::TypeErrors { output: stdout.trim().to_string() })
        }
        code => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "`{}` failed with exit code {:?}\n{}",
                compiler.display_command(),
                code,
                if stderr.trim().is_empty() { stdout.trim() } else { stderr.trim() }
            )
        }
    }
}

/// One path per non-blank line.
pub fn parse_listed_files(stdout: &str) -> Vec<String> {
    stdout.lines().map(str::trim).filter(|line| !line.is_empty()).map(String::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_compiler_from_command_line() {
        let compiler = Compiler::from_command_line("  npx   tsc ").unwrap();
        assert_eq!(compiler, Compiler::default());
        assert_eq!(compiler.display_command(), "npx tsc");

        let compiler = Compiler::from_command_line("node_modules/.bin/tsc").unwrap();
        assert_eq!(compiler.display_command(), "node_modules/.bin/tsc");

        assert!(Compiler::from_command_line("   ").is_err());
    }

    #[test]
    fn test_trace_config_requires_files() {
        assert!(TraceConfig::new(Path::new("/p/tsconfig.json"), vec![]).is_err());
    }

    #[test]
    fn test_trace_config_json_shape() {
        let config =
            TraceConfig::new(Path::new("/p/tsconfig.json"), vec!["src/index.ts".to_string()])
                .unwrap();
        let value: serde_json::Value = serde_json::from_str(&config.to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "extends": "/p/tsconfig.json", "include": ["src/index.ts"] })
        );
    }

    #[test]
    fn test_parse_listed_files_drops_blank_lines() {
        let stdout = "/p/node_modules/typescript/lib/lib.d.ts\n\n  /p/src/index.ts  \r\n\n";
        assert_eq!(
            parse_listed_files(stdout),
            vec!["/p/node_modules/typescript/lib/lib.d.ts", "/p/src/index.ts"]
        );
    }

    #[test]
    fn test_trace_empty_files_writes_nothing() {
        let project = TempDir::new().unwrap();
        let result = trace_files(project.path(), &Compiler::new("sh"), &[]);
        assert!(result.is_err());
        assert!(!project.path().join(TRACE_CONFIG_FILE).exists());
    }

    #[test]
    fn test_trace_spawn_failure_removes_config() {
        let project = TempDir::new().unwrap();
        let compiler = Compiler::new("/nonexistent/bin/tsc-for-tests");
        let err = trace_files(project.path(), &compiler, &["src/index.ts".to_string()])
            .unwrap_err();
        assert!(err.to_string().contains("Failed to run"));
        assert!(!project.path().join(TRACE_CONFIG_FILE).exists());
    }

    #[cfg(unix)]
    mod fake_compiler {
        use super::*;

        /// A shell script standing in for `tsc`, run through `sh`.
        /// `$4` is the `--project` argument.
        fn fake_tsc(dir: &TempDir, body: &str) -> Compiler {
            let script = dir.path().join("fake-tsc.sh");
            fs::write(&script, body).unwrap();
            Compiler::new("sh").arg(script.to_string_lossy())
        }

        #[test]
        fn test_trace_lists_files_and_removes_config() {
            let project = TempDir::new().unwrap();
            let scripts = TempDir::new().unwrap();
            let capture = scripts.path().join("captured.json");
            let compiler = fake_tsc(
                &scripts,
                &format!(
                    "[ \"$1 $2 $3\" = \"--listFiles --noEmit --project\" ] || exit 7\n\
                     cp \"$4\" '{}' || exit 9\n\
                     echo /p/node_modules/left-pad/index.d.ts\n\
                     echo\n\
                     echo /p/src/index.ts\n",
                    capture.display()
                ),
            );

            let outcome =
                trace_files(project.path(), &compiler, &["src/index.ts".to_string()]).unwrap();
            assert_eq!(
                outcome,
                TraceOutcome::Listed(vec![
                    "/p/node_modules/left-pad/index.d.ts".to_string(),
                    "/p/src/index.ts".to_string(),
                ])
            );
            assert!(!project.path().join(TRACE_CONFIG_FILE).exists());

            let captured: TraceConfig =
                serde_json::from_str(&fs::read_to_string(&capture).unwrap()).unwrap();
            assert_eq!(
                captured.extends,
                project.path().join(TSCONFIG_FILE).to_string_lossy().into_owned()
            );
            assert_eq!(captured.include, vec!["src/index.ts"]);
        }

        #[test]
        fn test_trace_type_errors_are_not_fatal() {
            let project = TempDir::new().unwrap();
            let scripts = TempDir::new().unwrap();
            let compiler = fake_tsc(
                &scripts,
                "echo \"src/index.ts(1,7): error TS2304: Cannot find name 'x'.\"\nexit 2\n",
            );

            let outcome =
                trace_files(project.path(), &compiler, &["src/index.ts".to_string()]).unwrap();
            assert_eq!(
                outcome,
                TraceOutcome::TypeErrors {
                    output: "src/index.ts(1,7): error TS2304: Cannot find name 'x'.".to_string()
                }
            );
            assert!(!project.path().join(TRACE_CONFIG_FILE).exists());
        }

        #[test]
        fn test_trace_unexpected_status_is_fatal() {
            let project = TempDir::new().unwrap();
            let scripts = TempDir::new().unwrap();
            let compiler = fake_tsc(&scripts, "echo 'boom' >&2\nexit 3\n");

            let err = trace_files(project.path(), &compiler, &["src/index.ts".to_string()])
                .unwrap_err();
            let message = err.to_string();
            assert!(message.contains("exit code Some(3)"));
            assert!(message.contains("boom"));
            assert!(!project.path().join(TRACE_CONFIG_FILE).exists());
        }

        #[test]
        fn test_trace_overwrites_stale_config() {
            let project = TempDir::new().unwrap();
            let scripts = TempDir::new().unwrap();
            fs::write(project.path().join(TRACE_CONFIG_FILE), "stale").unwrap();
            let compiler = fake_tsc(&scripts, "grep -q include \"$4\" || exit 5\n");

            let outcome =
                trace_files(project.path(), &compiler, &["src/index.ts".to_string()]).unwrap();
            assert_eq!(outcome, TraceOutcome::Listed(vec![]));
            assert!(!project.path().join(TRACE_CONFIG_FILE).exists());
        }
    }
}
