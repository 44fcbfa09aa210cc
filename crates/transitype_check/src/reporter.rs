use std::io::{self, Write};

use colored::Colorize;
use log::debug;
use transitype_core::SourceTrace;

/// Operator-facing output. Diagnostics go through `log`; everything the
/// operator is meant to read goes through here.
pub struct Reporter<W: Write> {
    writer: W,
}

impl<W: Write> Reporter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    pub fn writer(&mut self) -> &mut W {
        &mut self.writer
    }

    pub fn info(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.writer, "{}", message)
    }

    pub fn success(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.writer, "{} {}", "✓".green().bold(), message)
    }

    pub fn warning(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.writer, "{} {}", "⚠".yellow().bold(), message)
    }

    pub fn failure(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.writer, "{} {}", "✗".red().bold(), message)
    }

    /// Report an error that ends the run, including its context chain.
    pub fn fatal(&mut self, err: &anyhow::Error) -> io::Result<()> {
        self.failure(&format!("{:#}", err))?;
        self.writer.flush()
    }

    /// Report how tracing one entry point through its source map went.
    pub fn source_trace(&mut self, entry: &str, trace: &SourceTrace) -> io::Result<()> {
        match trace {
            SourceTrace::Found(files) => self.success(&format!(
                "Found {} TypeScript source(s) for {}",
                files.len(),
                entry.blue()
            )),
            SourceTrace::EntryMissing => {
                self.failure(&format!("Entry point not found: {}", entry.blue()))
            }
            SourceTrace::MapMissing => self.warning(&format!(
                "No source map found for {}, cannot trace to TypeScript sources",
                entry.blue()
            )),
            SourceTrace::InvalidMap(reason) => self.failure(&format!(
                "Invalid source map for {}: {}",
                entry.blue(),
                reason
            )),
            SourceTrace::NoTypedSources => self.warning(&format!(
                "No TypeScript sources found in source map for {}",
                entry.blue()
            )),
        }
    }

    pub fn untraceable_entries(&mut self) -> io::Result<()> {
        writeln!(self.writer, "\nCould not trace TypeScript files from package.json entry points.")?;
        writeln!(self.writer, "Possible issues:")?;
        writeln!(self.writer, "{} Entry points do not exist", "-".dimmed())?;
        writeln!(self.writer, "{} No source maps available", "-".dimmed())?;
        writeln!(self.writer, "{} Source maps do not reference TypeScript files", "-".dimmed())
    }

    /// The compiler found type errors, so nothing could be classified.
    pub fn trace_failure(&mut self, files: &[String], output: &str) -> io::Result<()> {
        debug!("Reporting compiler failure for {} files", files.len());
        writeln!(self.writer)?;
        self.failure("TypeScript compilation failed")?;
        writeln!(self.writer, "   Files being traced: {:?}", files)?;
        if !output.is_empty() {
            writeln!(self.writer, "   TypeScript error: {}", output)?;
        }
        self.writer.flush()
    }

    /// Print the guidance message followed by the flagged package names.
    pub fn flagged(&mut self, flagged: &[String]) -> io::Result<()> {
        debug!("Reporting {} flagged packages", flagged.len());
        writeln!(self.writer, "Consider moving these {} into", "devDependencies".cyan())?;
        writeln!(self.writer, "{} or {}.", "dependencies".cyan(), "peerDependencies".cyan())?;
        writeln!(
            self.writer,
            "{}",
            "Not doing so will likely result in bad exported types.".yellow()
        )?;
        writeln!(self.writer, "{:?}", flagged)?;
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn output(reporter: Reporter<Vec<u8>>) -> String {
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn test_flagged_prints_guidance_and_list() {
        let mut reporter = Reporter::new(Vec::new());
        reporter.flagged(&["left-pad".to_string(), "@types/react".to_string()]).unwrap();

        let out = output(reporter);
        assert!(out.contains("Consider moving these"));
        assert!(out.contains("peerDependencies"));
        assert!(out.contains("bad exported types"));
        assert!(out.ends_with("[\"left-pad\", \"@types/react\"]\n"));
    }

    #[test]
    fn test_flagged_empty_list() {
        let mut reporter = Reporter::new(Vec::new());
        reporter.flagged(&[]).unwrap();
        assert!(output(reporter).ends_with("[]\n"));
    }

    #[test]
    fn test_status_lines_are_prefixed() {
        let mut reporter = Reporter::new(Vec::new());
        reporter.success("done").unwrap();
        reporter.warning("careful").unwrap();
        reporter.failure("broken").unwrap();

        let out = output(reporter);
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains('✓') && lines[0].ends_with("done"));
        assert!(lines[1].contains('⚠') && lines[1].ends_with("careful"));
        assert!(lines[2].contains('✗') && lines[2].ends_with("broken"));
    }

    #[test]
    fn test_fatal_error_is_prefixed_with_context() {
        let err = anyhow::anyhow!("Invalid package.json format: missing field")
            .context("Failed to read manifest");
        let mut reporter = Reporter::new(Vec::new());
        reporter.fatal(&err).unwrap();

        let out = output(reporter);
        assert!(out.contains('✗'));
        assert!(out.ends_with(
            "Failed to read manifest: Invalid package.json format: missing field\n"
        ));
    }

    #[test]
    fn test_source_trace_messages() {
        let mut reporter = Reporter::new(Vec::new());
        reporter
            .source_trace("dist/index.js", &SourceTrace::Found(vec![PathBuf::from("/p/a.ts")]))
            .unwrap();
        reporter.source_trace("dist/index.mjs", &SourceTrace::MapMissing).unwrap();
        reporter.source_trace("dist/gone.js", &SourceTrace::EntryMissing).unwrap();

        let out = output(reporter);
        assert!(out.contains("Found 1 TypeScript source(s) for"));
        assert!(out.contains("No source map found for"));
        assert!(out.contains("Entry point not found:"));
    }

    #[test]
    fn test_trace_failure_includes_files_and_output() {
        let mut reporter = Reporter::new(Vec::new());
        reporter
            .trace_failure(&["src/index.ts".to_string()], "src/index.ts(1,1): error TS1005")
            .unwrap();

        let out = output(reporter);
        assert!(out.contains("TypeScript compilation failed"));
        assert!(out.contains("Files being traced: [\"src/index.ts\"]"));
        assert!(out.contains("TypeScript error: src/index.ts(1,1): error TS1005"));
    }
}
