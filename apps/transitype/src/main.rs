use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use log::debug;
use std::io::{BufWriter, Write};
use std::time::Instant;
use transitype_check::{CheckResult, Config, Reporter, TerminalPrompt};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // stdio is blocked by LineWriter, use a BufWriter to reduce syscalls.
    // See https://github.com/rust-lang/rust/issues/60673
    let mut reporter = Reporter::new(BufWriter::new(std::io::stdout()));

    let cfg = Config::parse();
    debug!("Parsed CLI arguments: {:?}", cfg);

    let start = Instant::now();
    let result = match transitype_check::run_transitive_check(
        cfg,
        &mut TerminalPrompt::default(),
        &mut reporter,
    ) {
        Ok(result) => result,
        Err(e) => {
            reporter.fatal(&e)?;
            // Non-zero exit on fatal errors
            std::process::exit(1);
        }
    };
    debug!("Check finished: {:?}", result);

    if let CheckResult::Checked { files_listed, .. } = result {
        writeln!(
            reporter.writer(),
            "\n{} Finished in {}ms on {} files.",
            "●".bright_blue(),
            start.elapsed().as_millis().to_string().cyan(),
            files_listed.to_string().cyan()
        )?;
    }
    reporter.writer().flush()?;

    Ok(())
}
