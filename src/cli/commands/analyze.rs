use std::io;

use anyhow::Result;

use super::super::{
    args::{AnalyzeCommand, OutputFormat},
    exit_status::ExitStatus,
    report::{print_cancelled_to, print_diagnostics, print_json, print_text},
};
use crate::core::AnalysisContext;

pub fn analyze(cmd: AnalyzeCommand) -> Result<ExitStatus> {
    let args = &cmd.args;
    let verbose = args.common.verbose;
    let ctx = AnalysisContext::new(args)?;

    if verbose && !ctx.config_from_file {
        eprintln!("Note: No .hooklensrc.json found, using default configuration");
    }
    if ctx.skipped_count > 0 {
        eprintln!(
            "Warning: {} path(s) skipped due to access errors{}",
            ctx.skipped_count,
            if verbose { "" } else { " (use -v for details)" }
        );
    }

    let report = ctx.analyzer().analyze(&ctx.files, |progress| {
        tracing::debug!(
            "[{}/{}] {}",
            progress.done,
            progress.total,
            progress.file.display()
        );
    })?;

    match args.format {
        OutputFormat::Text => print_text(&report),
        OutputFormat::Json => print_json(&report)?,
    }
    print_diagnostics(&report.diagnostics, verbose);
    print_cancelled_to(&report, &mut io::stderr().lock());

    Ok(ExitStatus::Success)
}
