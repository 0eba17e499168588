//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `analyze`: Extract component facts from source files
//! - `init`: Initialize a `.hooklensrc.json` configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

use crate::core::props::ProviderKind;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Analyze(cmd)) => cmd.args.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by analysis commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Project root: config lookup starts here and reported paths are relative to it
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One block per component plus a summary
    #[default]
    Text,
    /// Pretty-printed JSON array of components
    Json,
}

#[derive(Debug, Clone, Parser)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Files to analyze (default: discover under the source root)
    pub paths: Vec<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Record every hook call site instead of one entry per hook name
    #[arg(long)]
    pub every_call: bool,

    /// Props provider (overrides config file)
    #[arg(long, value_enum)]
    pub props: Option<ProviderKind>,

    /// Number of worker threads (overrides config file)
    #[arg(short, long)]
    pub jobs: Option<usize>,
}

#[derive(Debug, Args)]
pub struct AnalyzeCommand {
    #[command(flatten)]
    pub args: AnalyzeArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract hooks, state, context, store usage and props from React components
    Analyze(AnalyzeCommand),
    /// Initialize a new .hooklensrc.json configuration file
    Init,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_analyze_flags() {
        let args = Arguments::try_parse_from([
            "hooklens",
            "analyze",
            "src/App.tsx",
            "--format",
            "json",
            "--every-call",
            "--props",
            "none",
            "-j",
            "2",
            "-v",
        ])
        .unwrap();

        let Some(Command::Analyze(cmd)) = args.command else {
            panic!("expected analyze");
        };
        assert_eq!(cmd.args.paths, vec![PathBuf::from("src/App.tsx")]);
        assert_eq!(cmd.args.format, OutputFormat::Json);
        assert!(cmd.args.every_call);
        assert_eq!(cmd.args.props, Some(ProviderKind::Disabled));
        assert_eq!(cmd.args.jobs, Some(2));
        assert!(cmd.args.common.verbose);
    }

    #[test]
    fn test_analyze_defaults() {
        let args = Arguments::try_parse_from(["hooklens", "analyze"]).unwrap();
        assert!(!args.verbose());
        let Some(Command::Analyze(cmd)) = args.command else {
            panic!("expected analyze");
        };
        assert!(cmd.args.paths.is_empty());
        assert_eq!(cmd.args.format, OutputFormat::Text);
        assert_eq!(cmd.args.props, None);
    }

    #[test]
    fn test_verify_cli() {
        Arguments::command().debug_assert();
    }
}
