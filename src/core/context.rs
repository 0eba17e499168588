use std::path::{Component, Path, PathBuf};

use anyhow::Result;

use crate::{
    cli::args::AnalyzeArgs,
    config::{Config, load_config},
    core::{
        analyzer::{AnalyzeOptions, Analyzer},
        extract::ExtractOptions,
        file_scanner::{ScanOptions, scan_files},
        props::{BuiltinProps, CommandProps, NoProps, Provider, ProviderKind},
    },
};

/// Everything an `analyze` run needs, resolved from CLI args and config.
pub struct AnalysisContext {
    /// Merged configuration (CLI args > config file > defaults).
    pub config: Config,

    /// Directory component paths are reported relative to.
    pub root_dir: PathBuf,

    /// Files to analyze, in path order.
    pub files: Vec<PathBuf>,

    /// Directory entries discovery could not read.
    pub skipped_count: usize,

    /// Whether the config came from a `.hooklensrc.json`.
    pub config_from_file: bool,
}

impl AnalysisContext {
    /// Load config from the source root, apply CLI overrides and collect the
    /// files to analyze.
    ///
    /// Explicit `paths` are taken as given; otherwise files are discovered
    /// under the configured source root.
    pub fn new(args: &AnalyzeArgs) -> Result<Self> {
        let root_dir = args
            .common
            .source_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));

        let loaded = load_config(&root_dir)?;
        if !loaded.from_file {
            tracing::debug!("no config file found, using defaults");
        }

        let mut config = loaded.config;
        if args.every_call {
            config.record_every_call = true;
        }
        if let Some(provider) = args.props {
            config.props.provider = provider;
        }
        if args.jobs.is_some() {
            config.jobs = args.jobs;
        }
        config.validate()?;

        let (files, skipped_count) = if args.paths.is_empty() {
            let scan = scan_files(
                &scan_base(&root_dir, &config.source_root),
                &ScanOptions {
                    includes: config.includes.clone(),
                    ignores: config.ignores.clone(),
                    ignore_test_files: config.ignore_test_files,
                },
            );
            (scan.files.into_iter().collect(), scan.skipped_count)
        } else {
            (args.paths.clone(), 0)
        };

        Ok(Self {
            config,
            root_dir,
            files,
            skipped_count,
            config_from_file: loaded.from_file,
        })
    }

    pub fn provider(&self) -> Provider {
        match self.config.props.provider {
            ProviderKind::Builtin => Provider::Builtin(BuiltinProps),
            ProviderKind::Command => {
                Provider::Command(CommandProps::new(self.config.props.command.clone()))
            }
            ProviderKind::Disabled => Provider::Disabled(NoProps),
        }
    }

    pub fn analyze_options(&self) -> AnalyzeOptions {
        AnalyzeOptions {
            extract: ExtractOptions {
                record_every_call: self.config.record_every_call,
            },
            provider: self.provider(),
        }
    }

    pub fn analyzer(&self) -> Analyzer {
        Analyzer::new(self.root_dir.clone(), self.analyze_options()).jobs(self.config.jobs)
    }
}

/// Directory to discover files in: the config `sourceRoot` under `root_dir`.
fn scan_base(root_dir: &Path, source_root: &str) -> PathBuf {
    let source_root = Path::new(source_root);
    if source_root.is_absolute() {
        return source_root.to_path_buf();
    }
    let is_cur_dir = source_root
        .components()
        .all(|c| matches!(c, Component::CurDir));
    if is_cur_dir {
        root_dir.to_path_buf()
    } else {
        let rel = source_root.strip_prefix(".").unwrap_or(source_root);
        root_dir.join(rel)
    }
}
