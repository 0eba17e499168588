//! Per-file analysis pipeline and its parallel batch driver.
//!
//! One file goes through: read, parse, identity resolution, structural
//! extraction, usage counting, props. Every step that can fail only affects
//! the file it runs on; failures become [`Diagnostic`]s and the batch keeps
//! going.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
    time::Instant,
};

use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::Serialize;
use swc_common::SourceMap;

use crate::core::extract::{ExtractOptions, FileAnalyzer, count_references};
use crate::core::identity::resolve_identity;
use crate::core::parsers::jsx::parse_jsx_source;
use crate::core::props::{Provider, PropsRequest, fetch_props};
use crate::core::{ComponentInfo, Diagnostic, DiagnosticKind, StateInfo};

/// Settings shared by every file of a run.
#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    pub extract: ExtractOptions,
    pub provider: Provider,
}

/// Outcome of analyzing one file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FileAnalysis {
    /// `None` when the file failed to parse or is not a component.
    pub component: Option<ComponentInfo>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Merged outcome of a batch.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// Components sorted by `filePath`.
    pub components: Vec<ComponentInfo>,
    pub diagnostics: Vec<Diagnostic>,
    /// Files that were started. Less than the input when cancelled.
    pub files_analyzed: usize,
    pub cancelled: bool,
}

/// Path of `path` relative to `root` with `/` separators, or `path` itself
/// when it lies outside `root`.
pub fn relative_path(path: &Path, root: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative.to_string_lossy().replace('\\', "/")
}

/// Analyze the file at `path`, reporting it relative to `root`.
pub fn analyze_file(path: &Path, root: &Path, options: &AnalyzeOptions) -> FileAnalysis {
    let file_path = relative_path(path, root);

    let code = match fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))
    {
        Ok(code) => code,
        Err(e) => {
            tracing::warn!("{:#}", e);
            return FileAnalysis {
                component: None,
                diagnostics: vec![Diagnostic::new(
                    file_path,
                    DiagnosticKind::Read,
                    format!("{:#}", e),
                )],
            };
        }
    };

    analyze_source(code, &path.to_string_lossy(), &file_path, options)
}

/// Analyze already loaded source text.
///
/// `disk_path` is handed to the props provider; `file_path` is what ends up
/// in the component record and diagnostics.
pub fn analyze_source(
    code: String,
    disk_path: &str,
    file_path: &str,
    options: &AnalyzeOptions,
) -> FileAnalysis {
    let started = Instant::now();
    let mut diagnostics = Vec::new();

    let parsed = match parse_jsx_source(code, file_path, Arc::new(SourceMap::default())) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!("{:#}", e);
            diagnostics.push(Diagnostic::new(
                file_path,
                DiagnosticKind::Parse,
                format!("{:#}", e),
            ));
            return FileAnalysis {
                component: None,
                diagnostics,
            };
        }
    };

    let Some(identity) = resolve_identity(file_path, &parsed.module) else {
        tracing::debug!("{}: no component found, skipping", file_path);
        return FileAnalysis::default();
    };

    let extraction = FileAnalyzer::new(&parsed, options.extract).analyze();

    let states: Vec<StateInfo> = extraction
        .states
        .into_iter()
        .map(|state| {
            let count = count_references(&parsed.module, state.scope, &state.info.name);
            StateInfo {
                usage_count: Some(count),
                ..state.info
            }
        })
        .collect();

    let mut component = ComponentInfo {
        name: identity.name.clone(),
        file_path: file_path.to_string(),
        hooks: extraction.hooks,
        states,
        contexts: extraction.contexts,
        props: Vec::new(),
        store_usage: extraction.store_usage,
        description: None,
    };

    let request = PropsRequest {
        file_path: disk_path,
        parsed: &parsed,
        identity: &identity,
    };
    match fetch_props(&options.provider, &request) {
        Ok(Some(doc)) => {
            component.props = doc.props;
            component.description = doc.description;
        }
        Ok(None) => tracing::debug!("{}: no declared props", file_path),
        Err(e) => {
            tracing::warn!("{}: {:#}", file_path, e);
            diagnostics.push(Diagnostic::new(
                file_path,
                DiagnosticKind::Props,
                format!("{:#}", e),
            ));
        }
    }

    tracing::debug!(
        elapsed_us = started.elapsed().as_micros() as u64,
        "{}: analyzed {}",
        file_path,
        component.name
    );

    FileAnalysis {
        component: Some(component),
        diagnostics,
    }
}

/// Batch progress, reported once per finished file.
#[derive(Debug, Clone, Copy)]
pub struct Progress<'a> {
    pub done: usize,
    pub total: usize,
    pub file: &'a Path,
}

/// Parallel driver over many files.
///
/// # Usage
///
/// ```ignore
/// let report = Analyzer::new(root, AnalyzeOptions::default())
///     .jobs(Some(4))
///     .analyze(&files, |p| eprintln!("{}/{}", p.done, p.total))?;
/// ```
pub struct Analyzer {
    root: PathBuf,
    options: AnalyzeOptions,
    jobs: Option<usize>,
    cancel: Arc<AtomicBool>,
}

impl Analyzer {
    pub fn new(root: impl Into<PathBuf>, options: AnalyzeOptions) -> Self {
        Self {
            root: root.into(),
            options,
            jobs: None,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Worker count. `None` uses the global rayon pool.
    pub fn jobs(mut self, jobs: Option<usize>) -> Self {
        self.jobs = jobs;
        self
    }

    /// Share a cancellation flag with the caller.
    pub fn with_cancel_flag(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = cancel;
        self
    }

    /// Flag that stops the batch before the next file starts when set.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    pub fn analyze<F>(&self, files: &[PathBuf], on_progress: F) -> Result<AnalysisReport>
    where
        F: Fn(Progress<'_>) + Sync,
    {
        let total = files.len();
        let done = AtomicUsize::new(0);

        let run = || -> Vec<FileAnalysis> {
            files
                .par_iter()
                .filter_map(|path| {
                    if self.cancel.load(Ordering::Relaxed) {
                        return None;
                    }
                    let analysis = analyze_file(path, &self.root, &self.options);
                    let finished = done.fetch_add(1, Ordering::Relaxed) + 1;
                    on_progress(Progress {
                        done: finished,
                        total,
                        file: path,
                    });
                    Some(analysis)
                })
                .collect()
        };

        let results = match self.jobs {
            Some(jobs) => rayon::ThreadPoolBuilder::new()
                .num_threads(jobs)
                .build()
                .context("Failed to build worker pool")?
                .install(run),
            None => run(),
        };

        Ok(merge(results, total))
    }
}

fn merge(results: Vec<FileAnalysis>, total: usize) -> AnalysisReport {
    let files_analyzed = results.len();
    let mut components = Vec::new();
    let mut diagnostics = Vec::new();
    for result in results {
        components.extend(result.component);
        diagnostics.extend(result.diagnostics);
    }
    components.sort_by(|a, b| a.file_path.cmp(&b.file_path));
    diagnostics.sort_by(|a, b| a.file_path.cmp(&b.file_path));

    AnalysisReport {
        components,
        diagnostics,
        files_analyzed,
        cancelled: files_analyzed < total,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;
    use crate::core::props::{CommandProps, NoProps};

    fn analyze(code: &str, file_path: &str) -> FileAnalysis {
        analyze_source(
            code.to_string(),
            file_path,
            file_path,
            &AnalyzeOptions::default(),
        )
    }

    #[test]
    fn test_counter_component() {
        let result = analyze(
            "function Counter(){ const [count, setCount] = useState(0); return <p>{count}</p>; }",
            "src/Counter.tsx",
        );

        let component = result.component.unwrap();
        assert_eq!(component.name, "Counter");
        assert_eq!(component.file_path, "src/Counter.tsx");
        assert_eq!(component.hooks.len(), 1);
        assert_eq!(component.hooks[0].name, "useState");
        assert_eq!(
            component.states,
            vec![StateInfo {
                name: "count".to_string(),
                setter: "setCount".to_string(),
                initial_value: Some("0".to_string()),
                usage_count: Some(1),
            }]
        );
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn test_usage_count_ignores_declaration() {
        let result = analyze(
            r#"
export function Pager() {
  const [n, setN] = useState(0);
  return <div>{n}{n}</div>;
}
"#,
            "Pager.tsx",
        );
        let component = result.component.unwrap();
        assert_eq!(component.states[0].usage_count, Some(2));
    }

    #[test]
    fn test_non_component_is_silently_skipped() {
        let result = analyze(
            "export function formatDate(d: Date) { return d.toISOString(); }",
            "src/utils/format.ts",
        );
        assert_eq!(result, FileAnalysis::default());
    }

    #[test]
    fn test_parse_failure_is_a_diagnostic() {
        let result = analyze("export function Broken( { return <div>; }", "Broken.tsx");

        assert!(result.component.is_none());
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].kind, DiagnosticKind::Parse);
        assert_eq!(result.diagnostics[0].file_path, "Broken.tsx");
    }

    #[test]
    fn test_builtin_props_are_merged() {
        let result = analyze(
            r#"
interface ButtonProps {
  /** Text on the button */
  label: string;
  size?: "sm" | "md";
}

/** A clickable button. */
export function Button({ label, size = "md" }: ButtonProps) {
  return <button className={size}>{label}</button>;
}
"#,
            "Button.tsx",
        );

        let component = result.component.unwrap();
        assert_eq!(component.description.as_deref(), Some("A clickable button."));
        let names: Vec<_> = component.props.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["label", "size"]);
        assert_eq!(component.props[1].default_value.as_deref(), Some("\"md\""));
    }

    #[test]
    fn test_props_failure_keeps_component() {
        let options = AnalyzeOptions {
            provider: Provider::Command(CommandProps::new(vec![
                "hooklens-no-such-docgen-binary".to_string(),
            ])),
            ..Default::default()
        };
        let result = analyze_source(
            "export const Card = () => { const [open, setOpen] = useState(false); return null; };"
                .to_string(),
            "Card.tsx",
            "Card.tsx",
            &options,
        );

        let component = result.component.unwrap();
        assert_eq!(component.name, "Card");
        assert_eq!(component.states.len(), 1);
        assert!(component.props.is_empty());
        assert!(component.description.is_none());
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].kind, DiagnosticKind::Props);
    }

    #[test]
    fn test_component_without_props_has_no_diagnostic() {
        let result = analyze("export const Spinner = () => <span />;", "Spinner.tsx");

        let component = result.component.unwrap();
        assert!(component.props.is_empty());
        assert!(component.description.is_none());
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn test_disabled_props_provider() {
        let options = AnalyzeOptions {
            provider: Provider::Disabled(NoProps),
            ..Default::default()
        };
        let result = analyze_source(
            "export function Tag({ label }: { label: string }) { return label; }".to_string(),
            "Tag.tsx",
            "Tag.tsx",
            &options,
        );
        assert!(result.component.unwrap().props.is_empty());
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn test_analysis_is_idempotent() {
        let code = r#"
export default function Profile() {
  const { user } = useSelector((state) => state.session);
  const theme = useContext(ThemeContext);
  useEffect(() => {}, [user]);
  return null;
}
"#;
        assert_eq!(analyze(code, "Profile.tsx"), analyze(code, "Profile.tsx"));
    }

    #[test]
    fn test_relative_path() {
        assert_eq!(
            relative_path(Path::new("/repo/src/App.tsx"), Path::new("/repo")),
            "src/App.tsx"
        );
        assert_eq!(
            relative_path(Path::new("/elsewhere/App.tsx"), Path::new("/repo")),
            "/elsewhere/App.tsx"
        );
    }

    #[test]
    fn test_read_failure_is_a_diagnostic() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("Missing.tsx");

        let result = analyze_file(&missing, dir.path(), &AnalyzeOptions::default());

        assert!(result.component.is_none());
        assert_eq!(result.diagnostics[0].kind, DiagnosticKind::Read);
        assert_eq!(result.diagnostics[0].file_path, "Missing.tsx");
    }

    #[test]
    fn test_batch_sorts_and_reports_progress() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("Zeta.tsx"), "export const Zeta = () => null;").unwrap();
        fs::write(root.join("Alpha.tsx"), "export function Alpha() { return null; }").unwrap();
        fs::write(root.join("helpers.ts"), "export const sum = (a, b) => a + b;").unwrap();
        fs::write(root.join("Broken.tsx"), "export function Broken( {").unwrap();

        let files = vec![
            root.join("Zeta.tsx"),
            root.join("helpers.ts"),
            root.join("Broken.tsx"),
            root.join("Alpha.tsx"),
        ];
        let seen = Mutex::new(Vec::new());

        let report = Analyzer::new(root, AnalyzeOptions::default())
            .jobs(Some(2))
            .analyze(&files, |progress| {
                assert_eq!(progress.total, 4);
                seen.lock().unwrap().push(progress.done);
            })
            .unwrap();

        let names: Vec<_> = report.components.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Zeta"]);
        assert_eq!(report.files_analyzed, 4);
        assert!(!report.cancelled);
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0].file_path, "Broken.tsx");

        let mut seen = seen.into_inner().unwrap();
        seen.sort();
        assert_eq!(seen, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_cancelled_batch_starts_nothing() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("App.tsx"), "export const App = () => null;").unwrap();

        let analyzer = Analyzer::new(root, AnalyzeOptions::default());
        analyzer.cancel_flag().store(true, Ordering::Relaxed);

        let report = analyzer.analyze(&[root.join("App.tsx")], |_| {}).unwrap();

        assert!(report.components.is_empty());
        assert_eq!(report.files_analyzed, 0);
        assert!(report.cancelled);
    }
}
