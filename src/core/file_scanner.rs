//! Component file discovery.

use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use glob::{Pattern, glob};
use walkdir::{DirEntry, WalkDir};

use crate::config::TEST_FILE_PATTERNS;

/// Directory names never descended into.
pub const EXCLUDED_DIRS: &[&str] = &["node_modules", "dist", "build", "out", "coverage"];

/// Source extensions considered for analysis.
pub const SOURCE_EXTENSIONS: &[&str] = &["tsx", "jsx", "ts", "js"];

/// What to look at under the source root.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    pub includes: Vec<String>,
    pub ignores: Vec<String>,
    pub ignore_test_files: bool,
}

/// Result of scanning files.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Discovered files in path order.
    pub files: BTreeSet<PathBuf>,
    /// Entries that could not be read.
    pub skipped_count: usize,
}

/// Patterns without `*` or `?` are literal paths relative to the root.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

pub fn scan_files(base_dir: &Path, options: &ScanOptions) -> ScanResult {
    let mut result = ScanResult::default();

    let mut literal_ignores: Vec<PathBuf> = Vec::new();
    let mut glob_ignores: Vec<Pattern> = Vec::new();

    for p in &options.ignores {
        if is_glob_pattern(p) {
            match Pattern::new(p) {
                Ok(pattern) => glob_ignores.push(pattern),
                Err(e) => tracing::warn!("invalid ignore pattern '{}': {}", p, e),
            }
        } else {
            literal_ignores.push(base_dir.join(p));
        }
    }

    if options.ignore_test_files {
        glob_ignores.extend(TEST_FILE_PATTERNS.iter().filter_map(|p| Pattern::new(p).ok()));
    }

    for dir in roots_to_scan(base_dir, &options.includes) {
        let walker = WalkDir::new(&dir)
            .into_iter()
            .filter_entry(|entry| entry.path() == dir || !is_excluded_dir(entry));

        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    result.skipped_count += 1;
                    tracing::warn!("cannot access path: {}", e);
                    continue;
                }
            };
            let path = entry.path();

            if literal_ignores.iter().any(|ignore| path.starts_with(ignore)) {
                continue;
            }
            let path_str = path.to_string_lossy();
            if glob_ignores.iter().any(|p| p.matches(&path_str)) {
                continue;
            }

            if entry.file_type().is_file() && is_source_file(path) {
                result.files.insert(path.to_path_buf());
            }
        }
    }

    tracing::debug!(
        files = result.files.len(),
        skipped = result.skipped_count,
        "scanned {}",
        base_dir.display()
    );
    result
}

fn roots_to_scan(base_dir: &Path, includes: &[String]) -> Vec<PathBuf> {
    if includes.is_empty() {
        return vec![base_dir.to_path_buf()];
    }

    let mut roots = Vec::new();
    for inc in includes {
        if is_glob_pattern(inc) {
            let full_pattern = base_dir.join(inc);
            match glob(&full_pattern.to_string_lossy()) {
                Ok(entries) => roots.extend(entries.flatten().filter(|entry| entry.is_dir())),
                Err(e) => tracing::warn!("invalid include pattern '{}': {}", inc, e),
            }
        } else {
            let path = base_dir.join(inc);
            if path.exists() {
                roots.push(path);
            } else {
                tracing::warn!("include path does not exist: {}", path.display());
            }
        }
    }
    roots
}

fn is_excluded_dir(entry: &DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || EXCLUDED_DIRS.contains(&name.as_ref())
}

pub fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}
