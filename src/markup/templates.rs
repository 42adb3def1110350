use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use glob::{Pattern, glob};
use walkdir::WalkDir;

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Result of scanning for templates.
#[derive(Debug, Default)]
pub struct TemplateScan {
    /// Template paths, sorted.
    pub files: BTreeSet<PathBuf>,
    pub skipped_count: usize,
}

/// Find HTML templates under `includes` (relative to `base_dir`), minus
/// anything matching `ignores`.
///
/// Includes and ignores without wildcards are literal paths; an included
/// literal may name a single file. Glob includes are expanded and every
/// match is walked.
pub fn scan_templates(base_dir: &Path, includes: &[String], ignores: &[String]) -> TemplateScan {
    let mut scan = TemplateScan::default();

    let mut literal_ignore_paths: Vec<PathBuf> = Vec::new();
    let mut ignore_patterns: Vec<Pattern> = Vec::new();
    for p in ignores {
        if is_glob_pattern(p) {
            match Pattern::new(p) {
                Ok(pattern) => ignore_patterns.push(pattern),
                Err(e) => log::warn!("Invalid ignore pattern '{}': {}", p, e),
            }
        } else {
            literal_ignore_paths.push(base_dir.join(p));
        }
    }

    let mut roots: Vec<PathBuf> = Vec::new();
    for inc in includes {
        let full = base_dir.join(inc);
        if is_glob_pattern(inc) {
            match glob(&full.to_string_lossy()) {
                Ok(entries) => roots.extend(entries.flatten()),
                Err(e) => log::warn!("Invalid include pattern '{}': {}", inc, e),
            }
        } else if full.exists() {
            roots.push(full);
        } else {
            log::warn!("Include path does not exist: {}", full.display());
        }
    }

    for root in roots {
        for entry in WalkDir::new(&root) {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    scan.skipped_count += 1;
                    log::debug!("Cannot access path: {}", e);
                    continue;
                }
            };
            let path = entry.path();

            if literal_ignore_paths
                .iter()
                .any(|ignore_path| path.starts_with(ignore_path))
            {
                continue;
            }

            let relative = path.strip_prefix(base_dir).unwrap_or(path);
            if ignore_patterns.iter().any(|p| p.matches_path(relative)) {
                continue;
            }

            if path.is_file() && is_template_file(path) {
                scan.files.insert(path.to_path_buf());
            }
        }
    }

    scan
}

fn is_template_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("html" | "htm")
    )
}
