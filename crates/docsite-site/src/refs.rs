//! Sidebar reference checking against the docs source tree.
//!
//! Every sidebar leaf should correspond to a markdown source file. The
//! check runs on demand (never during profile load) and applies the
//! profile's `on_broken_links` policy to whatever it finds.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use docsite_config::LinkPolicy;

use crate::{Profile, SiteError};

/// Result of a sidebar reference check.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RefReport {
    /// Number of leaf references checked.
    pub checked: usize,
    /// Page identifiers with no matching source file, in declaration order.
    pub missing: Vec<String>,
}

impl RefReport {
    /// Whether every reference resolved.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Scan a docs directory for page identifiers.
///
/// A page identifier is the path of a `.md` file relative to `docs_dir`,
/// without the extension (e.g., `input-api/project`). Hidden files and
/// directories are skipped. A missing directory yields an empty set.
///
/// # Errors
///
/// Returns an I/O error if a directory cannot be read.
pub fn scan_pages(docs_dir: &Path) -> Result<BTreeSet<String>, SiteError> {
    let mut pages = BTreeSet::new();
    if docs_dir.exists() {
        scan_directory(docs_dir, "", &mut pages)?;
    }
    Ok(pages)
}

fn scan_directory(
    dir: &Path,
    prefix: &str,
    pages: &mut BTreeSet<String>,
) -> Result<(), SiteError> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if name.starts_with('.') {
            continue;
        }

        let path = entry.path();
        if entry.file_type()?.is_dir() {
            let child_prefix = if prefix.is_empty() {
                name.to_owned()
            } else {
                format!("{prefix}/{name}")
            };
            scan_directory(&path, &child_prefix, pages)?;
        } else if path.extension().is_some_and(|e| e == "md") {
            let stem = name.strip_suffix(".md").unwrap_or(name);
            let page_id = if prefix.is_empty() {
                stem.to_owned()
            } else {
                format!("{prefix}/{stem}")
            };
            pages.insert(page_id);
        }
    }
    Ok(())
}

/// Check every sidebar leaf of a profile against the docs source tree.
///
/// Applies the profile's `on_broken_links` policy: `throw` fails with
/// [`SiteError::BrokenLinks`], `warn` logs each missing reference and
/// returns the report, `ignore` returns the report silently.
///
/// # Errors
///
/// Returns [`SiteError::BrokenLinks`] under the `throw` policy, or an I/O
/// error if the docs directory cannot be scanned.
pub fn check_sidebar_refs(profile: &Profile, docs_dir: &Path) -> Result<RefReport, SiteError> {
    let pages = scan_pages(docs_dir)?;

    let mut checked = 0;
    let mut missing = Vec::new();
    for page_id in profile.sidebars.page_ids() {
        checked += 1;
        if !pages.contains(page_id) && !missing.iter().any(|m| m == page_id) {
            missing.push(page_id.to_owned());
        }
    }
    let report = RefReport { checked, missing };

    match profile.config.on_broken_links {
        LinkPolicy::Throw if !report.is_clean() => Err(SiteError::BrokenLinks {
            profile: profile.name.clone(),
            missing: report.missing,
        }),
        LinkPolicy::Warn => {
            for page_id in &report.missing {
                tracing::warn!(
                    profile = %profile.name,
                    page_id = %page_id,
                    "sidebar references a missing page"
                );
            }
            Ok(report)
        }
        _ => Ok(report),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn write_page(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "# Page\n").unwrap();
    }

    #[test]
    fn test_scan_pages_flat_and_nested() {
        let dir = tempfile::TempDir::new().unwrap();
        write_page(dir.path(), "key_concepts.md");
        write_page(dir.path(), "input-api/project.md");
        write_page(dir.path(), "input-api/inputs/images.md");

        let pages = scan_pages(dir.path()).unwrap();
        let expected: BTreeSet<String> = [
            "key_concepts",
            "input-api/project",
            "input-api/inputs/images",
        ]
        .into_iter()
        .map(str::to_owned)
        .collect();
        assert_eq!(pages, expected);
    }

    #[test]
    fn test_scan_pages_skips_hidden_and_non_markdown() {
        let dir = tempfile::TempDir::new().unwrap();
        write_page(dir.path(), "visible.md");
        write_page(dir.path(), ".hidden/secret.md");
        fs::write(dir.path().join("notes.txt"), "not a page").unwrap();

        let pages = scan_pages(dir.path()).unwrap();
        assert_eq!(pages.len(), 1);
        assert!(pages.contains("visible"));
    }

    #[test]
    fn test_scan_pages_missing_dir_is_empty() {
        let dir = tempfile::TempDir::new().unwrap();
        let pages = scan_pages(&dir.path().join("absent")).unwrap();
        assert!(pages.is_empty());
    }
}
