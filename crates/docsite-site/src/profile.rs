//! Named configuration profiles.
//!
//! A profile is one site configuration plus its resolved sidebar tree. A
//! directory may carry several independent profiles side by side:
//! `site.toml` is the `default` profile and any sibling `site.<name>.toml`
//! is a named profile.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use docsite_config::SiteConfig;
use docsite_sidebar::SidebarTree;

use crate::SiteError;

/// An immutable site profile: configuration plus sidebar tree.
#[derive(Debug)]
pub struct Profile {
    /// Profile name derived from the config filename.
    pub name: String,
    /// Validated site configuration.
    pub config: SiteConfig,
    /// Sidebar tree built from `docs.sidebar_path`.
    pub sidebars: SidebarTree,
}

impl Profile {
    /// Load a profile from a config file.
    ///
    /// If `config_path` is `None`, the config file is auto-discovered the
    /// way [`SiteConfig::load`] does. The sidebar tree is then built from
    /// the resolved `docs.sidebar_path`.
    ///
    /// # Errors
    ///
    /// Returns config or sidebar errors from the underlying loaders.
    pub fn load(config_path: Option<&Path>) -> Result<Self, SiteError> {
        let config = SiteConfig::load(config_path)?;
        let name = config
            .config_path
            .as_deref()
            .map_or_else(|| "default".to_owned(), profile_name);
        let sidebars = SidebarTree::load(&config.docs_resolved.sidebar_path)?;
        tracing::debug!(
            profile = %name,
            sidebars = sidebars.len(),
            "loaded site profile"
        );
        Ok(Self {
            name,
            config,
            sidebars,
        })
    }
}

/// Derive a profile name from a config file path.
///
/// `site.toml` maps to `default`, `site.<name>.toml` to `<name>`, and
/// anything else to its file stem.
fn profile_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .and_then(OsStr::to_str)
        .unwrap_or("default");
    if stem == "site" {
        return "default".to_owned();
    }
    match stem.strip_prefix("site.") {
        Some(name) if !name.is_empty() => name.to_owned(),
        _ => stem.to_owned(),
    }
}

/// Whether a filename looks like a profile config file.
fn is_profile_file(name: &str) -> bool {
    if name == "site.toml" {
        return true;
    }
    name.strip_prefix("site.")
        .and_then(|rest| rest.strip_suffix(".toml"))
        .is_some_and(|middle| !middle.is_empty())
}

/// Discover and load every profile in a directory.
///
/// The `default` profile (`site.toml`) comes first, the rest follow in
/// filename order. Each config block is treated as an independent profile;
/// none supersedes another.
///
/// # Errors
///
/// Returns [`SiteError::NoProfiles`] when the directory contains no profile
/// config, and load errors from the first profile that fails.
pub fn discover_profiles(dir: &Path) -> Result<Vec<Profile>, SiteError> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .file_name()
                    .and_then(OsStr::to_str)
                    .is_some_and(is_profile_file)
        })
        .collect();

    if paths.is_empty() {
        return Err(SiteError::NoProfiles(dir.to_path_buf()));
    }

    paths.sort_by(|a, b| {
        let a_default = a.file_name().is_some_and(|n| n == "site.toml");
        let b_default = b.file_name().is_some_and(|n| n == "site.toml");
        b_default.cmp(&a_default).then_with(|| a.cmp(b))
    });

    paths
        .iter()
        .map(|path| Profile::load(Some(path)))
        .collect()
}
