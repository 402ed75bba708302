//! Site configuration for docsite.
//!
//! Parses `site.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! The configuration describes the identity of a documentation site (title,
//! tagline, URLs, project identifiers), its navbar, the broken-link policies
//! and the docs preset handed to the external renderer. The loaded value is
//! immutable; reloading means calling [`SiteConfig::load`] again.
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `url`
//! - `docs.edit_url`

mod expand;
mod navbar;

pub use navbar::{LinkItem, LinkTarget, LogoItem, Navbar, NavbarItem, NavbarPosition};

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "site.toml";

/// Behavior when a documentation link cannot be resolved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkPolicy {
    /// Fail the build.
    #[default]
    Throw,
    /// Log a warning and continue.
    Warn,
    /// Continue silently.
    Ignore,
}

/// Site configuration.
///
/// Loaded once from `site.toml` and treated as immutable for the lifetime
/// of a build or serve process.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site display title.
    pub title: String,
    /// Site tagline shown alongside the title.
    pub tagline: String,
    /// Public site URL (e.g., `https://example.com`).
    pub url: Option<String>,
    /// Root path the site is served under. Must start and end with `/`.
    pub base_url: String,
    /// Organization identifier used to construct external links.
    pub organization_name: String,
    /// Project identifier used to construct external links.
    pub project_name: String,
    /// Relative path to the favicon asset. Existence is not validated here.
    pub favicon: Option<String>,
    /// Policy for unresolvable internal links.
    pub on_broken_links: LinkPolicy,
    /// Policy for unresolvable markdown links.
    #[serde(default = "default_markdown_link_policy")]
    pub on_broken_markdown_links: LinkPolicy,
    /// Navbar definition.
    pub navbar: Navbar,
    /// Docs preset (paths are relative strings from TOML).
    docs: DocsPresetRaw,

    /// Resolved docs preset (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsPreset,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            tagline: String::new(),
            url: None,
            base_url: "/".to_owned(),
            organization_name: String::new(),
            project_name: String::new(),
            favicon: None,
            on_broken_links: LinkPolicy::Throw,
            on_broken_markdown_links: LinkPolicy::Warn,
            navbar: Navbar::default(),
            docs: DocsPresetRaw::default(),
            docs_resolved: DocsPreset::default(),
            config_path: None,
        }
    }
}

fn default_markdown_link_policy() -> LinkPolicy {
    LinkPolicy::Warn
}

/// Raw docs preset as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsPresetRaw {
    sidebar_path: Option<String>,
    edit_url: Option<String>,
    custom_css: Option<String>,
}

/// Resolved docs preset with paths relative to the config directory.
#[derive(Clone, Debug, Default)]
pub struct DocsPreset {
    /// Path to the sidebar declaration file.
    pub sidebar_path: PathBuf,
    /// Template used to build "edit this page" links.
    pub edit_url: Option<String>,
    /// Path to a custom stylesheet handed to the renderer.
    pub custom_css: Option<PathBuf>,
}

/// Sidebar declaration filename used when the config does not name one.
const SIDEBAR_FILENAME: &str = "sidebars.yaml";

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error naming the offending field.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`docs.edit_url`").
        field: String,
        /// Error message (e.g., "${`EDIT_URL`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

/// Require a path field to start and end with `/`.
fn require_slash_wrapped(value: &str, field: &str) -> Result<(), ConfigError> {
    if !value.starts_with('/') {
        return Err(ConfigError::Validation(format!(
            "{field} must start with a slash, got `{value}`"
        )));
    }
    if !value.ends_with('/') {
        return Err(ConfigError::Validation(format!(
            "{field} must end with a slash, got `{value}`"
        )));
    }
    Ok(())
}

impl SiteConfig {
    /// Load configuration from file.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise,
    /// searches for `site.toml` in the current directory and parents.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] if no config file can be located,
    /// and parse, expansion or validation errors otherwise.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)
        } else {
            Err(ConfigError::NotFound(PathBuf::from(CONFIG_FILENAME)))
        }
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Search for a config file in the current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Resolve a docs route against `base_url`.
    ///
    /// `base_url` is immutable after load; every internal link resolves
    /// relative to it.
    #[must_use]
    pub fn route(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Build an "edit this page" link for a page identifier.
    ///
    /// Joins the page source path onto the `docs.edit_url` template.
    /// Returns `None` when no template is configured.
    #[must_use]
    pub fn edit_url_for(&self, page_id: &str) -> Option<String> {
        self.docs_resolved
            .edit_url
            .as_ref()
            .map(|base| format!("{}/{}.md", base.trim_end_matches('/'), page_id))
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_slash_wrapped(&self.base_url, "base_url")?;
        require_non_empty(&self.organization_name, "organization_name")?;
        require_non_empty(&self.project_name, "project_name")?;
        if let Some(url) = &self.url {
            require_http_url(url, "url")?;
        }
        self.navbar.validate()?;
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(url) = &self.url {
            self.url = Some(expand::expand_env(url, "url")?);
        }
        if let Some(edit_url) = &self.docs.edit_url {
            self.docs.edit_url = Some(expand::expand_env(edit_url, "docs.edit_url")?);
        }
        Ok(())
    }

    /// Resolve relative preset paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.docs_resolved = DocsPreset {
            sidebar_path: config_dir.join(
                self.docs.sidebar_path.as_deref().unwrap_or(SIDEBAR_FILENAME),
            ),
            edit_url: self.docs.edit_url.clone(),
            custom_css: self.docs.custom_css.as_deref().map(|p| config_dir.join(p)),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn valid_config() -> SiteConfig {
        SiteConfig {
            title: "Annotell".to_owned(),
            organization_name: "annotell".to_owned(),
            project_name: "annotell-python".to_owned(),
            ..Default::default()
        }
    }

    /// Assert that validation fails with expected substrings in the error message.
    fn assert_validation_error(config: &SiteConfig, expected_substrings: &[&str]) {
        let result = config.validate();
        assert!(result.is_err(), "Expected validation to fail");
        let err = result.unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let msg = err.to_string();
        for s in expected_substrings {
            assert!(
                msg.contains(s),
                "Expected error to contain '{s}', got: {msg}"
            );
        }
    }

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.base_url, "/");
        assert_eq!(config.on_broken_links, LinkPolicy::Throw);
        assert_eq!(config.on_broken_markdown_links, LinkPolicy::Warn);
        assert!(config.navbar.items.is_empty());
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let toml = "";
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.base_url, "/");
        assert_eq!(config.on_broken_links, LinkPolicy::Throw);
    }

    #[test]
    fn test_parse_site_identity() {
        let toml = r#"
title = "Annotell"
tagline = "API Documentation of Annotell Platform APIs"
url = "https://annotell.com"
base_url = "/"
organization_name = "annotell"
project_name = "annotell-python"
favicon = "img/favicon.ico"
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.title, "Annotell");
        assert_eq!(config.tagline, "API Documentation of Annotell Platform APIs");
        assert_eq!(config.url, Some("https://annotell.com".to_owned()));
        assert_eq!(config.base_url, "/");
        assert_eq!(config.organization_name, "annotell");
        assert_eq!(config.project_name, "annotell-python");
        assert_eq!(config.favicon, Some("img/favicon.ico".to_owned()));
    }

    #[test]
    fn test_parse_link_policies() {
        let toml = r#"
on_broken_links = "throw"
on_broken_markdown_links = "ignore"
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.on_broken_links, LinkPolicy::Throw);
        assert_eq!(config.on_broken_markdown_links, LinkPolicy::Ignore);
    }

    #[test]
    fn test_parse_unknown_fields_ignored() {
        let toml = r#"
title = "Annotell"
some_future_setting = true
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.title, "Annotell");
    }

    #[test]
    fn test_resolve_paths_defaults() {
        let mut config = valid_config();
        config.resolve_paths(Path::new("/project"));
        assert_eq!(
            config.docs_resolved.sidebar_path,
            PathBuf::from("/project/sidebars.yaml")
        );
        assert!(config.docs_resolved.custom_css.is_none());
    }

    #[test]
    fn test_resolve_paths_explicit() {
        let toml = r#"
[docs]
sidebar_path = "nav/sidebars.yaml"
edit_url = "https://github.com/annotell/annotell-python/edit/gh-pages/annotell-sdk/"
custom_css = "src/css/custom.css"
"#;
        let mut config: SiteConfig = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));
        assert_eq!(
            config.docs_resolved.sidebar_path,
            PathBuf::from("/project/nav/sidebars.yaml")
        );
        assert_eq!(
            config.docs_resolved.custom_css,
            Some(PathBuf::from("/project/src/css/custom.css"))
        );
        assert_eq!(
            config.docs_resolved.edit_url.as_deref(),
            Some("https://github.com/annotell/annotell-python/edit/gh-pages/annotell-sdk/")
        );
    }

    #[test]
    fn test_validate_valid_config_passes() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_validate_base_url_root() {
        let mut config = valid_config();
        config.base_url = "/".to_owned();
        assert!(config.validate().is_ok());
        assert_eq!(config.base_url, "/");
    }

    #[test]
    fn test_validate_base_url_project_path() {
        let mut config = valid_config();
        config.base_url = "/annotell-python/".to_owned();
        assert!(config.validate().is_ok());
        assert_eq!(config.base_url, "/annotell-python/");
    }

    #[test]
    fn test_validate_base_url_no_slashes() {
        let mut config = valid_config();
        config.base_url = "annotell-python".to_owned();
        assert_validation_error(&config, &["base_url", "start with a slash"]);
    }

    #[test]
    fn test_validate_base_url_missing_trailing_slash() {
        let mut config = valid_config();
        config.base_url = "/annotell-python".to_owned();
        assert_validation_error(&config, &["base_url", "end with a slash"]);
    }

    #[test]
    fn test_validate_organization_name_empty() {
        let mut config = valid_config();
        config.organization_name = String::new();
        assert_validation_error(&config, &["organization_name", "empty"]);
    }

    #[test]
    fn test_validate_project_name_empty() {
        let mut config = valid_config();
        config.project_name = String::new();
        assert_validation_error(&config, &["project_name", "empty"]);
    }

    #[test]
    fn test_validate_url_invalid_scheme() {
        let mut config = valid_config();
        config.url = Some("ftp://annotell.com".to_owned());
        assert_validation_error(&config, &["url", "http"]);
    }

    #[test]
    fn test_validate_url_valid_https() {
        let mut config = valid_config();
        config.url = Some("https://annotell.com".to_owned());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_route_from_root_base() {
        let config = valid_config();
        assert_eq!(config.route("docs/"), "/docs/");
        assert_eq!(config.route("/docs/intro"), "/docs/intro");
    }

    #[test]
    fn test_route_from_project_base() {
        let mut config = valid_config();
        config.base_url = "/annotell-python/".to_owned();
        assert_eq!(config.route("docs/"), "/annotell-python/docs/");
    }

    #[test]
    fn test_edit_url_for_without_template() {
        let config = valid_config();
        assert!(config.edit_url_for("input-api/project").is_none());
    }

    #[test]
    fn test_edit_url_for_with_template() {
        let mut config = valid_config();
        config.docs_resolved.edit_url =
            Some("https://github.com/annotell/annotell-python/edit/gh-pages/annotell-sdk/".to_owned());
        assert_eq!(
            config.edit_url_for("input-api/project").as_deref(),
            Some(
                "https://github.com/annotell/annotell-python/edit/gh-pages/annotell-sdk/input-api/project.md"
            )
        );
    }

    #[test]
    fn test_expand_env_vars_url() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("TEST_SITE_URL", "https://docs.test.com");
        }

        let toml = r#"
url = "${TEST_SITE_URL}"
"#;
        let mut config: SiteConfig = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();
        assert_eq!(config.url, Some("https://docs.test.com".to_owned()));

        unsafe {
            std::env::remove_var("TEST_SITE_URL");
        }
    }

    #[test]
    fn test_expand_env_vars_edit_url_missing_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("MISSING_EDIT_URL_VAR");
        }

        let toml = r#"
[docs]
edit_url = "${MISSING_EDIT_URL_VAR}"
"#;
        let mut config: SiteConfig = toml::from_str(toml).unwrap();
        let err = config.expand_env_vars().unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("MISSING_EDIT_URL_VAR"));
        assert!(err.to_string().contains("docs.edit_url"));
    }

    #[test]
    fn test_expand_env_vars_literal_unchanged() {
        let toml = r#"
url = "https://annotell.com"
"#;
        let mut config: SiteConfig = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();
        assert_eq!(config.url, Some("https://annotell.com".to_owned()));
    }
}
