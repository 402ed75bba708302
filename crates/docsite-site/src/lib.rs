//! Site profile assembly and navigation export.
//!
//! Ties a loaded [`SiteConfig`](docsite_config::SiteConfig) to its
//! [`SidebarTree`](docsite_sidebar::SidebarTree) as an immutable [`Profile`],
//! exports the navigation structure consumed by the rendering collaborator,
//! and checks sidebar page references against the docs source tree.
//!
//! Everything here is a one-shot pure transform executed at process start;
//! picking up edits means loading a fresh [`Profile`].

mod navigation;
mod profile;
mod refs;

pub use navigation::{NavItem, Navigation, SidebarNav};
pub use profile::{Profile, discover_profiles};
pub use refs::{RefReport, check_sidebar_refs, scan_pages};

use std::path::PathBuf;

use docsite_config::ConfigError;
use docsite_sidebar::SidebarError;

/// Site assembly error.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// Site configuration error.
    #[error("{0}")]
    Config(#[from] ConfigError),
    /// Sidebar declaration error.
    #[error("{0}")]
    Sidebar(#[from] SidebarError),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// No configuration profiles found in a directory.
    #[error("No site configuration found in {}", .0.display())]
    NoProfiles(PathBuf),
    /// Sidebar references pages that do not exist in the docs tree.
    #[error("profile `{profile}`: {} broken sidebar reference(s): {}", .missing.len(), .missing.join(", "))]
    BrokenLinks {
        /// Profile that failed the check.
        profile: String,
        /// Missing page identifiers in declaration order.
        missing: Vec<String>,
    },
}
