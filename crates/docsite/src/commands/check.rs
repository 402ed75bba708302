//! `docsite check` command implementation.

use std::path::PathBuf;

use clap::Args;
use docsite_config::LinkPolicy;
use docsite_site::{Profile, check_sidebar_refs, discover_profiles};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Path to a single configuration file (default: discover profiles).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory to discover profiles in (default: current directory).
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Docs source directory; enables sidebar reference checking.
    #[arg(long)]
    docs_dir: Option<PathBuf>,

    /// Only check the named profile.
    #[arg(long)]
    profile: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if any profile fails to load or validate, or if the
    /// reference check fails under the `throw` policy.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let mut profiles = if let Some(path) = &self.config {
            vec![Profile::load(Some(path))?]
        } else {
            let dir = self.dir.clone().unwrap_or_else(|| PathBuf::from("."));
            discover_profiles(&dir)?
        };

        if let Some(name) = &self.profile {
            profiles.retain(|p| &p.name == name);
            if profiles.is_empty() {
                return Err(CliError::Validation(format!("no profile named `{name}`")));
            }
        }

        for profile in &profiles {
            let references = profile.sidebars.page_ids().count();
            output.success(&format!(
                "profile `{}`: ok ({} sidebar(s), {} page reference(s))",
                profile.name,
                profile.sidebars.len(),
                references,
            ));

            if let Some(docs_dir) = &self.docs_dir {
                let report = check_sidebar_refs(profile, docs_dir)?;
                if report.is_clean() {
                    output.info(&format!("  all {} reference(s) resolved", report.checked));
                } else if profile.config.on_broken_links != LinkPolicy::Ignore {
                    for page_id in &report.missing {
                        output.warning(&format!("  missing page: {page_id}"));
                    }
                }
            }
        }

        tracing::info!(profiles = profiles.len(), "check complete");
        Ok(())
    }
}
