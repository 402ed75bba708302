//! `docsite nav` command implementation.

use std::path::PathBuf;

use clap::Args;
use docsite_site::{Navigation, Profile, discover_profiles};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the nav command.
#[derive(Args)]
pub(crate) struct NavArgs {
    /// Path to configuration file (default: auto-discover site.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory to discover profiles in (default: current directory).
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Export the named profile (default: the `default` profile).
    #[arg(long)]
    profile: Option<String>,
}

impl NavArgs {
    /// Execute the nav command.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile fails to load.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let profile = if let Some(path) = &self.config {
            Profile::load(Some(path))?
        } else if let Some(name) = &self.profile {
            let dir = self.dir.clone().unwrap_or_else(|| PathBuf::from("."));
            discover_profiles(&dir)?
                .into_iter()
                .find(|p| &p.name == name)
                .ok_or_else(|| CliError::Validation(format!("no profile named `{name}`")))?
        } else {
            Profile::load(None)?
        };

        let nav = Navigation::from_profile(&profile);
        output.data(&serde_json::to_string_pretty(&nav)?);
        Ok(())
    }
}
