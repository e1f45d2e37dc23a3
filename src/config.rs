use crate::cli::Cli;
use crate::error::{Result, ThanksError};
use std::path::PathBuf;
use url::Url;

pub const TOKEN_ENV_VAR: &str = "GITHUB_API_TOKEN";

/// What to do with a dependency whose metadata has no usable GitHub URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnresolvedPolicy {
    Skip,
    Fail,
}

/// Validated run configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub token: String,
    pub manifest: PathBuf,
    pub registry_url: Url,
    pub github_url: Url,
    pub dry_run: bool,
    pub unresolved: UnresolvedPolicy,
}

impl Config {
    /// Validate command-line input before any network activity.
    ///
    /// A missing or blank token yields `ThanksError::MissingToken`; the caller
    /// decides how to surface it.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let token = cli
            .token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ThanksError::MissingToken(format!("{} is not set", TOKEN_ENV_VAR)))?
            .to_string();

        let unresolved = if cli.strict {
            UnresolvedPolicy::Fail
        } else {
            UnresolvedPolicy::Skip
        };

        Ok(Config {
            token,
            manifest: cli.manifest.clone(),
            registry_url: Url::parse(&cli.registry_url)?,
            github_url: Url::parse(&cli.github_url)?,
            dry_run: cli.dry_run,
            unresolved,
        })
    }
}
