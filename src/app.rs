use crate::config::{Config, UnresolvedPolicy};
use crate::error::{Result, ThanksError};
use crate::github::GitHubClient;
use crate::manifest::Manifest;
use crate::models::{PackageName, RepositoryStatus};
use crate::registry::RegistryClient;
use crate::report::{Outcome, Report};
use tracing::info;

/// Read the manifest and star every dependency's repository.
pub async fn run(config: &Config) -> Result<Report> {
    let manifest = Manifest::load(&config.manifest)?;
    let packages = manifest.package_names();
    thank_dependencies(config, &packages).await
}

/// Resolve, check and star the given packages, in that order.
pub async fn thank_dependencies(config: &Config, packages: &[PackageName]) -> Result<Report> {
    info!(count = packages.len(), "Collected dependencies");

    let registry = RegistryClient::new(config.registry_url.clone())?;
    let resolution = registry.resolve(packages).await?;

    if !resolution.unresolved.is_empty() && config.unresolved == UnresolvedPolicy::Fail {
        let names: Vec<&str> = resolution.unresolved.iter().map(|u| u.package.as_str()).collect();
        return Err(ThanksError::InvalidRepoUrl(format!(
            "no GitHub repository for: {}",
            names.join(", ")
        )));
    }

    let github = GitHubClient::with_endpoint(config.token.clone(), config.github_url.clone())?;
    let statuses = github.fetch_star_status(&resolution.resolved).await?;

    let not_starred: Vec<RepositoryStatus> = statuses
        .into_iter()
        .filter(|status| !status.viewer_has_starred)
        .collect();

    let outcome = if not_starred.is_empty() {
        Outcome::AlreadyStarred
    } else if config.dry_run {
        info!(count = not_starred.len(), "Dry run, not sending stars");
        Outcome::WouldStar(not_starred)
    } else {
        let acknowledged = github.add_stars(&not_starred).await?;
        info!(count = acknowledged.len(), "Stars sent");
        Outcome::Starred(not_starred)
    };

    Ok(Report {
        outcome,
        unresolved: resolution.unresolved,
    })
}
