use crate::error::{Result, ThanksError};
use crate::models::{PackageName, ResolvedRepository, Resolution, Unresolved};
use crate::types::NpmsPackage;
use reqwest::Client;
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

const GITHUB_HOSTS: [&str; 2] = ["github.com", "www.github.com"];

/// Client for the npms.io batched metadata endpoint
pub struct RegistryClient {
    client: Client,
    base_url: Url,
}

impl RegistryClient {
    pub fn new(base_url: Url) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("github-stars-thanks/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(RegistryClient { client, base_url })
    }

    fn mget_url(&self) -> Result<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{}/package/mget", base))?)
    }

    /// Look up every package in one request and map each to its GitHub repository.
    ///
    /// Results follow the order of `packages`. Packages the registry does not
    /// know, or whose repository URL does not point at GitHub, end up in
    /// `Resolution::unresolved`.
    pub async fn resolve(&self, packages: &[PackageName]) -> Result<Resolution> {
        if packages.is_empty() {
            return Ok(Resolution::default());
        }

        let url = self.mget_url()?;
        info!(count = packages.len(), "Resolving packages through the registry");

        let response = self.client.post(url.clone()).json(packages).send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ThanksError::RegistryError(format!(
                "request to {} failed with status {}: {}",
                url, status, error_text
            )));
        }

        let body: Map<String, Value> = response.json().await?;
        resolve_entries(packages, body)
    }
}

/// Join the mget response back onto the requested package names.
pub fn resolve_entries(packages: &[PackageName], mut body: Map<String, Value>) -> Result<Resolution> {
    let mut resolution = Resolution::default();

    for package in packages {
        let Some(entry) = body.remove(package) else {
            warn!(package = %package, "Package not found in registry");
            resolution.unresolved.push(Unresolved {
                package: package.clone(),
                reason: "not found in registry".to_string(),
            });
            continue;
        };

        let info: NpmsPackage = match serde_json::from_value(entry) {
            Ok(info) => info,
            Err(e) => {
                warn!(package = %package, "Malformed registry metadata: {}", e);
                resolution.unresolved.push(Unresolved {
                    package: package.clone(),
                    reason: "malformed registry metadata".to_string(),
                });
                continue;
            }
        };
        let url = info
            .collected
            .metadata
            .repository
            .and_then(|repo| repo.url);

        let Some(url) = url else {
            warn!(package = %package, "Package metadata has no repository URL");
            resolution.unresolved.push(Unresolved {
                package: package.clone(),
                reason: "no repository URL".to_string(),
            });
            continue;
        };

        match parse_repository_url(&url) {
            Ok((owner, name)) => {
                let repository = ResolvedRepository {
                    package: package.clone(),
                    owner,
                    name,
                };
                debug!(package = %package, repository = %repository.full_name(), "Resolved repository");
                resolution.resolved.push(repository);
            }
            Err(e) => {
                warn!(package = %package, url = %url, "Skipping package: {}", e);
                resolution.unresolved.push(Unresolved {
                    package: package.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    Ok(resolution)
}

/// Extract `(owner, repository)` from a GitHub repository URL.
///
/// The owner is the first path segment and the repository the second, with
/// a trailing `.git` removed. `git+` prefixes, `git://`, `ssh://` and the
/// scp-like `git@github.com:owner/repo` form are accepted.
pub fn parse_repository_url(raw: &str) -> Result<(String, String)> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix("git+").unwrap_or(trimmed);

    let normalized = if let Some(rest) = trimmed.strip_prefix("git@github.com:") {
        format!("https://github.com/{}", rest)
    } else if let Some(rest) = trimmed.strip_prefix("github:") {
        format!("https://github.com/{}", rest)
    } else {
        trimmed.to_string()
    };

    let url = Url::parse(&normalized)
        .map_err(|e| ThanksError::InvalidRepoUrl(format!("{} ({})", raw, e)))?;

    match url.host_str() {
        Some(host) if GITHUB_HOSTS.iter().any(|h| h.eq_ignore_ascii_case(host)) => {}
        _ => {
            return Err(ThanksError::InvalidRepoUrl(format!("not a GitHub URL: {}", raw)));
        }
    }

    let mut segments = url
        .path_segments()
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty());

    let owner = segments.next();
    let repo = segments.next().map(|r| r.strip_suffix(".git").unwrap_or(r));

    match (owner, repo) {
        (Some(owner), Some(repo)) if !repo.is_empty() => Ok((owner.to_string(), repo.to_string())),
        _ => Err(ThanksError::InvalidRepoUrl(format!(
            "expected https://github.com/<owner>/<repository>, got {}",
            raw
        ))),
    }
}
