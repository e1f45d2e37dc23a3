use crate::error::{Result, ThanksError};
use crate::graphql::{Document, Field};
use crate::models::{RepositoryStatus, ResolvedRepository};
use crate::types::{AddStarPayload, GraphQlRequest, GraphQlResponse, RepositoryNode};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

pub const GRAPHQL_URL: &str = "https://api.github.com/graphql";

/// Client for the GitHub GraphQL endpoint
pub struct GitHubClient {
    client: Client,
    token: String,
    endpoint: Url,
}

impl GitHubClient {
    pub fn new(token: String) -> Result<Self> {
        Self::with_endpoint(token, Url::parse(GRAPHQL_URL)?)
    }

    pub fn with_endpoint(token: String, endpoint: Url) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("github-stars-thanks/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(GitHubClient {
            client,
            token,
            endpoint,
        })
    }

    /// Send one document and return the per-alias results in push order.
    async fn execute<T: DeserializeOwned>(&self, document: &Document) -> Result<Vec<T>> {
        let query = document.render();
        debug!(kind = ?document.kind(), fields = document.len(), "Sending GraphQL document");

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.token)
            .json(&GraphQlRequest { query: &query })
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::UNAUTHORIZED => {
                return Err(ThanksError::AuthError(
                    "GitHub rejected the token (401 Unauthorized)".to_string(),
                ));
            }
            status => {
                let error_text = response.text().await.unwrap_or_default();
                return Err(ThanksError::ApiError(format!(
                    "GraphQL request failed with status {}: {}",
                    status, error_text
                )));
            }
        }

        let body: GraphQlResponse<Map<String, Value>> = response.json().await?;

        if !body.errors.is_empty() {
            return Err(ThanksError::GraphQlError(
                body.errors.into_iter().map(|e| e.message).collect(),
            ));
        }

        let data = body
            .data
            .ok_or_else(|| ThanksError::ApiError("GraphQL response has no data".to_string()))?;

        document.correlate(data)
    }

    /// Query the star status of every repository in one request.
    ///
    /// The returned statuses are in the same order as `repositories`.
    pub async fn fetch_star_status(
        &self,
        repositories: &[ResolvedRepository],
    ) -> Result<Vec<RepositoryStatus>> {
        if repositories.is_empty() {
            return Ok(Vec::new());
        }

        let mut document = Document::query();
        let mut aliases = Vec::with_capacity(repositories.len());
        for repo in repositories {
            aliases.push(document.push(Field::Repository {
                owner: repo.owner.clone(),
                name: repo.name.clone(),
            })?);
        }

        info!(count = repositories.len(), "Fetching star status");
        let nodes: Vec<RepositoryNode> = self.execute(&document).await?;

        Ok(repositories
            .iter()
            .zip(aliases)
            .zip(nodes)
            .map(|((repo, alias), node)| RepositoryStatus {
                repository: repo.clone(),
                alias: alias.to_string(),
                id: node.id,
                viewer_has_starred: node.viewer_has_starred,
            })
            .collect())
    }

    /// Star every given repository in one mutation.
    ///
    /// Each `addStar` carries the repository's status alias as its
    /// `clientMutationId`; the echoed ids are returned in input order.
    pub async fn add_stars(&self, targets: &[RepositoryStatus]) -> Result<Vec<String>> {
        if targets.is_empty() {
            return Ok(Vec::new());
        }

        let mut document = Document::mutation();
        for target in targets {
            document.push(Field::AddStar {
                starrable_id: target.id.clone(),
                client_mutation_id: target.alias.clone(),
            })?;
        }

        info!(count = targets.len(), "Adding stars");
        let payloads: Vec<AddStarPayload> = self.execute(&document).await?;

        Ok(payloads
            .into_iter()
            .zip(targets)
            .map(|(payload, target)| payload.client_mutation_id.unwrap_or_else(|| target.alias.clone()))
            .collect())
    }
}
