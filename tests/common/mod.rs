#![allow(dead_code)]

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use github_stars_thanks::config::{Config, UnresolvedPolicy};
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use url::Url;

/// Shared state of the mock registry + GraphQL server
#[derive(Clone, Default)]
pub struct MockState {
    /// package -> repository URL; packages absent here are unknown to the registry
    pub packages: Arc<Mutex<HashMap<String, Option<String>>>>,
    /// "owner/name" -> viewerHasStarred
    pub starred: Arc<Mutex<HashMap<String, bool>>>,
    /// Forces the GraphQL endpoint to answer with this status
    pub graphql_status: Arc<Mutex<Option<StatusCode>>>,
    /// Forces the GraphQL endpoint to answer with these errors
    pub graphql_errors: Arc<Mutex<Option<Value>>>,
    pub registry_requests: Arc<Mutex<Vec<Vec<String>>>>,
    pub graphql_requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub authorization: Option<String>,
    pub query: String,
}

impl RecordedRequest {
    pub fn is_mutation(&self) -> bool {
        self.query.starts_with("mutation")
    }

    /// `(alias, field)` pairs, one per line of the document body
    pub fn fields(&self) -> Vec<(String, String)> {
        let body = self
            .query
            .split_once('{')
            .map(|(_, rest)| rest)
            .unwrap_or_default();
        body.lines()
            .filter_map(|line| line.split_once(": "))
            .map(|(alias, field)| (alias.to_string(), field.to_string()))
            .collect()
    }
}

impl MockState {
    pub fn with_package(self, package: &str, url: Option<&str>) -> Self {
        self.packages
            .lock()
            .unwrap()
            .insert(package.to_string(), url.map(str::to_string));
        self
    }

    pub fn with_repo(self, full_name: &str, starred: bool) -> Self {
        self.starred.lock().unwrap().insert(full_name.to_string(), starred);
        self
    }

    pub fn graphql_requests(&self) -> Vec<RecordedRequest> {
        self.graphql_requests.lock().unwrap().clone()
    }

    pub fn mutations(&self) -> Vec<RecordedRequest> {
        self.graphql_requests()
            .into_iter()
            .filter(|r| r.is_mutation())
            .collect()
    }

    pub fn registry_requests(&self) -> Vec<Vec<String>> {
        self.registry_requests.lock().unwrap().clone()
    }

    pub fn is_starred(&self, full_name: &str) -> bool {
        self.starred
            .lock()
            .unwrap()
            .get(full_name)
            .copied()
            .unwrap_or(false)
    }
}

pub struct MockServer {
    pub addr: SocketAddr,
    pub state: MockState,
}

impl MockServer {
    pub async fn start(state: MockState) -> anyhow::Result<Self> {
        let app = Router::new()
            .route("/v2/package/mget", post(mget))
            .route("/graphql", post(graphql))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Ok(MockServer { addr, state })
    }

    pub fn registry_url(&self) -> Url {
        Url::parse(&format!("http://{}/v2", self.addr)).unwrap()
    }

    pub fn graphql_url(&self) -> Url {
        Url::parse(&format!("http://{}/graphql", self.addr)).unwrap()
    }

    pub fn config(&self) -> Config {
        Config {
            token: "test-token".to_string(),
            manifest: PathBuf::from("package.json"),
            registry_url: self.registry_url(),
            github_url: self.graphql_url(),
            dry_run: false,
            unresolved: UnresolvedPolicy::Skip,
        }
    }
}

async fn mget(State(state): State<MockState>, Json(names): Json<Vec<String>>) -> Json<Value> {
    state.registry_requests.lock().unwrap().push(names.clone());

    let packages = state.packages.lock().unwrap();
    let mut body = Map::new();
    for name in names {
        let Some(url) = packages.get(&name) else { continue };
        let metadata = match url {
            Some(url) => json!({ "name": name, "repository": { "type": "git", "url": url } }),
            None => json!({ "name": name }),
        };
        body.insert(name, json!({ "collected": { "metadata": metadata } }));
    }
    Json(Value::Object(body))
}

async fn graphql(
    State(state): State<MockState>,
    headers: axum::http::HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let query = body["query"].as_str().unwrap_or_default().to_string();
    let request = RecordedRequest {
        authorization: headers
            .get("authorization")
            .and_then(|h| h.to_str().ok())
            .map(str::to_string),
        query,
    };
    state.graphql_requests.lock().unwrap().push(request.clone());

    if let Some(status) = *state.graphql_status.lock().unwrap() {
        return (status, Json(json!({ "message": "Bad credentials" }))).into_response();
    }

    if let Some(errors) = state.graphql_errors.lock().unwrap().clone() {
        return Json(json!({ "data": null, "errors": errors })).into_response();
    }

    let mut data = Map::new();
    for (alias, field) in request.fields() {
        if request.is_mutation() {
            let id = argument(&field, "starrableId");
            let full_name = id.trim_start_matches("R_").to_string();
            state.starred.lock().unwrap().insert(full_name, true);
            data.insert(
                alias,
                json!({ "clientMutationId": argument(&field, "clientMutationId") }),
            );
        } else {
            let full_name = format!("{}/{}", argument(&field, "owner"), argument(&field, "name"));
            let starred = state.is_starred(&full_name);
            data.insert(
                alias,
                json!({ "id": format!("R_{}", full_name), "viewerHasStarred": starred }),
            );
        }
    }

    Json(json!({ "data": data })).into_response()
}

/// Value of a `key:"value"` argument in a rendered field
pub fn argument(field: &str, key: &str) -> String {
    let needle = format!("{}:\"", key);
    field
        .split_once(&needle)
        .and_then(|(_, rest)| rest.split_once('"'))
        .map(|(value, _)| value.to_string())
        .unwrap_or_default()
}
