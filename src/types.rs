use serde::{Deserialize, Serialize};

// npms.io response structures
#[derive(Debug, Deserialize)]
pub struct NpmsPackage {
    pub collected: NpmsCollected,
}

#[derive(Debug, Deserialize)]
pub struct NpmsCollected {
    pub metadata: NpmsMetadata,
}

#[derive(Debug, Deserialize)]
pub struct NpmsMetadata {
    pub repository: Option<NpmsRepository>,
}

#[derive(Debug, Deserialize)]
pub struct NpmsRepository {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub url: Option<String>,
}

// GitHub GraphQL structures
#[derive(Debug, Serialize)]
pub struct GraphQlRequest<'a> {
    pub query: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlErrorEntry>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlErrorEntry {
    pub message: String,
    #[serde(default)]
    pub path: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryNode {
    pub id: String,
    pub viewer_has_starred: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddStarPayload {
    pub client_mutation_id: Option<String>,
}
