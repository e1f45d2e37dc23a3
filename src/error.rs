use thiserror::Error;

#[derive(Error, Debug)]
pub enum ThanksError {
    #[error("GitHub API error: {0}")]
    ApiError(String),

    #[error("GraphQL error: {}", .0.join("; "))]
    GraphQlError(Vec<String>),

    #[error("Invalid GraphQL document: {0}")]
    InvalidDocument(String),

    #[error("Registry error: {0}")]
    RegistryError(String),

    #[error("Invalid repository URL: {0}")]
    InvalidRepoUrl(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("URL error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Missing credential: {0}")]
    MissingToken(String),

    #[error("Authentication error: {0}")]
    AuthError(String),

    #[error("Resource not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, ThanksError>;
