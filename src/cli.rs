use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "github-stars-thanks")]
#[command(about = "Stars the GitHub repositories of your package.json dependencies")]
#[command(version = "0.1.0")]
pub struct Cli {
    /// GitHub token used for the GraphQL API
    #[arg(long, env = "GITHUB_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Path to the package manifest
    #[arg(long, default_value = "package.json")]
    pub manifest: PathBuf,

    /// Package metadata registry base URL
    #[arg(long, env = "NPMS_API_URL", default_value = "https://api.npms.io/v2")]
    pub registry_url: String,

    /// GitHub GraphQL endpoint
    #[arg(long, env = "GITHUB_GRAPHQL_URL", default_value = "https://api.github.com/graphql")]
    pub github_url: String,

    /// Report what would be starred without sending the mutation
    #[arg(long)]
    pub dry_run: bool,

    /// Fail the run when a dependency has no usable GitHub repository URL
    #[arg(long)]
    pub strict: bool,
}
