use anyhow::Context;
use clap::Parser;
use github_stars_thanks::app;
use github_stars_thanks::cli::Cli;
use github_stars_thanks::config::Config;
use github_stars_thanks::error::ThanksError;
use github_stars_thanks::report::missing_token_lines;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();

    // Logs go to stderr so the report stays clean on stdout
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match Config::from_cli(&cli) {
        Ok(config) => config,
        Err(ThanksError::MissingToken(_)) => {
            for line in missing_token_lines() {
                println!("{}", line);
            }
            std::process::exit(1);
        }
        Err(e) => return Err(e).context("Invalid configuration"),
    };

    let report = app::run(&config)
        .await
        .with_context(|| format!("Failed to star dependencies from {}", config.manifest.display()))?;

    report.print();

    Ok(())
}
