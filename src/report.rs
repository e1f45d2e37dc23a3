use crate::models::{RepositoryStatus, Unresolved};
use colored::*;

/// Outcome of one run, ready to be printed
#[derive(Debug, Clone)]
pub struct Report {
    pub outcome: Outcome,
    pub unresolved: Vec<Unresolved>,
}

#[derive(Debug, Clone)]
pub enum Outcome {
    /// Every resolved repository was already starred
    AlreadyStarred,
    /// These repositories were starred, in status-response order
    Starred(Vec<RepositoryStatus>),
    /// Dry run: these repositories would have been starred
    WouldStar(Vec<RepositoryStatus>),
}

impl Report {
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();

        match &self.outcome {
            Outcome::AlreadyStarred => {
                lines.push("You already starred all your GitHub dependencies. ❤️".to_string());
            }
            Outcome::Starred(repos) => {
                lines.push("Stars sent to :".to_string());
                lines.extend(repos.iter().map(star_line));
                lines.push(String::new());
                lines.push("Thanks to you! ❤️".to_string());
            }
            Outcome::WouldStar(repos) => {
                lines.push(format!("{} :", "Would star".bold()));
                lines.extend(repos.iter().map(star_line));
            }
        }

        if !self.unresolved.is_empty() {
            lines.push(String::new());
            lines.push(
                format!("Skipped {} package(s) without a GitHub repository:", self.unresolved.len())
                    .dimmed()
                    .to_string(),
            );
            for skipped in &self.unresolved {
                lines.push(format!("    - {} ({})", skipped.package, skipped.reason).dimmed().to_string());
            }
        }

        lines
    }

    pub fn print(&self) {
        for line in self.lines() {
            println!("{}", line);
        }
    }
}

fn star_line(status: &RepositoryStatus) -> String {
    format!("    - ⭐  {}", status.repository.package.blue())
}

/// Shown when no credential is configured
pub fn missing_token_lines() -> Vec<String> {
    vec![
        "⚠️  We use GITHUB_API_TOKEN environment variable to call the Github API."
            .red()
            .to_string(),
        format!(
            "{} {} {}",
            "Please run".red(),
            "export GITHUB_API_TOKEN=\"YOUR_TOKEN\"".red().bold(),
            "and try again.".red()
        ),
    ]
}
