// src/cli.rs
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::IsTerminal;
use std::path::PathBuf;
use tokio::io::AsyncReadExt;
use tracing::{error, info};

use crate::capture::{PageSelection, SelectionCapture, TextSelection};
use crate::config::AppConfig;
use crate::core::{AnalysisClient, FsOps, SqliteResumeStore};
use crate::display::render_text;
use crate::session::{ResultTab, SessionController, UiState};

#[derive(Parser)]
#[command(name = "jobfit")]
#[command(about = "Match a saved resume against a job description")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(long, global = true, default_value = "config.yaml")]
    pub config: PathBuf,

    /// Config section to use (local or production)
    #[arg(long, global = true, default_value = "local")]
    pub env: String,

    /// Override the analysis service base URL
    #[arg(long, global = true)]
    pub service_url: Option<String>,

    #[arg(long, global = true)]
    pub database_path: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the current panel
    Status,
    /// Save a resume file as text
    Upload {
        file: PathBuf,
        /// Discard a previously saved resume first
        #[arg(long)]
        replace: bool,
    },
    /// Remove the saved resume
    Discard,
    /// Analyze the saved resume against a job description
    Match(MatchArgs),
}

#[derive(Args)]
pub struct MatchArgs {
    /// Job description text
    #[arg(long, conflicts_with_all = ["file", "url"])]
    pub text: Option<String>,

    /// Read the job description from a file
    #[arg(long, conflicts_with = "url")]
    pub file: Option<PathBuf>,

    /// Capture the job description from a web page
    #[arg(long)]
    pub url: Option<String>,

    /// CSS selector picking the job description on the page
    #[arg(long, requires = "url")]
    pub selector: Option<String>,

    /// Results tab to show
    #[arg(long, value_enum, default_value_t = ResultTab::Strengths)]
    pub tab: ResultTab,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Apply command-line overrides on top of the loaded configuration.
    pub fn apply_overrides(&self, mut config: AppConfig) -> AppConfig {
        if let Some(url) = &self.service_url {
            config = config.with_service_url(url.clone());
        }
        if let Some(path) = &self.database_path {
            config = config.with_database_path(path.clone());
        }
        config
    }
}

async fn selection_for(args: &MatchArgs) -> Result<Box<dyn SelectionCapture>> {
    if let Some(text) = &args.text {
        return Ok(Box::new(TextSelection::new(text.clone())));
    }

    if let Some(path) = &args.file {
        let text = FsOps::read_text_lossy(path).await?;
        return Ok(Box::new(TextSelection::new(text)));
    }

    if let Some(url) = &args.url {
        let page = PageSelection::new(url, args.selector.clone())
            .context("Failed to create HTTP client")?;
        return Ok(Box::new(page));
    }

    if std::io::stdin().is_terminal() {
        return Ok(Box::new(TextSelection::empty()));
    }

    let mut text = String::new();
    tokio::io::stdin()
        .read_to_string(&mut text)
        .await
        .context("Failed to read job description from stdin")?;
    Ok(Box::new(TextSelection::new(text)))
}

/// Run one command. Returns whether the operation succeeded.
pub async fn handle_command(cli: Cli, config: AppConfig) -> Result<bool> {
    let store = SqliteResumeStore::open(&config.database_path).await?;
    let service = AnalysisClient::new(&config.service_url, config.request_timeout())?;

    let capture: Box<dyn SelectionCapture> = match &cli.command {
        Command::Match(args) => selection_for(args).await?,
        _ => Box::new(TextSelection::empty()),
    };

    let controller =
        SessionController::open(store, capture, service, config.session_settings()).await?;

    let succeeded = match cli.command {
        Command::Status => true,

        Command::Upload { file, replace } => {
            if replace && controller.state() == UiState::ResumeSaved {
                info!("Replacing saved resume with {}", file.display());
                controller.on_discard_resume().await?;
            }
            controller.on_file_chosen(file).is_ok() && controller.on_save_resume().await.is_ok()
        }

        Command::Discard => controller.on_discard_resume().await.is_ok(),

        Command::Match(args) => match controller.on_match().await {
            Ok(report) => {
                if args.json {
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&report)
                            .context("Failed to serialize report")?
                    );
                    return Ok(true);
                }
                controller.on_select_tab(args.tab)?;
                true
            }
            Err(e) => {
                error!("Match failed: {}", e);
                false
            }
        },
    };

    print!("{}", render_text(&controller.view()));
    Ok(succeeded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_match_with_url_and_tab() {
        let cli = Cli::try_parse_from([
            "jobfit",
            "match",
            "--url",
            "https://jobs.example.com/42",
            "--selector",
            ".description",
            "--tab",
            "keywords",
        ])
        .unwrap();

        match cli.command {
            Command::Match(args) => {
                assert_eq!(args.url.as_deref(), Some("https://jobs.example.com/42"));
                assert_eq!(args.selector.as_deref(), Some(".description"));
                assert_eq!(args.tab, ResultTab::Keywords);
                assert!(!args.json);
            }
            _ => panic!("expected match command"),
        }
    }

    #[test]
    fn test_text_and_url_conflict() {
        assert!(Cli::try_parse_from([
            "jobfit",
            "match",
            "--text",
            "job",
            "--url",
            "https://jobs.example.com"
        ])
        .is_err());
    }

    #[test]
    fn test_selector_requires_url() {
        assert!(Cli::try_parse_from(["jobfit", "match", "--selector", "main"]).is_err());
    }

    #[test]
    fn test_overrides_replace_config_values() {
        let cli = Cli::try_parse_from([
            "jobfit",
            "status",
            "--service-url",
            "http://10.0.0.5:5000",
            "--database-path",
            "/tmp/other.db",
        ])
        .unwrap();

        let config = cli.apply_overrides(AppConfig::default());
        assert_eq!(config.service_url, "http://10.0.0.5:5000");
        assert_eq!(config.database_path, PathBuf::from("/tmp/other.db"));
    }
}
