//! Kathalu CLI: share festival stories with the corpus from the command line.
//!
//! Reads API_BASE_URL, KATHALU_API_TOKEN (or SWECHA_API_KEY) and the upload limits from the
//! environment or a `.env` file.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use kathalu_api_client::ApiClient;
use kathalu_cli::{contributions_table, format_file_size, init_tracing, summary_line};
use kathalu_core::models::{Category, FileHandle, Language, ReleaseRights, StoryDraft};
use kathalu_core::{AppError, ClientConfig, ErrorMetadata};
use kathalu_services::{ContributionAggregator, SubmissionBatch};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "kathalu", about = "Share festival stories with the Kathalu corpus")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in with phone number and password, printing the access token
    Login {
        #[arg(long)]
        phone: String,
        #[arg(long, env = "KATHALU_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Show the profile the current credentials belong to
    Whoami,
    /// List story categories
    Categories,
    /// Submit a festival story with optional media files
    Submit {
        #[arg(long)]
        title: String,
        /// Brief description (at least 32 characters)
        #[arg(long)]
        description: String,
        /// Full story text (at least 32 characters)
        #[arg(long)]
        story: String,
        /// Category id or name
        #[arg(long)]
        category: String,
        /// telugu, hindi, english or other
        #[arg(long)]
        language: Language,
        /// creator, family_or_friend or downloaded
        #[arg(long)]
        release_rights: ReleaseRights,
        #[arg(long)]
        festival: Option<String>,
        #[arg(long)]
        region: Option<String>,
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,
        /// Media files to upload
        files: Vec<PathBuf>,
    },
    /// List your contributions, newest first
    Contributions {
        /// Defaults to the logged-in user
        #[arg(long)]
        user_id: Option<String>,
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Table,
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

async fn resolve_category(client: &ApiClient, key: &str) -> anyhow::Result<String> {
    let categories = client.categories().await?;
    Category::find(&categories, key)
        .map(|c| c.id.clone())
        .with_context(|| {
            let names: Vec<_> = categories.iter().map(|c| c.name.as_str()).collect();
            format!("Unknown category '{}'. Available: {}", key, names.join(", "))
        })
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {:#}", e);
            return ExitCode::FAILURE;
        }
    };
    init_tracing(config.debug);

    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<AppError>() {
                Some(app_error) => {
                    app_error.log();
                    eprintln!("Error: {}", app_error.client_message());
                    if let Some(action) = app_error.suggested_action() {
                        eprintln!("Hint: {}", action);
                    }
                }
                None => eprintln!("Error: {:#}", e),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, config: ClientConfig) -> anyhow::Result<()> {
    let client = ApiClient::from_config(&config).context(
        "Failed to create API client. Set API_BASE_URL and KATHALU_API_TOKEN or SWECHA_API_KEY",
    )?;

    match cli.command {
        Commands::Login { phone, password } => {
            let token = client.login(&phone, &password).await?;
            print_json(&token)?;
        }
        Commands::Whoami => {
            let user = client.current_user().await?;
            print_json(&user)?;
        }
        Commands::Categories => {
            let categories = client.categories().await?;
            print_json(&categories)?;
        }
        Commands::Submit {
            title,
            description,
            story,
            category,
            language,
            release_rights,
            festival,
            region,
            lat,
            lon,
            files,
        } => {
            let files = files
                .iter()
                .map(|path| {
                    FileHandle::from_path(path)
                        .with_context(|| format!("Failed to read {}", path.display()))
                })
                .collect::<anyhow::Result<Vec<_>>>()?;
            for file in &files {
                tracing::info!(
                    filename = %file.name(),
                    mime_type = %file.mime_type(),
                    size = %format_file_size(file.size_bytes()),
                    "Media file selected"
                );
            }

            let user = client.current_user().await?;
            let display_name = user.display_name().to_string();
            let category_id = resolve_category(&client, &category).await?;

            let draft = StoryDraft {
                title,
                description,
                full_story: story,
                category_id,
                release_rights: Some(release_rights),
                language: Some(language),
                festival_name: festival,
                region,
                latitude: lat,
                longitude: lon,
            };
            let metadata = draft.into_metadata(user.id)?;

            tracing::info!(
                files = files.len(),
                user_id = %metadata.user_id,
                user = %display_name,
                "Submitting festival story"
            );
            let report = SubmissionBatch::with_policy(&client, config.upload_policy())
                .run(&files, &metadata)
                .await?;

            print_json(&report)?;
            eprintln!("{}", summary_line(&report));

            if report.attempted_files > 0 && report.succeeded_files == 0 {
                anyhow::bail!("None of the {} file(s) were shared", report.attempted_files);
            }
        }
        Commands::Contributions { user_id, format } => {
            let user_id = match user_id {
                Some(id) => id,
                None => client.current_user().await?.id,
            };

            let contributions = ContributionAggregator::new(&client)
                .fetch_all(&user_id)
                .await;

            match format {
                OutputFormat::Json => print_json(&contributions)?,
                OutputFormat::Table => println!("{}", contributions_table(&contributions)),
            }
        }
    }

    Ok(())
}
