mod commands;
mod output;

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use codelearn_lib::{CachedClient, ClientConfig};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "codelearn")]
#[command(about = "Browse CodeLearn courses, contests, practice problems and classes")]
struct Cli {
    /// Output format: table or json
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// API base URL (overrides CODELEARN_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Bearer token (overrides CODELEARN_TOKEN)
    #[arg(long, global = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List courses
    Courses(commands::courses::CoursesArgs),
    /// List contests with their current status
    Contests(commands::contests::ContestsArgs),
    /// List practice problems
    Practice(commands::practice::PracticeArgs),
    /// List classes
    Classes(commands::classes::ClassesArgs),
    /// Search one catalog by title
    Search(commands::search::SearchArgs),
    /// Page through a list interactively
    Browse(commands::browse::BrowseArgs),
    /// Sign in and print a token
    Login(commands::account::LoginArgs),
    /// Sign out the current token
    Logout,
    /// Show the signed-in profile
    Me,
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("codelearn=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "json" => OutputFormat::Json,
        _ => OutputFormat::Table,
    };

    let mut config = ClientConfig::from_env();
    if let Some(url) = cli.api_url {
        config.api_url = Some(url);
    }
    if let Some(token) = cli.token {
        config.token = Some(token);
    }
    let client = Arc::new(CachedClient::from_config(&config)?);

    match &cli.command {
        Commands::Courses(args) => commands::courses::run(args, client, format).await?,
        Commands::Contests(args) => commands::contests::run(args, client, format).await?,
        Commands::Practice(args) => commands::practice::run(args, client, format).await?,
        Commands::Classes(args) => commands::classes::run(args, client, format).await?,
        Commands::Search(args) => commands::search::run(args, client, format).await?,
        Commands::Browse(args) => commands::browse::run(args, client, format).await?,
        Commands::Login(args) => commands::account::login(args, client, format).await?,
        Commands::Logout => commands::account::logout(client).await?,
        Commands::Me => commands::account::me(client, format).await?,
    }

    Ok(())
}
