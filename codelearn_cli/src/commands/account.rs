//! Session commands: login, logout and the signed-in profile.

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Args;
use codelearn_lib::CachedClient;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::output::{print_json, print_profile_table, OutputFormat};

#[derive(Args)]
pub struct LoginArgs {
    /// Account username
    #[arg(long)]
    pub username: String,

    /// Account password (read from stdin when omitted)
    #[arg(long)]
    pub password: Option<String>,
}

pub async fn login(args: &LoginArgs, client: Arc<CachedClient>, format: OutputFormat) -> Result<()> {
    let password = match &args.password {
        Some(password) => password.clone(),
        None => read_password().await?,
    };
    let token = client.login(args.username.trim(), &password).await?;
    match format {
        OutputFormat::Table => {
            eprintln!("Signed in as {}. Export the token to stay signed in:", args.username.trim());
            println!("CODELEARN_TOKEN={}", token);
        }
        OutputFormat::Json => print_json(&serde_json::json!({ "token": token })),
    }
    Ok(())
}

async fn read_password() -> Result<String> {
    eprint!("Password: ");
    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await
        .context("failed to read password from stdin")?;
    let password = line.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        bail!("password cannot be empty");
    }
    Ok(password)
}

pub async fn logout(client: Arc<CachedClient>) -> Result<()> {
    if !client.session().is_authenticated() {
        eprintln!("Not signed in.");
        return Ok(());
    }
    let result = client.logout().await;
    eprintln!("Signed out.");
    if let Err(e) = result {
        tracing::warn!("Server did not confirm logout: {}", e);
    }
    Ok(())
}

pub async fn me(client: Arc<CachedClient>, format: OutputFormat) -> Result<()> {
    if !client.session().is_authenticated() {
        bail!("Not signed in. Run `codelearn login` and set CODELEARN_TOKEN.");
    }
    let profile = client.get_my_info().await?;
    match format {
        OutputFormat::Table => print_profile_table(&profile),
        OutputFormat::Json => print_json(&profile),
    }
    Ok(())
}
