use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use codelearn_lib::validation;
use codelearn_lib::{CachedClient, DifficultyFilter, ListKind, PracticeSource};

use super::{show_list, PageArgs};
use crate::output::{print_practice_table, OutputFormat};

#[derive(Args)]
pub struct PracticeArgs {
    /// Filter by difficulty: easy, medium, hard
    #[arg(long)]
    pub difficulty: Option<String>,

    #[command(flatten)]
    pub paging: PageArgs,
}

pub async fn run(args: &PracticeArgs, client: Arc<CachedClient>, format: OutputFormat) -> Result<()> {
    let config = args.paging.list_config(ListKind::Practice)?;
    let filter = match args.difficulty.as_deref() {
        Some(raw) => DifficultyFilter(Some(validation::validate_difficulty(raw)?)),
        None => DifficultyFilter::default(),
    };
    show_list(
        PracticeSource::new(client),
        config,
        args.paging.location(filter),
        format,
        print_practice_table,
    )
    .await
}
