use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use codelearn_lib::{CachedClient, ContestSource, ListKind, NoFilter};

use super::{show_list, PageArgs};
use crate::output::{print_contests_table, OutputFormat};

#[derive(Args)]
pub struct ContestsArgs {
    #[command(flatten)]
    pub paging: PageArgs,
}

pub async fn run(args: &ContestsArgs, client: Arc<CachedClient>, format: OutputFormat) -> Result<()> {
    let config = args.paging.list_config(ListKind::Contests)?;
    show_list(
        ContestSource::new(client),
        config,
        args.paging.location(NoFilter),
        format,
        print_contests_table,
    )
    .await
}
