use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use codelearn_lib::validation;
use codelearn_lib::{CachedClient, ListKind, SearchFilter, SearchSource};

use super::{show_list, PageArgs};
use crate::output::{print_search_table, OutputFormat};

#[derive(Args)]
pub struct SearchArgs {
    /// Title keyword
    pub keyword: Option<String>,

    /// Catalog to search: course, practice, contest, class
    #[arg(long = "type", default_value = "course")]
    pub kind: String,

    #[command(flatten)]
    pub paging: PageArgs,
}

pub async fn run(args: &SearchArgs, client: Arc<CachedClient>, format: OutputFormat) -> Result<()> {
    let config = args.paging.list_config(ListKind::Search)?;
    let kind = validation::validate_search_kind(&args.kind)?;
    let filter = match args.keyword.as_deref() {
        Some(raw) => SearchFilter::new(&validation::validate_search(raw)?, kind),
        None => SearchFilter {
            keyword: None,
            kind,
        },
    };
    show_list(
        SearchSource::new(client),
        config,
        args.paging.location(filter),
        format,
        print_search_table,
    )
    .await
}
