//! CLI subcommand implementations.

pub mod account;
pub mod browse;
pub mod classes;
pub mod contests;
pub mod courses;
pub mod practice;
pub mod search;

use std::sync::Arc;

use anyhow::{bail, Result};
use clap::Args;
use codelearn_lib::validation;
use codelearn_lib::{
    ListConfig, ListController, ListFilter, ListKind, ListQueryState, ListView, Location,
    MemoryLocation, PageSource, QueryString,
};
use serde::Serialize;

use crate::output::{print_view, OutputFormat};

/// Paging flags shared by every list command.
#[derive(Args)]
pub struct PageArgs {
    /// Page number
    #[arg(long, default_value = "1")]
    pub page: u32,

    /// Results per page (defaults to the list's own size)
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Raw query string, as in a shared link (e.g. "page=2&difficulty=hard").
    /// Overrides the other flags.
    #[arg(long)]
    pub query: Option<String>,
}

impl PageArgs {
    pub fn list_config(&self, kind: ListKind) -> Result<ListConfig> {
        match self.page_size {
            Some(size) => Ok(ListConfig::new(kind, validation::validate_page_size(size)?)),
            None => Ok(ListConfig::from_env(kind)),
        }
    }

    /// The URL the list opens at: `--query` verbatim, else page and filter.
    pub fn location<F: ListFilter>(&self, filter: F) -> QueryString {
        match &self.query {
            Some(raw) => QueryString::parse(raw),
            None => ListQueryState::new(self.page, filter).to_query(),
        }
    }
}

/// Loads the list once at `query` and prints it.
pub async fn show_list<S>(
    source: S,
    config: ListConfig,
    query: QueryString,
    format: OutputFormat,
    print_table: fn(&[S::Item]),
) -> Result<()>
where
    S: PageSource,
    S::Item: Serialize,
{
    let location: Arc<dyn Location> = Arc::new(MemoryLocation::new(query));
    let controller = ListController::new(source, location, config);
    controller.sync().await;

    let view = controller.view();
    if let ListView::Failed(message) = &view {
        bail!("{}", message);
    }
    print_view(config, &view, format, print_table);
    Ok(())
}
