use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use codelearn_lib::{CachedClient, ClassSource, ListKind, MembershipFilter};

use super::{show_list, PageArgs};
use crate::output::{print_classes_table, OutputFormat};

#[derive(Args)]
pub struct ClassesArgs {
    /// Only classes you are enrolled in (needs a token)
    #[arg(long)]
    pub joined: bool,

    #[command(flatten)]
    pub paging: PageArgs,
}

pub async fn run(args: &ClassesArgs, client: Arc<CachedClient>, format: OutputFormat) -> Result<()> {
    let config = args.paging.list_config(ListKind::Classes)?;
    let filter = if args.joined {
        MembershipFilter::Joined
    } else {
        MembershipFilter::All
    };
    if args.joined && !client.session().is_authenticated() {
        tracing::warn!("Listing joined classes without a token; the server will reject it");
    }
    show_list(
        ClassSource::new(client),
        config,
        args.paging.location(filter),
        format,
        print_classes_table,
    )
    .await
}
