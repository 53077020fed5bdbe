use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use codelearn_lib::{CachedClient, CourseSource, ListKind, NoFilter};

use super::{show_list, PageArgs};
use crate::output::{print_courses_table, OutputFormat};

#[derive(Args)]
pub struct CoursesArgs {
    #[command(flatten)]
    pub paging: PageArgs,
}

pub async fn run(args: &CoursesArgs, client: Arc<CachedClient>, format: OutputFormat) -> Result<()> {
    let config = args.paging.list_config(ListKind::Courses)?;
    show_list(
        CourseSource::new(client),
        config,
        args.paging.location(NoFilter),
        format,
        print_courses_table,
    )
    .await
}
