//! Interactive list browsing: a mounted list controller driven from stdin.
//!
//! Every command edits the list's query string the way a link or a page
//! control would, and the view is redrawn once the list has settled.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use clap::Args;
use codelearn_lib::validation;
use codelearn_lib::{
    CachedClient, ClassSource, ContestSource, CourseSource, ListConfig, ListController,
    ListFilter, ListKind, ListQueryState, Location, MemoryLocation, PageSource, PracticeSource,
    QueryString, SearchSource,
};
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::output::{
    print_classes_table, print_contests_table, print_courses_table, print_practice_table,
    print_search_table, print_view, OutputFormat,
};

#[derive(Args)]
pub struct BrowseArgs {
    /// List to browse: courses, contests, practice, classes, search
    pub list: String,

    /// Starting query string, as in a shared link (e.g. "q=graphs&type=contest")
    #[arg(long, default_value = "")]
    pub query: String,

    /// Results per page (defaults to the list's own size)
    #[arg(long)]
    pub page_size: Option<u32>,
}

const HELP: &str = "commands: n (next), p (previous), g N (go to page), \
                    f key=value (set filter, empty value clears), r (reload), q (quit)";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Next,
    Previous,
    Go(u32),
    Filter { key: String, value: String },
    Reload,
    Quit,
    Help,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let mut parts = line.trim().splitn(2, char::is_whitespace);
    let head = parts.next().unwrap_or_default();
    let rest = parts.next().map(str::trim).unwrap_or_default();
    match head {
        "n" | "next" => Ok(Command::Next),
        "p" | "prev" | "previous" => Ok(Command::Previous),
        "g" | "go" => rest
            .parse::<u32>()
            .map(Command::Go)
            .map_err(|_| format!("'{}' is not a page number", rest)),
        "f" | "filter" => match rest.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => Ok(Command::Filter {
                key: key.trim().to_string(),
                value: value.trim().to_string(),
            }),
            _ => Err("usage: f key=value".to_string()),
        },
        "r" | "reload" => Ok(Command::Reload),
        "q" | "quit" | "exit" => Ok(Command::Quit),
        "" | "h" | "help" | "?" => Ok(Command::Help),
        other => Err(format!("unknown command '{}'", other)),
    }
}

pub async fn run(args: &BrowseArgs, client: Arc<CachedClient>, format: OutputFormat) -> Result<()> {
    let kind = args
        .list
        .trim()
        .to_ascii_lowercase()
        .parse::<ListKind>()
        .map_err(|_| {
            anyhow!(
                "unknown list '{}', expected courses, contests, practice, classes or search",
                args.list
            )
        })?;
    let config = match args.page_size {
        Some(size) => ListConfig::new(kind, validation::validate_page_size(size)?),
        None => ListConfig::from_env(kind),
    };
    let query = QueryString::parse(&args.query);
    let shared = Arc::clone(&client);

    match kind {
        ListKind::Courses => {
            browse(CourseSource::new(shared), &client, config, query, format, print_courses_table)
                .await
        }
        ListKind::Contests => {
            browse(ContestSource::new(shared), &client, config, query, format, print_contests_table)
                .await
        }
        ListKind::Practice => {
            browse(PracticeSource::new(shared), &client, config, query, format, print_practice_table)
                .await
        }
        ListKind::Classes => {
            browse(ClassSource::new(shared), &client, config, query, format, print_classes_table)
                .await
        }
        ListKind::Search => {
            browse(SearchSource::new(shared), &client, config, query, format, print_search_table)
                .await
        }
    }
}

async fn browse<S>(
    source: S,
    client: &CachedClient,
    config: ListConfig,
    query: QueryString,
    format: OutputFormat,
    print_table: fn(&[S::Item]),
) -> Result<()>
where
    S: PageSource,
    S::Item: Serialize,
{
    let location = Arc::new(MemoryLocation::new(query));
    let shared: Arc<dyn Location> = location.clone();
    let mounted = Arc::new(ListController::new(source, shared, config)).mount();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut redraw = true;

    loop {
        if redraw {
            let snapshot = mounted.settled().await;
            print_view(config, &snapshot.view(config.page_size), format, print_table);
        }
        eprintln!("?{} > ", location.query());

        let Some(line) = lines.next_line().await? else {
            break;
        };
        redraw = false;
        match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => eprintln!("{}", HELP),
            Ok(Command::Next) => redraw = report(mounted.next_page()),
            Ok(Command::Previous) => redraw = report(mounted.previous_page()),
            Ok(Command::Go(page)) => redraw = report(mounted.change_page(page)),
            Ok(Command::Filter { key, value }) => {
                if !S::Filter::KEYS.contains(&key.as_str()) {
                    eprintln!(
                        "{} has no filter '{}' (known: {})",
                        config.kind,
                        key,
                        S::Filter::KEYS.join(", ")
                    );
                    continue;
                }
                let mut next = location.query();
                if value.is_empty() {
                    next.remove(&key);
                } else {
                    next.set(&key, value);
                }
                mounted.change_filter(ListQueryState::<S::Filter>::from_query(&next).filter);
                redraw = true;
            }
            Ok(Command::Reload) => {
                client.clear_cache();
                mounted.sync().await;
                redraw = true;
            }
            Err(message) => eprintln!("{}", message),
        }
    }

    mounted.unmount();
    Ok(())
}

fn report(result: Result<(), codelearn_lib::ListError>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            eprintln!("{}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_navigation_commands() {
        assert_eq!(parse_command("n"), Ok(Command::Next));
        assert_eq!(parse_command(" prev "), Ok(Command::Previous));
        assert_eq!(parse_command("g 3"), Ok(Command::Go(3)));
        assert_eq!(parse_command("q"), Ok(Command::Quit));
        assert_eq!(parse_command(""), Ok(Command::Help));
        assert!(parse_command("g three").is_err());
        assert!(parse_command("jump").is_err());
    }

    #[test]
    fn parses_filter_assignments() {
        assert_eq!(
            parse_command("f difficulty=hard"),
            Ok(Command::Filter {
                key: "difficulty".into(),
                value: "hard".into()
            })
        );
        assert_eq!(
            parse_command("f q="),
            Ok(Command::Filter {
                key: "q".into(),
                value: String::new()
            })
        );
        assert!(parse_command("f =hard").is_err());
        assert!(parse_command("f hard").is_err());
    }
}
