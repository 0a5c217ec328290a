//! Interactive search prompt

use std::io::Write;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::constants::APP_NAME;
use super::display;
use crate::domain::{BookSearchService, QuickFilter, SearchError, SearchResults};

#[derive(Debug, PartialEq)]
enum ShellCommand {
    Search(String),
    Quick(Result<QuickFilter, String>),
    Help,
    Quit,
    Unknown(String),
}

impl ShellCommand {
    fn parse(line: &str) -> Self {
        let line = line.trim();
        let Some(command) = line.strip_prefix(':') else {
            return Self::Search(line.to_string());
        };

        let (name, arg) = command
            .split_once(char::is_whitespace)
            .map(|(name, arg)| (name, arg.trim()))
            .unwrap_or((command, ""));
        match name {
            "q" | "quit" | "exit" => Self::Quit,
            "h" | "help" => Self::Help,
            "quick" => Self::Quick(arg.parse()),
            other => Self::Unknown(other.to_string()),
        }
    }
}

fn report(result: Result<SearchResults, SearchError>) {
    match result {
        Ok(results) => println!("{}\n", display::render_results(&results)),
        Err(e) => println!("{}\n", e),
    }
}

/// Read queries from stdin until EOF or `:quit`
pub async fn run(search: &BookSearchService) -> Result<()> {
    println!(
        "{} v{}: ask for books in plain language.\n",
        APP_NAME,
        env!("CARGO_PKG_VERSION")
    );
    println!("{}", display::render_help());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };

        match ShellCommand::parse(&line) {
            ShellCommand::Quit => break,
            ShellCommand::Help => println!("{}", display::render_help()),
            ShellCommand::Quick(Ok(filter)) => report(search.quick(filter).await),
            ShellCommand::Quick(Err(message)) => println!("{}\n", message),
            ShellCommand::Search(text) => report(search.search(&text).await),
            ShellCommand::Unknown(name) => println!("Unknown command ':{}' (try :help)\n", name),
        }
    }
    Ok(())
}
