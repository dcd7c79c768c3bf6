//! kibitz — AI code-review assistant pipeline CLI.
//!
//! Entry point and error handling boundary. Uses `anyhow` for
//! ergonomic error propagation and user-facing messages.

mod cli;

use kibitz::config;
use kibitz::dispatch;
use kibitz::env;
use kibitz::models;
use kibitz::prompt;
use kibitz::store;

use std::path::Path;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tokio::io::AsyncReadExt;

use cli::args::{AskArgs, Cli, Command, DetectArgs};
use config::Config;
use dispatch::{ChatClient, ChatRequest};
use env::Env;
use models::{ConversationMessage, OpenFileContext, Role, SelectionRange};
use store::ThreadStore;

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

/// Install the tracing subscriber, filtered by `RUST_LOG`.
///
/// Diagnostics go to stderr so piped responses stay clean.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Ask(args) => run_ask(*args).await,
        Command::Detect(args) => run_detect(args).await,
        Command::Version => run_version(),
    }
}

/// Print version information.
fn run_version() -> Result<()> {
    println!(
        "{} {}",
        kibitz::constants::APP_NAME.bold(),
        env!("CARGO_PKG_VERSION").green().bold()
    );
    Ok(())
}

/// Print the advisory language label for a file.
async fn run_detect(args: DetectArgs) -> Result<()> {
    let content = tokio::fs::read_to_string(&args.file)
        .await
        .with_context(|| format!("failed to read {}", args.file.display()))?;

    let label = prompt::language_for_path(&args.file)
        .or_else(|| prompt::detect_language(&content))
        .unwrap_or("unknown");
    println!("{label}");
    Ok(())
}

/// Send one review question through the pipeline and print the answer.
async fn run_ask(args: AskArgs) -> Result<()> {
    let env = Env::real();
    let cwd = std::env::current_dir().ok();
    let mut config = Config::load(cwd.as_deref(), &env).context("failed to load configuration")?;

    // CLI flags are the highest config layer.
    if let Some(model) = args.model {
        config.provider.model = model;
    }
    if let Some(key) = args.api_key {
        config.provider.api_key = Some(key);
    }
    if let Some(url) = args.proxy_url {
        config.proxy.url = Some(url);
    }

    let code = read_code(args.file.as_deref()).await?;
    let (selection, range) = select_lines(&code, args.lines);

    let mut store = ThreadStore::new();
    for path in &args.open_files {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let language = prompt::language_for_path(path)
            .or_else(|| prompt::detect_language(&content))
            .unwrap_or("unknown");
        store.add_open_file(OpenFileContext::new(name, content, language));
    }

    let thread_id = store.create_thread(range, selection.clone());

    let language_hint = args
        .language
        .clone()
        .or_else(|| args.file.as_deref().and_then(|p| {
            prompt::language_for_path(p).map(str::to_string)
        }));

    // Snapshot everything the request needs before dispatching; the
    // pipeline never reads the store.
    let request = ChatRequest {
        code_context: selection,
        user_message: args.message.clone(),
        history: store
            .thread(&thread_id)
            .map(|t| t.messages().to_vec())
            .unwrap_or_default(),
        open_files: store.open_files(),
        language_hint,
    };

    let client = ChatClient::from_config(&config);

    store.append_message(
        &thread_id,
        ConversationMessage::new(Role::User, args.message.as_str()),
    );
    let response = client.send_message(&request).await?;
    store.append_message(
        &thread_id,
        ConversationMessage::new(Role::Assistant, response.as_str()),
    );

    println!("{response}");
    Ok(())
}

/// Read the code under review from a file or stdin.
async fn read_code(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut buffer = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buffer)
                .await
                .context("failed to read code from stdin")?;
            Ok(buffer)
        }
    }
}

/// Slice a 1-indexed inclusive line selection out of `code`.
///
/// Out-of-range selections clamp to the available lines; `None` keeps
/// the whole input with no selection range.
fn select_lines(code: &str, lines: Option<(u32, u32)>) -> (String, Option<SelectionRange>) {
    let Some((start, end)) = lines else {
        return (code.to_string(), None);
    };

    let all: Vec<&str> = code.lines().collect();
    let from = (start as usize).saturating_sub(1).min(all.len());
    let to = (end as usize).min(all.len());
    let selection = all[from..to].join("\n");

    let end_column = all
        .get(to.saturating_sub(1))
        .map(|line| line.chars().count() as u32 + 1)
        .unwrap_or(1);

    (
        selection,
        Some(SelectionRange {
            start_line: start,
            end_line: end.min(all.len() as u32),
            start_column: 1,
            end_column,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_lines_none_keeps_everything() {
        let (selection, range) = select_lines("a\nb\nc", None);
        assert_eq!(selection, "a\nb\nc");
        assert!(range.is_none());
    }

    #[test]
    fn select_lines_slices_inclusive_range() {
        let (selection, range) = select_lines("one\ntwo\nthree\nfour", Some((2, 3)));
        assert_eq!(selection, "two\nthree");
        let range = range.unwrap();
        assert_eq!(range.start_line, 2);
        assert_eq!(range.end_line, 3);
        assert_eq!(range.start_column, 1);
        assert_eq!(range.end_column, 6);
    }

    #[test]
    fn select_lines_clamps_past_the_end() {
        let (selection, range) = select_lines("only\ntwo", Some((2, 99)));
        assert_eq!(selection, "two");
        assert_eq!(range.unwrap().end_line, 2);
    }
}
