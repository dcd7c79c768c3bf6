//! Clap argument types and validation.

use clap::Parser;
use std::path::PathBuf;

/// AI code-review assistant pipeline.
#[derive(Parser, Debug)]
#[command(name = "kibitz", version, about = "Ask a language model about a piece of code")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Send a review question about a piece of code.
    Ask(Box<AskArgs>),

    /// Print the advisory language label detected for a file.
    Detect(DetectArgs),

    /// Print version information.
    Version,
}

/// Arguments for the `ask` subcommand.
#[derive(Parser, Debug)]
pub struct AskArgs {
    // --- Input ---
    /// Code file to review (reads stdin when omitted).
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// 1-indexed inclusive line selection, e.g. `10:42` (whole input when omitted).
    #[arg(long, value_parser = parse_line_range)]
    pub lines: Option<(u32, u32)>,

    /// The question or instruction for the reviewer.
    #[arg(long, short = 'm')]
    pub message: String,

    /// Additional open file to include as cross-file context (repeatable).
    #[arg(long = "open-file")]
    pub open_files: Vec<PathBuf>,

    // --- Overrides (highest config layer) ---
    /// Language label for the selection (detected when omitted).
    #[arg(long)]
    pub language: Option<String>,

    /// Model identifier override.
    #[arg(long)]
    pub model: Option<String>,

    /// Provider API key override.
    #[arg(long)]
    pub api_key: Option<String>,

    /// Review proxy base URL override.
    #[arg(long)]
    pub proxy_url: Option<String>,
}

/// Arguments for the `detect` subcommand.
#[derive(Parser, Debug)]
pub struct DetectArgs {
    /// File to inspect.
    pub file: PathBuf,
}

/// Parse a `start:end` line range, validating order and positivity.
fn parse_line_range(s: &str) -> Result<(u32, u32), String> {
    let (start, end) = s
        .split_once(':')
        .ok_or_else(|| format!("expected START:END, got '{s}'"))?;
    let start: u32 = start
        .trim()
        .parse()
        .map_err(|_| format!("invalid start line '{start}'"))?;
    let end: u32 = end
        .trim()
        .parse()
        .map_err(|_| format!("invalid end line '{end}'"))?;
    if start == 0 || end == 0 {
        return Err("line numbers are 1-indexed".to_string());
    }
    if start > end {
        return Err(format!("start line {start} is past end line {end}"));
    }
    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_range_parses() {
        assert_eq!(parse_line_range("10:42").unwrap(), (10, 42));
        assert_eq!(parse_line_range("1:1").unwrap(), (1, 1));
        assert_eq!(parse_line_range(" 3 : 7 ").unwrap(), (3, 7));
    }

    #[test]
    fn line_range_rejects_malformed_input() {
        assert!(parse_line_range("10").is_err());
        assert!(parse_line_range("a:b").is_err());
        assert!(parse_line_range("10:").is_err());
    }

    #[test]
    fn line_range_rejects_zero_and_reversed() {
        assert!(parse_line_range("0:5").is_err());
        assert!(parse_line_range("9:3").is_err());
    }

    #[test]
    fn cli_parses_ask_command() {
        let cli = Cli::try_parse_from([
            "kibitz",
            "ask",
            "--file",
            "src/main.rs",
            "--lines",
            "5:20",
            "-m",
            "is this loop correct?",
            "--open-file",
            "src/lib.rs",
            "--open-file",
            "src/util.rs",
        ])
        .unwrap();

        match cli.command {
            Command::Ask(args) => {
                assert_eq!(args.file.as_deref(), Some(std::path::Path::new("src/main.rs")));
                assert_eq!(args.lines, Some((5, 20)));
                assert_eq!(args.message, "is this loop correct?");
                assert_eq!(args.open_files.len(), 2);
            }
            other => panic!("expected ask, got {other:?}"),
        }
    }

    #[test]
    fn cli_parses_detect_command() {
        let cli = Cli::try_parse_from(["kibitz", "detect", "handler.py"]).unwrap();
        match cli.command {
            Command::Detect(args) => {
                assert_eq!(args.file, PathBuf::from("handler.py"));
            }
            other => panic!("expected detect, got {other:?}"),
        }
    }
}
