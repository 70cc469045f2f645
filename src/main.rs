//! clm-highlight - highlight Calmare snippets in the terminal or as HTML

use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use crossterm::tty::IsTty;

use calmare_highlight::config::Config;
use calmare_highlight::error::{HighlightError, Result};
use calmare_highlight::syntax::builtin::{Edition, ALIAS};
use calmare_highlight::syntax::{dump_tree, SyntaxManager};
use calmare_highlight::{html, terminal};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Terminal,
    Html,
    Tree,
}

/// Parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
struct Options {
    format: Format,
    color: Option<bool>,
    edition: Option<Edition>,
    language: String,
    config: Option<PathBuf>,
    file: Option<PathBuf>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            format: Format::Terminal,
            color: None,
            edition: None,
            language: ALIAS.to_string(),
            config: None,
            file: None,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Action {
    Run(Options),
    Help,
    Version,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();

    let options = match parse_args(&args)? {
        Action::Help => {
            print_usage();
            return Ok(());
        }
        Action::Version => {
            print_version();
            return Ok(());
        }
        Action::Run(options) => options,
    };

    let mut config = match &options.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(edition) = options.edition {
        config.edition = edition;
    }

    let manager = SyntaxManager::with_options(&config.grammar_options())?;
    let language = manager.require_language(&options.language)?;

    let text = match &options.file {
        Some(path) => fs::read_to_string(path)?,
        None => io::read_to_string(io::stdin())?,
    };
    let spans = language.classify(&text);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match options.format {
        Format::Html => {
            let inner = html::render(&text, &spans);
            writeln!(out, "{}", html::code_block(&options.language, &inner))?;
        }
        Format::Tree => {
            write!(out, "{}", dump_tree(&text, &spans))?;
        }
        Format::Terminal => {
            let color = options.color.unwrap_or_else(|| io::stdout().is_tty());
            if color {
                let theme = config.theme()?;
                terminal::render(&mut out, &text, &spans, &theme, config.tab_width)?;
            } else {
                terminal::render_plain(&mut out, &text, config.tab_width)?;
            }
        }
    }
    out.flush()?;
    Ok(())
}

fn parse_args(args: &[String]) -> Result<Action> {
    let mut options = Options::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(Action::Help),
            "--version" | "-V" => return Ok(Action::Version),
            "--html" => options.format = Format::Html,
            "--tree" => options.format = Format::Tree,
            "--color" => options.color = Some(true),
            "--no-color" => options.color = Some(false),
            "--edition" | "-e" => {
                let value = required_value(arg, iter.next())?;
                options.edition = Some(Edition::from_name(value)?);
            }
            "--language" | "-l" => {
                options.language = required_value(arg, iter.next())?.to_string();
            }
            "--config" | "-c" => {
                options.config = Some(PathBuf::from(required_value(arg, iter.next())?));
            }
            "-" => options.file = None,
            _ if arg.starts_with('-') => {
                return Err(HighlightError::Message(format!("Unknown option: {}", arg)));
            }
            _ => {
                if options.file.is_some() {
                    return Err(HighlightError::Message(format!("Unexpected argument: {}", arg)));
                }
                options.file = Some(PathBuf::from(arg));
            }
        }
    }

    Ok(Action::Run(options))
}

fn required_value<'a>(flag: &str, value: Option<&'a String>) -> Result<&'a str> {
    value
        .map(|v| v.as_str())
        .ok_or_else(|| HighlightError::Message(format!("{} requires a value", flag)))
}

fn print_usage() {
    println!("clm-highlight {} - Calmare syntax highlighter", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: clm-highlight [OPTIONS] [FILE]");
    println!();
    println!("Reads FILE (or stdin) and prints it highlighted.");
    println!();
    println!("Options:");
    println!("  --html                  Emit highlight.js-compatible HTML");
    println!("  --tree                  Print the classified span tree");
    println!("  --color, --no-color     Force terminal colors on or off");
    println!("  -e, --edition NAME      Grammar edition: canonical, book, guide");
    println!("  -l, --language TAG      Language name or alias (default: clm)");
    println!("  -c, --config PATH       Configuration file (default: ~/.clm-highlight.toml)");
    println!("  -h, --help              Show this help message");
    println!("  -V, --version           Show version information");
}

fn print_version() {
    println!("clm-highlight {}", env!("CARGO_PKG_VERSION"));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_defaults() {
        assert_eq!(parse_args(&[]).unwrap(), Action::Run(Options::default()));
    }

    #[test]
    fn test_parse_options() {
        let action = parse_args(&args(&[
            "--html", "-e", "guide", "--language", "calmare", "-c", "my.toml", "script.clm",
        ]))
        .unwrap();
        assert_eq!(
            action,
            Action::Run(Options {
                format: Format::Html,
                color: None,
                edition: Some(Edition::Guide),
                language: "calmare".to_string(),
                config: Some(PathBuf::from("my.toml")),
                file: Some(PathBuf::from("script.clm")),
            })
        );
    }

    #[test]
    fn test_parse_help_wins() {
        assert_eq!(parse_args(&args(&["--tree", "-h"])).unwrap(), Action::Help);
        assert_eq!(parse_args(&args(&["-V"])).unwrap(), Action::Version);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse_args(&args(&["--edition"])), Err(HighlightError::Message(_))));
        assert!(matches!(
            parse_args(&args(&["--edition", "deluxe"])),
            Err(HighlightError::UnknownEdition(_))
        ));
        assert!(matches!(parse_args(&args(&["--frobnicate"])), Err(HighlightError::Message(_))));
        assert!(matches!(parse_args(&args(&["a.clm", "b.clm"])), Err(HighlightError::Message(_))));
    }
}
