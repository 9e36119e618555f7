//! arbor CLI
//!
//! Parses an HTML document and prints the resulting tree as an outline,
//! as re-serialized markup, or as JSON.

mod json;

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use arbor_dom::DomTree;
use arbor_html::{OutlinePart, ParseError, format_tree, write_outline};
use clap::{Parser, ValueEnum};
use log::LevelFilter;
use owo_colors::OwoColorize;
use simple_logger::SimpleLogger;

/// Output format for the parsed tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Indented outline, one node per line
    Tree,
    /// Markup serialized back from the tree
    Html,
    /// Nested JSON objects
    Json,
}

/// arbor: parse HTML into a DOM tree and print it
#[derive(Parser, Debug)]
#[command(name = "arbor")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the DOM outline of a file
    arbor ./index.html

    # Parse inline HTML and print it back as markup
    arbor --html '<p>one<p>two' --format html

    # Dump JSON from standard input
    cat page.html | arbor - --format json

    # Fail on the first tolerated parse error, with parser logging
    arbor --strict --debug ./index.html
"#)]
struct Cli {
    /// Path to an HTML file, or `-` for standard input
    #[arg(value_name = "FILE", conflicts_with = "html")]
    path: Option<PathBuf>,

    /// Parse HTML string directly instead of a file
    #[arg(long, value_name = "HTML")]
    html: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Tree)]
    format: Format,

    /// Treat tolerated parse errors as fatal
    #[arg(long)]
    strict: bool,

    /// Print tolerated parse errors to stderr
    #[arg(long)]
    issues: bool,

    /// Log insertion-mode changes and parse errors
    #[arg(short, long)]
    debug: bool,

    /// Log every tokenizer step (implies --debug)
    #[arg(long)]
    trace: bool,

    /// Disable colored outline output
    #[arg(long)]
    no_color: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.trace {
        LevelFilter::Trace
    } else if cli.debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    SimpleLogger::new()
        .with_level(level)
        .init()
        .context("failed to install logger")?;

    let tree = load_tree(&cli)?;

    let mut out = io::stdout().lock();
    match cli.format {
        Format::Tree => {
            let color = !cli.no_color;
            write_outline(&mut out, &tree, tree.root(), |part, text| paint(text, part, color))?;
        }
        Format::Html => writeln!(out, "{}", tree.serialize(tree.root()))?,
        Format::Json => {
            json::write_json(&mut out, &tree, tree.root())?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Parse the document named by the CLI arguments.
fn load_tree(cli: &Cli) -> Result<DomTree> {
    if let Some(ref html) = cli.html {
        return parse(arbor_html::Parser::from_string(html.as_str()), cli);
    }
    match cli.path {
        Some(ref path) if path.as_os_str() == "-" => {
            parse(arbor_html::Parser::new(io::stdin().lock()), cli)
        }
        Some(ref path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            parse(arbor_html::Parser::new(BufReader::new(file)), cli)
        }
        None => anyhow::bail!("a file path, `-` or --html is required"),
    }
}

fn parse<R: BufRead>(parser: arbor_html::Parser<R>, cli: &Cli) -> Result<DomTree> {
    let mut parser = if cli.strict {
        parser.with_strict_mode()
    } else {
        parser
    };
    let result = parser.parse();

    if cli.issues {
        for issue in parser.issues() {
            eprintln!("parse error at character {}: {}", issue.position, issue.message);
        }
    }

    if let Err(err) = result {
        if matches!(err, ParseError::MismatchedEndTag { .. })
            && let Some(tree) = parser.tree()
        {
            log::debug!("tree at failure:\n{}", format_tree(tree, tree.root()));
        }
        return Err(err).context("failed to parse document");
    }

    parser.into_tree().context("parser produced no tree")
}

/// Highlight one part of an outline line.
fn paint(text: &str, part: OutlinePart, color: bool) -> String {
    if !color {
        return text.to_string();
    }
    match part {
        OutlinePart::Tag => text.cyan().to_string(),
        OutlinePart::AttrName => text.yellow().to_string(),
        OutlinePart::AttrValue => text.green().to_string(),
        OutlinePart::Comment => text.dimmed().to_string(),
        OutlinePart::Doctype => text.magenta().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paint_without_color_is_plain() {
        assert_eq!(paint("div", OutlinePart::Tag, false), "div");
    }

    #[test]
    fn test_paint_with_color_wraps_text() {
        let painted = paint("div", OutlinePart::Tag, true);
        assert_ne!(painted, "div");
        assert!(painted.contains("div"));
    }

    #[test]
    fn test_cli_rejects_path_with_html() {
        let result = Cli::try_parse_from(["arbor", "page.html", "--html", "<p>"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_format_values() {
        let cli = Cli::try_parse_from(["arbor", "--html", "<p>", "-f", "json"]).unwrap();
        assert_eq!(cli.format, Format::Json);
        let cli = Cli::try_parse_from(["arbor", "x.html"]).unwrap();
        assert_eq!(cli.format, Format::Tree);
    }
}
