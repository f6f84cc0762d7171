//! Slurry CLI
//!
//! Parses tag soup and prints the repaired document as a tree, as a flat
//! event list, or as JSON.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use owo_colors::OwoColorize;
use slurry_common::warning::clear_warnings;
use slurry_dom::NodeId;
use slurry_html::{
    ContentHandler, Event, EventRecorder, HtmlParser, ParseIssue, ParserOptions, TreeBuilder,
};

/// Slurry: a forgiving HTML parser that always produces well-formed output
#[derive(Parser, Debug)]
#[allow(clippy::struct_excessive_bools)]
#[command(name = "slurry")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the repaired tree of a file
    slurry page.html

    # Parse inline HTML and list the events
    slurry --html '<p>one<p>two' --format events

    # Read from stdin, emit JSON
    cat page.html | slurry - --format json
"#)]
struct Cli {
    /// HTML file to parse, or `-` for stdin
    #[arg(value_name = "FILE")]
    path: Option<PathBuf>,

    /// Parse an HTML string instead of a file
    #[arg(long, value_name = "HTML", conflicts_with = "path")]
    html: Option<String>,

    /// What to print
    #[arg(short, long, value_enum, default_value_t = Format::Tree)]
    format: Format,

    /// Report empty namespace URIs and local names
    #[arg(long)]
    no_namespaces: bool,

    /// Drop unknown elements instead of inventing a type for them
    #[arg(long)]
    ignore_bogons: bool,

    /// Give unknown elements an empty content model
    #[arg(long)]
    empty_bogons: bool,

    /// Keep unknown elements out of the document element position
    #[arg(long)]
    no_root_bogons: bool,

    /// Do not add defaulted attributes from the schema
    #[arg(long)]
    no_defaults: bool,

    /// Replace `:` in names with `_`
    #[arg(long)]
    translate_colons: bool,

    /// Do not reopen formatting elements closed early
    #[arg(long)]
    no_restart: bool,

    /// Report whitespace that has nowhere to go
    #[arg(long)]
    ignorable_whitespace: bool,

    /// Parse `script` and `style` content as markup
    #[arg(long)]
    no_cdata: bool,

    /// Print each repair to stderr as it happens
    #[arg(short, long)]
    warnings: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    /// Indented document tree
    Tree,
    /// One line per parser event
    Events,
    /// Events and repairs as JSON
    Json,
}

impl Cli {
    fn options(&self) -> ParserOptions {
        ParserOptions::default()
            .with_namespaces(!self.no_namespaces)
            .with_ignore_bogons(self.ignore_bogons)
            .with_bogons_empty(self.empty_bogons)
            .with_root_bogons(!self.no_root_bogons)
            .with_default_attributes(!self.no_defaults)
            .with_translate_colons(self.translate_colons)
            .with_restart_elements(!self.no_restart)
            .with_ignorable_whitespace(self.ignorable_whitespace)
            .with_cdata_elements(!self.no_cdata)
            .with_report_issues(self.warnings)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut parser = HtmlParser::new().with_options(cli.options());
    clear_warnings();

    match cli.format {
        Format::Tree => {
            let mut builder = TreeBuilder::new();
            let issues = run(&cli, &mut parser, &mut builder)?;
            let tree = builder.into_tree();
            println!("=== Document Tree ===");
            print!("{}", tree.outline(NodeId::ROOT));
            print_issues(&issues);
        }
        Format::Events => {
            let mut recorder = EventRecorder::new();
            let issues = run(&cli, &mut parser, &mut recorder)?;
            println!("=== Events ({}) ===", recorder.events().len());
            for event in recorder.events() {
                println!("{}", describe(event));
            }
            print_issues(&issues);
        }
        Format::Json => {
            let mut recorder = EventRecorder::new();
            let issues = run(&cli, &mut parser, &mut recorder)?;
            let json = serde_json::json!({
                "events": recorder.events(),
                "issues": issues,
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&json).context("failed to serialize events")?
            );
        }
    }

    Ok(())
}

/// Parse the input named on the command line into `handler`.
fn run<H: ContentHandler>(
    cli: &Cli,
    parser: &mut HtmlParser<'_>,
    handler: &mut H,
) -> Result<Vec<ParseIssue>> {
    if let Some(ref html) = cli.html {
        return parser
            .parse_with_issues(html, handler)
            .context("failed to parse --html input");
    }

    let Some(ref path) = cli.path else {
        anyhow::bail!("no input: pass a file path, `-`, or --html");
    };
    if path.as_os_str() == "-" {
        return parser
            .parse_reader(io::stdin().lock(), handler)
            .context("failed to parse stdin");
    }

    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    parser.set_document_ids(None, path.to_str());
    parser
        .parse_reader(BufReader::new(file), handler)
        .with_context(|| {
            let locator = parser.locator();
            format!(
                "failed to parse {} near line {}, column {}",
                path.display(),
                locator.line,
                locator.column
            )
        })
}

/// One event per line, with element boundaries highlighted.
fn describe(event: &Event) -> String {
    match event {
        Event::StartElement { .. } | Event::EndElement { .. } => event.cyan().to_string(),
        Event::Comment { .. } | Event::ProcessingInstruction { .. } | Event::Doctype { .. } => {
            event.dimmed().to_string()
        }
        _ => event.to_string(),
    }
}

fn print_issues(issues: &[ParseIssue]) {
    if issues.is_empty() {
        return;
    }
    println!("\n=== Parse Issues ({}) ===", issues.len());
    for issue in issues {
        println!("  {} {}", format!("[{}]", issue.kind).yellow(), issue.message);
    }
}
