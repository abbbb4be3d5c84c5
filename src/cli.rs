use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use extract::{
    CategoryExtractor, DebugHandler, Fanout, MetadataExtractor, ReaderConfig, TextExtractor,
    TokenHandler, extract_reader_with_config,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use url::Url;

/// Extract readable text, metadata and categories from an HTML page.
#[derive(Debug, Parser)]
#[command(name = "pagescan", version, about, long_about = None)]
pub struct Cli {
    /// HTML file to read; stdin when absent or `-`
    pub file: Option<PathBuf>,

    /// Base URL for resolving relative links and images
    #[arg(long, value_name = "URL")]
    pub base_url: Option<Url>,

    /// What to print
    #[arg(long, value_enum, default_value_t = Mode::All)]
    pub mode: Mode,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Refuse documents larger than this many bytes
    #[arg(long, value_name = "N")]
    pub max_bytes: Option<usize>,

    /// Log every token on the `extract.debug` target
    #[arg(long)]
    pub trace: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Plain text only
    Text,
    /// Metadata fields as JSON
    Metadata,
    /// Article sections and tags as JSON
    Categories,
    /// Everything, as one JSON object
    All,
}

#[derive(Debug, Serialize)]
struct Report {
    text: String,
    metadata: BTreeMap<String, String>,
    categories: BTreeMap<&'static str, Vec<String>>,
}

pub fn run(cli: Cli) -> Result<()> {
    log::debug!(
        target: "pagescan",
        "mode {:?}, base url {:?}",
        cli.mode,
        cli.base_url.as_ref().map(Url::as_str)
    );
    let input = open_input(cli.file.as_deref())?;
    let mut config = ReaderConfig::default();
    if let Some(max_bytes) = cli.max_bytes {
        config.max_bytes = max_bytes;
    }

    let mut text = TextExtractor::new();
    let mut meta = MetadataExtractor::new(cli.base_url.clone());
    let mut categories = CategoryExtractor::new();

    {
        let mut fanout = Fanout::new();
        match cli.mode {
            Mode::Text => fanout.push(&mut text),
            Mode::Metadata => fanout.push(&mut meta),
            Mode::Categories => fanout.push(&mut categories),
            Mode::All => {
                fanout.push(&mut text);
                fanout.push(&mut meta);
                fanout.push(&mut categories);
            }
        }

        let source = describe_input(cli.file.as_deref());
        let mut pipeline: Box<dyn TokenHandler + '_> = if cli.trace {
            Box::new(DebugHandler::new(fanout))
        } else {
            Box::new(fanout)
        };
        extract_reader_with_config(input, config, &mut pipeline)
            .with_context(|| format!("failed to extract from {source}"))?;
    }

    let mut stdout = io::stdout().lock();
    match cli.mode {
        Mode::Text => writeln!(stdout, "{}", text.text())?,
        Mode::Metadata => write_json(&mut stdout, &meta.metadata().to_dict(), cli.pretty)?,
        Mode::Categories => write_json(&mut stdout, &categories.to_dict(), cli.pretty)?,
        Mode::All => {
            let report = Report {
                text: text.into_text(),
                metadata: meta.metadata().to_dict(),
                categories: categories.to_dict(),
            };
            write_json(&mut stdout, &report, cli.pretty)?;
        }
    }
    Ok(())
}

fn open_input(file: Option<&std::path::Path>) -> Result<Box<dyn Read>> {
    match file {
        Some(path) if path.as_os_str() != "-" => {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            Ok(Box::new(file))
        }
        _ => Ok(Box::new(io::stdin().lock())),
    }
}

fn describe_input(file: Option<&std::path::Path>) -> String {
    match file {
        Some(path) if path.as_os_str() != "-" => path.display().to_string(),
        _ => "stdin".to_string(),
    }
}

fn write_json<T: Serialize>(out: &mut impl Write, value: &T, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, value)?;
    } else {
        serde_json::to_writer(&mut *out, value)?;
    }
    writeln!(out)?;
    Ok(())
}
