//! WLZ CLI - Command-line interface
//!
//! Usage:
//!   wlz build <files>... [--output <dir>]
//!   wlz show <files>... [--no-color]
//!   wlz explain <label>
//!
//! Every input file holds the dependency parse of one text (CoNLL-U or
//! spaCy JSON) and becomes one document, numbered in argument order.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use wlz_core::{AppConfig, LoggingConfig};
use wlz_parser::{AnnotationFormat, PreparsedProvider};
use wlz_zone::{emit, DependencyGlossary, LabelGlossary, LinkageZone, ZoneDisplay};

#[derive(Parser)]
#[command(name = "wlz")]
#[command(about = "Word-linkage zone builder for dependency-parsed corpora")]
#[command(version)]
struct Cli {
    /// TOML configuration file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Language code of the corpus (overrides config)
    #[arg(long, short, global = true)]
    language: Option<String>,

    /// Relation label marking sentence roots (overrides config)
    #[arg(long, global = true)]
    root_label: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build words.txt and relations.txt from parsed documents
    Build {
        /// Parsed documents, one per text
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Input format (detected from the first file extension if omitted)
        #[arg(long, short)]
        format: Option<AnnotationFormat>,

        /// Output directory (overrides config)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Print relations as aligned `head - relation -> dependent` rows
    Show {
        /// Parsed documents, one per text
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Input format (detected from the first file extension if omitted)
        #[arg(long, short)]
        format: Option<AnnotationFormat>,

        /// Disable colors
        #[arg(long)]
        no_color: bool,
    },
    /// Explain a dependency relation label
    Explain {
        /// Label such as `nsubj`
        label: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::from_file(path)?.with_env_override()?,
        None => AppConfig::from_env()?,
    };
    if let Some(language) = cli.language {
        config.language.code = language;
    }
    if let Some(root_label) = cli.root_label {
        config.language.root_label = root_label;
    }

    init_tracing(&config.logging);

    let glossary = DependencyGlossary::new().with_overrides(config.glossary.overrides.clone());

    match cli.command {
        Commands::Build {
            inputs,
            format,
            output,
        } => {
            if let Some(dir) = output {
                config.output.dir = dir;
            }
            let zone = build_zone(&config, &inputs, format)?;
            let files = emit(&zone, &glossary, &config.output)?;

            println!("Words:     {}", files.words.display());
            println!("Relations: {}", files.relations.display());
            println!("{}", zone.stats());
            println!("Coverage:  {}", coverage_line(&zone));
        }
        Commands::Show {
            inputs,
            format,
            no_color,
        } => {
            let zone = build_zone(&config, &inputs, format)?;
            let display =
                ZoneDisplay::new(&zone, &glossary).with_color(config.display.color && !no_color);
            print!("{display}");
        }
        Commands::Explain { label } => match glossary.explain(&label) {
            Some(gloss) => println!("{label}: {gloss}"),
            None => println!("{label}: no explanation available"),
        },
    }

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.level.as_str()));

    if logging.json_format {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn build_zone(
    config: &AppConfig,
    inputs: &[PathBuf],
    format: Option<AnnotationFormat>,
) -> anyhow::Result<LinkageZone> {
    let format = resolve_format(inputs, format)?;
    let provider = PreparsedProvider::new(format);

    let mut zone = LinkageZone::for_language(&config.language.code, &provider)?
        .with_root_label(config.language.root_label.as_str());

    let corpus = read_corpus(inputs)?;
    zone.process(corpus.as_slice())?;

    if !zone.stats().is_clean() {
        tracing::warn!(
            dropped = zone.stats().dangling_heads,
            "Some relations pointed outside their sentence and were dropped"
        );
    }
    Ok(zone)
}

fn coverage_line(zone: &LinkageZone) -> String {
    format!(
        "{:.1}% of non-root words linked",
        zone.stats().relation_coverage() * 100.0
    )
}

fn resolve_format(
    inputs: &[PathBuf],
    format: Option<AnnotationFormat>,
) -> anyhow::Result<AnnotationFormat> {
    if let Some(format) = format {
        return Ok(format);
    }
    match inputs.first().and_then(|p| AnnotationFormat::from_path(p)) {
        Some(format) => Ok(format),
        None => bail!("Cannot detect the input format, pass --format conllu|spacy-json"),
    }
}

fn read_corpus(inputs: &[PathBuf]) -> anyhow::Result<Vec<String>> {
    inputs
        .iter()
        .map(|path| read_text(path))
        .collect()
}

fn read_text(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
