//! # cfm-cli
//!
//! Command-line interface for mapping XML renditions onto content
//! fragment templates and for running the processing step on files.

use anyhow::{Context, bail};
use cfm_adapter_xml::XmlParser;
use cfm_mapping::{CoercionPolicy, FieldMapper, humanize};
use cfm_template::TemplateLoader;
use cfm_workflow::{
    FsAssetStore, FsFragmentStore, ProcessOutcome, ProcessingConfig, WorkItem, XmlProcessingStep,
};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cfm")]
#[command(about = "Content fragment mapper CLI")]
#[command(version)]
struct Cli {
    /// Path to the processing configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Map an XML file onto a template's fields and print the result as JSON
    Map {
        /// Input XML file path
        input: PathBuf,

        /// Template file path (YAML or JSON)
        #[arg(short, long)]
        template: PathBuf,

        /// Write the mapping to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip fields whose text does not match their type instead of failing
        #[arg(long)]
        lenient: bool,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Run the processing step for a payload path (requires --config)
    Process {
        /// Payload path of the asset (or one of its renditions)
        payload: String,

        /// Directory payload paths are resolved against
        #[arg(long)]
        assets_root: Option<PathBuf>,

        /// Directory fragments are written below (default: next to the asset)
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Print the human-readable label for an identifier
    Humanize {
        /// Identifier such as "redSofaBed"
        identifier: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Map {
            input,
            template,
            output,
            lenient,
            pretty,
        } => {
            tracing::info!("Mapping {} with template {}", input.display(), template.display());

            let template = TemplateLoader::default()
                .load_from_file(&template)
                .with_context(|| format!("failed to load template {}", template.display()))?;

            let bytes = tokio::fs::read(&input)
                .await
                .with_context(|| format!("failed to read {}", input.display()))?;
            let document = XmlParser::new(input.to_string_lossy())
                .parse_bytes(&bytes)
                .with_context(|| format!("failed to parse {}", input.display()))?;

            let policy = if lenient {
                CoercionPolicy::Lenient
            } else {
                CoercionPolicy::Strict
            };
            let report = FieldMapper::with_policy(policy).map_with_report(&document, &template.fields)?;
            for field in &report.skipped {
                tracing::debug!("No data for field '{}'", field);
            }
            for rejected in &report.rejected {
                tracing::warn!(
                    "Skipped field '{}': '{}' is not a valid {}",
                    rejected.field,
                    rejected.value,
                    rejected.expected
                );
            }

            let json = to_json(&report.mapping, pretty)?;
            match output {
                Some(path) => {
                    tokio::fs::write(&path, json)
                        .await
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    tracing::info!("Wrote {} fields to {}", report.mapping.len(), path.display());
                }
                None => println!("{json}"),
            }
        }
        Commands::Process {
            payload,
            assets_root,
            output_dir,
            pretty,
        } => {
            let Some(config_path) = cli.config else {
                bail!("the process command requires --config");
            };
            let config = ProcessingConfig::from_file(&config_path)
                .with_context(|| format!("failed to load config {}", config_path.display()))?;
            let loader = TemplateLoader::new(config.template_search_paths.clone());

            let assets = match assets_root {
                Some(root) => FsAssetStore::with_root(root),
                None => FsAssetStore::new(),
            };
            let fragments = match output_dir {
                Some(root) => FsFragmentStore::with_root(root),
                None => FsFragmentStore::new(),
            };

            let step = XmlProcessingStep::activate(config, &loader, assets, fragments)?;
            let outcome = step.execute(&WorkItem::for_path(payload))?;

            if let ProcessOutcome::Skipped { reason } = &outcome {
                tracing::warn!("Work item skipped: {:?}", reason);
            }
            println!("{}", to_json(&outcome, pretty)?);
        }
        Commands::Humanize { identifier } => {
            println!("{}", humanize(&identifier)?);
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}
