//! Minimal CLI: sample → infer → (schema | tree)
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use crate::aggregate::infer_from_source;
use crate::config::InferConfig;
use crate::ir::{StructType, StructuralType};
use crate::source::FileSource;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// infer one structural schema from a sample of JSON / NDJSON documents
#[derive(Parser, Debug)]
#[command(name = "docschema", version)]
pub struct CommandLineInterface {
    /// log progress (same as RUST_LOG=debug)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// infer and print the JSON schema form
    Schema(SchemaOut),
    /// infer and print the indented tree form
    Tree(TreeOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// treat input as newline-delimited JSON (NDJSON)
    #[arg(long, default_value_t = false)]
    ndjson: bool,

    /// JSON Pointer to select the document(s) in each value (e.g. /data/items)
    #[arg(long)]
    json_pointer: Option<String>,

    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(Args, Debug, Clone)]
struct InferSettings {
    /// JSON config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// number of documents to sample
    #[arg(long)]
    sample_size: Option<usize>,

    /// seed for reproducible sampling
    #[arg(long)]
    seed: Option<u64>,

    /// aggregation worker threads
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(clap::Parser, Debug)]
struct SchemaOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    infer_settings: InferSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(clap::Parser, Debug)]
struct TreeOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    infer_settings: InferSettings,

    /// do not highlight conflicting types
    #[arg(long)]
    no_color: bool,

    /// output text file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn source(&self) -> anyhow::Result<FileSource> {
        let source = FileSource::from_patterns(&self.input)
            .context("failed to resolve input file paths")?
            .with_ndjson(self.ndjson)
            .with_json_pointer(self.json_pointer.clone());
        Ok(source)
    }
}

impl InferSettings {
    fn config(&self) -> anyhow::Result<InferConfig> {
        let mut config = match &self.config {
            Some(path) => InferConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => InferConfig::default(),
        };
        if let Some(n) = self.sample_size {
            config = config.with_sample_size(n);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(threads) = self.threads {
            config = config.with_threads(threads);
        }
        config.validate()?;
        Ok(config)
    }
}

fn infer(input: &InputSettings, settings: &InferSettings) -> anyhow::Result<StructType> {
    let source = input.source()?;
    let config = settings.config()?;
    tracing::info!(
        files = source.paths().len(),
        sample_size = config.sample_size,
        "inferring schema"
    );
    let schema = infer_from_source(&source, &config).context("schema inference failed")?;
    let conflicts = schema
        .fields()
        .iter()
        .filter(|f| f.data_type.has_conflict())
        .map(|f| f.name.as_str())
        .collect::<Vec<_>>();
    if !conflicts.is_empty() {
        tracing::warn!(fields = ?conflicts, "fields with conflicting types");
    }
    Ok(schema)
}

fn write_output(out: Option<&PathBuf>, text: &str) -> anyhow::Result<()> {
    match out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            std::fs::write(out, text)
                .with_context(|| format!("failed to write {}", out.display()))?;
        }
        None => println!("{text}"),
    }
    Ok(())
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> anyhow::Result<()> {
        match &self.cmd {
            Command::Schema(target) => {
                let schema = infer(&target.input_settings, &target.infer_settings)?;
                let schema_src = serde_json::to_string_pretty(&schema.to_json())?;
                write_output(target.out.as_ref(), &schema_src)
            }
            Command::Tree(target) => {
                let schema = infer(&target.input_settings, &target.infer_settings)?;
                // files never get escape codes
                let highlight = !target.no_color && target.out.is_none();
                let tree = schema.tree_string_with(|ty| label(ty, highlight));
                write_output(target.out.as_ref(), tree.trim_end())
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn label(ty: &StructuralType, highlight: bool) -> String {
    let name = ty.type_name();
    if highlight && matches!(ty, StructuralType::Conflict) {
        name.red().bold().to_string()
    } else {
        name.to_string()
    }
}
