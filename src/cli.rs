//! Minimal CLI: load → infer → (rust | schema)
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use crate::codegen::{self, EmitOptions};
use crate::inference::{self, InferOptions, Inferred};
use crate::loader::{LoadSettings, Source};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// infer struct declarations from a sample JSON document (file, URL or '-' for stdin)
#[derive(Parser, Debug)]
#[command(name = "json-structgen", version)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// infer and emit serde-annotated Rust structs
    Rust(RustOut),
    /// infer and print the schema table as JSON (debug view)
    Schema(SchemaOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// file path, http(s) URL, or '-' for stdin
    source: String,

    /// JSON Pointer to select a subnode before inference (e.g. /data/items)
    #[arg(long)]
    json_pointer: Option<String>,

    /// name of the top-level type (defaults to a RenameMe placeholder)
    #[arg(long)]
    root_type: Option<String>,

    /// emit i64 for integral numbers instead of f64
    #[arg(long, default_value_t = false)]
    integers: bool,
}

#[derive(clap::Parser, Debug)]
struct RustOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// start the output with the serde `use` line
    #[arg(long, default_value_t = false)]
    prelude: bool,

    /// output .rs file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(clap::Parser, Debug)]
struct SchemaOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load_infer(&self) -> Result<Inferred> {
        let load = LoadSettings {
            source: Source::parse(&self.source),
            json_pointer: self.json_pointer.clone(),
        };
        let value = load.load()?;
        let options = InferOptions {
            root_type: self.root_type.clone(),
            integers: self.integers,
        };
        let inferred = inference::infer(&value, options)
            .with_context(|| format!("cannot infer a schema from {}", load.source))?;
        if !inferred.diagnostics.is_empty() {
            log::info!("{} value(s) could not be typed exactly", inferred.diagnostics.len());
        }
        Ok(inferred)
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Rust(target) => {
                let inferred = target.input_settings.load_infer()?;
                let options = EmitOptions { prelude: target.prelude };
                let rust_src = codegen::render(&inferred.table, options);
                write_output(target.out.as_deref(), &rust_src)
            }
            Command::Schema(target) => {
                let inferred = target.input_settings.load_infer()?;
                let schema_src = serde_json::to_string_pretty(&inferred.table)?;
                write_output(target.out.as_deref(), &format!("{schema_src}\n"))
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn write_output(out: Option<&Path>, src: &str) -> Result<()> {
    let Some(out) = out else {
        print!("{src}");
        return Ok(());
    };
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(out, src).with_context(|| format!("failed to write {}", out.display()))?;
    log::info!("wrote {}", out.display());
    Ok(())
}
