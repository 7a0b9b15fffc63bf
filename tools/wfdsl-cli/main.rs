use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use wfdsl_compiler::{CompileOptions, CompilerError, WorkflowDefinition};

#[derive(Parser)]
#[command(name = "wfdsl")]
#[command(version, about = "Compile wf-dsl workflow definitions to Temporal Go workflows", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a definition to Go source
    Compile {
        /// Path to the definition JSON file
        definition: PathBuf,

        /// Path to a compile options JSON file
        #[arg(short, long)]
        options: Option<PathBuf>,

        /// Write the Go source here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Check a definition without generating code
    Validate {
        /// Path to the definition JSON file
        definition: PathBuf,
    },

    /// Print the view graph of a definition
    ToView {
        /// Path to the definition JSON file
        definition: PathBuf,
    },

    /// Build a definition from a view graph
    FromView {
        /// Path to the view graph JSON file
        view: PathBuf,

        /// Definition (or bare metadata) JSON supplying id, config and globals
        meta: PathBuf,
    },

    /// List the node kinds this compiler knows
    Kinds,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Compile {
            definition,
            options,
            out,
        } => compile(&definition, options.as_deref(), out.as_deref()),
        Commands::Validate { definition } => validate(&definition),
        Commands::ToView { definition } => to_view(&definition),
        Commands::FromView { view, meta } => from_view(&view, &meta),
        Commands::Kinds => kinds(),
    }
}

fn compile(definition: &Path, options: Option<&Path>, out: Option<&Path>) -> Result<()> {
    let options = match options {
        Some(path) => CompileOptions::from_json(&read(path)?)
            .with_context(|| format!("invalid options in {}", path.display()))?,
        None => CompileOptions::default(),
    };

    let output = wfdsl_compiler::compile_json(&read(definition)?, &options)
        .or_else(|errors| report(errors))?;

    for diagnostic in &output.diagnostics {
        eprintln!("warning: {}", diagnostic);
    }

    match out {
        Some(path) => fs::write(path, &output.source)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => print!("{}", output.source),
    }
    Ok(())
}

fn validate(definition: &Path) -> Result<()> {
    let definition = load(definition)?;
    let errors = wfdsl_compiler::check(&definition);
    if !errors.is_empty() {
        return report(errors);
    }
    println!("'{}' is valid", definition.id);
    Ok(())
}

fn to_view(definition: &Path) -> Result<()> {
    let definition = load(definition)?;
    let view = wfdsl_compiler::normalize_to_view(&definition);
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}

fn from_view(view: &Path, meta: &Path) -> Result<()> {
    let view = wfdsl_compiler::parse::parse_view(&read(view)?).or_else(|errors| report(errors))?;
    let meta = wfdsl_compiler::parse::parse_meta(&read(meta)?).or_else(|errors| report(errors))?;
    let definition = wfdsl_compiler::normalize_from_view(&view, &meta);
    println!("{}", serde_json::to_string_pretty(&definition)?);
    Ok(())
}

fn kinds() -> Result<()> {
    for entry in wfdsl_compiler::parse::registry() {
        let role = if entry.compiles_to_activity { "activity" } else { "-" };
        println!(
            "{:<36} {:<28} {:<9} {}",
            entry.type_key,
            entry.display_name,
            format!("{:?}", entry.category).to_lowercase(),
            role
        );
    }
    Ok(())
}

fn load(path: &Path) -> Result<WorkflowDefinition> {
    wfdsl_compiler::parse::parse(&read(path)?).or_else(|errors| report(errors))
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn report<T>(errors: Vec<CompilerError>) -> Result<T> {
    for error in &errors {
        eprintln!("error: {}", error);
    }
    bail!("{} error(s)", errors.len())
}
