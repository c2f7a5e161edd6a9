use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use tsgen_core::config::{self, CONFIG_FILE_NAME, TsgenConfig};
use tsgen_core::ir::Api;
use tsgen_core::parse::{self, Document};
use tsgen_core::transform;
use tsgen_core::{CodeGenerator, GeneratedFile};
use tsgen_typescript::{GeneratorConfig, TypescriptGenerator};

#[derive(Parser)]
#[command(name = "tsgen", about = "OpenAPI 3.x to TypeScript client generator", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a TypeScript client from an OpenAPI document
    Generate {
        /// Path to the OpenAPI document (YAML or JSON)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Remove the output directory before writing
        #[arg(short, long)]
        clear: bool,

        /// Directory of templates overriding the built-in ones
        #[arg(short, long)]
        templates: Option<PathBuf>,
    },

    /// Validate an OpenAPI document
    Validate {
        /// Path to the OpenAPI document
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Inspect the IR built from an OpenAPI document
    Inspect {
        /// Path to the OpenAPI document
        #[arg(short, long)]
        input: PathBuf,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,
    },

    /// Initialize a new tsgen configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            input,
            output,
            clear,
            templates,
        } => cmd_generate(input, output, clear, templates),

        Commands::Validate { input } => cmd_validate(input),

        Commands::Inspect { input, format } => cmd_inspect(input, format),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "tsgen", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<Option<TsgenConfig>> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    config::load_config(&config_path).map_err(|e| anyhow::anyhow!(e))
}

fn load_document(path: &Path) -> Result<Document> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("yaml");

    let doc = match ext {
        "json" => parse::from_json(&content),
        "yaml" | "yml" => parse::from_yaml(&content),
        _ => parse::from_str(&content),
    }
    .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(doc)
}

fn load_api(path: &Path) -> Result<Api> {
    let doc = load_document(path)?;
    let api = transform::transform(&doc)
        .with_context(|| format!("failed to transform {}", path.display()))?;
    Ok(api)
}

/// Write generated files to disk under the given base directory.
fn write_files(base: &Path, files: &[GeneratedFile]) -> Result<()> {
    for file in files {
        let path = base.join(&file.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        fs::write(&path, &file.content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        log::debug!("wrote {}", path.display());
    }
    Ok(())
}

fn print_summary(api: &Api) {
    eprintln!("{} {}", api.info.title, api.info.version);
    for endpoint in &api.endpoints {
        eprintln!("  {}", endpoint.name.pascal_case);
        for method in api.endpoint_methods(endpoint) {
            eprintln!("    {}", method.label());
        }
    }
    let names: Vec<&str> = api.models.iter().filter_map(|m| m.name.as_deref()).collect();
    eprintln!("  models: {}", names.join(", "));
}

fn cmd_generate(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    clear: bool,
    templates: Option<PathBuf>,
) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let input = input.unwrap_or_else(|| PathBuf::from(&cfg.input));
    let output_dir = output.unwrap_or_else(|| PathBuf::from(&cfg.output));
    let clear = clear || cfg.clear;
    let templates_dir = templates.or_else(|| cfg.templates_dir());

    let api = load_api(&input)?;
    print_summary(&api);

    let generator_config = GeneratorConfig { templates_dir };
    let files = TypescriptGenerator
        .generate(&api, &generator_config)
        .context("failed to render templates")?;

    if clear && output_dir.exists() {
        fs::remove_dir_all(&output_dir)
            .with_context(|| format!("failed to clear {}", output_dir.display()))?;
        eprintln!("Cleared {}", output_dir.display());
    }
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("failed to create output directory {}", output_dir.display()))?;

    write_files(&output_dir, &files)?;

    eprintln!("Generated {} files in {}", files.len(), output_dir.display());
    Ok(())
}

fn cmd_validate(input: PathBuf) -> Result<()> {
    let doc = load_document(&input)?;
    let spec = doc.spec();

    eprintln!("Valid OpenAPI {} document: {}", spec.openapi, spec.info.title);
    eprintln!("  Version: {}", spec.info.version);
    eprintln!("  Paths: {}", spec.paths.len());

    if let Some(ref components) = spec.components {
        eprintln!("  Schemas: {}", components.schemas.len());
    }

    // Resolution failures only surface while building the IR.
    let api = transform::transform(&doc)?;
    eprintln!("  Endpoints: {}", api.endpoints.len());
    eprintln!("  Methods: {}", api.methods.len());
    eprintln!("  Models: {}", api.models.len());

    eprintln!("Validation successful.");
    Ok(())
}

fn cmd_inspect(input: PathBuf, format: InspectFormat) -> Result<()> {
    let api = load_api(&input)?;
    let summary = build_inspect_summary(&api);

    match format {
        InspectFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&summary)?;
            print!("{}", yaml);
        }
        InspectFormat::Json => {
            let json = serde_json::to_string_pretty(&summary)?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn build_inspect_summary(api: &Api) -> serde_json::Value {
    let models: Vec<serde_json::Value> = api
        .models
        .iter()
        .map(|m| {
            serde_json::json!({
                "name": m.type_name(),
                "kind": m.kind_name(),
                "dependencies": m.dependencies(),
            })
        })
        .collect();

    let methods: Vec<serde_json::Value> = api
        .methods
        .iter()
        .map(|method| {
            serde_json::json!({
                "name": method.name.as_ref().map(|n| &n.camel_case),
                "verb": method.verb.as_str(),
                "path": method.path,
                "tags": method.tags,
                "bodies": method.body_content_types(),
                "returns": method.return_content_types(),
                "deprecated": method.deprecated,
            })
        })
        .collect();

    let endpoints: Vec<serde_json::Value> = api
        .endpoints
        .iter()
        .map(|e| {
            serde_json::json!({
                "name": e.name.original,
                "methods": api.endpoint_methods(e).map(|m| m.label()).collect::<Vec<_>>(),
            })
        })
        .collect();

    serde_json::json!({
        "info": {
            "title": api.info.title,
            "version": api.info.version,
        },
        "endpoints": endpoints,
        "methods": methods,
        "models": models,
    })
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
