//! CLI entry point for the genealogical search system.
//!
//! Loads records from a JSON export, builds the search engine and answers
//! search, statistics and family lookups from the command line.

use anyhow::Context;
use clap::{
    Parser, Subcommand,
    builder::styling::{AnsiColor, Effects, Styles},
};
use lineage::display::{THEME, create_family_table, create_results_table, create_stats_table};
use lineage::io::{ExitCode, JsonResponse, OutputFormat, ResponseMeta, parse_filters};
use lineage::{JsonFileStore, LineageError, SearchEngine, SearchQuery, Settings};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn clap_cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

/// Genealogical record search
#[derive(Parser)]
#[command(
    name = "lineage",
    version = env!("CARGO_PKG_VERSION"),
    about = "Search family records by field or by description",
    long_about = "Search person records with exact field filters, falling back to \
                  TF-IDF similarity over names and descriptions when nothing matches exactly.",
    next_line_help = true,
    styles = clap_cargo_style()
)]
struct Cli {
    /// Path to custom settings.toml file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// JSON file with person records (overrides data_path)
    #[arg(short, long, global = true, env = "LINEAGE_DATA")]
    data: Option<PathBuf>,

    /// Show detailed loading information
    #[arg(long, global = true)]
    info: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
enum Commands {
    /// Initialize project
    #[command(about = "Set up .lineage directory with default configuration")]
    Init {
        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Show configuration
    #[command(about = "Display active settings from .lineage/settings.toml")]
    Config,

    /// Search records
    #[command(
        about = "Search records by field filters",
        after_help = "Examples:\n  lineage search -f personId=P1\n  lineage search -f name=ram -f familyId=F1\n  lineage search -f nature=\"kind and gentle\" --json\n  lineage search --query '{\"generation\": 3}'\n\nWith no filters every record is returned."
    )]
    Search {
        /// Field filter in key=value form, repeatable
        #[arg(short, long = "filter", value_name = "KEY=VALUE")]
        filters: Vec<String>,

        /// Filters as a JSON object, applied after --filter values
        #[arg(short, long)]
        query: Option<String>,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Record statistics
    #[command(about = "Show member counts per family")]
    Stats {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Immediate family lookup
    #[command(about = "Show a person with their spouse and children")]
    Family {
        /// Person identifier
        person_id: String,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
}

impl Commands {
    /// Format requested by the command; failures are reported the same way
    fn output_format(&self) -> OutputFormat {
        match self {
            Commands::Search { json, .. }
            | Commands::Stats { json }
            | Commands::Family { json, .. } => OutputFormat::from_json_flag(*json),
            Commands::Init { .. } | Commands::Config => OutputFormat::Text,
        }
    }
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    if cli.info && !matches!(cli.command, Commands::Init { .. }) {
        if let Err(warning) = Settings::check_init() {
            eprintln!("Warning: {warning}");
            eprintln!("Using default configuration for now.");
        }
    }

    let config = if let Some(config_path) = &cli.config {
        match Settings::load_from(config_path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!(
                    "Configuration error loading from {}: {e}",
                    config_path.display()
                );
                return ExitCode::ConfigError.into();
            }
        }
    } else {
        Settings::load().unwrap_or_else(|e| {
            eprintln!("Configuration error: {e}");
            Settings::default()
        })
    };

    init_tracing(&config, cli.info);

    let format = cli.command.output_format();
    match run(&cli, config) {
        Ok(code) => code.into(),
        Err(e) if format.is_json() => {
            let response = JsonResponse::from_report(&e);
            match serde_json::to_string_pretty(&response) {
                Ok(json) => println!("{json}"),
                Err(err) => eprintln!("Failed to serialize error response: {err}"),
            }
            std::process::ExitCode::from(response.exit_code)
        }
        Err(e) => {
            match e.downcast_ref::<LineageError>() {
                Some(error) => {
                    eprintln!("{}", THEME.error_with_icon(&error.to_string()));
                    for suggestion in error.recovery_suggestions() {
                        eprintln!("  {suggestion}");
                    }
                    ExitCode::from_error(error).into()
                }
                None => {
                    eprintln!("{}", THEME.error_with_icon(&format!("{e:#}")));
                    ExitCode::GeneralError.into()
                }
            }
        }
    }
}

fn init_tracing(config: &Settings, info: bool) {
    let default_level = if config.debug {
        "debug"
    } else if info {
        "info"
    } else {
        config.logging.level.as_str()
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if config.logging.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn run(cli: &Cli, config: Settings) -> anyhow::Result<ExitCode> {
    match &cli.command {
        Commands::Init { force } => {
            let path = Settings::init_config_file(*force)
                .map_err(|e| anyhow::anyhow!("{e}"))?;
            println!("Edit {} to customize your settings.", path.display());
            Ok(ExitCode::Success)
        }

        Commands::Config => {
            println!("Current Configuration:");
            println!("{}", "=".repeat(50));
            let toml_str =
                toml::to_string_pretty(&config).context("Error displaying config")?;
            println!("{toml_str}");
            Ok(ExitCode::Success)
        }

        Commands::Search {
            filters,
            query,
            json,
        } => {
            let mut search_query = parse_filters(filters).map_err(anyhow::Error::msg)?;
            if let Some(raw) = query {
                let extra: SearchQuery =
                    serde_json::from_str(raw).context("--query must be a JSON object")?;
                for (name, value) in extra.fields() {
                    search_query.push(name, value.clone());
                }
            }

            let engine = open_engine(cli, &config)?;
            let start = Instant::now();
            let outcome = engine.search(&search_query);
            let elapsed = start.elapsed();
            let exit_code = ExitCode::from_outcome(&outcome);

            match OutputFormat::from_json_flag(*json) {
                OutputFormat::Json => {
                    let meta = ResponseMeta::new()
                        .with_stage(outcome.kind().as_str())
                        .with_elapsed(elapsed);
                    let count = outcome.len();
                    let mut response = JsonResponse::success(outcome.into_hits())
                        .with_message(format!("Found {count} records"))
                        .with_meta(meta);
                    response.exit_code = exit_code as u8;
                    println!("{}", serde_json::to_string_pretty(&response)?);
                }
                OutputFormat::Text => {
                    if outcome.is_empty() {
                        eprintln!("{}", THEME.warning_with_icon("No records matched"));
                    } else {
                        println!("{}", create_results_table(outcome.hits()));
                        println!("{}", THEME.outcome_summary(outcome.kind().as_str(), outcome.len()));
                    }
                }
            }
            Ok(exit_code)
        }

        Commands::Stats { json } => {
            let engine = open_engine(cli, &config)?;
            let stats = engine.stats();
            if *json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&JsonResponse::success(&stats))?
                );
            } else {
                println!("{}", create_stats_table(&stats));
            }
            Ok(ExitCode::Success)
        }

        Commands::Family { person_id, json } => {
            let engine = open_engine(cli, &config)?;
            let family = engine.immediate_family(person_id);
            let exit_code = ExitCode::from_lookup(&family);

            match (family, *json) {
                (Some(family), true) => {
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&JsonResponse::success(&family))?
                    );
                }
                (Some(family), false) => {
                    println!("{}", create_family_table(&family));
                    println!(
                        "Immediate family size: {}",
                        THEME.apply(&THEME.number, family.size())
                    );
                }
                (None, true) => {
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&JsonResponse::not_found("Person", person_id))?
                    );
                }
                (None, false) => {
                    eprintln!(
                        "{}",
                        THEME.warning_with_icon(&format!("Person '{person_id}' not found"))
                    );
                }
            }
            Ok(exit_code)
        }
    }
}

fn open_engine(cli: &Cli, config: &Settings) -> anyhow::Result<SearchEngine<JsonFileStore>> {
    let data_path = cli
        .data
        .clone()
        .unwrap_or_else(|| config.resolved_data_path());
    let start = Instant::now();
    let engine = SearchEngine::new(JsonFileStore::new(&data_path), config.search.clone())?;

    if cli.info {
        eprintln!(
            "Loaded {} records from {} in {:?}",
            engine.state().snapshot().len(),
            THEME.apply(&THEME.path, data_path.display()),
            start.elapsed()
        );
    }
    Ok(engine)
}
