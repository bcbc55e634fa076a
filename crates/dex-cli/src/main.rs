//! CLI entry point for the pokedex toolkit.
//!
//! This binary looks Pokemon up on the PokeAPI and prints their defensive
//! type matchups, detail records and listings.
//!
//! # Usage
//!
//! ```bash
//! pokedex [OPTIONS] <COMMAND>
//!
//! # Weaknesses, resistances and immunities
//! pokedex defenses charizard
//!
//! # Full detail record as JSON
//! pokedex --format json detail 1
//!
//! # Electric-type Pokemon whose name contains "chu"
//! pokedex list --type electric --search chu
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

use std::io::{self, Write};

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand, ValueEnum};
use dex_api::{
    ApiError, CachedProvider, PokeApiClient, PokemonDefenses, PokemonQuery, TypeDataProvider, fetch_pokemon_defenses,
    fetch_pokemon_detail, find_pokemon, list_types,
};
use dex_core::{
    Config, DefenseCategory, EffectivenessResult, FetchPolicy, PokemonDetail, PokemonListItem,
    TypeRef, type_badge_url,
};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// CLI ARGUMENT TYPES
// =============================================================================

/// Look up Pokemon and their defensive type matchups on the PokeAPI.
#[derive(Parser)]
#[command(name = "pokedex", version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    command: Commands,

    /// Path to a JSON configuration file.
    #[arg(short, long, global = true, env = "POKEDEX_CONFIG")]
    config: Option<Utf8PathBuf>,

    /// Base URL of the API (overrides the configuration file).
    #[arg(long, global = true, env = "POKEDEX_BASE_URL")]
    base_url: Option<String>,

    /// Output format.
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Show which attacking types a Pokemon is weak, resistant or immune to.
    Defenses {
        /// Pokemon name or dex number.
        pokemon: String,

        /// Compute from whichever type lookups succeed instead of failing.
        #[arg(long)]
        best_effort: bool,
    },

    /// Show the full detail record of a Pokemon.
    Detail {
        /// Pokemon name or dex number.
        pokemon: String,

        /// Compute defenses from whichever type lookups succeed.
        #[arg(long)]
        best_effort: bool,
    },

    /// List Pokemon, optionally filtered.
    List {
        /// Keep only entries whose name or number contains this text.
        #[arg(short, long)]
        search: Option<String>,

        /// Keep only Pokemon of this type.
        #[arg(short = 't', long = "type")]
        type_name: Option<String>,

        /// Maximum number of entries to print.
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// List every damage type.
    Types,

    /// Print the effective configuration.
    Config,
}

/// Command output format.
#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Human-readable text.
    Text,
    /// Pretty-printed JSON.
    Json,
}

// =============================================================================
// INITIALIZATION FUNCTIONS
// =============================================================================

/// Initializes the tracing subscriber for logging.
///
/// Respects the `RUST_LOG` environment variable if set. Otherwise, uses
/// `debug` level if `--verbose` is set, or `info` level by default.
/// The HTTP stack is filtered to `warn` level. Logs go to stderr.
fn init_tracing(verbose: bool, no_color: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { "info" };
        EnvFilter::new(format!("{level},hyper=warn,reqwest=warn,rustls=warn"))
    });

    // Check if colors should be disabled (flag or NO_COLOR env var)
    let use_ansi = !no_color && std::env::var("NO_COLOR").is_err();

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(use_ansi)
                .with_writer(io::stderr),
        )
        .with(filter)
        .init();
}

/// Builds a [`Config`] from the optional config file and CLI overrides.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded or the result is invalid.
fn build_config(cli: &Cli) -> color_eyre::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    if let Some(base_url) = &cli.base_url {
        config.api.base_url.clone_from(base_url);
    }

    config.validate()?;
    Ok(config)
}

/// Returns the relation provider to use, cached unless disabled.
fn type_provider(client: &PokeApiClient, config: &Config) -> Box<dyn TypeDataProvider> {
    if config.defenses.cache {
        Box::new(CachedProvider::new(client.clone()))
    } else {
        Box::new(client.clone())
    }
}

/// Resolves the fetch policy from the flag and the configuration.
fn fetch_policy(best_effort: bool, config: &Config) -> FetchPolicy {
    if best_effort {
        FetchPolicy::BestEffort
    } else {
        config.defenses.policy
    }
}

/// Appended to the message of failures that may go away on a second try.
const RETRY_HINT: &str = " The failure looks temporary; running the command again may work.";

/// The message shown to the user for `err`.
fn failure_message(err: &ApiError) -> String {
    let mut message = err.user_message();
    if err.is_retryable() {
        message.push_str(RETRY_HINT);
    }
    message
}

/// Puts the user-facing message on top of the underlying error.
fn user_facing(err: ApiError) -> color_eyre::Report {
    if let Some(url) = err.url() {
        debug!(url, "request failed");
    }
    let message = failure_message(&err);
    color_eyre::Report::new(err).wrap_err(message)
}

/// Creates a token that is cancelled on Ctrl-C.
fn cancel_on_ctrl_c() -> CancellationToken {
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received Ctrl-C, cancelling");
            trigger.cancel();
        }
    });
    cancel
}

// =============================================================================
// COMMAND IMPLEMENTATIONS
// =============================================================================

/// Fetches and prints the defenses of one Pokemon.
async fn run_defenses(
    config: &Config,
    pokemon: &str,
    best_effort: bool,
    format: OutputFormat,
) -> color_eyre::Result<()> {
    let policy = fetch_policy(best_effort, config);
    info!(pokemon, policy = policy.label(), "Fetching defenses");

    let client = PokeApiClient::from_config(config)?;
    let provider = type_provider(&client, config);
    let cancel = cancel_on_ctrl_c();

    let defenses = fetch_pokemon_defenses(&client, provider.as_ref(), pokemon, policy, &cancel)
        .await
        .map_err(user_facing)?;

    let mut out = io::stdout().lock();
    match format {
        OutputFormat::Text => render_defenses(&mut out, &defenses)?,
        OutputFormat::Json => write_json(&mut out, &defenses)?,
    }
    Ok(())
}

/// Fetches and prints the detail record of one Pokemon.
async fn run_detail(
    config: &Config,
    pokemon: &str,
    best_effort: bool,
    format: OutputFormat,
) -> color_eyre::Result<()> {
    let policy = fetch_policy(best_effort, config);
    info!(pokemon, policy = policy.label(), "Fetching detail");

    let client = PokeApiClient::from_config(config)?;
    let provider = type_provider(&client, config);
    let cancel = cancel_on_ctrl_c();

    let detail = fetch_pokemon_detail(
        &client,
        provider.as_ref(),
        pokemon,
        &config.sprites,
        policy,
        &cancel,
    )
    .await
    .map_err(user_facing)?;

    let mut out = io::stdout().lock();
    match format {
        OutputFormat::Text => render_detail(&mut out, &detail)?,
        OutputFormat::Json => write_json(&mut out, &detail)?,
    }
    Ok(())
}

/// Lists Pokemon, filtered by type and search text.
async fn run_list(
    config: &Config,
    search: Option<&str>,
    type_name: Option<&str>,
    limit: Option<usize>,
    format: OutputFormat,
) -> color_eyre::Result<()> {
    info!(search, type_name, "Listing Pokemon");

    let client = PokeApiClient::from_config(config)?;
    let cancel = cancel_on_ctrl_c();
    let query = PokemonQuery {
        type_name,
        search: search.unwrap_or_default(),
        limit,
    };

    let matches = find_pokemon(&client, &query, config, &cancel)
        .await
        .map_err(user_facing)?;
    if matches.is_empty() {
        warn!("No Pokemon matched");
    }

    let mut out = io::stdout().lock();
    match format {
        OutputFormat::Text => render_list(&mut out, &matches)?,
        OutputFormat::Json => write_json(&mut out, &matches)?,
    }
    Ok(())
}

/// Lists every damage type with its id and badge.
async fn run_types(config: &Config, format: OutputFormat) -> color_eyre::Result<()> {
    info!("Listing types");

    let client = PokeApiClient::from_config(config)?;
    let cancel = cancel_on_ctrl_c();

    let types = list_types(&client, config.api.type_list_limit, 0, &cancel)
        .await
        .map_err(user_facing)?;

    let mut out = io::stdout().lock();
    match format {
        OutputFormat::Text => render_types(&mut out, &types, &config.sprites.type_badge_base)?,
        OutputFormat::Json => write_json(&mut out, &types)?,
    }
    Ok(())
}

// =============================================================================
// OUTPUT HELPERS
// =============================================================================

fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> color_eyre::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// Joins type names as `fire / flying`.
fn type_line(types: &[TypeRef]) -> String {
    types
        .iter()
        .map(|ty| ty.name.as_str())
        .collect::<Vec<_>>()
        .join(" / ")
}

/// Prints the three buckets, skipping empty ones.
fn render_effectiveness<W: Write>(out: &mut W, result: &EffectivenessResult) -> io::Result<()> {
    if result.is_empty() {
        writeln!(out, "No notable matchups.")?;
        return Ok(());
    }

    for category in DefenseCategory::ALL {
        let bucket = result.bucket(category);
        if bucket.is_empty() {
            continue;
        }
        writeln!(out, "{} ({}):", category.label(), category.description())?;
        for matchup in bucket {
            writeln!(out, "  {:<10} x{}", matchup.type_ref.name, matchup.multiplier)?;
        }
    }
    Ok(())
}

fn render_defenses<W: Write>(out: &mut W, defenses: &PokemonDefenses) -> io::Result<()> {
    writeln!(out, "{} (#{})  {}", defenses.name, defenses.id, type_line(&defenses.types))?;
    writeln!(out)?;
    render_effectiveness(out, &defenses.report.effectiveness)?;

    if !defenses.report.is_complete() {
        writeln!(out)?;
        writeln!(
            out,
            "Note: relations unavailable for {}; results are partial.",
            type_line(&defenses.report.missing)
        )?;
    }
    Ok(())
}

fn render_detail<W: Write>(out: &mut W, detail: &PokemonDetail) -> io::Result<()> {
    writeln!(out, "{} (#{})  {}", detail.name, detail.id, type_line(&detail.types))?;
    writeln!(out, "Height: {:.1} m   Weight: {:.1} kg", detail.height_m, detail.weight_kg)?;
    if let Some(color) = &detail.color {
        writeln!(out, "Colour: {color}")?;
    }
    if let Some(gender) = detail.gender {
        match gender.female_percent() {
            Some(female) => writeln!(out, "Gender: {female:.1}% female, {:.1}% male", 100.0 - female)?,
            None => writeln!(out, "Gender: genderless")?,
        }
    }
    if !detail.description.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", detail.description)?;
    }

    if !detail.abilities.is_empty() {
        writeln!(out)?;
        writeln!(out, "Abilities:")?;
        for ability in &detail.abilities {
            let hidden = if ability.is_hidden { " (hidden)" } else { "" };
            writeln!(out, "  {}{hidden}", ability.name)?;
        }
    }

    if !detail.stats.is_empty() {
        writeln!(out)?;
        writeln!(out, "Base stats:")?;
        for stat in &detail.stats {
            writeln!(out, "  {:<4} {:>3}", stat.short_name(), stat.base_stat)?;
        }
    }

    writeln!(out)?;
    match &detail.type_defenses {
        Some(result) => render_effectiveness(out, result)?,
        None => writeln!(out, "Type defenses unavailable.")?,
    }
    Ok(())
}

fn render_list<W: Write>(out: &mut W, items: &[PokemonListItem]) -> io::Result<()> {
    for item in items {
        writeln!(out, "#{:<5} {}", item.id, item.name)?;
    }
    Ok(())
}

fn render_types<W: Write>(out: &mut W, types: &[TypeRef], badge_base: &str) -> io::Result<()> {
    for ty in types {
        let Some(id) = ty.id else { continue };
        writeln!(out, "{id:>3}  {:<10} {}", ty.name, type_badge_url(badge_base, id))?;
    }
    Ok(())
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Application entry point.
#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    // 1. Install color-eyre FIRST (before any potential panics)
    color_eyre::install()?;

    // 2. Parse CLI arguments
    let cli = Cli::parse();

    // 3. Initialize tracing (handles --no-color for log output)
    init_tracing(cli.verbose, cli.no_color);

    // 4. Load configuration and route to the command
    let config = build_config(&cli)?;
    match &cli.command {
        Commands::Defenses {
            pokemon,
            best_effort,
        } => run_defenses(&config, pokemon, *best_effort, cli.format).await,
        Commands::Detail {
            pokemon,
            best_effort,
        } => run_detail(&config, pokemon, *best_effort, cli.format).await,
        Commands::List {
            search,
            type_name,
            limit,
        } => {
            run_list(
                &config,
                search.as_deref(),
                type_name.as_deref(),
                *limit,
                cli.format,
            )
            .await
        }
        Commands::Types => run_types(&config, cli.format).await,
        Commands::Config => write_json(&mut io::stdout().lock(), &config),
    }
}
