//! Command-line explorer for a GeoPlanet dump.
//!
//! Loads the dump once and prints places and their relatives as JSON.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use geoplanet::config::{Config, DataConfig};
use geoplanet::store;
use geoplanet::{Gazetteer, PlaceRef, RenderFields, WoeId};

#[derive(Parser, Debug)]
#[command(name = "gazetteer")]
#[command(about = "Navigate a GeoPlanet place hierarchy")]
struct Args {
    /// TOML config file naming the dump files
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Places file (overrides config)
    #[arg(long)]
    places: Option<PathBuf>,

    /// Aliases file (overrides config)
    #[arg(long)]
    aliases: Option<PathBuf>,

    /// Adjacencies file (overrides config)
    #[arg(long)]
    adjacencies: Option<PathBuf>,

    /// Locale used to pick display names, e.g. "zh-TW" or "zho"
    /// (defaults to config, then "en")
    #[arg(long)]
    locale: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show a single place
    Show { woe_id: u64 },
    /// List all places above a place, nearest first
    Ancestors { woe_id: u64 },
    /// List the direct children of a place
    Children { woe_id: u64 },
    /// List places sharing parent and type with a place
    Siblings { woe_id: u64 },
    /// List adjacent places
    Neighbors { woe_id: u64 },
    /// List the aliases of a place
    Aliases { woe_id: u64 },
    /// Find places by name or alias
    Find { name: String },
    /// Check that every parent chain terminates
    Validate,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if args.verbose { "debug" } else { "info" }));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = match &args.config {
        Some(path) => Some(Config::load_from_file(path)?),
        None => None,
    };

    let data = resolve_data(&args, config.as_ref())?;
    let locale = args
        .locale
        .clone()
        .or_else(|| config.as_ref().map(|c| c.display.default_locale.clone()))
        .unwrap_or_else(|| "en".to_string());

    info!("Loading places from {}", data.places.display());
    let gazetteer = store::load(&data)?;
    info!(
        "Loaded {} places with {} aliases",
        gazetteer.len(),
        gazetteer.alias_count()
    );

    let output = run(&gazetteer, &args.command, &locale)?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

/// Merge command-line paths over the config file
fn resolve_data(args: &Args, config: Option<&Config>) -> Result<DataConfig> {
    let from_config = config.map(|c| c.data.clone());

    let places = args
        .places
        .clone()
        .or_else(|| from_config.as_ref().map(|d| d.places.clone()))
        .context("No places file given; pass --places or --config")?;

    Ok(DataConfig {
        places,
        aliases: args
            .aliases
            .clone()
            .or_else(|| from_config.as_ref().and_then(|d| d.aliases.clone())),
        adjacencies: args
            .adjacencies
            .clone()
            .or_else(|| from_config.as_ref().and_then(|d| d.adjacencies.clone())),
    })
}

fn run(gazetteer: &Gazetteer, command: &Command, locale: &str) -> Result<Value> {
    let place = |woe_id: u64| gazetteer.place(WoeId(woe_id));

    let value = match command {
        Command::Show { woe_id } => render_place(place(*woe_id)?, locale),
        Command::Ancestors { woe_id } => render_list(&place(*woe_id)?.ancestors()?, locale),
        Command::Children { woe_id } => render_list(&place(*woe_id)?.children(), locale),
        Command::Siblings { woe_id } => render_list(&place(*woe_id)?.siblings(), locale),
        Command::Neighbors { woe_id } => render_list(&place(*woe_id)?.neighbors(), locale),
        Command::Aliases { woe_id } => Value::Array(
            place(*woe_id)?
                .aliases()
                .iter()
                .map(|alias| Value::Object(alias.render_as_map()))
                .collect(),
        ),
        Command::Find { name } => render_list(&gazetteer.find_by_name(name), locale),
        Command::Validate => {
            let cyclic = gazetteer.validate();
            if !cyclic.is_empty() {
                anyhow::bail!(
                    "{} places sit on a parent cycle: {:?}",
                    cyclic.len(),
                    cyclic
                );
            }
            json!({ "places": gazetteer.len(), "roots": gazetteer.roots().len(), "cycles": 0 })
        }
    };

    Ok(value)
}

fn render_place(place: PlaceRef<'_>, locale: &str) -> Value {
    let mut map = place.render_as_map();
    map.insert("displayName".to_string(), json!(place.display_name(locale)));
    Value::Object(map)
}

fn render_list(places: &[PlaceRef<'_>], locale: &str) -> Value {
    Value::Array(
        places
            .iter()
            .map(|place| render_place(*place, locale))
            .collect(),
    )
}
