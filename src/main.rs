use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;

use poiroute::config::{FileConfig, ServiceConfig};
use poiroute::export::{route_collection, write_geojson};
use poiroute::{OsmKind, Place, PlaceResolver, TravelMode};

/// Resolve points of interest and route between them using OpenStreetMap services
///
/// Examples:
///   # Look up a place
///   poiroute resolve "university of toronto" -C canada
///
///   # Look up the building outline instead of the point
///   poiroute resolve "CN Tower" -C canada --kind way
///
///   # Walking route, exported for a map widget
///   poiroute route "university of toronto" "union station" -C canada --mode foot --geojson route.geojson
#[derive(Parser, Debug)]
#[command(name = "poiroute")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches poiroute.toml if not provided)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve a place name to coordinates and an OSM id
    Resolve {
        /// Place name or address (e.g., "University of Toronto")
        name: String,

        /// Country the place is in
        #[arg(short = 'C', long)]
        country: Option<String>,

        /// OSM entity kind to match: node, way, or relation
        #[arg(short = 'k', long)]
        kind: Option<OsmKind>,

        /// Print the resolved place as JSON
        #[arg(long)]
        json: bool,
    },
    /// Resolve two places and compute a route between them
    Route {
        /// Origin place name
        from: String,

        /// Destination place name
        to: String,

        /// Country both places are in
        #[arg(short = 'C', long)]
        country: Option<String>,

        /// OSM entity kind for the origin
        #[arg(long)]
        from_kind: Option<OsmKind>,

        /// OSM entity kind for the destination
        #[arg(long)]
        to_kind: Option<OsmKind>,

        /// Travel mode: driving (car), bike, or foot
        #[arg(short = 'm', long)]
        mode: Option<TravelMode>,

        /// Write origin, destination and route as GeoJSON to this file
        #[arg(long)]
        geojson: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let file_config = match args.config {
        Some(ref config_path) => {
            if !config_path.exists() {
                bail!("Config file not found: {:?}", config_path);
            }
            Some(FileConfig::from_path(config_path)?)
        }
        None => FileConfig::load(),
    };

    let verbose = args.verbose || file_config.as_ref().map(|c| c.verbose).unwrap_or(false);
    let service = file_config
        .as_ref()
        .and_then(|c| c.service.clone())
        .unwrap_or_default();
    let default_kind = file_config
        .as_ref()
        .and_then(|c| c.kind)
        .unwrap_or_default();
    let file_country = file_config.as_ref().and_then(|c| c.country.clone());

    if verbose {
        print_service_config(&service);
    }

    let resolver = PlaceResolver::with_config(service).context("Failed to create HTTP client")?;

    match args.command {
        Command::Resolve {
            name,
            country,
            kind,
            json,
        } => {
            let Some(country) = country.or(file_country) else {
                bail!("--country/-C is required (or set `country` in the config file)");
            };
            let kind = kind.unwrap_or(default_kind);

            let place = resolve_with_spinner(&resolver, &name, &country, kind)?;

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&place).context("Failed to serialize place")?
                );
            } else {
                print_place(&place);
            }
        }
        Command::Route {
            from,
            to,
            country,
            from_kind,
            to_kind,
            mode,
            geojson,
        } => {
            let Some(country) = country.or(file_country) else {
                bail!("--country/-C is required (or set `country` in the config file)");
            };
            let mode = mode
                .or_else(|| file_config.as_ref().and_then(|c| c.mode))
                .unwrap_or_default();

            let origin = resolve_with_spinner(
                &resolver,
                &from,
                &country,
                from_kind.unwrap_or(default_kind),
            )?;
            let destination =
                resolve_with_spinner(&resolver, &to, &country, to_kind.unwrap_or(default_kind))?;

            if verbose {
                println!("Origin:");
                print_place(&origin);
                println!("Destination:");
                print_place(&destination);
                println!();
            }

            let spinner = create_spinner(&format!("Routing ({})...", mode));
            let start = Instant::now();
            let route = resolver
                .route_between(&origin, &destination, mode)
                .context("Failed to compute route")?;
            spinner.finish_with_message(format!(
                "Routed {:.2} km in {:.1} min over {} waypoints [{:.1}s]",
                route.length_m() / 1000.0,
                route.duration_s() / 60.0,
                route.path().len(),
                start.elapsed().as_secs_f32()
            ));

            if verbose {
                for (lat, lon) in route.path() {
                    println!("  ({:.6}, {:.6})", lat, lon);
                }
            }

            if let Some(path) = geojson {
                let collection = route_collection(&origin, &destination, &route, mode);
                write_geojson(&path, &collection)?;
                println!("GeoJSON: {}", path.display());
            }
        }
    }

    Ok(())
}

fn resolve_with_spinner(
    resolver: &PlaceResolver,
    name: &str,
    country: &str,
    kind: OsmKind,
) -> Result<Place> {
    let spinner = create_spinner(&format!("Resolving {} ({})...", name, kind));
    let start = Instant::now();
    let place = resolver
        .resolve(name, country, kind)
        .with_context(|| format!("Failed to resolve {}, {}", name, country))?;
    let (lon, lat) = place.coordinates();
    spinner.finish_with_message(format!(
        "Resolved: {}, {} -> ({:.7}, {:.7}) [{:.1}s]",
        name,
        country,
        lon,
        lat,
        start.elapsed().as_secs_f32()
    ));
    Ok(place)
}

fn print_place(place: &Place) {
    let (lon, lat) = place.coordinates();
    println!("  Address: {}", place.address());
    println!("  OSM: {} {}", place.kind(), place.osm_id());
    println!("  Coordinates (lon, lat): ({}, {})", lon, lat);
}

fn print_service_config(service: &ServiceConfig) {
    println!("Configuration:");
    println!("  Nominatim: {}", service.nominatim_url);
    println!("  OSRM: {}", service.osrm_url);
    println!("  User agent: {}", service.user_agent);
    match service.timeout_secs {
        Some(secs) => println!("  Timeout: {}s", secs),
        None => println!("  Timeout: transport default"),
    }
    println!();
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {msg}") {
        pb.set_style(style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]));
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
