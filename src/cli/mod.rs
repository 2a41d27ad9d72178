use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use log::info;
use serde_json::{Value, json};
use std::path::PathBuf;

use crate::catalog::{Catalog, fixture::FixtureCatalog};
use crate::config::Config;
use crate::domain::{reference::TrackRef, track::Track};
use crate::json::{decode, serialize};
use crate::uri::{Link, UriCodec};

#[derive(Parser)]
#[command(name = "catalog-link")]
#[command(version = "0.1")]
#[command(about = "Converts catalog entities to and from their json wire format")]
pub struct Cli {
    /// Path to the config TOML file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List playlists in the catalog
    List,
    /// Print a playlist as json
    Playlist {
        /// Playlist uri, e.g. spotify:user:alice:playlist:<id>
        uri: String,
    },
    /// Print a track as json
    Track {
        /// Track uri, e.g. spotify:track:<id>
        uri: String,
    },
    /// Read a json array of track uris from stdin and print the tracks
    Decode {
        /// Number of array elements to look at, defaults to [decode] max_tracks
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Read a playlist draft from stdin and print its title and track uris
    Draft {
        /// Number of track elements to look at, defaults to [decode] max_tracks
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

/// Entrypoint for CLI
pub fn run() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let cfg = Config::load(&cli.config)?;
    let codec = cfg.codec()?;
    let catalog_path = cfg.catalog_path(&cli.config);
    let catalog = FixtureCatalog::load(&catalog_path)
        .with_context(|| format!("Failed to load catalog {}", catalog_path.display()))?;

    match &cli.command {
        Commands::List => {
            for playlist in catalog.playlists() {
                let uri = codec.encode(&Link::from(playlist))?;
                match &playlist.metadata {
                    Some(metadata) => println!("{uri}  {}", metadata.name),
                    None => println!("{uri}  (not loaded)"),
                }
            }
        }

        Commands::Playlist { uri } => {
            let reference = decode::playlist_ref_from_json(&codec, &Value::from(uri.as_str()))
                .ok_or_else(|| anyhow!("{uri} is not a playlist uri"))?;
            let playlist = catalog
                .playlist(&reference)
                .ok_or_else(|| anyhow!("{reference} not found"))?;

            print_json(&serialize::playlist_to_json(&codec, playlist)?)?;
        }

        Commands::Track { uri } => {
            let reference = decode::track_ref_from_json(&codec, &Value::from(uri.as_str()))
                .ok_or_else(|| anyhow!("{uri} is not a track uri"))?;

            print_json(&resolve_track_json(&codec, &catalog, reference)?)?;
        }

        Commands::Decode { limit } => {
            let input = read_stdin_json()?;
            let limit = limit.unwrap_or(cfg.decode.max_tracks);
            let references = decode::track_refs_from_json(&codec, &input, limit);
            info!("Decoded {} track references", references.len());

            let tracks = references
                .into_iter()
                .map(|reference| resolve_track_json(&codec, &catalog, reference))
                .collect::<anyhow::Result<Vec<_>>>()?;
            print_json(&Value::Array(tracks))?;
        }

        Commands::Draft { limit } => {
            let input = read_stdin_json()?;
            let limit = limit.unwrap_or(cfg.decode.max_tracks);
            let draft = decode::playlist_draft_from_json(&codec, &input, limit)?;

            let tracks = draft
                .tracks
                .into_iter()
                .map(|track| codec.encode(&Link::from(track)))
                .collect::<Result<Vec<_>, _>>()?;
            print_json(&json!({ "title": draft.title, "tracks": tracks }))?;
        }
    }

    Ok(())
}

/// Tracks the catalog doesn't know are printed as unloaded
fn resolve_track_json(
    codec: &UriCodec,
    catalog: &impl Catalog,
    reference: TrackRef,
) -> anyhow::Result<Value> {
    let track = catalog
        .track(&reference)
        .cloned()
        .unwrap_or_else(|| Track::unloaded(reference.0));
    Ok(serialize::track_to_json(codec, &track)?)
}

fn read_stdin_json() -> anyhow::Result<Value> {
    serde_json::from_reader(std::io::stdin().lock()).with_context(|| "Failed to parse json from stdin")
}

fn print_json(value: &Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
