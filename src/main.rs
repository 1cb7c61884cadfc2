//! Satisfactory game database generator
//!
//! Reads the `Docs.json` shipped with Satisfactory and writes the game
//! database consumed by the production planner.

mod buildings;
mod classify;
mod db;
mod docs;
mod error;
mod extract;
mod fuel;
mod items;
mod models;
mod recipes;
mod tables;

#[cfg(test)]
mod fixtures;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::docs::NativeClass;
use crate::models::GameDatabase;

#[derive(Parser)]
#[command(name = "satisfactory-game-db")]
#[command(about = "Reads the Docs.json from Satisfactory and produces the game database used by the planner")]
struct Cli {
    /// Path to Satisfactory's Docs.json
    #[arg(short, long, default_value = "Docs.json")]
    docs_file: PathBuf,

    /// Output file for the game database. Use - for stdout
    #[arg(short = 'f', long, default_value = "game-db.json")]
    output_file: String,

    /// Keep items that no recipe or generator uses
    #[arg(long)]
    no_prune: bool,

    /// Log every parsed class
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    info!("Reading {}", cli.docs_file.display());
    let native_classes = read_docs(&cli.docs_file)?;
    info!("Found {} native classes", native_classes.len());

    let (game_db, stats) = db::build_game_database(&native_classes, !cli.no_prune)
        .with_context(|| format!("Failed to convert {}", cli.docs_file.display()))?;

    write_game_db(&game_db, &cli.output_file)?;
    info!("{}", stats);

    Ok(())
}

fn read_docs(path: &Path) -> Result<Vec<NativeClass>> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let text = decode_text(&bytes).with_context(|| format!("Failed to decode {}", path.display()))?;

    serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
}

/// The game writes its docs as UTF-16 with a byte order mark; hand-edited
/// copies are usually UTF-8.
fn decode_text(bytes: &[u8]) -> Result<String> {
    let utf16 = |rest: &[u8], from_bytes: fn([u8; 2]) -> u16| -> Result<String> {
        if rest.len() % 2 != 0 {
            bail!("UTF-16 input has an odd number of bytes");
        }
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|pair| from_bytes([pair[0], pair[1]]))
            .collect();
        Ok(String::from_utf16(&units)?)
    };

    match bytes {
        [0xFF, 0xFE, rest @ ..] => utf16(rest, u16::from_le_bytes),
        [0xFE, 0xFF, rest @ ..] => utf16(rest, u16::from_be_bytes),
        [0xEF, 0xBB, 0xBF, rest @ ..] => Ok(std::str::from_utf8(rest)?.to_string()),
        _ => Ok(std::str::from_utf8(bytes)?.to_string()),
    }
}

/// Serializes with a four space indent and a trailing newline.
fn render_game_db(game_db: &GameDatabase) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    game_db.serialize(&mut serializer)?;
    buf.push(b'\n');
    Ok(buf)
}

fn write_game_db(game_db: &GameDatabase, output: &str) -> Result<()> {
    let rendered = render_game_db(game_db)?;

    if output == "-" {
        io::stdout().lock().write_all(&rendered)?;
    } else {
        fs::write(output, rendered).with_context(|| format!("Failed to write {output}"))?;
        info!("Wrote game database to {output}");
    }

    Ok(())
}
