//! Example driver: opens a world save, optionally applies a config-file
//! override, and writes it back out. Exits 0 on success, nonzero on any
//! error — there is no broader surface than that; everything else (the
//! itemhunt/bless-chests/find/fix-npcs/analyze-chests flavor commands) was
//! specific to the teacher's item-tracking tool and out of scope here.

mod config;

use std::process::ExitCode;

use clap::Parser;
use config::Config;
use log::LevelFilter;

/// Read a Terraria-format world save and write it back out unchanged
/// (or with a config-specified destination), round-tripping the codec.
#[derive(Parser)]
#[clap(version, about)]
struct Args {
    /// Path to the source .wld file.
    source: Option<String>,
    /// Path to write the re-serialized world to.
    destination: Option<String>,
    /// Load source/destination from a TOML config file instead.
    #[clap(long)]
    config: Option<String>,
}

fn main() -> ExitCode {
    wldfile::logging::init(LevelFilter::Info);

    let args = Args::parse();

    let (source, destination, supported_versions) = match resolve_paths(&args) {
        Ok(resolved) => resolved,
        Err(msg) => {
            log::error!("{msg}");
            return ExitCode::FAILURE;
        }
    };

    let world = match &supported_versions {
        Some(versions) => wldfile::World::open_with_versions(&source, versions),
        None => wldfile::World::open(&source),
    };
    let world = match world {
        Ok(w) => w,
        Err(e) => {
            log::error!("failed to open \"{source}\": {e}");
            return ExitCode::FAILURE;
        }
    };

    log::info!(
        "loaded \"{}\" (version {}, {}x{})",
        source,
        world.info.version,
        world.tiles.width,
        world.tiles.height
    );

    if let Err(e) = world.write(&destination) {
        log::error!("failed to write \"{destination}\": {e}");
        return ExitCode::FAILURE;
    }

    log::info!("wrote \"{destination}\"");
    ExitCode::SUCCESS
}

fn resolve_paths(args: &Args) -> Result<(String, String, Option<Vec<i32>>), String> {
    if let Some(config_path) = &args.config {
        let cfg = Config::load(config_path).map_err(|e| format!("failed to load config: {e}"))?;
        return Ok((
            cfg.source.to_string_lossy().into_owned(),
            cfg.destination.to_string_lossy().into_owned(),
            cfg.supported_versions,
        ));
    }
    match (&args.source, &args.destination) {
        (Some(s), Some(d)) => Ok((s.clone(), d.clone(), None)),
        _ => Err("expected a source and destination path, or --config <file>".into()),
    }
}
