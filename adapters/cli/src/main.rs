#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Tile Arena experience.

mod logging;
mod simulation;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tile_arena_rendering::RenderingBackend;
use tile_arena_rendering_macroquad::{MacroquadBackend, DEFAULT_SOUND_DIRECTORY};

use self::simulation::Simulation;

/// Click to move across the arena and keep away from the wandering enemies.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Synchronise presentation with the display refresh rate.
    #[arg(long)]
    vsync: bool,
    /// Log the frame rate once per second.
    #[arg(long)]
    show_fps: bool,
    /// Seed driving enemy wandering; random when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Silence sound effects.
    #[arg(long)]
    mute: bool,
    /// Directory holding the sound clips.
    #[arg(long, default_value = DEFAULT_SOUND_DIRECTORY)]
    sound_dir: PathBuf,
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,
}

/// Entry point for the Tile Arena command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("wander seed {seed}");

    let mut simulation = Simulation::new(seed).context("failed to set up the arena")?;
    let presentation = simulation.presentation();

    let mut backend = MacroquadBackend::new()
        .with_show_fps(args.show_fps)
        .with_mute(args.mute)
        .with_sound_directory(args.sound_dir);
    if args.vsync {
        backend = backend.with_vsync(true);
    }

    backend
        .run(presentation, move |dt, input, scene| {
            simulation.frame(dt, input, scene)
        })
        .context("rendering backend failed")
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn arguments_are_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn defaults_leave_sound_on_and_seed_random() {
        let args = Args::try_parse_from(["tile-arena"]).expect("defaults parse");
        assert!(!args.mute);
        assert!(!args.vsync);
        assert_eq!(args.seed, None);
        assert_eq!(args.sound_dir, PathBuf::from("assets/sounds"));
    }

    #[test]
    fn flags_are_parsed() {
        let args = Args::try_parse_from([
            "tile-arena",
            "--mute",
            "--seed",
            "7",
            "--sound-dir",
            "sfx",
            "--show-fps",
            "-v",
        ])
        .expect("flags parse");
        assert!(args.mute && args.show_fps && args.verbose);
        assert_eq!(args.seed, Some(7));
        assert_eq!(args.sound_dir, PathBuf::from("sfx"));
    }
}
