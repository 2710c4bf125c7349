use std::path::PathBuf;

use eyre::{Context, Result, bail, eyre};
use itertools::Itertools;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use twistgrid_core::{Arrangement, Float, ObjectId, TurnCode};
use twistgrid_notation::{translate_notation, translate_notation_lossy};
use twistgrid_prefs::Preferences;
use twistgrid_view::Engine;

use crate::headless::HeadlessHost;

/// Headless driver for layered twisty puzzle arrangements
#[derive(Debug, clap::Parser)]
#[command(version)]
pub(crate) struct Args {
    /// Preferences file to load (YAML).
    #[arg(long, global = true)]
    pub prefs: Option<PathBuf>,

    #[command(subcommand)]
    pub subcommand: Subcommand,
}

#[derive(clap::Subcommand, Debug)]
pub(crate) enum Subcommand {
    /// Translate face-turn notation (such as `R U' F2`) into turn codes.
    Translate {
        /// Skip moves that cannot be translated instead of failing.
        #[arg(long)]
        lossy: bool,
        /// Moves to translate.
        #[arg(required = true)]
        notation: Vec<String>,
    },
    /// Run a list of turn codes and print the result as JSON.
    Turn {
        #[command(flatten)]
        sim: SimArgs,
        /// Turn codes (such as `x0 y2'`).
        moves: Vec<String>,
    },
    /// Make random turns and print the result as JSON.
    Scramble {
        #[command(flatten)]
        sim: SimArgs,
        /// Number of random turns.
        #[arg(short = 'n', long, default_value_t = 25)]
        count: usize,
        /// Seed for a reproducible scramble.
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(clap::Args, Debug)]
pub(crate) struct SimArgs {
    /// Arrangement size, such as `3x3x3`.
    #[arg(short, long, default_value = "3x3x3", value_parser = parse_size)]
    size: [u16; 3],
    /// Edge length of each object.
    #[arg(long, default_value_t = 1.0)]
    object_size: Float,
    /// Milliseconds between simulated frames.
    #[arg(long, default_value_t = 16.0)]
    frame_ms: Float,
}

/// Output of a simulation run.
#[derive(Serialize, Debug)]
struct RunOutput {
    size: [u16; 3],
    history: Vec<TurnCode>,
    frames: usize,
    objects: Vec<ObjectOutput>,
}

#[derive(Serialize, Debug)]
struct ObjectOutput {
    id: ObjectId,
    grid: [u16; 3],
    position: [Float; 3],
}

pub(crate) fn exec(args: Args) -> Result<()> {
    let prefs = Preferences::load(args.prefs.as_deref());

    match args.subcommand {
        Subcommand::Translate { lossy, notation } => {
            let notation = notation.join(" ");
            let codes = if lossy {
                translate_notation_lossy(notation.as_str())
            } else {
                translate_notation(notation.as_str()).map_err(|e| {
                    eyre!("{e} (translated so far: {})", e.partial.iter().join(" "))
                })?
            };
            println!("{}", codes.iter().join(" "));
            Ok(())
        }

        Subcommand::Turn { sim, moves } => {
            let mut engine = new_engine(&sim, prefs)?;
            engine.turn(&moves, || log::info!("turn sequence complete"));
            let frames = run_to_completion(&mut engine, sim.frame_ms)?;
            write_json_output(&run_output(&engine, frames))
        }

        Subcommand::Scramble { sim, count, seed } => {
            let mut engine = new_engine(&sim, prefs)?;
            let on_complete = || log::info!("scramble complete");
            match seed {
                Some(seed) => {
                    let mut rng = ChaCha8Rng::seed_from_u64(seed);
                    engine.scramble_with_rng(count, &mut rng, on_complete);
                }
                None => engine.scramble(count, on_complete),
            }
            let frames = run_to_completion(&mut engine, sim.frame_ms)?;
            write_json_output(&run_output(&engine, frames))
        }
    }
}

fn parse_size(s: &str) -> Result<[u16; 3], String> {
    let counts: Vec<u16> = s
        .split(['x', 'X', '×'])
        .map(|n| n.trim().parse::<u16>().map_err(|e| format!("bad count {n:?}: {e}")))
        .try_collect()?;
    <[u16; 3]>::try_from(counts).map_err(|_| format!("expected three counts, like 3x3x3; got {s:?}"))
}

fn new_engine(sim: &SimArgs, prefs: Preferences) -> Result<Engine<HeadlessHost>> {
    let arrangement =
        Arrangement::centered(sim.size, sim.object_size).wrap_err("invalid arrangement")?;
    Ok(Engine::new(arrangement, HeadlessHost::default(), prefs))
}

/// Upper bound on simulated frames, in case of a zero frame interval.
const MAX_FRAMES: usize = 10_000_000;

fn run_to_completion(engine: &mut Engine<HeadlessHost>, frame_ms: Float) -> Result<usize> {
    if !(frame_ms.is_finite() && frame_ms > 0.0) {
        bail!("frame interval must be positive; got {frame_ms}");
    }
    let mut frames = 0;
    let mut time = 0.0;
    while engine.is_animating() {
        engine.tick(time);
        time += frame_ms;
        frames += 1;
        if frames >= MAX_FRAMES {
            bail!("animation did not finish after {frames} frames");
        }
    }
    Ok(frames)
}

fn run_output(engine: &Engine<HeadlessHost>, frames: usize) -> RunOutput {
    RunOutput {
        size: engine.layout().arrangement().counts(),
        history: engine.history().as_slice().to_vec(),
        frames,
        objects: engine
            .host()
            .objects
            .iter()
            .map(|(&id, obj)| ObjectOutput {
                id,
                grid: obj.grid,
                position: obj.position.into(),
            })
            .collect(),
    }
}

fn write_json_output<T: Serialize>(value: &T) -> Result<()> {
    serde_json::to_writer_pretty(std::io::stdout(), value)
        .context("error serializing data and writing to stdout")?;
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("3x3x3"), Ok([3, 3, 3]));
        assert_eq!(parse_size("2X4×5"), Ok([2, 4, 5]));
        assert!(parse_size("3x3").is_err());
        assert!(parse_size("3x3x3x3").is_err());
        assert!(parse_size("3xax3").is_err());
    }

    #[test]
    fn test_args() {
        use clap::CommandFactory;

        Args::command().debug_assert();
    }

    #[test]
    fn test_seeded_scramble_is_reproducible() {
        let sim = SimArgs {
            size: [2, 3, 4],
            object_size: 1.0,
            frame_ms: 16.0,
        };
        let run = || {
            let mut engine = new_engine(&sim, Preferences::default()).unwrap();
            let mut rng = ChaCha8Rng::seed_from_u64(42);
            engine.scramble_with_rng(8, &mut rng, || ());
            let frames = run_to_completion(&mut engine, sim.frame_ms).unwrap();
            run_output(&engine, frames)
        };
        let (a, b) = (run(), run());
        assert_eq!(a.history, b.history);
        assert_eq!(a.history.len(), 8);
        assert_eq!(a.objects.len(), 24);
        for (oa, ob) in a.objects.iter().zip(&b.objects) {
            assert_eq!(oa.position, ob.position);
        }
    }

    #[test]
    fn test_run_rejects_bad_frame_interval() {
        let sim = SimArgs {
            size: [1, 1, 1],
            object_size: 1.0,
            frame_ms: 0.0,
        };
        let mut engine = new_engine(&sim, Preferences::default()).unwrap();
        assert!(run_to_completion(&mut engine, 0.0).is_err());
        assert!(new_engine(&SimArgs { object_size: -1.0, ..sim }, Preferences::default()).is_err());
    }
}
