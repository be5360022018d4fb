use std::path::PathBuf;

use cubesim_core::{Cube, Move, notation};
use cubesim_prefs::Preferences;
use cubesim_view::{MoveEngine, MoveEvent};
use eyre::{Context, Result};
use serde::Serialize;
use web_time::{Duration, Instant};

/// Animated 3x3x3 cube simulator
#[derive(Debug, clap::Parser)]
#[command(version)]
pub(crate) struct Args {
    #[command(subcommand)]
    pub subcommand: Subcommand,
}

#[derive(clap::Subcommand, Debug)]
pub(crate) enum Subcommand {
    /// Animate a move sequence on a solved cube using a simulated frame
    /// clock, then print the resulting facelet string.
    Play {
        /// Moves to play, such as `R U R' U'`.
        #[arg(required = true)]
        moves: Vec<String>,
        /// Simulated frames per second.
        #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..))]
        fps: u32,
        /// Preferences file to use instead of the user preferences.
        #[arg(long)]
        prefs: Option<PathBuf>,
        /// Apply every move immediately instead of animating.
        #[arg(long)]
        instant: bool,
    },
    /// Print a parsed move sequence as JSON.
    Parse {
        /// Moves to parse, such as `R U R' U'`.
        #[arg(required = true)]
        moves: Vec<String>,
    },
    /// Check a 54-character facelet string and print whether it is solved as
    /// JSON.
    Check {
        /// Facelets in `URFDLB` order.
        facelets: String,
    },
    /// Print the effective preferences as YAML.
    Prefs {
        /// Preferences file to use instead of the user preferences.
        #[arg(long)]
        prefs: Option<PathBuf>,
    },
}

pub(crate) fn exec(subcommand: Subcommand) -> Result<()> {
    match subcommand {
        Subcommand::Play {
            moves,
            fps,
            prefs,
            instant,
        } => {
            let prefs = Preferences::load(prefs.as_deref());
            log::info!(
                "Animating with {} over {}s per move",
                prefs.animation.twist_interpolation,
                prefs.animation.twist_duration,
            );
            let mut engine = MoveEngine::from_prefs(&prefs);
            let events = engine.subscribe();
            engine.enqueue_sequence(&moves.join(" "))?;

            if instant {
                engine.catch_up()?;
            } else {
                let frame = Duration::from_secs(1) / fps;
                let start = Instant::now();
                let mut now = start;
                let mut frames = 0_u64;
                while engine.step(now)? {
                    events.try_iter().for_each(log_event);
                    now += frame;
                    frames += 1;
                }
                log::info!("Played {frames} frames ({:?})", now - start);
            }
            events.try_iter().for_each(log_event);

            let cube = engine.cube();
            if cube.is_solved() {
                log::info!("Cube is solved");
            }
            println!("{}", cube.to_facelets());
            Ok(())
        }

        Subcommand::Parse { moves } => {
            let moves = notation::parse_sequence(&moves.join(" "))?;
            write_json_output(&moves.into_iter().map(MoveInfo::from).collect::<Vec<_>>())
        }

        Subcommand::Check { facelets } => {
            let mut cube = Cube::default();
            cube.set_facelets(&facelets)?;
            write_json_output(&CheckInfo {
                facelets: cube.to_facelets(),
                solved: cube.is_solved(),
            })
        }

        Subcommand::Prefs { prefs } => {
            let prefs = match prefs {
                Some(path) => Preferences::try_load(Some(path.as_path()))
                    .wrap_err_with(|| format!("error loading {}", path.display()))?,
                None => Preferences::load(None),
            };
            print!("{}", prefs.to_yaml()?);
            Ok(())
        }
    }
}

fn log_event(event: MoveEvent) {
    match event {
        MoveEvent::Completed { id, mv } => log::info!("Completed {id}: {mv}"),
        MoveEvent::Cancelled { id, mv } => log::warn!("Cancelled {id}: {mv}"),
    }
}

/// Parsed move, as printed by `cubesim parse`.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
struct MoveInfo {
    notation: String,
    face: String,
    quarter_turns: i8,
}
impl From<Move> for MoveInfo {
    fn from(mv: Move) -> Self {
        Self {
            notation: mv.to_string(),
            face: mv.face.to_string(),
            quarter_turns: mv.turns.quarter_turns(),
        }
    }
}

/// Result of `cubesim check`.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
struct CheckInfo {
    facelets: String,
    solved: bool,
}

fn write_json_output<T: Serialize>(value: &T) -> Result<()> {
    serde_json::to_writer_pretty(std::io::stdout(), value)
        .context("error serializing data and writing to stdout")?;
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_args() {
        Args::command().debug_assert();

        let args = Args::try_parse_from(["cubesim", "play", "R", "U'", "--fps", "30"]).unwrap();
        match args.subcommand {
            Subcommand::Play {
                moves,
                fps,
                prefs,
                instant,
            } => {
                assert_eq!(moves, ["R", "U'"]);
                assert_eq!(fps, 30);
                assert_eq!(prefs, None);
                assert!(!instant);
            }
            other => panic!("unexpected subcommand {other:?}"),
        }

        assert!(Args::try_parse_from(["cubesim", "play", "R", "--fps", "0"]).is_err());
        assert!(Args::try_parse_from(["cubesim", "parse"]).is_err());
    }

    #[test]
    fn test_move_info_json() {
        let moves = notation::parse_sequence("R2 F' M").unwrap();
        let info: Vec<MoveInfo> = moves.into_iter().map(MoveInfo::from).collect();
        assert_eq!(
            serde_json::to_value(&info).unwrap(),
            serde_json::json!([
                { "notation": "R2", "face": "R", "quarter_turns": 2 },
                { "notation": "F'", "face": "F", "quarter_turns": -1 },
                { "notation": "M", "face": "M", "quarter_turns": 1 },
            ]),
        );
    }
}
