use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::path::PathBuf;

use cubemath::cgmath::Point2;
use cubemath::{Face, Float};
use cubeprefs::Preferences;
use cubeturn_core::{
    LayerTurn, Preset, PuzzleModel, PuzzleSnapshot, ScrambleParams, compile_notation,
    generate_scramble, notation, sticker_buckets,
};
use cubeturn_view::{ControlEvent, Controls, OrthographicCamera};
use eyre::{Context, Result, bail};
use itertools::Itertools;
use serde::Serialize;
use web_time::{Duration, Instant};

/// Longest that a replayed gesture may keep animating after release.
const MAX_SETTLE_TIME: Duration = Duration::from_secs(60);
/// Simulated frame time while a replayed gesture settles.
const FRAME_TIME: Duration = Duration::from_millis(16);

/// Headless driver for N×N×N cube puzzles
#[derive(Debug, clap::Parser)]
#[command(version)]
pub(crate) struct Args {
    /// Preferences file (YAML) layered over the defaults.
    #[arg(long, global = true)]
    pub prefs: Option<PathBuf>,

    #[command(subcommand)]
    pub subcommand: Subcommand,
}

#[derive(clap::Subcommand, Debug)]
pub(crate) enum Subcommand {
    /// Print a random scramble.
    Scramble {
        /// Number of layers (2 to 5).
        #[arg(short, long)]
        size: Option<u8>,
        /// Difficulty (0 to 2).
        #[arg(short, long)]
        difficulty: Option<u8>,
        /// Seed for a reproducible scramble.
        #[arg(long)]
        seed: Option<String>,
    },
    /// Apply moves to a puzzle and print whether it is solved as JSON.
    Apply {
        /// Number of layers (2 to 5). Ignored when starting from a snapshot.
        #[arg(short, long)]
        size: Option<u8>,
        /// Snapshot to start from, use '-' for stdin.
        #[arg(long, value_parser, conflicts_with = "preset")]
        snapshot: Option<clio::Input>,
        /// Built-in pattern to start from (`solved` or `checkerboard`).
        #[arg(long)]
        preset: Option<Preset>,
        /// File to write the resulting snapshot to, use '-' for stdout.
        #[arg(short, long, value_parser)]
        output: Option<clio::Output>,
        /// Moves, such as `R U R' U'`.
        moves: Vec<String>,
    },
    /// Load a snapshot and print a report about it as JSON.
    Verify {
        /// Snapshot file, use '-' for stdin.
        #[arg(value_parser)]
        file: clio::Input,
    },
    /// Replay a mouse drag across the puzzle and print the resulting moves as
    /// JSON.
    ///
    /// Points are in normalized device coordinates, from -1 to 1 with +y up,
    /// seen by a camera looking straight at the front face.
    Drag {
        /// Number of layers (2 to 5).
        #[arg(short, long)]
        size: Option<u8>,
        /// Moves to apply before dragging.
        #[arg(long)]
        moves: Option<String>,
        /// Where the drag starts, such as `0.1,0.1`.
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        from: Point2<Float>,
        /// Where the drag ends, such as `0.4,0.1`.
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        to: Point2<Float>,
        /// Number of pointer movements.
        #[arg(long, default_value_t = 10)]
        steps: u32,
        /// Duration of the drag in milliseconds.
        #[arg(long, default_value_t = 100)]
        duration_ms: u64,
    },
    /// Print the effective preferences as YAML.
    Prefs,
}

pub(crate) fn exec(args: Args) -> Result<()> {
    let prefs = match &args.prefs {
        Some(path) => Preferences::try_load(Some(path.as_path()))?,
        None => Preferences::load(None),
    };

    match args.subcommand {
        Subcommand::Scramble {
            size,
            difficulty,
            seed,
        } => {
            let size = size.unwrap_or(prefs.puzzle.size);
            let difficulty = difficulty.unwrap_or(prefs.scramble.difficulty);
            let params = match seed {
                Some(seed) => ScrambleParams::with_seed(size, difficulty, seed),
                None => ScrambleParams::new(size, difficulty),
            };
            log::info!("scramble seed: {}", params.seed);
            let scramble = generate_scramble(&params).context("error generating scramble")?;
            println!("{}", notation::format_notation(scramble));
            Ok(())
        }

        Subcommand::Apply {
            size,
            snapshot,
            preset,
            output,
            moves,
        } => {
            let size = size.unwrap_or(prefs.puzzle.size);
            let mut model = match (snapshot, preset) {
                (Some(input), _) => read_snapshot(input)?,
                (None, Some(preset)) => preset.build(size)?,
                (None, None) => PuzzleModel::new(size)?,
            };
            let moves = compile_notation(model.size(), &moves.join(" "))?;
            model.apply_moves(&moves)?;

            if let Some(mut output) = output {
                serde_json::to_writer_pretty(&mut output, &model.to_snapshot())
                    .context("error writing snapshot")?;
                writeln!(output).context("error writing snapshot")?;
            }
            write_json_output(&PuzzleReport::new(&model))
        }

        Subcommand::Verify { file } => {
            let model = read_snapshot(file)?;
            write_json_output(&PuzzleReport::new(&model))
        }

        Subcommand::Drag {
            size,
            moves,
            from,
            to,
            steps,
            duration_ms,
        } => {
            let mut model = PuzzleModel::new(size.unwrap_or(prefs.puzzle.size))?;
            if let Some(moves) = moves {
                model.apply_moves(&compile_notation(model.size(), &moves)?)?;
            }
            let drag = DragParams {
                from,
                to,
                steps,
                duration: Duration::from_millis(duration_ms),
            };
            let report = replay_drag(&mut model, &prefs, drag)?;
            write_json_output(&report)
        }

        Subcommand::Prefs => {
            print!("{}", prefs.to_yaml_string()?);
            Ok(())
        }
    }
}

fn read_snapshot(mut input: clio::Input) -> Result<PuzzleModel> {
    let mut buffer = String::new();
    input
        .read_to_string(&mut buffer)
        .context("error reading snapshot")?;
    let snapshot: PuzzleSnapshot =
        serde_json::from_str(&buffer).context("error deserializing snapshot")?;
    PuzzleModel::from_snapshot(&snapshot).context("invalid snapshot")
}

fn parse_point(s: &str) -> Result<Point2<Float>, String> {
    let Some((x, y)) = s.split(',').map(str::trim).collect_tuple() else {
        return Err(format!("expected two comma-separated numbers, got {s:?}"));
    };
    let parse = |n: &str| n.parse::<Float>().map_err(|e| format!("{n:?}: {e}"));
    Ok(Point2::new(parse(x)?, parse(y)?))
}

fn write_json_output<T: Serialize>(value: &T) -> Result<()> {
    serde_json::to_writer_pretty(std::io::stdout(), value)
        .context("error serializing data and writing to stdout")?;
    println!();
    Ok(())
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
struct PuzzleReport {
    size: u8,
    solved: bool,
    /// Labels of the stickers on each face, keyed by face.
    stickers: BTreeMap<String, String>,
}
impl PuzzleReport {
    fn new(model: &PuzzleModel) -> Self {
        let stickers = sticker_buckets(model)
            .into_iter()
            .map(|(face, labels)| (face.symbol_upper().to_string(), face_string(&labels)))
            .collect();
        Self {
            size: model.size(),
            solved: model.is_solved(),
            stickers,
        }
    }
}

fn face_string(labels: &[Face]) -> String {
    labels.iter().map(|f| f.symbol_upper()).collect()
}

#[derive(Debug, Copy, Clone, PartialEq)]
struct DragParams {
    from: Point2<Float>,
    to: Point2<Float>,
    steps: u32,
    duration: Duration,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
struct DragReport {
    moves: Vec<LayerTurn>,
    solved: bool,
}

/// Replays a straight-line drag through the interaction controller and lets
/// the resulting animation finish.
fn replay_drag(
    model: &mut PuzzleModel,
    prefs: &Preferences,
    drag: DragParams,
) -> Result<DragReport> {
    let camera = OrthographicCamera::default();
    let mut controls = Controls::new(prefs);
    let start = Instant::now();

    let session = controls.pointer_down(model, &camera, drag.from)?;
    let steps = drag.steps.max(1);
    for i in 1..=steps {
        let t = i as Float / steps as Float;
        let cursor = drag.from + (drag.to - drag.from) * t;
        let now = start + drag.duration.mul_f64(t);
        controls.pointer_move(model, &camera, session, cursor, now)?;
    }
    controls.pointer_up(model, session, start + drag.duration)?;

    let mut elapsed = Duration::ZERO;
    while controls.step(model, FRAME_TIME) {
        elapsed += FRAME_TIME;
        if elapsed > MAX_SETTLE_TIME {
            bail!("animation did not settle");
        }
    }

    let moves = controls
        .take_events()
        .into_iter()
        .filter_map(|event| match event {
            ControlEvent::LayerMove(turn) => Some(turn),
            ControlEvent::Solved | ControlEvent::ScrambleFinished => None,
        })
        .collect();
    Ok(DragReport {
        moves,
        solved: model.is_solved(),
    })
}

#[cfg(test)]
mod tests {
    use cubemath::Axis;
    use cubeprefs::DEFAULT_PREFS;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_point() {
        assert_eq!(parse_point("0.5,-0.25"), Ok(Point2::new(0.5, -0.25)));
        assert_eq!(parse_point(" 1 , 0 "), Ok(Point2::new(1.0, 0.0)));
        parse_point("0.5").expect_err("one number");
        parse_point("0.5,0.5,0.5").expect_err("three numbers");
        parse_point("a,b").expect_err("not numbers");
    }

    #[test]
    fn test_puzzle_report() {
        let model = Preset::Checkerboard.build(3).unwrap();
        let report = PuzzleReport::new(&model);
        assert_eq!(report.size, 3);
        assert!(!report.solved);
        assert_eq!(report.stickers.len(), 6);
        assert_eq!(report.stickers["U"].len(), 9);
    }

    #[test]
    fn test_replay_drag() {
        let mut model = PuzzleModel::new(3).unwrap();
        // Drag the top row of the front face to the left.
        let drag = DragParams {
            from: Point2::new(0.3, 0.3),
            to: Point2::new(-0.6, 0.3),
            steps: 10,
            duration: Duration::from_millis(100),
        };
        let report = replay_drag(&mut model, &DEFAULT_PREFS, drag).unwrap();
        assert_eq!(
            report.moves,
            vec![LayerTurn {
                axis: Axis::Y,
                coordinate: 1,
                quarter_turns: -1,
            }],
        );
        assert!(!report.solved);
    }
}
