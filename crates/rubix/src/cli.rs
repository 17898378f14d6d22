use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use eyre::{Context, Result};
use rubix_core::codec::{faces_to_solver_string, solver_string_to_faces};
use rubix_core::solver::solve_faces;
use rubix_core::{FaceGrid, FaceMatrix, MoveSequence, Scramble, Simulation, SimulationSettings};
use rubix_prefs::{Preferences, SolverPreferences};
use serde::Serialize;

/// Rubix command-line interface
#[derive(Debug, clap::Parser)]
#[command(version)]
pub(crate) struct Args {
    /// Preferences file to use instead of the default location.
    #[arg(long, global = true)]
    pub prefs: Option<PathBuf>,

    #[command(subcommand)]
    pub subcommand: Subcommand,
}

#[derive(clap::Subcommand, Debug)]
pub(crate) enum Subcommand {
    /// Print a random scramble.
    Scramble {
        /// Number of moves, overriding preferences.
        #[arg(short, long)]
        length: Option<usize>,
        /// Seed for a reproducible scramble.
        #[arg(short, long)]
        seed: Option<u64>,
        /// Print the scramble and its seed as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Animate moves on a solved puzzle and print the result as JSON.
    Play {
        /// Moves to play, such as `R U R' U'` or `F2`.
        #[arg(required = true, allow_hyphen_values = true)]
        moves: Vec<String>,
        /// Turn speed in degrees per tick, overriding preferences.
        #[arg(long)]
        speed: Option<f32>,
        /// Sleep between ticks to run at the configured frame rate.
        #[arg(long)]
        realtime: bool,
    },
    /// Print the facelet string for a face matrix.
    Encode {
        /// Face matrix text file, use '-' for stdin.
        #[arg(value_parser)]
        input: clio::Input,
    },
    /// Print the face matrix for a facelet string.
    Decode {
        /// 54-character facelet string.
        facelets: String,
    },
    /// Load six scanned faces (JSON, in capture order) and print the result as
    /// JSON.
    Scan {
        /// Scan file, use '-' for stdin.
        #[arg(value_parser)]
        input: clio::Input,
    },
    /// Solve a face matrix using an external solver.
    Solve {
        /// Face matrix text file, use '-' for stdin.
        #[arg(value_parser)]
        input: clio::Input,
        /// Solver command, overriding preferences.
        #[arg(long)]
        solver: Option<String>,
    },
    /// Print the effective preferences as YAML.
    Prefs {
        /// Write the effective preferences to the preferences file.
        #[arg(long)]
        save: bool,
    },
}

/// Puzzle state written by `play` and `scan`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub(crate) struct StateReport {
    pub faces: FaceMatrix,
    pub facelets: String,
    pub solved: bool,
    pub ticks: usize,
}
impl StateReport {
    fn new(sim: &Simulation, ticks: usize) -> Self {
        Self {
            faces: sim.faces(),
            facelets: sim.solver_string(),
            solved: sim.engine.is_solved(),
            ticks,
        }
    }
}

pub(crate) fn exec(args: Args) -> Result<()> {
    let prefs = Preferences::load(args.prefs.as_deref());

    match args.subcommand {
        Subcommand::Scramble { length, seed, json } => {
            let length = length.unwrap_or(prefs.scramble.length);
            let scramble = match seed {
                Some(seed) => Scramble::from_seed(seed, length),
                None => Scramble::new(length),
            };
            match json {
                true => write_json_output(&scramble),
                false => {
                    println!("{scramble}");
                    Ok(())
                }
            }
        }

        Subcommand::Play {
            moves,
            speed,
            realtime,
        } => {
            let tick_duration = realtime.then(|| Duration::from_secs(1) / prefs.render.fps.max(1));
            let report = play(prefs.simulation_settings(), &moves.join(" "), speed, tick_duration)?;
            write_json_output(&report)
        }

        Subcommand::Encode { mut input } => {
            let faces = read_face_matrix(&mut input)?;
            println!("{}", faces_to_solver_string(&faces));
            Ok(())
        }

        Subcommand::Decode { facelets } => {
            let faces = solver_string_to_faces(&facelets).context("error decoding facelets")?;
            print!("{faces}");
            Ok(())
        }

        Subcommand::Scan { mut input } => {
            let mut captures: [FaceGrid; 6] =
                serde_json::from_reader(&mut input).context("error reading scan")?;
            let mut sim = Simulation::new(prefs.simulation_settings());
            sim.load_scan(&mut captures)
                .context("error loading scan")?;
            write_json_output(&StateReport::new(&sim, 0))
        }

        Subcommand::Solve { mut input, solver } => {
            let faces = read_face_matrix(&mut input)?;
            let mut solver_prefs = prefs.solver.clone();
            if let Some(command) = solver {
                solver_prefs.command = command;
                solver_prefs.args.clear();
            }
            let solution = solve(&solver_prefs, &faces)?;
            println!("{solution}");
            Ok(())
        }

        Subcommand::Prefs { save } => {
            print!("{}", prefs.to_yaml()?);
            if save {
                let path = prefs.save(args.prefs.as_deref())?;
                eprintln!("saved to {}", path.display());
            } else if args.prefs.is_none() {
                if let Ok(path) = rubix_paths::prefs_file() {
                    eprintln!("preferences file: {}", path.display());
                }
            }
            Ok(())
        }
    }
}

/// Plays `moves` on a solved puzzle one tick at a time until every move has
/// been committed.
fn play(
    settings: SimulationSettings,
    moves: &str,
    speed: Option<f32>,
    tick_duration: Option<Duration>,
) -> Result<StateReport> {
    let sequence: MoveSequence = moves.parse().context("error parsing moves")?;
    let mut sim = Simulation::new(settings);
    sim.play_sequence(sequence.to_strings(), speed);

    let mut ticks = 0;
    while !sim.is_idle() {
        sim.tick();
        ticks += 1;
        if let Some(duration) = tick_duration {
            std::thread::sleep(duration);
        }
    }
    log::info!("played {} moves in {ticks} ticks", sequence.len());
    Ok(StateReport::new(&sim, ticks))
}

fn solve(solver_prefs: &SolverPreferences, faces: &FaceMatrix) -> Result<MoveSequence> {
    solve_faces(&solver_prefs.solver(), faces).context("error solving")
}

fn read_face_matrix(input: &mut clio::Input) -> Result<FaceMatrix> {
    let mut buffer = String::new();
    input
        .read_to_string(&mut buffer)
        .context("error reading face matrix")?;
    buffer.parse().context("error parsing face matrix")
}

fn write_json_output<T: Serialize>(value: &T) -> Result<()> {
    serde_json::to_writer_pretty(std::io::stdout(), value)
        .context("error serializing data and writing to stdout")?;
    println!();
    Ok(())
}
