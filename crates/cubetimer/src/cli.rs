use std::io::Read;
use std::path::{Path, PathBuf};

use cubetimer_core::notation::{format_moves, parse_moves};
use cubetimer_core::render::render_net_text;
use cubetimer_core::{CubeEngine, CubeType, Scramble, ScrambleParams};
use cubetimer_prefs::Preferences;
use cubetimer_stats::{History, Penalty, Session, SessionStats, SolveRecord, format_time, pb_history};
use eyre::{Context, Result, bail, eyre};
use itertools::Itertools;
use serde::Serialize;

/// Speedcube trainer command-line interface
#[derive(Debug, clap::Parser)]
#[command(version)]
pub(crate) struct Args {
    /// Preferences file to use instead of the one in the user's config
    /// directory.
    #[arg(long, global = true)]
    pub prefs: Option<PathBuf>,

    #[command(subcommand)]
    pub subcommand: Subcommand,
}

#[derive(clap::Subcommand, Debug)]
pub(crate) enum Subcommand {
    /// Generate scrambles.
    Scramble {
        /// Cube (such as `3x3`). Defaults to the cube in preferences.
        #[arg(short, long)]
        cube: Option<CubeType>,
        /// Seed for reproducible scrambles.
        #[arg(short, long)]
        seed: Option<String>,
        /// Number of scrambles to generate.
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
        /// Print scrambles as JSON along with their seeds.
        #[arg(long)]
        json: bool,
    },
    /// Apply moves to a solved cube and print the result as a net.
    Apply {
        /// Cube (such as `3x3`). Defaults to the cube in preferences.
        #[arg(short, long)]
        cube: Option<CubeType>,
        /// Apply a scramble generated from this seed before the moves.
        #[arg(short, long)]
        seed: Option<String>,
        /// Moves to apply (such as `R U R' U'`).
        #[arg(allow_hyphen_values = true)]
        moves: Vec<String>,
        /// Print the cube state as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print statistics for a session in a history file.
    Stats {
        /// History file, use '-' for stdin.
        #[arg(value_parser)]
        history_file: clio::Input,
        /// Cube (such as `3x3`). Defaults to the cube in preferences.
        #[arg(short, long)]
        cube: Option<CubeType>,
        /// Session ID or name. Defaults to the active session.
        #[arg(long)]
        session: Option<String>,
    },
    /// Add a solve to the active session of a history file.
    AddSolve {
        /// History file. Defaults to the history file in the user's data
        /// directory.
        history_file: Option<PathBuf>,
        /// Solve time in seconds.
        #[arg(short, long, allow_negative_numbers = true)]
        time: f64,
        /// Penalty (`ok`, `plus2`, or `dnf`).
        #[arg(short, long, default_value_t)]
        penalty: Penalty,
        /// Scramble that was solved.
        #[arg(long, default_value = "")]
        scramble: String,
        /// Cube (such as `3x3`). Defaults to the cube in preferences.
        #[arg(short, long)]
        cube: Option<CubeType>,
    },
    /// Export the solves of a session in a history file as CSV.
    ExportCsv {
        /// History file, use '-' for stdin.
        #[arg(value_parser)]
        history_file: clio::Input,
        /// Cube (such as `3x3`). Defaults to the cube in preferences.
        #[arg(short, long)]
        cube: Option<CubeType>,
        /// Session ID or name. Defaults to the active session.
        #[arg(long)]
        session: Option<String>,
    },
    /// Print effective preferences as YAML.
    Config,
}

pub(crate) fn exec(args: Args) -> Result<()> {
    let prefs_path = args.prefs.as_deref();

    match args.subcommand {
        Subcommand::Scramble {
            cube,
            seed,
            count,
            json,
        } => {
            let prefs = Preferences::load(prefs_path);
            let config = prefs.cube_config(cube.unwrap_or(prefs.cube_type));
            let scrambles = (0..count)
                .map(|i| Scramble::new(&config, scramble_params(seed.as_deref(), i)))
                .collect_vec();
            if json {
                write_json_output(&scrambles)
            } else {
                for scramble in scrambles {
                    println!("{scramble}");
                }
                Ok(())
            }
        }

        Subcommand::Apply {
            cube,
            seed,
            moves,
            json,
        } => {
            let prefs = Preferences::load(prefs_path);
            let mut engine = CubeEngine::new(prefs.cube_config(cube.unwrap_or(prefs.cube_type)));
            if let Some(seed) = seed {
                let scramble = engine.generate_and_apply(ScrambleParams::from_seed(seed));
                log::info!("scramble: {scramble}");
            }
            for token in moves.iter().flat_map(|s| s.split_whitespace()) {
                engine
                    .apply_token(token)
                    .wrap_err_with(|| format!("error applying {token:?}"))?;
            }

            let snapshot = engine.snapshot();
            if json {
                write_json_output(&snapshot)
            } else {
                let net = render_net_text(&snapshot, |face| face.letter().to_ascii_uppercase());
                println!("{net}");
                Ok(())
            }
        }

        Subcommand::Stats {
            mut history_file,
            cube,
            session,
        } => {
            let prefs = Preferences::load(prefs_path);
            let history = read_history(&mut history_file)?;
            let cube_type = cube.unwrap_or(prefs.cube_type);
            let session = find_session(&history, session.as_deref())?;
            let solves = history.filtered(cube_type, &session.id);

            println!("{} ({cube_type})", session.name);
            println!("{}", SessionStats::compute(&solves).display(prefs.precision));
            let pbs = pb_history(&solves);
            if !pbs.is_empty() {
                println!();
                println!("personal bests");
                for pb in pbs {
                    let time = format_time(pb.time_ms as f64, prefs.precision);
                    println!("{time:>10}  {}", pb.created_at);
                }
            }
            Ok(())
        }

        Subcommand::AddSolve {
            history_file,
            time,
            penalty,
            scramble,
            cube,
        } => {
            let prefs = Preferences::load(prefs_path);
            let path = match history_file {
                Some(p) => p,
                None => cubetimer_prefs::paths::history_file()?.to_owned(),
            };
            if !time.is_finite() || time < 0.0 {
                bail!("invalid solve time {time}");
            }
            let cube_type = cube.unwrap_or(prefs.cube_type);
            let scramble: Vec<_> = parse_moves(&scramble)
                .try_collect()
                .wrap_err("error parsing scramble")?;
            // An empty scramble means none was recorded.
            if !scramble.is_empty() {
                prefs
                    .cube_config(cube_type)
                    .validate_scramble(&scramble)
                    .wrap_err_with(|| format!("scramble does not fit {cube_type}"))?;
            }

            let mut history = read_history_file(&path)?;
            let record = SolveRecord::new(
                (time * 1000.0).round() as u64,
                penalty,
                format_moves(scramble),
                cube_type,
                None,
            );
            let display = match record.effective_ms() {
                Some(ms) => format_time(ms as f64, prefs.precision),
                None => "DNF".to_owned(),
            };
            history.add_solve(record);
            cubetimer_stats::save(&history, &path)?;
            println!("added {display} to {}", history.active_session().name);
            Ok(())
        }

        Subcommand::ExportCsv {
            mut history_file,
            cube,
            session,
        } => {
            let prefs = Preferences::load(prefs_path);
            let history = read_history(&mut history_file)?;
            let session = find_session(&history, session.as_deref())?;
            let cube_type = cube.unwrap_or(prefs.cube_type);
            println!("{}", history.export_csv(cube_type, &session.id, prefs.precision));
            Ok(())
        }

        Subcommand::Config => {
            let prefs = Preferences::try_load(prefs_path)?;
            print!("{}", prefs.to_yaml()?);
            Ok(())
        }
    }
}

/// Returns the parameters for the `i`th scramble. With a seed, the first
/// scramble uses the seed as-is and later ones append their index.
fn scramble_params(seed: Option<&str>, i: usize) -> ScrambleParams {
    match seed {
        None => ScrambleParams::new(),
        Some(seed) if i == 0 => ScrambleParams::from_seed(seed),
        Some(seed) => ScrambleParams::from_seed(format!("{seed}_{i}")),
    }
}

fn read_history(input: &mut clio::Input) -> Result<History> {
    let mut buffer = String::new();
    input
        .read_to_string(&mut buffer)
        .context("error reading history file")?;
    History::from_json(&buffer).context("error deserializing history file")
}

/// Reads a history file, or returns a fresh history if it does not exist.
fn read_history_file(path: &Path) -> Result<History> {
    match std::fs::read_to_string(path) {
        Ok(contents) => History::from_json(&contents)
            .wrap_err_with(|| format!("error deserializing {}", path.display())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("creating new history file at {}", path.display());
            Ok(History::new())
        }
        Err(e) => Err(e).wrap_err_with(|| format!("error reading {}", path.display())),
    }
}

/// Looks up a session by ID, then by name.
fn find_session<'a>(history: &'a History, query: Option<&str>) -> Result<&'a Session> {
    let Some(query) = query else {
        return Ok(history.active_session());
    };
    let sessions = history.sessions();
    sessions
        .iter()
        .find(|s| s.id == query)
        .or_else(|| sessions.iter().find(|s| s.name == query))
        .ok_or_else(|| eyre!("no session with ID or name {query:?}"))
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
    use cubetimer_core::ValidatedCubeConfig;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_args() {
        let args =
            Args::try_parse_from(["cubetimer", "scramble", "--cube", "4X4", "-n", "3"]).unwrap();
        let Subcommand::Scramble {
            cube, count, seed, ..
        } = args.subcommand
        else {
            panic!("expected scramble subcommand");
        };
        assert_eq!(cube, Some(CubeType::Cube4));
        assert_eq!(count, 3);
        assert_eq!(seed, None);

        Args::try_parse_from(["cubetimer", "scramble", "--cube", "8x8"])
            .expect_err("no such cube");
        Args::try_parse_from(["cubetimer", "add-solve", "--time", "1", "--penalty", "plus3"])
            .expect_err("no such penalty");
    }

    #[test]
    fn test_seeded_scramble_params() {
        assert_eq!(scramble_params(Some("abc"), 0).seed, "abc");
        assert_eq!(scramble_params(Some("abc"), 2).seed, "abc_2");
        assert_ne!(scramble_params(None, 0).seed, scramble_params(None, 0).seed);
    }

    #[test]
    fn test_find_session() {
        let mut history = History::new();
        let first_id = history.sessions()[0].id.clone();
        let second_id = history.add_session("OH").id.clone();

        assert_eq!(find_session(&history, None).unwrap().id, second_id);
        assert_eq!(find_session(&history, Some("Session 1")).unwrap().id, first_id);
        assert_eq!(find_session(&history, Some(&first_id)).unwrap().id, first_id);
        assert!(find_session(&history, Some("BLD")).is_err());
    }

    #[test]
    fn test_add_solve() {
        let dir = tempfile::tempdir().unwrap();
        let prefs_path = dir.path().join("prefs.yaml");
        let history_path = dir.path().join("history.json");
        let add_solve = |extra_args: &[&str]| {
            let args = [
                "cubetimer",
                "--prefs",
                prefs_path.to_str().unwrap(),
                "add-solve",
                history_path.to_str().unwrap(),
            ]
            .into_iter()
            .chain(extra_args.iter().copied());
            exec(Args::try_parse_from(args).unwrap())
        };

        let scramble = Scramble::new(
            &ValidatedCubeConfig::builtin(CubeType::Cube3),
            ScrambleParams::from_seed("add-solve"),
        )
        .to_string();
        let spaced = scramble.replace(' ', "  ");
        add_solve(&["--time", "12.3456", "--scramble", spaced.as_str()]).unwrap();
        add_solve(&["-t", "9", "-p", "dnf", "-c", "2x2"]).unwrap();
        add_solve(&["--time", "-1"]).expect_err("negative time");
        add_solve(&["--time", "1", "--scramble", "Q"]).expect_err("bad scramble");
        add_solve(&["-t", "5", "-c", "2x2", "--scramble", "3Rw Lw D"])
            .expect_err("wide moves on 2x2");
        add_solve(&["-t", "5", "--scramble", "R U2 F'"]).expect_err("short scramble");
        add_solve(&["-t", "5", "-c", "4x4", "--scramble", scramble.as_str()])
            .expect_err("too short for 4x4");

        let history = History::from_json(&std::fs::read_to_string(&history_path).unwrap()).unwrap();
        let solves = history.solves();
        assert_eq!(solves.len(), 2);

        assert_eq!(solves[0].time_ms, 9000);
        assert_eq!(solves[0].penalty, Penalty::Dnf);
        assert_eq!(solves[0].cube_type, CubeType::Cube2);

        assert_eq!(solves[1].time_ms, 12346);
        assert_eq!(solves[1].penalty, Penalty::Ok);
        assert_eq!(solves[1].scramble, scramble);
        assert_eq!(solves[1].cube_type, CubeType::Cube3);
        assert_eq!(
            solves[1].session_id.as_deref(),
            Some(history.active_session().id.as_str()),
        );
    }

    #[test]
    fn test_invalid_history_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(&path, "not json").unwrap();

        read_history_file(&path).expect_err("invalid history");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "not json");
    }
}
