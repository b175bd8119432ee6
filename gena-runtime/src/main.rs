mod input;

use anyhow::{anyhow, Result};
use clap::{arg, ArgAction, Command};
use gena_challenges::tower::{self, Challenge, ResultMode, SearchResult, Solution, Track};
use gena_utils::{calc_seed, compress_obj, dejsonify, jsonify};
use input::{load, parse_disc_positions};
use log::info;
use serde_json::{Map, Value};
use std::{cell::RefCell, fs, path::PathBuf};
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("gena-runtime")
        .about("Solves, generates or verifies tower rearrangement puzzles")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("solve")
                .about("Computes the minimum number of moves that stacks every disc on rod 1")
                .arg(
                    arg!(<DISC_POSITIONS> "Rod of each disc: '1,4,1', a json array, or path to json file")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(arg!(<NUM_RODS> "Number of rods").value_parser(clap::value_parser!(usize)))
                .arg(
                    arg!(--path "Print every state from the initial tower to the restored one")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("generate_instance")
                .about("Generates a random challenge")
                .arg(
                    arg!(<TRACK> "Track string, e.g. num_discs=10,num_rods=4")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(<RAND_HASH> "A string used in seed generation")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(arg!(<NONCE> "Nonce value").value_parser(clap::value_parser!(u64))),
        )
        .subcommand(
            Command::new("compute_solution")
                .about("Computes an optimal solution for a challenge")
                .arg(
                    arg!(<CHALLENGE> "Challenge json string, path to json file, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--hyperparameters [HYPERPARAMETERS] "Hyperparameters json string")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--output [OUTPUT_FILE] "If set, the solution will be saved to this file path (default json)")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(--compress "If output file is set, the solution will be compressed as zlib")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("verify_solution")
                .about("Verifies a solution")
                .arg(
                    arg!(<CHALLENGE> "Challenge json string, path to json file, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(<SOLUTION> "Solution json string, path to json file, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                ),
        )
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();
    let matches = cli().get_matches();

    if let Err(e) = match matches.subcommand() {
        Some(("solve", sub_m)) => solve(
            sub_m.get_one::<String>("DISC_POSITIONS").unwrap().clone(),
            *sub_m.get_one::<usize>("NUM_RODS").unwrap(),
            sub_m.get_flag("path"),
        ),
        Some(("generate_instance", sub_m)) => generate_instance(
            sub_m.get_one::<String>("TRACK").unwrap().clone(),
            sub_m.get_one::<String>("RAND_HASH").unwrap().clone(),
            *sub_m.get_one::<u64>("NONCE").unwrap(),
        ),
        Some(("compute_solution", sub_m)) => compute_solution(
            sub_m.get_one::<String>("CHALLENGE").unwrap().clone(),
            sub_m.get_one::<String>("hyperparameters").cloned(),
            sub_m.get_one::<PathBuf>("output").cloned(),
            sub_m.get_flag("compress"),
        ),
        Some(("verify_solution", sub_m)) => verify_solution(
            sub_m.get_one::<String>("CHALLENGE").unwrap().clone(),
            sub_m.get_one::<String>("SOLUTION").unwrap().clone(),
        ),
        _ => Err(anyhow!("Invalid subcommand")),
    } {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

pub fn solve(disc_positions: String, num_rods: usize, show_path: bool) -> Result<()> {
    let disc_positions = parse_disc_positions(&disc_positions)?;
    let mode = if show_path {
        ResultMode::Path
    } else {
        ResultMode::MoveCount
    };
    match tower::solve(&disc_positions, num_rods, mode)? {
        Some(SearchResult::Path(path)) => {
            for state in &path {
                println!("{}", state);
            }
            println!("Num moves: {}", path.len() - 1);
        }
        Some(SearchResult::MoveCount(count)) => println!("{}", count),
        None => {
            eprintln!("No solution found");
            std::process::exit(85);
        }
    }
    Ok(())
}

pub fn generate_instance(track: String, rand_hash: String, nonce: u64) -> Result<()> {
    let track: Track = track.parse()?;
    let seed = calc_seed(&rand_hash, nonce);
    let challenge = Challenge::generate_instance(&seed, &track)?;
    info!("generated {} with disc positions {:?}", track, challenge.disc_positions);
    println!("{}", jsonify(&challenge));
    Ok(())
}

pub fn compute_solution(
    challenge: String,
    hyperparameters: Option<String>,
    output_file: Option<PathBuf>,
    compress: bool,
) -> Result<()> {
    let challenge: Challenge = load(&challenge, "challenge")?;
    challenge.validate()?;
    let hyperparameters = hyperparameters
        .map(|h| {
            dejsonify::<Map<String, Value>>(&h)
                .map_err(|e| anyhow!("Failed to parse hyperparameters: {}", e))
        })
        .transpose()?;

    let solution = RefCell::new(Option::<Solution>::None);
    let save_solution_fn = |s: &Solution| -> Result<()> {
        *solution.borrow_mut() = Some(s.clone());
        Ok(())
    };
    tower::baselines::bfs::solve_challenge(&challenge, &save_solution_fn, &hyperparameters)?;

    let Some(solution) = solution.into_inner() else {
        eprintln!("No solution found");
        std::process::exit(85);
    };
    info!("solved in {} moves", solution.moves.len());
    if let Some(path) = output_file {
        if compress {
            fs::write(&path, compress_obj(&solution)?)?;
        } else {
            fs::write(&path, jsonify(&solution))?;
        }
        println!("solution written to: {:?}", path);
    } else {
        println!("{}", jsonify(&solution));
    }
    Ok(())
}

pub fn verify_solution(challenge: String, solution: String) -> Result<()> {
    let challenge: Challenge = load(&challenge, "challenge")?;
    let solution: Solution = load(&solution, "solution")?;

    match challenge.verify_solution(&solution) {
        Ok(_) => println!("Solution is valid"),
        Err(e) => {
            eprintln!("Verification error: Invalid solution: {}", e);
            std::process::exit(1);
        }
    }
    Ok(())
}
