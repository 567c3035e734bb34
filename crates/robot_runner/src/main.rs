//! Robot runner CLI
//!
//! Plan and carry out piece relocations from the command line or over a
//! JSON line protocol.

use std::env;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use robot_core::Board;
use robot_runner::{
    MoveRequest, MoveResponse, RobotConfig, Runner, RunnerError, load_journal, logging,
    recovery_report, run_stdio,
};

const DEFAULT_CONFIG: &str = "robot.toml";

fn print_usage() {
    println!("Chess robot move runner");
    println!();
    println!("Usage:");
    println!("  robot_runner move <uci> (--board <grid.json> | --fen <placement>) [options]");
    println!("  robot_runner plan <uci> (--board <grid.json> | --fen <placement>) [--config <file>]");
    println!("  robot_runner stdio [--plan] [options]");
    println!("  robot_runner journal <journal.json>");
    println!();
    println!("Options:");
    println!("  --config <file>    Robot configuration (default: {DEFAULT_CONFIG} if present)");
    println!("  --dry-run          Report commands without driving the device");
    println!("  --journal <file>   Write the journal of each request to <file>");
    println!();
    println!("Examples:");
    println!("  robot_runner move e2e4 --fen rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR --dry-run");
    println!("  robot_runner stdio --config robot.toml < requests.jsonl");
}

/// Options shared by the subcommands.
#[derive(Default)]
struct Options {
    positional: Vec<String>,
    board: Option<PathBuf>,
    fen: Option<String>,
    config: Option<PathBuf>,
    journal: Option<PathBuf>,
    dry_run: bool,
    plan_only: bool,
}

fn parse_options(args: &[String]) -> Result<Options, RunnerError> {
    let mut opts = Options::default();
    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        let value = || {
            args.get(i + 1)
                .cloned()
                .ok_or_else(|| RunnerError::Usage(format!("{flag} needs a value")))
        };
        match flag {
            "--board" | "-b" => {
                opts.board = Some(PathBuf::from(value()?));
                i += 1;
            }
            "--fen" => {
                opts.fen = Some(value()?);
                i += 1;
            }
            "--config" | "-c" => {
                opts.config = Some(PathBuf::from(value()?));
                i += 1;
            }
            "--journal" | "-j" => {
                opts.journal = Some(PathBuf::from(value()?));
                i += 1;
            }
            "--dry-run" | "-n" => opts.dry_run = true,
            "--plan" => opts.plan_only = true,
            other if other.starts_with('-') => {
                return Err(RunnerError::Usage(format!("unknown option {other}")));
            }
            other => opts.positional.push(other.to_string()),
        }
        i += 1;
    }
    Ok(opts)
}

fn load_config(opts: &Options) -> Result<RobotConfig, RunnerError> {
    let config = match &opts.config {
        Some(path) => RobotConfig::load(path)?,
        None => RobotConfig::load_or_default(DEFAULT_CONFIG)?,
    };
    logging::init(config.log_filter.as_deref());
    Ok(config)
}

fn build_runner(config: &RobotConfig, opts: &Options) -> Result<Runner, RunnerError> {
    let mut runner = Runner::from_config(config, opts.dry_run)?;
    if opts.journal.is_some() {
        runner.set_journal_path(opts.journal.clone());
    }
    Ok(runner)
}

fn read_board(opts: &Options) -> Result<Vec<Vec<String>>, RunnerError> {
    match (&opts.board, &opts.fen) {
        (Some(path), None) => {
            let contents = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&contents)?)
        }
        (None, Some(fen)) => Ok(Board::from_fen_placement(fen)?.to_grid()),
        _ => Err(RunnerError::Usage(
            "give exactly one of --board or --fen".to_string(),
        )),
    }
}

fn single_request(opts: &Options) -> Result<MoveRequest, RunnerError> {
    let mv = opts
        .positional
        .first()
        .ok_or_else(|| RunnerError::Usage("missing move, e.g. e2e4".to_string()))?;
    Ok(MoveRequest::new(mv, read_board(opts)?))
}

/// Print the response; a failed request makes the process exit non-zero.
fn emit(response: &MoveResponse) -> Result<ExitCode, RunnerError> {
    println!("{}", serde_json::to_string_pretty(response)?);
    Ok(if response.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn run_move(args: &[String]) -> Result<ExitCode, RunnerError> {
    let opts = parse_options(args)?;
    let config = load_config(&opts)?;
    let request = single_request(&opts)?;
    let mut runner = build_runner(&config, &opts)?;
    emit(&runner.execute(&request))
}

fn run_plan(args: &[String]) -> Result<ExitCode, RunnerError> {
    let opts = parse_options(args)?;
    let config = load_config(&opts)?;
    let request = single_request(&opts)?;
    let runner = Runner::from_config(&config, true)?;
    emit(&runner.plan(&request))
}

fn run_stdio_loop(args: &[String]) -> Result<ExitCode, RunnerError> {
    let opts = parse_options(args)?;
    let config = load_config(&opts)?;
    let mut runner = build_runner(&config, &opts)?;
    let stdin = io::stdin();
    run_stdio(stdin.lock(), io::stdout(), &mut runner, opts.plan_only)?;
    Ok(ExitCode::SUCCESS)
}

fn show_journal(args: &[String]) -> Result<ExitCode, RunnerError> {
    let path = args
        .first()
        .ok_or_else(|| RunnerError::Usage("missing journal file".to_string()))?;
    let journal = load_journal(Path::new(path))?;
    print!("{}", recovery_report(&journal));
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::FAILURE;
    }

    let result = match args[1].as_str() {
        "move" => run_move(&args[2..]),
        "plan" => run_plan(&args[2..]),
        "stdio" => run_stdio_loop(&args[2..]),
        "journal" => show_journal(&args[2..]),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(ExitCode::SUCCESS)
        }
        other => Err(RunnerError::Usage(format!("unknown command: {other}"))),
    };

    match result {
        Ok(code) => code,
        Err(RunnerError::Usage(msg)) => {
            eprintln!("Error: {msg}");
            print_usage();
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
