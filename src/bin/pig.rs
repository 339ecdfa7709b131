use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, ValueEnum};
use rand::SeedableRng;
use rand::rngs::StdRng;

use pigbot::export::DEFAULT_CSV_PATH;
use pigbot::{DEFAULT_EPSILON, PigError, Session, SweepOrder, describe_evaluation, roll_die};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Order {
    Layered,
    Global,
}

impl From<Order> for SweepOrder {
    fn from(order: Order) -> Self {
        match order {
            Order::Layered => SweepOrder::Layered,
            Order::Global => SweepOrder::Global,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "pig", about = "Solve Pig and query the optimal policy interactively.")]
struct Args {
    /// Convergence tolerance for value iteration
    #[arg(short = 'e', long = "epsilon", default_value_t = DEFAULT_EPSILON)]
    epsilon: f64,

    /// Sweep order used by the solver
    #[arg(long = "order", value_enum, default_value = "layered")]
    order: Order,

    /// Seed for the `roll` command (random when omitted)
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    if let Err(err) = run(args) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let mut session = Session::new(args.epsilon).with_order(args.order.into());
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    println!("Welcome to Pig!");
    loop {
        println!();
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some((&command, params)) = tokens.split_first() else {
            continue;
        };
        let outcome = match command {
            "q" | "quit" => break,
            "new" => cmd_new(&mut session, params, &mut lines),
            "query" => cmd_query(&session, params),
            "roll" => cmd_roll(&mut rng, params),
            "save" => cmd_save(&session, params),
            "dump" => cmd_dump(&session, params),
            "load" => cmd_load(&mut session, params),
            "help" => {
                print_usage();
                Ok(())
            }
            other => Err(format!("unknown command '{other}', type help for a list").into()),
        };
        if let Err(err) = outcome {
            match err.downcast_ref::<PigError>() {
                Some(PigError::Unsolved) => println!(
                    "You don't have a solution yet, call new to solve a game of pig first."
                ),
                _ => println!("{err}"),
            }
        }
    }
    Ok(())
}

type Lines<'a> = io::Lines<io::StdinLock<'a>>;

fn cmd_new(
    session: &mut Session,
    params: &[&str],
    lines: &mut Lines<'_>,
) -> Result<(), Box<dyn Error>> {
    let (die, target) = match params {
        [die, target] => (parse_int::<u32>(die)?, parse_int::<u32>(target)?),
        _ => (
            prompt_at_least(lines, "Die size (integer >= 2): ", 2)?,
            prompt_at_least(lines, "Maximum score (integer >= 2): ", 2)?,
        ),
    };
    println!("Calculating optimal play matrix...");
    session.solve_new(die, target)?;
    println!("Done!");
    Ok(())
}

fn cmd_query(session: &Session, params: &[&str]) -> Result<(), Box<dyn Error>> {
    // Checked first so an unsolved session is reported before argument errors.
    session.solution()?;
    let [own, opponent, turn] = params else {
        return Err("need 3 parameters: <own banked> <other banked> <turn total>".into());
    };
    let eval = session.query(parse_int(own)?, parse_int(opponent)?, parse_int(turn)?)?;
    println!("{}", describe_evaluation(&eval));
    Ok(())
}

fn cmd_roll(rng: &mut StdRng, params: &[&str]) -> Result<(), Box<dyn Error>> {
    let [faces] = params else {
        return Err("need 1 parameter: <# of die faces>".into());
    };
    let face = roll_die(rng, parse_int(faces)?)?;
    println!("Result: {face}");
    Ok(())
}

fn cmd_save(session: &Session, params: &[&str]) -> Result<(), Box<dyn Error>> {
    let path = params
        .first()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CSV_PATH));
    println!("saving...");
    let records = session.save_csv(&path)?;
    println!("Done! {records} records written to {}", path.display());
    Ok(())
}

fn cmd_dump(session: &Session, params: &[&str]) -> Result<(), Box<dyn Error>> {
    let [path] = params else {
        return Err("need 1 parameter: <snapshot path>".into());
    };
    session.save_snapshot(Path::new(path))?;
    println!("Snapshot written to {path}");
    Ok(())
}

fn cmd_load(session: &mut Session, params: &[&str]) -> Result<(), Box<dyn Error>> {
    let [path] = params else {
        return Err("need 1 parameter: <snapshot path>".into());
    };
    let settings = session.load_snapshot(Path::new(path))?.settings();
    println!(
        "Loaded solution for a {}-sided die played to {}",
        settings.die, settings.target
    );
    Ok(())
}

fn parse_int<T: std::str::FromStr>(token: &str) -> Result<T, Box<dyn Error>> {
    token
        .parse::<T>()
        .map_err(|_| format!("invalid integer: {token}").into())
}

/// Re-prompts until the user enters an integer no smaller than `min`.
fn prompt_at_least(
    lines: &mut Lines<'_>,
    prompt: &str,
    min: u32,
) -> Result<u32, Box<dyn Error>> {
    loop {
        print!("{prompt}");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            return Err("input closed".into());
        };
        match line?.trim().parse::<u32>() {
            Ok(value) if value >= min => return Ok(value),
            _ => continue,
        }
    }
}

fn print_usage() {
    println!("Commands:");
    println!("  new [die target]          Solve a new game (prompts when omitted)");
    println!("  query <own> <opp> <turn>  Win probability and optimal action");
    println!("  roll <faces>              Roll a die with the given number of faces");
    println!("  save [path]               Export the solution as CSV (default: {DEFAULT_CSV_PATH})");
    println!("  dump <path>               Write a binary snapshot of the solution");
    println!("  load <path>               Load a binary snapshot");
    println!("  q                         Quit");
}
