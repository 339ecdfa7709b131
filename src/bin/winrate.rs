use std::collections::HashMap;
use std::error::Error;
use std::process;
use std::sync::Arc;

use clap::Parser;
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use pigbot::{
    Bot, DEFAULT_EPSILON, Game, GameSettings, PigError, SolverConfig, create_bot_from_spec,
    needs_solution, solve,
};

/// Default base seed for deterministic runs.
const DEFAULT_SEED: u64 = 0xC0FFEE_u64 << 32 | 0x5EED_u64;

#[derive(Parser, Debug)]
#[command(
    name = "winrate",
    about = "Play many games of Pig between two bots and report per-seat win rates."
)]
struct Args {
    /// Number of games to simulate
    #[arg(short = 'g', long = "games", default_value_t = 1000)]
    games: usize,

    /// Number of faces on the die
    #[arg(short = 'd', long = "die", default_value_t = 6)]
    die: u32,

    /// Score needed to win
    #[arg(short = 't', long = "target", default_value_t = 100)]
    target: u32,

    /// Convergence tolerance when an optimal bot needs a solve
    #[arg(short = 'e', long = "epsilon", default_value_t = DEFAULT_EPSILON)]
    epsilon: f64,

    /// Base RNG seed (dice and bot RNGs are derived deterministically)
    #[arg(short = 's', long = "seed", default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Safety cap on actions per game; games exceeding this are aborted
    #[arg(long = "max-actions", default_value_t = 100_000)]
    max_actions: usize,

    /// Two bot specs: optimal, hold[:N], random[:seed]
    bots: Vec<String>,
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
    if args.bots.len() != 2 {
        return Err(format!("expected exactly 2 bot specs, received {}", args.bots.len()).into());
    }
    let settings = GameSettings::new(args.die, args.target)?;

    let solution = if args.bots.iter().any(|spec| needs_solution(spec)) {
        println!(
            "Solving {}-sided pig to {} for the optimal bot...",
            settings.die, settings.target
        );
        let config = SolverConfig::from_settings(settings).with_epsilon(args.epsilon);
        Some(Arc::new(solve(&config)?))
    } else {
        None
    };

    let mut wins_per_label: HashMap<String, usize> = HashMap::new();
    let mut seats_per_label: HashMap<String, usize> = HashMap::new();
    let mut first_seat_wins: HashMap<String, usize> = HashMap::new();
    let mut first_seats: HashMap<String, usize> = HashMap::new();
    let mut aborted_games = 0usize;
    // Full specs keep `hold:15` and `hold:25` apart.
    let labels_for_spec: Vec<String> = args
        .bots
        .iter()
        .map(|s| s.trim().to_ascii_lowercase())
        .collect();

    for game_idx in 0..args.games {
        // Permute seating each game for fairness.
        let mut indices: Vec<usize> = vec![0, 1];
        let mut seat_rng = StdRng::seed_from_u64(args.seed ^ 0x9E37_79B9 ^ (game_idx as u64));
        indices.shuffle(&mut seat_rng);

        let dice_seed = mix_seed(args.seed, game_idx as u64, 0x5EED_15);
        let mut game = Game::builder(settings.die, settings.target)?
            .with_seed(dice_seed)
            .build()?;

        let mut bots: Vec<Box<dyn Bot>> = Vec::with_capacity(2);
        let mut labels: Vec<String> = Vec::with_capacity(2);
        for (seat, src_idx) in indices.iter().enumerate() {
            let bot_seed = mix_seed(args.seed, game_idx as u64, seat as u64);
            bots.push(create_bot_from_spec(
                &args.bots[*src_idx],
                seat,
                bot_seed,
                settings,
                solution.as_ref(),
            )?);
            labels.push(labels_for_spec[*src_idx].clone());
        }
        for label in &labels {
            *seats_per_label.entry(label.clone()).or_default() += 1;
        }
        *first_seats.entry(labels[0].clone()).or_default() += 1;

        let mut actions = 0usize;
        while !game.is_finished() && actions < args.max_actions {
            let current = game.current_player();
            let state = game.state_view(current)?;
            let legal = game.legal_actions(current)?;
            if legal.is_empty() {
                return Err(PigError::InvalidConfiguration("no legal actions available").into());
            }
            let action = bots[current].select_action(&state, &legal);
            game.apply_action(current, action)?;
            actions += 1;
        }

        match game.winner() {
            Some(winner) => {
                *wins_per_label.entry(labels[winner].clone()).or_default() += 1;
                if winner == 0 {
                    *first_seat_wins.entry(labels[0].clone()).or_default() += 1;
                }
            }
            None => aborted_games += 1,
        }
    }
    info!("simulated {} games", args.games);

    let mut results: Vec<(String, f64, usize, usize)> = seats_per_label
        .iter()
        .map(|(label, &seats)| {
            let wins = *wins_per_label.get(label).unwrap_or(&0);
            let rate = if seats > 0 {
                wins as f64 / seats as f64
            } else {
                0.0
            };
            (label.clone(), rate, wins, seats)
        })
        .collect();
    results.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });

    println!("Win rates (per-seat):");
    for (label, rate, wins, seats) in &results {
        let first = *first_seats.get(label).unwrap_or(&0);
        let first_wins = *first_seat_wins.get(label).unwrap_or(&0);
        let first_rate = if first > 0 {
            first_wins as f64 / first as f64
        } else {
            0.0
        };
        println!(
            "  {label:<10}  {wins}/{seats}  ({:.2}%)   moving first: {first_wins}/{first} ({:.2}%)",
            rate * 100.0,
            first_rate * 100.0
        );
    }
    if aborted_games > 0 {
        println!("\nNote: {aborted_games} game(s) hit the action cap without a winner.");
    }
    Ok(())
}

fn mix_seed(base: u64, a: u64, b: u64) -> u64 {
    let mut z =
        base ^ (a.wrapping_mul(0x9E37_79B97F4A7C15)) ^ (b.wrapping_mul(0xBF58_476D1CE4E5B9));
    z ^= z >> 12;
    z ^= z << 25;
    z ^= z >> 27;
    z
}
