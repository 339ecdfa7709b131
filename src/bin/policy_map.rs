use std::error::Error;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use plotters::prelude::*;

use pigbot::{DEFAULT_EPSILON, SolverConfig, hold_thresholds, load_snapshot, solve};

#[derive(Parser, Debug)]
#[command(
    name = "policy_map",
    about = "Render the optimal hold threshold for every pair of banked scores."
)]
struct Args {
    /// Number of faces on the die
    #[arg(short = 'd', long = "die", default_value_t = 6)]
    die: u32,

    /// Score needed to win
    #[arg(short = 't', long = "target", default_value_t = 100)]
    target: u32,

    /// Convergence tolerance for value iteration
    #[arg(short = 'e', long = "epsilon", default_value_t = DEFAULT_EPSILON)]
    epsilon: f64,

    /// Use a snapshot written by `pig dump` instead of solving
    #[arg(long = "snapshot")]
    snapshot: Option<PathBuf>,

    /// Output chart file (png)
    #[arg(short = 'o', long = "out", default_value = "policy.png")]
    out: PathBuf,
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
    let solution = match &args.snapshot {
        Some(path) => load_snapshot(path)?,
        None => {
            let config = SolverConfig::new(args.die, args.target)?.with_epsilon(args.epsilon);
            solve(&config)?
        }
    };
    let settings = solution.settings();
    let thresholds = hold_thresholds(&solution);
    render_heatmap(&args.out, &thresholds, settings.die, settings.target)?;
    println!("Chart written to {}", args.out.display());
    Ok(())
}

fn render_heatmap(
    out: &PathBuf,
    thresholds: &[Vec<u32>],
    die: u32,
    target: u32,
) -> Result<(), Box<dyn Error>> {
    let max_threshold = thresholds
        .iter()
        .flatten()
        .copied()
        .max()
        .unwrap_or(1)
        .max(1);

    let root = BitMapBackend::new(out, (900, 860)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| format!("{e}"))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Pig ({die}-sided die, target {target}): hold at turn total"),
            ("sans-serif", 24).into_font(),
        )
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(0..target, 0..target)
        .map_err(|e| format!("{e}"))?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Own banked score")
        .y_desc("Opponent banked score")
        .draw()
        .map_err(|e| format!("{e}"))?;

    let cells = thresholds.iter().enumerate().flat_map(|(own, row)| {
        row.iter().enumerate().map(move |(opponent, &threshold)| {
            let shade = threshold as f64 / max_threshold as f64;
            let color = HSLColor(0.66 * (1.0 - shade), 0.85, 0.5);
            let (x, y) = (own as u32, opponent as u32);
            Rectangle::new([(x, y), (x + 1, y + 1)], color.filled())
        })
    });
    chart.draw_series(cells).map_err(|e| format!("{e}"))?;

    root.present().map_err(|e| format!("{e}"))?;
    Ok(())
}
