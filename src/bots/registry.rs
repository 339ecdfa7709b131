use std::error::Error;
use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::Bot;
use crate::solution::Solution;
use crate::state::GameSettings;
use crate::{HoldAtBot, OptimalBot, RandomBot};

/// Returns a normalized label for a bot spec (the head token before any ':').
pub fn label_for_spec(spec: &str) -> String {
    spec.split(':')
        .next()
        .unwrap_or(spec)
        .trim()
        .to_ascii_lowercase()
}

/// Whether a spec needs a solved policy to be constructed.
pub fn needs_solution(spec: &str) -> bool {
    label_for_spec(spec) == "optimal"
}

/// Create a bot instance for a game played under `settings` from a CLI-style spec.
/// Supported specs:
/// - optimal
/// - hold[:threshold]
/// - random[:seed]
pub fn create_bot_from_spec(
    spec: &str,
    index: usize,
    seed: u64,
    settings: GameSettings,
    solution: Option<&Arc<Solution>>,
) -> Result<Box<dyn Bot>, Box<dyn Error>> {
    let value = spec.split_once(':').map(|(_, value)| value.trim());
    match label_for_spec(spec).as_str() {
        "optimal" => {
            let solution = solution.ok_or("the optimal bot requires a solved game")?;
            Ok(Box::new(OptimalBot::for_settings(
                Arc::clone(solution),
                settings,
            )?))
        }
        "hold" => match value {
            Some(threshold) => {
                let threshold = threshold
                    .parse::<u32>()
                    .map_err(|_| format!("invalid hold threshold: {threshold}"))?;
                Ok(Box::new(HoldAtBot::new(threshold)?))
            }
            None => Ok(Box::new(HoldAtBot::default())),
        },
        "random" => {
            let custom_seed = value
                .and_then(|value| value.parse::<u64>().ok())
                .unwrap_or(seed ^ ((index as u64 + 1) * 0x9E37_79B9));
            Ok(Box::new(RandomBot::new(StdRng::seed_from_u64(custom_seed))))
        }
        _ => Err(format!("unrecognized bot spec: {spec}").into()),
    }
}
