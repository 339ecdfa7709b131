use crate::error::PigError;
use crate::solver::action_values;
use crate::table::StateTable;

/// Derives the roll/hold table from a converged value table.
///
/// Both choices are re-evaluated against the final values rather than taken
/// from the last solver sweep, since layers were finalized independently.
pub fn extract_policy(values: &StateTable<f64>, die: u32) -> Result<StateTable<bool>, PigError> {
    let mut policy = StateTable::new(values.target(), false)?;
    for (i, j, k) in values.coordinates() {
        policy.set(i, j, k, action_values(values, die, i, j, k).prefers_roll());
    }
    Ok(policy)
}
