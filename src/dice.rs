use rand::Rng;

use crate::error::PigError;

/// Rolls a fair die with `faces` sides, returning a value in `1..=faces`.
pub fn roll_die<R: Rng + ?Sized>(rng: &mut R, faces: u32) -> Result<u32, PigError> {
    if faces == 0 {
        return Err(PigError::InvalidConfiguration(
            "die must have at least 1 face",
        ));
    }
    Ok(rng.gen_range(1..=faces))
}
