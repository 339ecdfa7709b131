//! Persistence for solved configurations.
//!
//! The CSV dump is write-only and meant for plotting. The binary snapshot
//! round-trips a whole [`Solution`] so large targets need not be re-solved.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use log::info;

use crate::error::PigError;
use crate::solution::Solution;

pub const CSV_HEADER: &str = "i,j,k,roll,p";
pub const DEFAULT_CSV_PATH: &str = "savedsolution.csv";

/// Writes one `i,j,k,roll,p` record per stored state. Returns the record count.
pub fn write_csv<W: Write>(solution: &Solution, mut out: W) -> Result<usize, PigError> {
    writeln!(out, "{CSV_HEADER}")?;
    let mut records = 0usize;
    for record in solution.records() {
        writeln!(
            out,
            "{},{},{},{},{:.6}",
            record.state.own,
            record.state.opponent,
            record.state.turn,
            u8::from(record.roll),
            record.win_probability
        )?;
        records += 1;
    }
    out.flush()?;
    Ok(records)
}

pub fn save_csv(solution: &Solution, path: &Path) -> Result<usize, PigError> {
    let file = File::create(path)?;
    let records = write_csv(solution, BufWriter::new(file))?;
    info!("wrote {records} records to {}", path.display());
    Ok(records)
}

pub fn encode_snapshot(solution: &Solution) -> Result<Vec<u8>, PigError> {
    Ok(bincode::serde::encode_to_vec(
        solution,
        bincode::config::standard(),
    )?)
}

pub fn decode_snapshot(bytes: &[u8]) -> Result<Solution, PigError> {
    let (solution, _): (Solution, usize) =
        bincode::serde::decode_from_slice(bytes, bincode::config::standard())?;
    solution.validate()?;
    Ok(solution)
}

pub fn save_snapshot(solution: &Solution, path: &Path) -> Result<(), PigError> {
    fs::write(path, encode_snapshot(solution)?)?;
    info!("snapshot saved to {}", path.display());
    Ok(())
}

pub fn load_snapshot(path: &Path) -> Result<Solution, PigError> {
    let solution = decode_snapshot(&fs::read(path)?)?;
    info!("snapshot loaded from {}", path.display());
    Ok(solution)
}
