use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::frontier::Strategy;

/// What gets handed to the persistence side after a successful solve.
/// The engine itself never sees this; the driving application builds it
/// from the terminal [`crate::engine::PathfindingResult`].
#[derive(Debug, Clone)]
pub struct SolveRecord {
    pub maze_id: String,
    pub user_id: String,
    pub display_name: String,
    pub solve_time_ms: u64,
    pub blocks_covered: usize,
    pub algorithm: Strategy,
}

/// Collaborator seam for recording finished solves. The core hands over a
/// record and has no knowledge of how or whether it is stored.
pub trait SolveSink {
    fn record_solve(&mut self, record: &SolveRecord) -> io::Result<()>;
}

/// Appends solve records to a CSV file and keeps running aggregates.
pub struct CsvSolveLog {
    path: PathBuf,
    solve_count: usize,
    total_solve_time_ms: u64,
}

impl CsvSolveLog {
    /// Creates the file and writes the header row, truncating any
    /// previous log at the same path.
    pub fn create(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)?;
        writeln!(
            file,
            "maze_id,user_id,display_name,solve_time_ms,blocks_covered,algorithm"
        )?;
        Ok(CsvSolveLog {
            path,
            solve_count: 0,
            total_solve_time_ms: 0,
        })
    }

    pub fn solve_count(&self) -> usize {
        self.solve_count
    }

    /// Mean solve time over everything recorded so far, in milliseconds.
    pub fn average_solve_time_ms(&self) -> f64 {
        if self.solve_count == 0 {
            return 0.0;
        }
        self.total_solve_time_ms as f64 / self.solve_count as f64
    }
}

impl SolveSink for CsvSolveLog {
    fn record_solve(&mut self, record: &SolveRecord) -> io::Result<()> {
        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        writeln!(
            file,
            "{},{},{},{},{},{}",
            record.maze_id,
            record.user_id,
            record.display_name,
            record.solve_time_ms,
            record.blocks_covered,
            record.algorithm
        )?;
        self.solve_count += 1;
        self.total_solve_time_ms += record.solve_time_ms;
        Ok(())
    }
}
