use clap::Parser;

use crate::grid::DEFAULT_GRID_SIZE;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    #[arg(long, default_value_t = DEFAULT_GRID_SIZE)]
    pub grid_size: usize,

    #[arg(long, default_value_t = 15)]
    pub num_walls: usize,

    /// One of DFS, BFS, Dijkstra, A*, or "all" to compare them.
    #[arg(long, default_value = "BFS")]
    pub algorithm: String,

    /// Milliseconds between search steps when visualizing.
    #[arg(long, default_value_t = 20)]
    pub step_delay_ms: u64,

    /// Milliseconds between robot moves during path playback.
    #[arg(long, default_value_t = 100)]
    pub playback_delay_ms: u64,

    /// Pause before playback begins.
    #[arg(long, default_value_t = 500)]
    pub playback_lead_in_ms: u64,

    /// Seed for reproducible maze layouts.
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, default_value_t = false)]
    pub no_visualization: bool,

    /// CSV file to append solve records to.
    #[arg(long)]
    pub solve_log: Option<String>,

    /// Name written into solve records.
    #[arg(long, default_value = "guest")]
    pub display_name: String,
}
