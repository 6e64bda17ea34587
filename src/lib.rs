//! Incremental grid pathfinding: four search strategies sharing one
//! stepping protocol, with an exploration-tree annotator, path
//! reconstruction and run statistics.

pub mod config;
pub mod engine;
pub mod exploration;
pub mod frontier;
pub mod grid;
pub mod path;
pub mod solve_log;
pub mod stats;
