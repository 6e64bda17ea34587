use clap::Parser;
use pathfinding::prelude::astar;
use std::thread;
use std::time::Duration;

use maze_pathfinder::config::Config;
use maze_pathfinder::engine::{PathfindingResult, SearchEngine};
use maze_pathfinder::frontier::Strategy;
use maze_pathfinder::grid::{manhattan, Grid, Position};
use maze_pathfinder::solve_log::{CsvSolveLog, SolveRecord, SolveSink};

fn main() {
    let config = Config::parse();

    println!("Starting maze search...");
    println!("Grid size: {}x{}", config.grid_size, config.grid_size);
    println!("Walls: {}", config.num_walls);
    println!("Algorithm: {}", config.algorithm);
    if let Some(seed) = config.seed {
        println!("Seed: {} (reproducible layout)", seed);
    }
    println!();

    let grid = Grid::random(config.grid_size, config.num_walls, config.seed);

    if config.algorithm == "all" {
        run_comparison(&grid, &config);
        return;
    }

    let strategy = match config.algorithm.parse::<Strategy>() {
        Ok(strategy) => strategy,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let result = run_search(&grid, strategy, &config);
    report_result(&grid, strategy, &result, &config);
}

/// Drives the engine one step per tick, rendering between steps when
/// visualization is on.
fn run_search(grid: &Grid, strategy: Strategy, config: &Config) -> PathfindingResult {
    let mut engine = SearchEngine::new();
    if let Err(e) = engine.start(grid, grid.start(), grid.end(), strategy) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    let mut visited: Vec<Position> = Vec::new();
    loop {
        let report = engine.step();
        visited.extend(report.delta.newly_visited);

        if !config.no_visualization {
            clear_screen();
            println!("=== MAZE SEARCH ===");
            println!("Algorithm: {} | Visited: {}", strategy, visited.len());
            grid.print_grid(&visited, &[], None);
            thread::sleep(Duration::from_millis(config.step_delay_ms));
        }

        if report.status.is_terminal() {
            match report.result {
                Some(result) => return result,
                None => {
                    // Only cancellation leaves a terminal status without a
                    // result, and nothing cancels in this loop.
                    eprintln!("search ended without a result");
                    std::process::exit(1);
                }
            }
        }
    }
}

fn report_result(grid: &Grid, strategy: Strategy, result: &PathfindingResult, config: &Config) {
    if !result.found {
        println!("No path found!");
        println!("{}", result.stats);
        return;
    }

    println!("Path found! Robot navigating...");
    if !config.no_visualization {
        play_back(grid, &result.path, config);
    }

    println!("\n=== FINAL RESULTS ===");
    println!("{}", result.stats);
    println!("Path length: {}", result.path.len());
    if let Some(optimal) = optimal_path_len(grid) {
        println!("Optimal path length (A* oracle): {}", optimal);
        if result.path.len() > optimal {
            println!(
                "Extra cells over optimal: {}",
                result.path.len() - optimal
            );
        }
    }

    if let Some(log_path) = &config.solve_log {
        let maze_id = match config.seed {
            Some(seed) => format!("random-{seed}"),
            None => "adhoc".to_string(),
        };
        let record = SolveRecord {
            maze_id,
            user_id: "local".to_string(),
            display_name: config.display_name.clone(),
            solve_time_ms: result.stats.solve_time_ms(),
            blocks_covered: result.stats.blocks_covered,
            algorithm: strategy,
        };
        match CsvSolveLog::create(log_path) {
            Ok(mut log) => {
                if let Err(e) = log.record_solve(&record) {
                    eprintln!("Failed to write solve log: {e}");
                } else {
                    println!("Solve recorded to {log_path}");
                }
            }
            Err(e) => eprintln!("Failed to create solve log: {e}"),
        }
    }
}

/// Walks the robot along the finished path at the playback cadence.
fn play_back(grid: &Grid, path: &[Position], config: &Config) {
    thread::sleep(Duration::from_millis(config.playback_lead_in_ms));
    for &pos in path {
        clear_screen();
        println!("=== ROBOT PLAYBACK ===");
        grid.print_grid(&[], path, Some(pos));
        thread::sleep(Duration::from_millis(config.playback_delay_ms));
    }
}

/// Runs every strategy on the same maze and prints a comparison table.
fn run_comparison(grid: &Grid, config: &Config) {
    let mut quiet = config.clone();
    quiet.no_visualization = true;

    println!("Running comparison of {} strategies...", Strategy::ALL.len());
    let optimal = optimal_path_len(grid);
    match optimal {
        Some(optimal) => println!("Optimal path length (A* oracle): {}", optimal),
        None => println!("No path exists in this maze."),
    }
    println!();

    println!(
        "{:<10} {:<8} {:<12} {:<10} {:<10}",
        "Strategy", "Found", "Path Length", "Visited", "Time (ms)"
    );
    println!("{}", "-".repeat(54));

    for strategy in Strategy::ALL {
        let result = run_search(grid, strategy, &quiet);
        println!(
            "{:<10} {:<8} {:<12} {:<10} {:<10}",
            strategy.token(),
            if result.found { "yes" } else { "no" },
            result.path.len(),
            result.visited.len(),
            result.stats.solve_time_ms()
        );
    }
}

/// Shortest path length via the `pathfinding` crate, used as an
/// independent baseline for the table and the extra-cells report.
fn optimal_path_len(grid: &Grid) -> Option<usize> {
    let start = grid.start()?;
    let end = grid.end()?;
    astar(
        &start,
        |&pos| {
            grid.open_neighbors(pos)
                .into_iter()
                .map(|next| (next, 1u32))
                .collect::<Vec<_>>()
        },
        |&pos| manhattan(pos, end),
        |&pos| pos == end,
    )
    .map(|(path, _)| path.len())
}

fn clear_screen() {
    print!("\x1B[2J\x1B[1;1H");
}
