use rustc_hash::{FxHashMap, FxHashSet};

use crate::exploration::{ExplorationRecord, NodeRole};
use crate::frontier::{CostHint, Frontier, Strategy};
use crate::grid::{manhattan, Cell, Grid, Position, DIRECTIONS};
use crate::path::reconstruct;
use crate::stats::{SearchStats, StatsCollector};

/// State machine of one engine instance. `Found`, `Exhausted` and
/// `Cancelled` are terminal; a new `start()` is required to leave them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    Idle,
    Running,
    Found,
    Exhausted,
    Cancelled,
}

impl SearchStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SearchStatus::Found | SearchStatus::Exhausted | SearchStatus::Cancelled
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub from: Position,
    pub to: Position,
}

/// Incremental output of one `step()`, consumed by the caller to render
/// the search as it progresses.
#[derive(Debug, Clone, Default)]
pub struct StepDelta {
    /// Cell appended to the visited trace this step, if any. The start
    /// and end cells never appear here.
    pub newly_visited: Option<Position>,
    /// Edges discovered this step, in discovery order.
    pub new_edges: Vec<Edge>,
    /// Cells whose exploration record was created or changed this step.
    pub exploration_updates: Vec<Position>,
}

/// Terminal record of a finished (not cancelled) search.
#[derive(Debug, Clone)]
pub struct PathfindingResult {
    pub found: bool,
    /// Start-to-end path inclusive; empty when no path exists.
    pub path: Vec<Position>,
    /// Visited cells in animation order, start/end excluded.
    pub visited: Vec<Position>,
    /// Discovered edges in discovery order.
    pub edges: Vec<Edge>,
    /// Final exploration-tree annotations for every discovered cell.
    pub exploration: FxHashMap<Position, ExplorationRecord>,
    pub stats: SearchStats,
}

#[derive(Debug)]
pub struct StepReport {
    pub status: SearchStatus,
    pub delta: StepDelta,
    /// Present exactly when `status` is `Found` or `Exhausted`.
    pub result: Option<PathfindingResult>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Start or end cell unset at `start()` time. No partial search state
    /// is created.
    InvalidConfiguration { reason: &'static str },
    /// `start()` was called while a search is `Running`; the caller must
    /// `cancel()` first.
    SearchInProgress,
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::InvalidConfiguration { reason } => {
                write!(f, "invalid configuration: {reason}")
            }
            EngineError::SearchInProgress => {
                write!(f, "a search is already running; cancel it before starting another")
            }
        }
    }
}

impl std::error::Error for EngineError {}

/// Everything owned by one search invocation. Created at `start()`,
/// mutated only by `step()`, dropped at a terminal transition or on
/// `cancel()`.
#[derive(Debug)]
struct SearchState {
    grid: Grid,
    start: Position,
    end: Position,
    strategy: Strategy,
    frontier: Frontier,
    /// Admission set for DFS/BFS: cells are marked here when they enter
    /// the frontier, so they are never admitted twice.
    visited: FxHashSet<Position>,
    /// Finalized cells for the cost-based strategies.
    closed: FxHashSet<Position>,
    parent: FxHashMap<Position, Position>,
    g_score: FxHashMap<Position, u32>,
    exploration: FxHashMap<Position, ExplorationRecord>,
    next_order: u32,
    trace_visited: Vec<Position>,
    trace_edges: Vec<Edge>,
    stats: StatsCollector,
}

enum StepOutcome {
    Continue(StepDelta),
    Terminal { found: bool, path: Vec<Position> },
}

impl SearchState {
    /// Expands `current`: records it in the visited trace, enumerates its
    /// 4-neighborhood and admits or relaxes each admissible neighbor,
    /// then finalizes the cell's exploration role.
    fn expand(&mut self, current: Position) -> StepDelta {
        let mut delta = StepDelta::default();

        if current != self.start && current != self.end {
            self.trace_visited.push(current);
            delta.newly_visited = Some(current);
        }
        if self.strategy.uses_costs() {
            self.closed.insert(current);
        }

        let mut dirs = DIRECTIONS;
        if self.strategy == Strategy::Dfs {
            // Pushed in reverse so the stack pops Up, Down, Left, Right.
            dirs.reverse();
        }

        let mut admitted = false;
        for (dr, dc) in dirs {
            let Some(next) = self.grid.neighbor(current, dr, dc) else {
                continue;
            };
            if self.grid.cell(next) == Cell::Wall {
                continue;
            }

            if self.strategy.uses_costs() {
                if self.closed.contains(&next) {
                    continue;
                }
                let tentative = self.g_score.get(&current).copied().unwrap_or(0) + 1;
                let known = self.g_score.get(&next).copied();
                if let Some(g) = known {
                    if tentative >= g {
                        continue;
                    }
                }
                self.parent.insert(next, current);
                self.g_score.insert(next, tentative);
                let f = match self.strategy {
                    Strategy::AStar => tentative + manhattan(next, self.end),
                    _ => tentative,
                };
                self.frontier.insert(next, CostHint { g: tentative, f });
                if known.is_none() {
                    self.admit(current, next, &mut delta);
                    admitted = true;
                } else {
                    self.relax(current, next, &mut delta);
                }
            } else {
                if !self.visited.insert(next) {
                    continue;
                }
                self.frontier.insert(next, CostHint::default());
                self.parent.insert(next, current);
                self.admit(current, next, &mut delta);
                admitted = true;
            }
        }

        // The root keeps its role; every other expanded cell settles as
        // parent or leaf.
        if current != self.start {
            if let Some(record) = self.exploration.get_mut(&current) {
                record.role = if admitted {
                    NodeRole::Parent
                } else {
                    NodeRole::Leaf
                };
            }
        }
        delta.exploration_updates.push(current);

        delta
    }

    /// First discovery of `next`: assigns the next order value and hooks
    /// it into the exploration tree under `current`.
    fn admit(&mut self, current: Position, next: Position, delta: &mut StepDelta) {
        let edge = Edge {
            from: current,
            to: next,
        };
        self.trace_edges.push(edge);
        delta.new_edges.push(edge);

        let order = self.next_order;
        self.next_order += 1;
        self.exploration
            .insert(next, ExplorationRecord::child(order, current));
        if let Some(record) = self.exploration.get_mut(&current) {
            record.children.push(next);
        }
        delta.exploration_updates.push(next);
    }

    /// A cheaper route to an already-discovered open cell: re-parent it
    /// without renumbering. Children lists are append-only.
    fn relax(&mut self, current: Position, next: Position, delta: &mut StepDelta) {
        let edge = Edge {
            from: current,
            to: next,
        };
        self.trace_edges.push(edge);
        delta.new_edges.push(edge);

        if let Some(record) = self.exploration.get_mut(&next) {
            record.parent = Some(current);
        }
        if let Some(record) = self.exploration.get_mut(&current) {
            record.children.push(next);
        }
        delta.exploration_updates.push(next);
    }
}

/// Drives one strategy through the cooperative step loop. The caller owns
/// the cadence: invoke [`SearchEngine::step`] once per tick (the reference
/// UI ticks every 20 ms) and render the returned delta between ticks.
/// At most one search is active per engine instance.
#[derive(Debug)]
pub struct SearchEngine {
    status: SearchStatus,
    state: Option<SearchState>,
    result: Option<PathfindingResult>,
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchEngine {
    pub fn new() -> Self {
        SearchEngine {
            status: SearchStatus::Idle,
            state: None,
            result: None,
        }
    }

    pub fn status(&self) -> SearchStatus {
        self.status
    }

    /// The terminal result of the last search, once `Found` or
    /// `Exhausted` is reached.
    pub fn result(&self) -> Option<&PathfindingResult> {
        self.result.as_ref()
    }

    /// Begins a search over a snapshot of `grid`. The start and end cells
    /// are passed explicitly (they may coincide, which yields a trivial
    /// path of length 1); `None` for either is an `InvalidConfiguration`.
    /// Placement on a wall cell is a caller precondition, not re-checked
    /// here.
    pub fn start(
        &mut self,
        grid: &Grid,
        start: Option<Position>,
        end: Option<Position>,
        strategy: Strategy,
    ) -> Result<(), EngineError> {
        if self.status == SearchStatus::Running {
            return Err(EngineError::SearchInProgress);
        }
        let start = start.ok_or(EngineError::InvalidConfiguration {
            reason: "start cell is not set",
        })?;
        let end = end.ok_or(EngineError::InvalidConfiguration {
            reason: "end cell is not set",
        })?;

        let mut state = SearchState {
            grid: grid.clone(),
            start,
            end,
            strategy,
            frontier: Frontier::for_strategy(strategy),
            visited: FxHashSet::default(),
            closed: FxHashSet::default(),
            parent: FxHashMap::default(),
            g_score: FxHashMap::default(),
            exploration: FxHashMap::default(),
            next_order: 2,
            trace_visited: Vec::new(),
            trace_edges: Vec::new(),
            stats: StatsCollector::start(),
        };

        let f = match strategy {
            Strategy::AStar => manhattan(start, end),
            _ => 0,
        };
        state.frontier.insert(start, CostHint { g: 0, f });
        if strategy.uses_costs() {
            state.g_score.insert(start, 0);
        } else {
            state.visited.insert(start);
        }
        state.exploration.insert(start, ExplorationRecord::root());

        self.state = Some(state);
        self.result = None;
        self.status = SearchStatus::Running;
        Ok(())
    }

    /// Advances the search by one expansion. Synchronous and
    /// non-blocking; a no-op (reporting the current status) when the
    /// engine is not `Running`.
    pub fn step(&mut self) -> StepReport {
        if self.status != SearchStatus::Running {
            return StepReport {
                status: self.status,
                delta: StepDelta::default(),
                result: self.result.clone(),
            };
        }

        let outcome = {
            let state = self.state.as_mut().expect("running engine owns a search state");
            match state.frontier.extract_next() {
                None => StepOutcome::Terminal {
                    found: false,
                    path: Vec::new(),
                },
                Some(current) if current == state.end => StepOutcome::Terminal {
                    found: true,
                    path: reconstruct(&state.parent, state.start, current),
                },
                Some(current) => StepOutcome::Continue(state.expand(current)),
            }
        };

        match outcome {
            StepOutcome::Continue(delta) => StepReport {
                status: SearchStatus::Running,
                delta,
                result: None,
            },
            StepOutcome::Terminal { found, path } => {
                let state = self.state.take().expect("running engine owns a search state");
                let stats = state.stats.finish(state.trace_visited.len());
                let result = PathfindingResult {
                    found,
                    path,
                    visited: state.trace_visited,
                    edges: state.trace_edges,
                    exploration: state.exploration,
                    stats,
                };
                self.status = if found {
                    SearchStatus::Found
                } else {
                    SearchStatus::Exhausted
                };
                self.result = Some(result.clone());
                StepReport {
                    status: self.status,
                    delta: StepDelta::default(),
                    result: Some(result),
                }
            }
        }
    }

    /// Discards the in-flight search, effective immediately. Idempotent;
    /// a no-op from `Idle` or any terminal state. Must be called before
    /// mutating the source grid or starting a new search mid-run.
    pub fn cancel(&mut self) {
        if self.status == SearchStatus::Running {
            self.state = None;
            self.status = SearchStatus::Cancelled;
        }
    }
}
