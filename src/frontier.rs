use std::collections::VecDeque;
use std::str::FromStr;

use crate::grid::Position;

/// The four expansion-order policies, selected once before a run starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    Dfs,
    Bfs,
    Dijkstra,
    AStar,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::Dfs,
        Strategy::Bfs,
        Strategy::Dijkstra,
        Strategy::AStar,
    ];

    /// The external name of the strategy.
    pub fn token(&self) -> &'static str {
        match self {
            Strategy::Dfs => "DFS",
            Strategy::Bfs => "BFS",
            Strategy::Dijkstra => "Dijkstra",
            Strategy::AStar => "A*",
        }
    }

    /// Whether the strategy orders its frontier by accumulated cost and
    /// relaxes already-discovered entries (Dijkstra and A*).
    pub fn uses_costs(&self) -> bool {
        matches!(self, Strategy::Dijkstra | Strategy::AStar)
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStrategyError {
    token: String,
}

impl std::fmt::Display for ParseStrategyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown strategy {:?}; expected one of DFS, BFS, Dijkstra, A*",
            self.token
        )
    }
}

impl std::error::Error for ParseStrategyError {}

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DFS" => Ok(Strategy::Dfs),
            "BFS" => Ok(Strategy::Bfs),
            "Dijkstra" => Ok(Strategy::Dijkstra),
            "A*" => Ok(Strategy::AStar),
            _ => Err(ParseStrategyError {
                token: s.to_string(),
            }),
        }
    }
}

/// Cost data carried into [`Frontier::insert`]. Ignored by the stack and
/// queue variants; for Dijkstra `f` equals `g`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CostHint {
    pub g: u32,
    pub f: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenEntry {
    pub pos: Position,
    pub g: u32,
    pub f: u32,
}

/// Strategy-specific container of pending cells.
///
/// The open-list variant extracts its minimum with a stable linear scan:
/// on equal keys the first-inserted entry wins, and inserting a cell that
/// is already pending re-weights it in place instead of pushing a
/// duplicate. A binary heap would do at larger grid sizes, provided it
/// keeps the same insertion-order tie-break.
#[derive(Debug)]
pub enum Frontier {
    Stack(Vec<Position>),
    Queue(VecDeque<Position>),
    Open { entries: Vec<OpenEntry>, by_f: bool },
}

impl Frontier {
    pub fn for_strategy(strategy: Strategy) -> Self {
        match strategy {
            Strategy::Dfs => Frontier::Stack(Vec::new()),
            Strategy::Bfs => Frontier::Queue(VecDeque::new()),
            Strategy::Dijkstra => Frontier::Open {
                entries: Vec::new(),
                by_f: false,
            },
            Strategy::AStar => Frontier::Open {
                entries: Vec::new(),
                by_f: true,
            },
        }
    }

    pub fn insert(&mut self, pos: Position, hint: CostHint) {
        match self {
            Frontier::Stack(stack) => stack.push(pos),
            Frontier::Queue(queue) => queue.push_back(pos),
            Frontier::Open { entries, .. } => {
                if let Some(entry) = entries.iter_mut().find(|entry| entry.pos == pos) {
                    entry.g = hint.g;
                    entry.f = hint.f;
                } else {
                    entries.push(OpenEntry {
                        pos,
                        g: hint.g,
                        f: hint.f,
                    });
                }
            }
        }
    }

    pub fn extract_next(&mut self) -> Option<Position> {
        match self {
            Frontier::Stack(stack) => stack.pop(),
            Frontier::Queue(queue) => queue.pop_front(),
            Frontier::Open { entries, by_f } => {
                if entries.is_empty() {
                    return None;
                }
                let mut best = 0;
                for i in 1..entries.len() {
                    let key = if *by_f { entries[i].f } else { entries[i].g };
                    let best_key = if *by_f {
                        entries[best].f
                    } else {
                        entries[best].g
                    };
                    // Strict comparison keeps the tie-break stable.
                    if key < best_key {
                        best = i;
                    }
                }
                Some(entries.remove(best).pos)
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Frontier::Stack(stack) => stack.is_empty(),
            Frontier::Queue(queue) => queue.is_empty(),
            Frontier::Open { entries, .. } => entries.is_empty(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Frontier::Stack(stack) => stack.len(),
            Frontier::Queue(queue) => queue.len(),
            Frontier::Open { entries, .. } => entries.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn strategy_tokens_round_trip() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.token().parse::<Strategy>(), Ok(strategy));
        }
        assert!("dfs".parse::<Strategy>().is_err());
        assert!("AStar".parse::<Strategy>().is_err());
    }

    #[test]
    fn stack_pops_most_recent_first() {
        let mut frontier = Frontier::for_strategy(Strategy::Dfs);
        frontier.insert(p(0, 0), CostHint::default());
        frontier.insert(p(0, 1), CostHint::default());
        assert_eq!(frontier.extract_next(), Some(p(0, 1)));
        assert_eq!(frontier.extract_next(), Some(p(0, 0)));
        assert!(frontier.is_empty());
    }

    #[test]
    fn queue_pops_earliest_first() {
        let mut frontier = Frontier::for_strategy(Strategy::Bfs);
        frontier.insert(p(0, 0), CostHint::default());
        frontier.insert(p(0, 1), CostHint::default());
        assert_eq!(frontier.extract_next(), Some(p(0, 0)));
        assert_eq!(frontier.extract_next(), Some(p(0, 1)));
    }

    #[test]
    fn open_list_breaks_ties_by_insertion_order() {
        let mut frontier = Frontier::for_strategy(Strategy::Dijkstra);
        frontier.insert(p(2, 2), CostHint { g: 3, f: 3 });
        frontier.insert(p(1, 1), CostHint { g: 3, f: 3 });
        frontier.insert(p(0, 0), CostHint { g: 3, f: 3 });
        assert_eq!(frontier.extract_next(), Some(p(2, 2)));
        assert_eq!(frontier.extract_next(), Some(p(1, 1)));
        assert_eq!(frontier.extract_next(), Some(p(0, 0)));
    }

    #[test]
    fn open_list_reweights_in_place() {
        let mut frontier = Frontier::for_strategy(Strategy::AStar);
        frontier.insert(p(0, 0), CostHint { g: 5, f: 9 });
        frontier.insert(p(1, 1), CostHint { g: 2, f: 6 });
        // Relax (0,0) to a better f; no duplicate entry may appear.
        frontier.insert(p(0, 0), CostHint { g: 1, f: 5 });
        assert_eq!(frontier.len(), 2);
        assert_eq!(frontier.extract_next(), Some(p(0, 0)));
        assert_eq!(frontier.extract_next(), Some(p(1, 1)));
    }

    #[test]
    fn astar_orders_by_f_not_g() {
        let mut frontier = Frontier::for_strategy(Strategy::AStar);
        frontier.insert(p(0, 0), CostHint { g: 1, f: 10 });
        frontier.insert(p(1, 1), CostHint { g: 5, f: 6 });
        assert_eq!(frontier.extract_next(), Some(p(1, 1)));
    }
}
