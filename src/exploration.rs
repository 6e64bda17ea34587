use crate::grid::Position;

/// Structural role of a cell in the discovery tree induced by the parent
/// map. Every non-root cell starts as `Child` and is finalized to
/// `Parent` or `Leaf` when it is expanded; cells still waiting in the
/// frontier at termination stay `Child`. The start cell is `Root` and is
/// never reclassified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    Root,
    Parent,
    Child,
    Leaf,
}

impl std::fmt::Display for NodeRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            NodeRole::Root => "root",
            NodeRole::Parent => "parent",
            NodeRole::Child => "child",
            NodeRole::Leaf => "leaf",
        })
    }
}

/// Per-cell annotation created on first discovery and mutated in place
/// until the search terminates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplorationRecord {
    pub role: NodeRole,
    /// 1-based discovery order; 1 is the start cell, and the counter
    /// advances each time a cell is first admitted to the frontier.
    pub order: u32,
    pub parent: Option<Position>,
    /// Append-only; grows as this cell's neighbors are discovered.
    pub children: Vec<Position>,
}

impl ExplorationRecord {
    /// The record seeded for the start cell.
    pub fn root() -> Self {
        ExplorationRecord {
            role: NodeRole::Root,
            order: 1,
            parent: None,
            children: Vec::new(),
        }
    }

    /// A freshly discovered cell, provisional `Child` until expanded.
    pub fn child(order: u32, parent: Position) -> Self {
        ExplorationRecord {
            role: NodeRole::Child,
            order,
            parent: Some(parent),
            children: Vec::new(),
        }
    }
}
