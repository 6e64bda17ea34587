use rustc_hash::FxHashMap;

use crate::grid::Position;

/// Walks the parent map from `goal` back to `start` and returns the path
/// in start-to-goal order, both endpoints included.
///
/// The parent map forms a tree rooted at the start cell, so the walk must
/// terminate there; a map that cycles or bottoms out elsewhere is a
/// corrupt engine state, and this asserts instead of returning a wrong
/// path.
pub fn reconstruct(
    parent: &FxHashMap<Position, Position>,
    start: Position,
    goal: Position,
) -> Vec<Position> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(&prev) = parent.get(&current) {
        path.push(prev);
        current = prev;
        assert!(
            path.len() <= parent.len() + 1,
            "cycle in parent map while reconstructing path through {current}"
        );
    }
    assert_eq!(
        current, start,
        "parent map walk from {goal} did not terminate at the start cell {start}"
    );
    path.reverse();
    path
}
