use rand::{Rng, SeedableRng};

/// Grid size of the reference maze (10x10).
pub const DEFAULT_GRID_SIZE: usize = 10;

/// Neighbor offsets in expansion order: Up, Down, Left, Right.
pub const DIRECTIONS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// Manhattan distance between two cells, the A* heuristic for
/// 4-directional unit-cost movement.
pub fn manhattan(a: Position, b: Position) -> u32 {
    ((a.row as i32 - b.row as i32).abs() + (a.col as i32 - b.col as i32).abs()) as u32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Wall,
    Start,
    End,
}

/// A fixed-size square maze. At most one cell is `Start` and one is `End`;
/// a marked cell is never simultaneously a `Wall`. The search engine takes
/// a snapshot (clone) at `start()` time, so edits here never corrupt a run
/// in flight -- cancelling the old run is the caller's job.
#[derive(Debug, Clone)]
pub struct Grid {
    size: usize,
    cells: Vec<Vec<Cell>>,
    start: Option<Position>,
    end: Option<Position>,
}

impl Grid {
    /// Creates an empty grid with no start/end markers.
    pub fn new(size: usize) -> Self {
        Grid {
            size,
            cells: vec![vec![Cell::Empty; size]; size],
            start: None,
            end: None,
        }
    }

    /// Generates a maze with random start/end markers and random walls.
    /// `seed` gives reproducible layouts.
    pub fn random(size: usize, num_walls: usize, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => rand::rngs::StdRng::seed_from_u64(seed),
            None => rand::rngs::StdRng::from_entropy(),
        };

        let mut grid = Grid::new(size);
        let start = Position::new(rng.gen_range(0..size / 2), rng.gen_range(0..size / 2));
        let end = Position::new(rng.gen_range(size / 2..size), rng.gen_range(size / 2..size));
        grid.set_start(start);
        grid.set_end(end);

        // Place walls randomly, never on the start/end markers.
        let mut walls_placed = 0;
        let mut attempts = 0;
        while walls_placed < num_walls && attempts < num_walls * 3 {
            let pos = Position::new(rng.gen_range(0..size), rng.gen_range(0..size));
            if grid.cell(pos) == Cell::Empty {
                grid.toggle_wall(pos);
                walls_placed += 1;
            }
            attempts += 1;
        }

        grid
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Cell state at `pos`. Out-of-bounds lookups are a caller error and
    /// panic via the index.
    pub fn cell(&self, pos: Position) -> Cell {
        self.cells[pos.row][pos.col]
    }

    pub fn start(&self) -> Option<Position> {
        self.start
    }

    pub fn end(&self) -> Option<Position> {
        self.end
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    /// The cell one step from `pos` in direction `(dr, dc)`, or `None` at
    /// the grid edge.
    pub fn neighbor(&self, pos: Position, dr: i32, dc: i32) -> Option<Position> {
        let row = pos.row as i32 + dr;
        let col = pos.col as i32 + dc;
        if row < 0 || col < 0 || row >= self.size as i32 || col >= self.size as i32 {
            return None;
        }
        Some(Position::new(row as usize, col as usize))
    }

    /// In-bounds, non-wall 4-neighbors of `pos` in Up, Down, Left, Right
    /// order.
    pub fn open_neighbors(&self, pos: Position) -> Vec<Position> {
        DIRECTIONS
            .iter()
            .filter_map(|&(dr, dc)| self.neighbor(pos, dr, dc))
            .filter(|&next| self.cell(next) != Cell::Wall)
            .collect()
    }

    /// Moves the start marker to `pos`, clearing the previous one. Refuses
    /// wall and end cells; returns whether the marker was placed.
    pub fn set_start(&mut self, pos: Position) -> bool {
        if !self.in_bounds(pos) || matches!(self.cell(pos), Cell::Wall | Cell::End) {
            return false;
        }
        if let Some(old) = self.start {
            self.cells[old.row][old.col] = Cell::Empty;
        }
        self.cells[pos.row][pos.col] = Cell::Start;
        self.start = Some(pos);
        true
    }

    /// Moves the end marker to `pos`. Same rules as [`Grid::set_start`].
    pub fn set_end(&mut self, pos: Position) -> bool {
        if !self.in_bounds(pos) || matches!(self.cell(pos), Cell::Wall | Cell::Start) {
            return false;
        }
        if let Some(old) = self.end {
            self.cells[old.row][old.col] = Cell::Empty;
        }
        self.cells[pos.row][pos.col] = Cell::End;
        self.end = Some(pos);
        true
    }

    /// Flips a cell between empty and wall. Start/end cells cannot be
    /// drawn over; returns whether anything changed.
    pub fn toggle_wall(&mut self, pos: Position) -> bool {
        if !self.in_bounds(pos) {
            return false;
        }
        match self.cell(pos) {
            Cell::Empty => {
                self.cells[pos.row][pos.col] = Cell::Wall;
                true
            }
            Cell::Wall => {
                self.cells[pos.row][pos.col] = Cell::Empty;
                true
            }
            Cell::Start | Cell::End => false,
        }
    }

    /// Print a visual representation of the grid with search overlays.
    pub fn print_grid(&self, visited: &[Position], path: &[Position], robot: Option<Position>) {
        println!("Legend: S=Start, E=End, R=Robot, #=Wall, *=Path, o=Visited, .=Empty");

        // Print column numbers header
        print!("   ");
        for col in 0..self.size {
            print!("{:2}", col % 10);
        }
        println!();

        for row in 0..self.size {
            print!("{:2} ", row);
            for col in 0..self.size {
                let pos = Position::new(row, col);
                let ch = if robot == Some(pos) {
                    'R'
                } else {
                    match self.cell(pos) {
                        Cell::Start => 'S',
                        Cell::End => 'E',
                        Cell::Wall => '#',
                        Cell::Empty if path.contains(&pos) => '*',
                        Cell::Empty if visited.contains(&pos) => 'o',
                        Cell::Empty => '.',
                    }
                };
                print!("{} ", ch);
            }
            println!();
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_marker_moves_and_clears_previous_cell() {
        let mut grid = Grid::new(5);
        assert!(grid.set_start(Position::new(0, 0)));
        assert!(grid.set_start(Position::new(2, 2)));
        assert_eq!(grid.cell(Position::new(0, 0)), Cell::Empty);
        assert_eq!(grid.cell(Position::new(2, 2)), Cell::Start);
        assert_eq!(grid.start(), Some(Position::new(2, 2)));
    }

    #[test]
    fn markers_refuse_walls_and_each_other() {
        let mut grid = Grid::new(5);
        grid.toggle_wall(Position::new(1, 1));
        assert!(!grid.set_start(Position::new(1, 1)));
        assert!(grid.set_end(Position::new(3, 3)));
        assert!(!grid.set_start(Position::new(3, 3)));
        assert_eq!(grid.cell(Position::new(3, 3)), Cell::End);
    }

    #[test]
    fn walls_cannot_cover_markers() {
        let mut grid = Grid::new(5);
        grid.set_start(Position::new(0, 0));
        assert!(!grid.toggle_wall(Position::new(0, 0)));
        assert_eq!(grid.cell(Position::new(0, 0)), Cell::Start);
    }

    #[test]
    fn neighbor_respects_grid_edges() {
        let grid = Grid::new(3);
        assert_eq!(grid.neighbor(Position::new(0, 0), -1, 0), None);
        assert_eq!(grid.neighbor(Position::new(0, 0), 0, -1), None);
        assert_eq!(grid.neighbor(Position::new(2, 2), 1, 0), None);
        assert_eq!(
            grid.neighbor(Position::new(1, 1), -1, 0),
            Some(Position::new(0, 1))
        );
    }

    #[test]
    fn open_neighbors_skip_walls_in_fixed_order() {
        let mut grid = Grid::new(3);
        grid.toggle_wall(Position::new(0, 1)); // the Up neighbor of (1,1)
        let neighbors = grid.open_neighbors(Position::new(1, 1));
        assert_eq!(
            neighbors,
            vec![
                Position::new(2, 1), // Down
                Position::new(1, 0), // Left
                Position::new(1, 2), // Right
            ]
        );
    }

    #[test]
    fn random_grid_keeps_markers_clear_of_walls() {
        let grid = Grid::random(DEFAULT_GRID_SIZE, 20, Some(7));
        let start = grid.start().unwrap();
        let end = grid.end().unwrap();
        assert_eq!(grid.cell(start), Cell::Start);
        assert_eq!(grid.cell(end), Cell::End);
        assert_ne!(start, end);
    }
}
