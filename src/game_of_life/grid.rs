//! Sparse grid representation for Game of Life

use super::{LifeRules, Position};
use itertools::{Itertools, MinMaxResult};
use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::ops::RangeInclusive;

/// Largest bounding box, in cells, that [`Grid::render`] will draw
pub const MAX_RENDER_AREA: u128 = 1 << 20;

/// One generation of an unbounded Game of Life board.
///
/// Only stored cells take memory. Any position without an entry reads as
/// dead, and so does an entry stored as `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "GridSnapshot", from = "GridSnapshot")]
pub struct Grid {
    cells: HashMap<Position, bool>,
}

/// Smallest rectangle containing every live cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bounds {
    pub xs: RangeInclusive<i64>,
    pub ys: RangeInclusive<i64>,
}

impl Bounds {
    pub fn width(&self) -> u128 {
        u128::from(self.xs.end().abs_diff(*self.xs.start())) + 1
    }

    pub fn height(&self) -> u128 {
        u128::from(self.ys.end().abs_diff(*self.ys.start())) + 1
    }

    /// Number of cells in the box, saturating at `u128::MAX`
    pub fn area(&self) -> u128 {
        self.width().saturating_mul(self.height())
    }
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a grid where exactly the given positions are alive
    pub fn from_living_cells<I: IntoIterator<Item = Position>>(cells: I) -> Self {
        cells.into_iter().collect()
    }

    /// Liveness at `position`; absent cells are dead.
    pub fn read(&self, position: &Position) -> bool {
        self.cells.get(position).copied().unwrap_or(false)
    }

    pub fn alive_neighbours_count(&self, position: &Position) -> u8 {
        position.neighbour_iter().filter(|p| self.read(p)).count() as u8
    }

    /// Survival rule on neighbour count alone. Does not look at the cell itself.
    pub fn will_survive(&self, position: &Position) -> bool {
        LifeRules::survives(self.alive_neighbours_count(position))
    }

    /// Birth rule on neighbour count alone. Does not look at the cell itself.
    pub fn will_be_born(&self, position: &Position) -> bool {
        LifeRules::is_born(self.alive_neighbours_count(position))
    }

    /// State of `position` in the next generation
    pub fn next_cell_state(&self, position: &Position) -> bool {
        if self.read(position) {
            self.will_survive(position)
        } else {
            self.will_be_born(position)
        }
    }

    /// Every position that could be alive in the next generation: all stored
    /// keys plus the neighbourhood of each live cell. Anything else has no
    /// live neighbour and stays dead.
    pub fn candidates(&self) -> HashSet<Position> {
        let mut candidates: HashSet<Position> = self.cells.keys().copied().collect();
        for (position, _) in self.cells.iter().filter(|(_, &alive)| alive) {
            candidates.extend(position.neighbour_iter());
        }
        candidates
    }

    /// Compute the next generation. `self` is left untouched.
    ///
    /// Only live cells are stored in the result.
    pub fn next_grid(&self) -> Grid {
        let candidates = self.candidates();
        let cells: HashMap<Position, bool> = candidates
            .iter()
            .filter(|p| self.next_cell_state(p))
            .map(|&p| (p, true))
            .collect();

        debug!(
            "evaluated {} candidates, {} cells alive in next generation",
            candidates.len(),
            cells.len()
        );
        Grid { cells }
    }

    /// Same result as [`Grid::next_grid`], with the per-candidate rule
    /// evaluation spread over the rayon pool.
    pub fn par_next_grid(&self) -> Grid {
        let candidates = self.candidates();
        let candidate_count = candidates.len();
        let cells: HashMap<Position, bool> = candidates
            .into_par_iter()
            .filter(|p| self.next_cell_state(p))
            .map(|p| (p, true))
            .collect();

        debug!(
            "evaluated {} candidates in parallel, {} cells alive in next generation",
            candidate_count,
            cells.len()
        );
        Grid { cells }
    }

    /// Number of stored entries, dead ones included
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Live cells sorted by `(x, y)`
    pub fn living_cells(&self) -> Vec<Position> {
        self.cells
            .iter()
            .filter(|(_, &alive)| alive)
            .map(|(&p, _)| p)
            .sorted()
            .collect()
    }

    pub fn living_count(&self) -> usize {
        self.cells.values().filter(|&&alive| alive).count()
    }

    /// Bounding box of the live cells, `None` when nothing is alive
    pub fn bounds(&self) -> Option<Bounds> {
        let live = || self.cells.iter().filter(|(_, &alive)| alive).map(|(p, _)| p);
        let xs = match live().map(|p| p.x).minmax() {
            MinMaxResult::NoElements => return None,
            MinMaxResult::OneElement(x) => x..=x,
            MinMaxResult::MinMax(lo, hi) => lo..=hi,
        };
        let ys = match live().map(|p| p.y).minmax() {
            MinMaxResult::NoElements => return None,
            MinMaxResult::OneElement(y) => y..=y,
            MinMaxResult::MinMax(lo, hi) => lo..=hi,
        };
        Some(Bounds { xs, ys })
    }

    /// Draw the bounding box of the live cells, one line per row (`y`).
    ///
    /// Returns `None` when the box holds more than [`MAX_RENDER_AREA`] cells.
    pub fn render(&self, alive: char, dead: char) -> Option<String> {
        let Some(bounds) = self.bounds() else {
            return Some(String::new());
        };
        if bounds.area() > MAX_RENDER_AREA {
            return None;
        }

        let mut output = String::new();
        for y in bounds.ys.clone() {
            for x in bounds.xs.clone() {
                output.push(if self.read(&Position::new(x, y)) { alive } else { dead });
            }
            output.push('\n');
        }
        Some(output)
    }
}

impl From<HashMap<Position, bool>> for Grid {
    fn from(cells: HashMap<Position, bool>) -> Self {
        Self { cells }
    }
}

impl FromIterator<(Position, bool)> for Grid {
    fn from_iter<I: IntoIterator<Item = (Position, bool)>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

impl FromIterator<Position> for Grid {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Self {
        iter.into_iter().map(|p| (p, true)).collect()
    }
}

/// Wire form of a grid: JSON objects cannot be keyed by `Position`.
#[derive(Serialize, Deserialize)]
struct GridSnapshot {
    alive: Vec<Position>,
}

impl From<Grid> for GridSnapshot {
    fn from(grid: Grid) -> Self {
        Self {
            alive: grid.living_cells(),
        }
    }
}

impl From<GridSnapshot> for Grid {
    fn from(snapshot: GridSnapshot) -> Self {
        Grid::from_living_cells(snapshot.alive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_of(cells: &[(i64, i64)]) -> Grid {
        cells.iter().copied().map(Position::from).collect()
    }

    fn p(x: i64, y: i64) -> Position {
        Position::new(x, y)
    }

    // x\y 0 1 2
    // 0   T F F
    // 1   F T F
    // 2   F T F
    fn sparse_three() -> Grid {
        Grid::from(HashMap::from([
            (p(0, 0), true),
            (p(0, 1), false),
            (p(1, 1), true),
            (p(2, 1), true),
        ]))
    }

    // x\y 0 1 2
    // 0   T F F
    // 1   F T T
    // 2   F T T
    fn five_cells() -> Grid {
        grid_of(&[(0, 0), (1, 1), (2, 1), (1, 2), (2, 2)])
    }

    #[test]
    fn test_create_empty_grid() {
        let grid = Grid::new();
        assert_eq!(grid.len(), 0);
        assert!(grid.is_empty());
        assert!(!grid.read(&p(0, 0)));
        assert!(!grid.read(&p(-5, 1_000_000)));
    }

    #[test]
    fn test_read_defaults_to_dead() {
        let grid = Grid::from(HashMap::from([(p(0, 0), true), (p(0, 1), false)]));
        assert_eq!(grid.len(), 2);
        assert!(grid.read(&p(0, 0)));
        assert!(!grid.read(&p(0, 1)));
        assert!(!grid.read(&p(0, 2)));
        assert_eq!(grid.read(&p(0, 0)), grid.read(&p(0, 0)));
    }

    #[test]
    fn test_get_alive_neighbours_count() {
        let grid = sparse_three();
        assert_eq!(grid.alive_neighbours_count(&p(0, 0)), 1);
        assert_eq!(grid.alive_neighbours_count(&p(0, 1)), 2);
        assert_eq!(grid.alive_neighbours_count(&p(3, 3)), 0);
    }

    #[test]
    fn test_will_survive() {
        let grid = sparse_three();
        assert!(!grid.will_survive(&p(0, 0)));
        assert!(grid.will_survive(&p(1, 1)));
    }

    #[test]
    fn test_will_be_born() {
        let grid = five_cells();
        assert!(grid.will_be_born(&p(0, 1)));
        assert!(!grid.will_be_born(&p(0, 2)));
        assert!(!grid.will_be_born(&p(1, 1)));
        assert!(!grid.will_be_born(&p(42, 42)));
    }

    #[test]
    fn test_next_cell_state() {
        let grid = five_cells();
        assert!(!grid.next_cell_state(&p(0, 0)));
        assert!(grid.next_cell_state(&p(0, 1)));
        assert!(!grid.next_cell_state(&p(1, 1)));
        assert!(grid.next_cell_state(&p(1, 0)));
        assert!(grid.next_cell_state(&p(2, 2)));
        assert!(!grid.next_cell_state(&p(42, 42)));
    }

    #[test]
    fn test_next_grid() {
        let grid = five_cells();
        let next = grid.next_grid();

        assert!(!next.read(&p(0, 0)));
        assert!(next.read(&p(0, 1)));
        assert!(!next.read(&p(1, 1)));
        assert!(next.read(&p(1, 0)));
        assert!(next.read(&p(2, 2)));
        assert!(!next.read(&p(42, 42)));
    }

    #[test]
    fn test_next_grid_leaves_source_untouched() {
        let grid = five_cells();
        let before = grid.clone();
        let _ = grid.next_grid();

        assert_eq!(grid, before);
        for (x, y) in [(0, 0), (0, 1), (1, 1), (1, 0), (2, 2), (42, 42)] {
            assert_eq!(grid.read(&p(x, y)), before.read(&p(x, y)));
        }
    }

    #[test]
    fn test_candidates_cover_stored_keys_and_live_neighbourhoods() {
        let grid = Grid::from(HashMap::from([(p(10, 10), false), (p(0, 0), true)]));
        let candidates = grid.candidates();

        assert!(candidates.contains(&p(10, 10)));
        assert!(candidates.contains(&p(0, 0)));
        assert!(p(0, 0).neighbours().is_subset(&candidates));
        assert_eq!(candidates.len(), 10);
    }

    #[test]
    fn test_still_life_block() {
        let block = grid_of(&[(1, 1), (2, 1), (1, 2), (2, 2)]);
        assert_eq!(block.next_grid().living_cells(), block.living_cells());
    }

    #[test]
    fn test_oscillator_blinker() {
        let horizontal = grid_of(&[(-1, 0), (0, 0), (1, 0)]);
        let vertical = horizontal.next_grid();
        assert_eq!(vertical.living_cells(), vec![p(0, -1), p(0, 0), p(0, 1)]);
        assert_eq!(vertical.next_grid().living_cells(), horizontal.living_cells());
    }

    #[test]
    fn test_glider_translates_across_negative_coordinates() {
        let glider = grid_of(&[(-9, -10), (-8, -9), (-10, -8), (-9, -8), (-8, -8)]);
        let mut grid = glider.clone();
        for _ in 0..4 {
            grid = grid.next_grid();
        }
        let shifted: Vec<Position> = glider
            .living_cells()
            .into_iter()
            .map(|c| p(c.x + 1, c.y + 1))
            .collect();
        assert_eq!(grid.living_cells(), shifted);
    }

    #[test]
    fn test_lonely_cells_die_out() {
        let grid = grid_of(&[(0, 0), (100, -100)]);
        let next = grid.next_grid();
        assert!(next.is_empty());
        assert!(next.next_grid().is_empty());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let grid = grid_of(&[(0, 0), (1, 1), (2, 1), (1, 2), (2, 2), (-4, 7), (-4, 8), (-4, 9)]);
        assert_eq!(grid.par_next_grid(), grid.next_grid());
    }

    #[test]
    fn test_bounds() {
        assert_eq!(Grid::new().bounds(), None);

        let grid = grid_of(&[(-2, 5), (3, -1)]);
        let bounds = grid.bounds().unwrap();
        assert_eq!(bounds.xs, -2..=3);
        assert_eq!(bounds.ys, -1..=5);
        assert_eq!(bounds.width(), 6);
        assert_eq!(bounds.height(), 7);
    }

    #[test]
    fn test_dead_entries_do_not_count_as_living() {
        let grid = sparse_three();
        assert_eq!(grid.living_count(), 3);
        assert_eq!(grid.living_cells(), vec![p(0, 0), p(1, 1), p(2, 1)]);
    }

    #[test]
    fn test_json_form_lists_living_cells() {
        let grid = sparse_three();
        let json = serde_json::to_string(&grid).unwrap();
        assert_eq!(
            json,
            r#"{"alive":[{"x":0,"y":0},{"x":1,"y":1},{"x":2,"y":1}]}"#
        );

        let parsed: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.living_cells(), grid.living_cells());
    }

    #[test]
    fn test_render_bounding_box() {
        let grid = grid_of(&[(0, 0), (1, 1)]);
        assert_eq!(grid.render('#', '.').as_deref(), Some("#.\n.#\n"));
        assert_eq!(Grid::new().render('#', '.').as_deref(), Some(""));
    }

    #[test]
    fn test_render_refuses_sparse_far_apart_cells() {
        let grid = grid_of(&[(0, 0), (1_000_000_000, 0)]);
        assert_eq!(grid.bounds().unwrap().area(), 1_000_000_001);
        assert_eq!(grid.render('#', '.'), None);
    }

    #[test]
    fn test_bounds_spanning_whole_lattice() {
        let grid = grid_of(&[(i64::MIN, i64::MIN), (i64::MAX, i64::MAX)]);
        let bounds = grid.bounds().unwrap();
        assert_eq!(bounds.width(), 1u128 << 64);
        assert_eq!(bounds.height(), 1u128 << 64);
        assert_eq!(bounds.area(), u128::MAX);
        assert_eq!(grid.render('#', '.'), None);
    }

    #[test]
    fn test_no_interaction_across_lattice_edges() {
        let grid = grid_of(&[(i64::MAX, 0), (i64::MIN, 0), (i64::MIN + 1, 0)]);
        assert_eq!(grid.alive_neighbours_count(&p(i64::MIN, 0)), 1);
        assert_eq!(grid.alive_neighbours_count(&p(i64::MAX, 0)), 0);
        assert!(grid.next_grid().living_cells().is_empty());
        assert!(grid.par_next_grid().living_cells().is_empty());
    }
}
