//! Cell registry and Conway's rule

use rand::Rng;
use std::collections::HashMap;

/// 1-indexed (x, y) position, column first
pub type Coord = (u16, u16);

/// Liveness of a cell
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    Alive,
    Dead,
}

impl From<bool> for State {
    fn from(alive: bool) -> Self {
        if alive {
            State::Alive
        } else {
            State::Dead
        }
    }
}

/// Conway's rule: survive on 2 or 3, birth on exactly 3
pub fn next_state(current: State, live_neighbors: usize) -> State {
    match (current, live_neighbors) {
        (State::Alive, 2) | (State::Alive, 3) | (State::Dead, 3) => State::Alive,
        _ => State::Dead,
    }
}

#[derive(Clone, Debug)]
pub struct Cell {
    pub x: u16,
    pub y: u16,
    pub is_alive: bool,
    /// Verdict for the next generation, set by `Grid::evaluate`
    pub pending_state: Option<State>,
    /// Registry slots of adjacent cells, fixed for the life of the grid
    neighbors: Vec<usize>,
}

impl Cell {
    pub fn coord(&self) -> Coord {
        (self.x, self.y)
    }

    pub fn state(&self) -> State {
        State::from(self.is_alive)
    }
}

/// Every cell for one set of terminal dimensions.
///
/// Cells live in insertion order (column by column) and are keyed by
/// coordinate. A grid is never resized; a new one is built instead.
pub struct Grid {
    cols: u16,
    rows: u16,
    cells: Vec<Cell>,
    index: HashMap<Coord, usize>,
}

impl Grid {
    /// Build a `cols` x `rows` grid where each cell starts alive with
    /// probability `1 / density`
    pub fn new<R: Rng>(cols: u16, rows: u16, density: u32, rng: &mut R) -> Self {
        let density = density.max(1);
        Self::build(cols, rows, |_| rng.gen_ratio(1, density))
    }

    /// Build a grid where exactly the listed coordinates are alive
    pub fn with_live(cols: u16, rows: u16, live: &[Coord]) -> Self {
        Self::build(cols, rows, |at| live.contains(&at))
    }

    fn build(cols: u16, rows: u16, mut seed: impl FnMut(Coord) -> bool) -> Self {
        let capacity = cols as usize * rows as usize;
        let mut cells = Vec::with_capacity(capacity);
        let mut index = HashMap::with_capacity(capacity);

        for x in 1..=cols {
            for y in 1..=rows {
                index.insert((x, y), cells.len());
                cells.push(Cell {
                    x,
                    y,
                    is_alive: seed((x, y)),
                    pending_state: None,
                    neighbors: Vec::new(),
                });
            }
        }

        // Adjacency is static for this grid, so resolve it once.
        for cell in &mut cells {
            cell.neighbors = adjacent((cell.x, cell.y))
                .filter_map(|at| index.get(&at).copied())
                .collect();
        }

        Self {
            cols,
            rows,
            cells,
            index,
        }
    }

    pub fn dimensions(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cells in insertion order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, at: Coord) -> Option<&Cell> {
        self.index.get(&at).map(|&slot| &self.cells[slot])
    }

    /// Adjacent cells present in the grid; edges and corners have fewer than 8
    pub fn neighbors_of(&self, at: Coord) -> impl Iterator<Item = &Cell> + '_ {
        self.slot(at)
            .into_iter()
            .flat_map(move |slot| self.cells[slot].neighbors.iter())
            .map(move |&n| &self.cells[n])
    }

    /// Live neighbors right now. Pending verdicts are not consulted.
    pub fn live_neighbor_count(&self, at: Coord) -> usize {
        self.neighbors_of(at).filter(|n| n.is_alive).count()
    }

    /// Record the next-generation verdict without touching `is_alive`
    pub fn evaluate(&mut self, at: Coord) -> Option<State> {
        let slot = self.slot(at)?;
        let verdict = next_state(self.cells[slot].state(), self.live_neighbor_count(at));
        self.cells[slot].pending_state = Some(verdict);
        Some(verdict)
    }

    /// Apply and clear the pending verdict, if any
    pub fn commit(&mut self, at: Coord) {
        if let Some(slot) = self.slot(at) {
            commit_cell(&mut self.cells[slot]);
        }
    }

    /// Commit every cell
    pub fn commit_all(&mut self) {
        self.cells.iter_mut().for_each(commit_cell);
    }

    /// One full generation: evaluate everything, then commit everything
    pub fn step(&mut self) {
        for slot in 0..self.cells.len() {
            let at = self.cells[slot].coord();
            self.evaluate(at);
        }
        self.commit_all();
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive).count()
    }

    fn slot(&self, at: Coord) -> Option<usize> {
        self.index.get(&at).copied()
    }
}

fn commit_cell(cell: &mut Cell) {
    if let Some(state) = cell.pending_state.take() {
        cell.is_alive = state == State::Alive;
    }
}

/// The 8 surrounding coordinates that fit in u16 space
fn adjacent((x, y): Coord) -> impl Iterator<Item = Coord> {
    #[rustfmt::skip]
    const OFFSETS: [(i32, i32); 8] = [
        (-1, -1), (0, -1), (1, -1),
        (-1, 0),           (1, 0),
        (-1, 1),  (0, 1),  (1, 1),
    ];

    OFFSETS.into_iter().filter_map(move |(dx, dy)| {
        let nx = u16::try_from(x as i32 + dx).ok()?;
        let ny = u16::try_from(y as i32 + dy).ok()?;
        Some((nx, ny))
    })
}
