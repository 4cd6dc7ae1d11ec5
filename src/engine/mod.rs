mod rule;
mod state;
mod window;

pub use self::state::GenerationState;
pub use self::window::{MAX_RENDER_SPAN, Window};
use crate::{Cell, dedup::unique_cells};
use ahash::AHashSet;

/// Classification of the 8 cells around a coordinate
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Neighbors {
    pub occupied: Vec<Cell>,
    pub empty: Vec<Cell>,
}

/// Sparse Game of Life simulation over an unbounded grid
///
/// Only live cells are stored. Each call to [`GameOfLife::next_generation`]
/// reads the committed generation and replaces it wholesale.
#[derive(Debug, Clone, Default)]
pub struct GameOfLife {
    state: GenerationState,
    // membership index over `state.cells`, rebuilt on every commit
    alive: AHashSet<Cell>,
}

impl GameOfLife {
    /// Creates generation 0 from the given cells, dropping duplicates
    pub fn new<I>(initial: I) -> Self
    where
        I: IntoIterator<Item = Cell>,
    {
        let cells = unique_cells(initial);
        tracing::debug!(alive = cells.len(), "created game of life");
        Self::commit(GenerationState {
            generation: 0,
            cells,
        })
    }

    fn commit(state: GenerationState) -> Self {
        let alive = state.cells.iter().copied().collect();
        Self { state, alive }
    }

    /// Splits the 8 cells around `cell` into occupied and empty
    ///
    /// Only the committed generation is consulted.
    pub fn neighbors(&self, cell: Cell) -> Neighbors {
        let (occupied, empty): (Vec<_>, Vec<_>) =
            cell.neighbors().partition(|n| self.alive.contains(n));
        Neighbors { occupied, empty }
    }

    fn occupied_count(&self, cell: Cell) -> usize {
        cell.neighbors().filter(|n| self.alive.contains(n)).count()
    }

    /// Computes, commits and returns the next generation
    pub fn next_generation(&mut self) -> &GenerationState {
        let mut next = Vec::with_capacity(self.state.cells.len());
        let mut candidates = Vec::with_capacity(self.state.cells.len() * 8);

        // survival pass, gathering every empty cell touching a live one
        for &cell in &self.state.cells {
            let Neighbors { occupied, empty } = self.neighbors(cell);
            if rule::next_cell_state(true, occupied.len()) {
                next.push(cell);
            }
            candidates.extend(empty);
        }
        let survivors = next.len();

        // birth pass over each distinct candidate
        let candidates = unique_cells(candidates);
        next.extend(
            candidates
                .iter()
                .copied()
                .filter(|&cell| rule::next_cell_state(false, self.occupied_count(cell))),
        );

        let generation = self.state.generation + 1;
        tracing::trace!(
            generation,
            survivors,
            births = next.len() - survivors,
            candidates = candidates.len(),
            "advanced generation"
        );

        *self = Self::commit(GenerationState {
            generation,
            cells: unique_cells(next),
        });
        &self.state
    }

    /// A copy of the current generation
    #[inline]
    pub fn state(&self) -> GenerationState {
        self.state.clone()
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.state.generation
    }

    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.state.cells
    }

    #[inline]
    pub fn alive_count(&self) -> usize {
        self.state.cells.len()
    }

    #[inline]
    pub fn is_alive(&self, cell: Cell) -> bool {
        self.alive.contains(&cell)
    }

    pub fn window(&self, top_left: Cell, bottom_right: Cell) -> Window<'_> {
        Window::new(self.cells(), top_left, bottom_right)
    }

    #[inline]
    pub fn into_state(self) -> GenerationState {
        self.state
    }
}

impl FromIterator<Cell> for GameOfLife {
    fn from_iter<T: IntoIterator<Item = Cell>>(iter: T) -> Self {
        Self::new(iter)
    }
}
