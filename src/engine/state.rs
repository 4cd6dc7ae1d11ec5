use crate::Cell;

/// A snapshot of the board: the generation counter and its live cells
///
/// `cells` never holds the same coordinate twice. Survivors keep their order
/// from the previous generation and births follow in the order they were
/// discovered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationState {
    pub generation: u64,
    pub cells: Vec<Cell>,
}

impl GenerationState {
    #[inline]
    pub fn population(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Linear scan, use [`GameOfLife::is_alive`] for repeated lookups
    ///
    /// [`GameOfLife::is_alive`]: super::GameOfLife::is_alive
    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    /// Top-left and bottom-right corners of the live cells, both inclusive
    pub fn bounds(&self) -> Option<(Cell, Cell)> {
        let first = *self.cells.first()?;
        let (mut tl, mut br) = (first, first);
        for cell in &self.cells[1..] {
            tl.x = tl.x.min(cell.x);
            tl.y = tl.y.min(cell.y);
            br.x = br.x.max(cell.x);
            br.y = br.y.max(cell.y);
        }
        Some((tl, br))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_of_empty_state() {
        assert_eq!(GenerationState::default().bounds(), None);
    }

    #[test]
    fn bounds_cover_negative_cells() {
        let state = GenerationState {
            generation: 0,
            cells: vec![Cell::new(2, -1), Cell::new(-3, 4), Cell::new(0, 0)],
        };

        assert_eq!(state.bounds(), Some((Cell::new(-3, -1), Cell::new(2, 4))));
    }

    #[test]
    fn bounds_reach_the_coordinate_limit() {
        let edge = Cell::new(i64::MAX, 5);
        let state = GenerationState {
            generation: 0,
            cells: vec![edge, Cell::new(i64::MIN, i64::MAX)],
        };

        assert_eq!(
            state.bounds(),
            Some((Cell::new(i64::MIN, 5), Cell::new(i64::MAX, i64::MAX)))
        );
    }
}
