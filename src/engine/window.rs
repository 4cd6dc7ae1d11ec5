use super::GenerationState;
use crate::Cell;
use std::fmt;

const ALIVE: char = '█';
/// Rows and columns rendered by `Display`, counted from the top-left corner
pub const MAX_RENDER_SPAN: i64 = 1024;

/// A rectangular view of live cells
///
/// Rendering with `Display` is clipped to the first [`MAX_RENDER_SPAN`] rows
/// and columns, so a sparse board spread over a huge area still prints a
/// bounded amount of text. [`Window::iter`] is not clipped.
pub struct Window<'a> {
    tl: Cell,
    // inclusive, `None` when the window covers nothing
    br: Option<Cell>,
    cells: &'a [Cell],
}

impl<'a> Window<'a> {
    /// Covers `[tl.x, br.x) × [tl.y, br.y)`
    pub fn new(cells: &'a [Cell], top_left: Cell, bottom_right: Cell) -> Self {
        let br = (bottom_right.x > top_left.x && bottom_right.y > top_left.y)
            .then(|| Cell::new(bottom_right.x - 1, bottom_right.y - 1));
        Self {
            tl: top_left,
            br,
            cells,
        }
    }

    /// The smallest window holding every live cell of `state`
    pub fn bounding(state: &'a GenerationState) -> Self {
        let bounds = state.bounds();
        Self {
            tl: bounds.map(|(tl, _)| tl).unwrap_or_default(),
            br: bounds.map(|(_, br)| br),
            cells: &state.cells,
        }
    }

    /// Live cells inside the window, in row-major order
    pub fn iter(&self) -> std::vec::IntoIter<Cell> {
        self.cells_up_to(self.br)
    }

    fn cells_up_to(&self, br: Option<Cell>) -> std::vec::IntoIter<Cell> {
        let Some(br) = br else {
            return Vec::new().into_iter();
        };
        let rx = self.tl.x..=br.x;
        let ry = self.tl.y..=br.y;
        let mut inside: Vec<Cell> = self
            .cells
            .iter()
            .copied()
            .filter(|cell| rx.contains(&cell.x) && ry.contains(&cell.y))
            .collect();
        inside.sort_unstable();
        inside.into_iter()
    }
}

impl fmt::Display for Window<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(br) = self.br else {
            return Ok(());
        };
        let clip = Cell::new(
            br.x.min(self.tl.x.saturating_add(MAX_RENDER_SPAN - 1)),
            br.y.min(self.tl.y.saturating_add(MAX_RENDER_SPAN - 1)),
        );

        // i128 keeps `left - 1` representable at i64::MIN
        let left = i128::from(self.tl.x);
        let (mut last_x, mut last_y) = (left - 1, i128::from(self.tl.y));
        for cell in self.cells_up_to(Some(clip)) {
            let (x, y) = (i128::from(cell.x), i128::from(cell.y));
            let lines = y - last_y;
            let padding = match lines {
                0 => x - last_x - 1,
                _ => x - left,
            };
            write!(f, "{0:\n<1$}{0: <2$}{3}", "", lines as usize, padding as usize, ALIVE)?;
            (last_x, last_y) = (x, y);
        }

        // blank rows below the last live cell
        let trailing = i128::from(clip.y) - last_y;
        write!(f, "{0:\n<1$}", "", trailing as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(coords: &[(i64, i64)]) -> Vec<Cell> {
        coords.iter().copied().map(Cell::from).collect()
    }

    #[test]
    fn iter_filters_and_sorts() {
        let alive = cells(&[(3, 3), (0, 1), (1, 0), (-1, 0), (2, 1)]);
        let window = Window::new(&alive, Cell::new(0, 0), Cell::new(3, 3));

        assert_eq!(window.iter().collect::<Vec<_>>(), cells(&[(1, 0), (0, 1), (2, 1)]));
    }

    #[test]
    fn renders_blinker() {
        let state = GenerationState {
            generation: 1,
            cells: cells(&[(1, 0), (1, -1), (1, 1)]),
        };

        assert_eq!(Window::bounding(&state).to_string(), "█\n█\n█");
    }

    #[test]
    fn renders_offset_rows() {
        let alive = cells(&[(0, 0), (2, 0), (1, 2)]);
        let window = Window::new(&alive, Cell::new(0, 0), Cell::new(3, 4));

        assert_eq!(window.to_string(), "█ █\n\n █\n");
    }

    #[test]
    fn renders_cell_at_coordinate_limit() {
        let state = GenerationState {
            generation: 0,
            cells: cells(&[(i64::MAX, 5)]),
        };

        assert_eq!(Window::bounding(&state).to_string(), "█");
    }

    #[test]
    fn renders_cell_at_lowest_coordinate() {
        let alive = cells(&[(i64::MIN, i64::MIN), (i64::MIN + 1, i64::MIN)]);
        let window = Window::new(
            &alive,
            Cell::new(i64::MIN, i64::MIN),
            Cell::new(0, i64::MIN + 1),
        );

        assert_eq!(window.to_string(), "██");
    }

    #[test]
    fn rendering_is_clipped_for_sparse_boards() {
        let wide = GenerationState {
            generation: 0,
            cells: cells(&[(0, 0), (1_000_000_000_000, 0)]),
        };
        let tall = GenerationState {
            generation: 0,
            cells: cells(&[(0, 0), (0, 1_000_000_000_000)]),
        };

        assert_eq!(Window::bounding(&wide).to_string(), "█");
        let rendered = Window::bounding(&tall).to_string();
        assert_eq!(rendered.matches('\n').count(), MAX_RENDER_SPAN as usize - 1);
        assert_eq!(rendered.chars().filter(|&c| c == ALIVE).count(), 1);
    }

    #[test]
    fn iter_is_not_clipped() {
        let state = GenerationState {
            generation: 0,
            cells: cells(&[(0, 0), (1_000_000_000_000, 0)]),
        };

        assert_eq!(Window::bounding(&state).iter().count(), 2);
    }

    #[test]
    fn empty_state_renders_nothing() {
        let state = GenerationState::default();

        assert_eq!(Window::bounding(&state).to_string(), "");
    }
}
