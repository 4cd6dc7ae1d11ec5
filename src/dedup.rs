use crate::Cell;
use ahash::AHashSet;

/// Removes duplicate cells, keeping the first occurrence of each coordinate
///
/// The relative order of the kept cells is the order they were first seen in.
/// Running it on an already unique list returns the list unchanged.
pub fn unique_cells<I>(cells: I) -> Vec<Cell>
where
    I: IntoIterator<Item = Cell>,
{
    let cells = cells.into_iter();
    let (lower, _) = cells.size_hint();

    let mut seen = AHashSet::with_capacity(lower);
    let mut unique = Vec::with_capacity(lower);
    for cell in cells {
        if seen.insert(cell) {
            unique.push(cell);
        }
    }
    unique
}
