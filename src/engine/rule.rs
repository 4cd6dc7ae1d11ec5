/// Occupied-neighbor counts range over `0..=8`
const COUNTS: usize = 9;
type RuleTable = [[bool; COUNTS]; 2];

/// Lookup table for the B3/S23 ruleset
///
/// Indexed by `[alive as usize][occupied neighbors]`, yields whether the cell
/// is alive in the next generation.
const RULE: RuleTable = generate_rule_table();

const fn generate_rule_table() -> RuleTable {
    let mut table = [[false; COUNTS]; 2];
    let mut neighbors = 0;
    while neighbors < COUNTS {
        table[0][neighbors] = neighbors == 3;
        table[1][neighbors] = neighbors == 2 || neighbors == 3;
        neighbors += 1;
    }
    table
}

/// Whether a cell with the given state and occupied-neighbor count lives on
#[inline]
pub(super) fn next_cell_state(alive: bool, occupied: usize) -> bool {
    RULE[alive as usize].get(occupied).copied().unwrap_or(false)
}
