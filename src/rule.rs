use std::sync::OnceLock;

/// The number of possible live-neighbor counts, `0..=8`
const NEIGHBOR_COUNTS: usize = 9;
type TransitionTable = [[Transition; NEIGHBOR_COUNTS]; 2];

/// The pending change of a cell between the decision and commit phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transition {
    /// The cell keeps its current state
    #[default]
    Stable,
    /// The cell is dead and will be born
    Rising,
    /// The cell is alive and will die
    Expiring,
}

/// Returns the transition a cell should take given its state and live neighbors
///
/// `neighbors` must be within `0..=8`
#[inline]
pub fn transition(alive: bool, neighbors: u8) -> Transition {
    get_transition_table()[usize::from(alive)][usize::from(neighbors)]
}

/// Returns a Singleton lookup table for the Game of Life ruleset
///
/// Equivalent to calling [`generate_transition_table`] once and storing the result
fn get_transition_table() -> &'static TransitionTable {
    static CELL: OnceLock<TransitionTable> = OnceLock::new();
    CELL.get_or_init(generate_transition_table)
}

/// Creates a lookup table for the Game of Life ruleset
///
/// The table is indexed first by whether the cell is alive, then by its number
/// of live neighbors. Only the cells that change state get a non-stable entry.
fn generate_transition_table() -> TransitionTable {
    let mut table = [[Transition::Stable; NEIGHBOR_COUNTS]; 2];
    for (alive, row) in table.iter_mut().enumerate() {
        for (neighbors, entry) in row.iter_mut().enumerate() {
            *entry = match (alive == 1, neighbors) {
                (true, n) if n < 2 || n > 3 => Transition::Expiring,
                (false, 3) => Transition::Rising,
                _ => Transition::Stable,
            };
        }
    }
    table
}
