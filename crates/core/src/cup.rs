use crate::types::Side;

/// A single letter-labeled token occupying one slot of a pyramid.
///
/// `level` 0 is the top row. `(level, position)` is derived from
/// `stack_index` by [`crate::layout::level_and_position`] and is unique
/// within a side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cup {
    pub letter: char,
    pub side: Side,
    pub stack_index: u32,
    pub level: u32,
    pub position: u32,
    /// Deepest level of this cup's pyramid (the base row).
    pub max_level: u32,
    pub is_stacked: bool,
    /// Set on every cup of a single-stack round (centres the pyramid).
    pub single_stack: bool,
}

impl Cup {
    /// Whether this cup is the kind of target a phase looks for.
    pub fn qualifies_for(&self, stacking: bool) -> bool {
        self.is_stacked != stacking
    }
}
