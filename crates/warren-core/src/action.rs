//! The discrete action vocabulary and per-environment action tables.

use crate::error::ActionError;
use std::fmt;

/// One of the four grid directions an agent can command.
///
/// Each action carries a fixed integer displacement on the grid, with
/// the origin at the top-left corner: x grows rightwards, y grows
/// downwards, so [`Action::Up`] is `(0, -1)`.
///
/// The set is closed and process-wide; simulators expose the subset
/// they accept through an [`ActionPool`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Action {
    /// Move towards row 0: displacement `(0, -1)`.
    Up = 0,
    /// Move towards the last column: displacement `(1, 0)`.
    Right = 1,
    /// Move away from row 0: displacement `(0, 1)`.
    Down = 2,
    /// Move towards column 0: displacement `(-1, 0)`.
    Left = 3,
}

impl Action {
    /// All four actions in their canonical order (Up, Right, Down, Left).
    pub const ALL: [Action; 4] = [Action::Up, Action::Right, Action::Down, Action::Left];

    /// The `(dx, dy)` displacement this action applies to a grid cell.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Action::Up => (0, -1),
            Action::Right => (1, 0),
            Action::Down => (0, 1),
            Action::Left => (-1, 0),
        }
    }

    /// The action pointing in the exact opposite direction.
    pub fn opposite(self) -> Action {
        match self {
            Action::Up => Action::Down,
            Action::Right => Action::Left,
            Action::Down => Action::Up,
            Action::Left => Action::Right,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Up => "up",
            Action::Right => "right",
            Action::Down => "down",
            Action::Left => "left",
        };
        write!(f, "{name}")
    }
}

/// An ordered table of the actions a simulator accepts.
///
/// Index-producing agents emit a position into this table; the table is
/// the single place where a numeric action becomes a symbolic [`Action`],
/// and [`decode`](ActionPool::decode) validates the index there. The
/// ordering is part of each environment's contract and never changes at
/// runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActionPool {
    actions: &'static [Action],
}

impl ActionPool {
    /// Wrap a static action table.
    pub const fn new(actions: &'static [Action]) -> Self {
        Self { actions }
    }

    /// The actions in pool order.
    pub fn actions(&self) -> &'static [Action] {
        self.actions
    }

    /// Number of legal actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether the pool is empty. Always false for the built-in pools.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Translate an agent-supplied index into a symbolic action.
    ///
    /// Returns [`ActionError::IndexOutOfRange`] when `index` does not
    /// name a slot in this pool.
    pub fn decode(&self, index: usize) -> Result<Action, ActionError> {
        self.actions
            .get(index)
            .copied()
            .ok_or(ActionError::IndexOutOfRange {
                index,
                pool_len: self.actions.len(),
            })
    }

    /// Position of `action` in this pool, if it is legal here.
    pub fn index_of(&self, action: Action) -> Option<usize> {
        self.actions.iter().position(|&a| a == action)
    }
}
