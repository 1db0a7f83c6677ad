//! Error types shared across the Warren workspace.
//!
//! Organized by failure class: configuration errors abort environment
//! construction, action errors abort the offending decode. Episode
//! termination is never an error — `done` is ordinary data.

use std::error::Error;
use std::fmt;

/// Errors detected while validating an environment configuration.
///
/// All of these are fatal at construction time; a constructed
/// environment never re-checks its configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Snake grids must have odd side length to centre the spawn.
    GridSizeEven {
        /// The offending side length.
        size: u32,
    },
    /// Snake grids must be at least `min` cells on a side.
    GridSizeTooSmall {
        /// The offending side length.
        size: u32,
        /// The smallest accepted side length.
        min: u32,
    },
    /// The Breakout paddle must cover at least one cell.
    PaddleSizeZero,
    /// The Breakout paddle cannot be wider than the playfield.
    PaddleTooWide {
        /// The configured paddle width.
        paddle: u32,
        /// The playfield width.
        field_width: u32,
    },
    /// Playfield geometry is internally inconsistent.
    GeometryInvalid {
        /// Description of the violated relation.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GridSizeEven { size } => {
                write!(f, "grid size must be odd, got {size}")
            }
            Self::GridSizeTooSmall { size, min } => {
                write!(f, "grid size must be at least {min}, got {size}")
            }
            Self::PaddleSizeZero => write!(f, "paddle size must be at least 1"),
            Self::PaddleTooWide {
                paddle,
                field_width,
            } => {
                write!(
                    f,
                    "paddle width {paddle} exceeds playfield width {field_width}"
                )
            }
            Self::GeometryInvalid { reason } => write!(f, "invalid geometry: {reason}"),
        }
    }
}

impl Error for ConfigError {}

/// Errors from converting an agent's numeric output into an [`Action`].
///
/// Raised at the decode boundary ([`ActionPool::decode`]); a simulator
/// never sees an invalid index.
///
/// [`Action`]: crate::Action
/// [`ActionPool::decode`]: crate::ActionPool::decode
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionError {
    /// The index does not name a slot in the environment's action pool.
    IndexOutOfRange {
        /// The agent-supplied index.
        index: usize,
        /// Number of legal actions in the pool.
        pool_len: usize,
    },
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfRange { index, pool_len } => {
                write!(f, "action index {index} out of range for pool of {pool_len}")
            }
        }
    }
}

impl Error for ActionError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_render_the_offending_values() {
        let msg = ConfigError::GridSizeEven { size: 8 }.to_string();
        assert!(msg.contains('8'));

        let msg = ConfigError::GridSizeTooSmall { size: 1, min: 3 }.to_string();
        assert!(msg.contains('1') && msg.contains('3'));

        let msg = ConfigError::PaddleTooWide {
            paddle: 50,
            field_width: 40,
        }
        .to_string();
        assert!(msg.contains("50") && msg.contains("40"));
    }

    #[test]
    fn action_error_renders_index_and_len() {
        let msg = ActionError::IndexOutOfRange {
            index: 4,
            pool_len: 2,
        }
        .to_string();
        assert!(msg.contains('4') && msg.contains('2'));
    }
}
