//! Errors in the library.
use thiserror::Error;

/// Errors in the library.
///
/// Configuration errors are returned when an [`Engine`](crate::Engine) or one of its
/// parts is built. Once an engine runs, no error is produced by the training loop.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SarsaError {
    /// Grid dimensions must be positive, with a cell count that fits in `i32`.
    #[error("Invalid grid size: {width}x{height}")]
    InvalidGridSize {
        /// Requested width.
        width: i32,
        /// Requested height.
        height: i32,
    },

    /// A reward or obstacle cell lies outside of the grid.
    #[error("Cell ({x}, {y}) is outside of the {width}x{height} grid")]
    CellOutOfGrid {
        /// Horizontal coordinate of the cell.
        x: i32,
        /// Vertical coordinate of the cell.
        y: i32,
        /// Width of the grid.
        width: i32,
        /// Height of the grid.
        height: i32,
    },

    /// A hyper-parameter is out of its valid range.
    #[error("Invalid parameter {name}: {value}")]
    InvalidParameter {
        /// Name of the parameter.
        name: String,
        /// Given value.
        value: f32,
    },

    /// Every cell carries a reward or an obstacle, so an episode cannot start.
    #[error("No neutral, traversable start cell in the grid")]
    NoStartCell,

    /// Conversion from an integer outside of `0..4` into an action.
    #[error("Invalid action index: {0}")]
    InvalidActionIndex(usize),

    /// Record key error.
    #[error("Record key error: {0}")]
    RecordKeyError(String),

    /// Record value type error.
    #[error("Record value type error: {0}")]
    RecordValueTypeError(String),
}

impl SarsaError {
    pub(crate) fn invalid_parameter(name: &str, value: f32) -> Self {
        Self::InvalidParameter {
            name: name.to_string(),
            value,
        }
    }
}
