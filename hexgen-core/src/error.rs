//! Error types for board and game operations

/// Precondition violations raised by the board, strategy and game loop
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HexError {
    #[error("Invalid board dimension: {0}")]
    InvalidDimension(usize),

    #[error("Cell ({row}, {col}) is already occupied")]
    CellOccupied { row: usize, col: usize },

    #[error("Cell ({row}, {col}) is off the board")]
    OffBoard { row: usize, col: usize },

    #[error("No open positions left on the board")]
    NoOpenPositions,

    #[error("Game is already over")]
    GameOver,
}

pub type Result<T> = std::result::Result<T, HexError>;
