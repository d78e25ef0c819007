/// The Result type for slide48.
pub(crate) type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub(crate) enum Error {
    #[error("io error")]
    StdIOError(#[from] std::io::Error),

    #[error("log error")]
    LogError(#[from] log::SetLoggerError),

    #[error("board size must be at least 2, got {0}")]
    BoardTooSmall(usize),

    #[error("board must be square: row {row} has {len} cells, expected {size}")]
    NotSquare { row: usize, len: usize, size: usize },

    #[error("cell ({col},{row}) holds {value}, expected 0 or a power of two from 2 to {max}")]
    InvalidCard {
        row: usize,
        col: usize,
        value: u32,
        max: u32,
    },

    #[error("target tile must be a power of two no smaller than 4, got {0}")]
    InvalidTarget(u32),
}
