use thiserror::Error;

/// Errors raised by [`Row`](crate::Row) and [`Matrix`](crate::Matrix) operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlgebraError {
    /// Element-wise arithmetic between rows of different lengths
    #[error("rows must have the same length: {left} != {right}")]
    LengthMismatch { left: usize, right: usize },

    /// Matrix shapes are incompatible for the given operation
    #[error("incompatible shapes for {op}: {left:?} and {right:?}")]
    ShapeMismatch {
        op: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },

    #[error("{what} index {index} out of bounds (length {len})")]
    IndexOutOfBounds {
        what: &'static str,
        index: usize,
        len: usize,
    },

    /// A matrix was built from rows of differing lengths
    #[error("row {row} has length {len}, expected {expected}")]
    RaggedRows {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("invalid bit {0:?}, expected '0' or '1'")]
    InvalidBit(char),
}

/// Errors raised while building or operating a [`LinearCode`](crate::LinearCode)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodeError {
    #[error(transparent)]
    Algebra(#[from] AlgebraError),

    #[error("the generator matrix has not been defined")]
    MissingGenerator,

    /// Either never set, or the parity-check derivation did not produce a usable matrix
    #[error("the parity-check matrix is not available")]
    MissingParityCheck,

    #[error("length of bits ({len}) is not a multiple of the block size ({block})")]
    BlockLength { len: usize, block: usize },

    /// The input rows only span the zero vector
    #[error("the rows span only the zero vector")]
    DegenerateCode,

    /// A block with zero syndrome that `G` does not generate, i.e. `G` and `H` disagree
    #[error("block {index} has a zero syndrome but is not a codeword")]
    UnknownCodeword { index: usize },

    #[error("invalid Hamming parameter t = {0}")]
    InvalidHammingParameter(u32),
}
