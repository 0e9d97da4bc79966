/// Errors raised while building a puzzle or running the search pipeline.
///
/// Every variant except `PipelineStalled` is a configuration problem: the
/// puzzle itself cannot be satisfied, so nothing is retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SquaresError {
    /// Width or height is zero.
    #[error("grid dimensions must be positive (got {width}x{height})")]
    InvalidDimensions { width: usize, height: usize },

    /// The word list is empty.
    #[error("puzzle has no target words")]
    NoWords,

    /// A target word has no characters.
    #[error("target word #{index} is empty")]
    EmptyWord { index: usize },

    /// The grid has fewer cells than there are distinct required characters.
    #[error("grid area {area} cannot hold {required} required characters")]
    GridTooSmall { area: usize, required: usize },

    /// Cells remain after placing the required characters but nothing can pad them.
    #[error("{padding_cells} padding cells remain but the padding pool is empty")]
    EmptyPaddingPool { padding_cells: usize },

    /// The drawn character multiset does not cover the grid exactly.
    #[error("drew {chars} characters for {cells} cells")]
    CellCountMismatch { chars: usize, cells: usize },

    /// The self-test fixture does not fit the puzzle's grid.
    #[error("self-test fixture is {fixture_width}x{fixture_height} but puzzle is {width}x{height}")]
    FixtureMismatch {
        fixture_width: usize,
        fixture_height: usize,
        width: usize,
        height: usize,
    },

    /// Every worker exited before any grid was found.
    #[error("all workers stopped before a valid square was found")]
    PipelineStalled,
}
