use crate::puzzle::{PuzzleSpec, Word};
use crate::SquaresError;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Rows of the hand-built square injected by self-test runs. It holds
/// "SWOT", "PIG", "AND" and "GNU".
pub const SELF_TEST_ROWS: [&str; 4] = ["SWOT", "PIGU", "ANDB", "RGNU"];

/// A cell position, `x` along a row and `y` down the columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Coordinate {
    pub x: usize,
    pub y: usize,
}

impl Coordinate {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Orthogonal neighbours that lie inside a `width` x `height` grid.
    pub fn neighbors(self, width: usize, height: usize) -> impl Iterator<Item = Coordinate> {
        let Coordinate { x, y } = self;
        [
            x.checked_sub(1).map(|nx| Coordinate::new(nx, y)),
            (x + 1 < width).then(|| Coordinate::new(x + 1, y)),
            y.checked_sub(1).map(|ny| Coordinate::new(x, ny)),
            (y + 1 < height).then(|| Coordinate::new(x, y + 1)),
        ]
        .into_iter()
        .flatten()
    }
}

/// One filled grid travelling through the pipeline.
///
/// Owned by its generator until queued, then by exactly one solver, which
/// records the verdict in `found`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateGrid {
    owner_id: usize,
    sequence: u64,
    self_test: bool,
    width: usize,
    height: usize,
    cells: Vec<char>,
    words: Arc<[Word]>,
    found: Option<bool>,
}

impl CandidateGrid {
    /// Wrap a fully populated, row-major cell buffer.
    pub fn new(
        owner_id: usize,
        sequence: u64,
        width: usize,
        height: usize,
        cells: Vec<char>,
        words: Arc<[Word]>,
    ) -> Result<Self, SquaresError> {
        if cells.len() != width * height {
            return Err(SquaresError::CellCountMismatch {
                chars: cells.len(),
                cells: width * height,
            });
        }
        Ok(Self {
            owner_id,
            sequence,
            self_test: false,
            width,
            height,
            cells,
            words,
            found: None,
        })
    }

    /// Build a grid from text rows, all of the same length.
    pub fn from_rows<S: AsRef<str>>(
        owner_id: usize,
        rows: &[S],
        words: Arc<[Word]>,
    ) -> Result<Self, SquaresError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().chars().count());
        let cells: Vec<char> = rows.iter().flat_map(|r| r.as_ref().chars()).collect();
        Self::new(owner_id, 0, width, height, cells, words)
    }

    /// The known-good square for the built-in self-test, carrying the
    /// puzzle's own word list.
    pub fn self_test_fixture(spec: &PuzzleSpec, owner_id: usize) -> Result<Self, SquaresError> {
        let fixture_height = SELF_TEST_ROWS.len();
        let fixture_width = SELF_TEST_ROWS[0].len();
        if spec.width() != fixture_width || spec.height() != fixture_height {
            return Err(SquaresError::FixtureMismatch {
                fixture_width,
                fixture_height,
                width: spec.width(),
                height: spec.height(),
            });
        }
        let mut grid = Self::from_rows(owner_id, &SELF_TEST_ROWS, spec.shared_words())?;
        grid.self_test = true;
        Ok(grid)
    }

    pub fn owner_id(&self) -> usize {
        self.owner_id
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Whether this is the injected self-test fixture rather than a random grid.
    pub fn is_self_test(&self) -> bool {
        self.self_test
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Verdict, `None` until a solver has evaluated the grid.
    pub fn found(&self) -> Option<bool> {
        self.found
    }

    pub fn is_found(&self) -> bool {
        self.found == Some(true)
    }

    pub(crate) fn set_found(&mut self, found: bool) {
        debug_assert!(self.found.is_none(), "verdict already recorded");
        self.found = Some(found);
    }

    /// Character at `pos`, or `None` outside the grid.
    pub fn get(&self, pos: Coordinate) -> Option<char> {
        if pos.x >= self.width || pos.y >= self.height {
            return None;
        }
        self.cells.get(pos.y * self.width + pos.x).copied()
    }

    /// All coordinates holding `ch`, in row-major order.
    pub fn positions_of(&self, ch: char) -> impl Iterator<Item = Coordinate> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(move |&(_, &c)| c == ch)
            .map(move |(i, _)| Coordinate::new(i % self.width, i / self.width))
    }

    pub fn cells(&self) -> &[char] {
        &self.cells
    }

    /// `height` strings of `width` characters each.
    pub fn rows(&self) -> Vec<String> {
        self.cells
            .chunks(self.width.max(1))
            .map(|row| row.iter().collect())
            .collect()
    }

    /// Serializable snapshot for reporting.
    pub fn report(&self) -> GridReport {
        GridReport {
            owner_id: self.owner_id,
            sequence: self.sequence,
            self_test: self.self_test,
            found: self.found,
            width: self.width,
            height: self.height,
            rows: self.rows(),
            words: self.words.iter().map(|w| w.iter().collect()).collect(),
        }
    }
}

impl fmt::Display for CandidateGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", row)?;
        }
        Ok(())
    }
}

/// Plain-data view of a grid, for JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridReport {
    pub owner_id: usize,
    pub sequence: u64,
    pub self_test: bool,
    pub found: Option<bool>,
    pub width: usize,
    pub height: usize,
    pub rows: Vec<String>,
    pub words: Vec<String>,
}
