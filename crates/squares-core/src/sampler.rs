use crate::grid::CandidateGrid;
use crate::puzzle::PuzzleSpec;
use crate::SquaresError;
use rand::Rng;

/// Produces random grids that contain every required character at least once.
///
/// Holds no state of its own beyond a borrowed puzzle, so any number of
/// threads can sample from the same spec, each with its own RNG.
#[derive(Debug, Clone, Copy)]
pub struct GridSampler<'a> {
    spec: &'a PuzzleSpec,
}

impl<'a> GridSampler<'a> {
    pub fn new(spec: &'a PuzzleSpec) -> Self {
        Self { spec }
    }

    /// Draw one grid tagged with its producer and sequence number.
    ///
    /// The character multiset is the required characters plus one uniform
    /// draw (with replacement) from the padding pool per remaining cell.
    /// Characters and cells are then paired off by drawing from both pools
    /// without replacement until they are empty.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        owner_id: usize,
        sequence: u64,
    ) -> Result<CandidateGrid, SquaresError> {
        let spec = self.spec;
        let area = spec.area();
        let required = spec.required_chars();
        if area < required.len() {
            return Err(SquaresError::GridTooSmall {
                area,
                required: required.len(),
            });
        }

        let padding_cells = area - required.len();
        let pool = spec.padding_pool();
        if padding_cells > 0 && pool.is_empty() {
            return Err(SquaresError::EmptyPaddingPool { padding_cells });
        }

        let mut chars: Vec<char> = Vec::with_capacity(area);
        chars.extend_from_slice(required);
        for _ in 0..padding_cells {
            chars.push(pool[rng.gen_range(0..pool.len())]);
        }

        let mut slots: Vec<usize> = (0..area).collect();
        let mut cells = vec!['\0'; area];
        while !chars.is_empty() {
            let ch = chars.swap_remove(rng.gen_range(0..chars.len()));
            let slot = slots.swap_remove(rng.gen_range(0..slots.len()));
            cells[slot] = ch;
        }

        CandidateGrid::new(
            owner_id,
            sequence,
            spec.width(),
            spec.height(),
            cells,
            spec.shared_words(),
        )
    }
}
