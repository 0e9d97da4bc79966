use crate::SquaresError;
use std::collections::BTreeMap;
use std::sync::Arc;

/// A target word, stored as characters so paths can index it directly.
pub type Word = Vec<char>;

/// Immutable description of one puzzle: grid size, target words and the
/// character budget derived from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleSpec {
    width: usize,
    height: usize,
    words: Arc<[Word]>,
    required_chars: Vec<char>,
    padding_pool: Vec<char>,
}

impl PuzzleSpec {
    /// Derive the required characters and the padding pool from a word list.
    ///
    /// Every distinct character is required once. A character seen `n` times
    /// across all words adds `n - 1` copies to the padding pool, so letters
    /// that recur are more likely to be drawn as filler. Nothing is checked
    /// here; see [`PuzzleSpec::validate`].
    pub fn from_words<I, S>(width: usize, height: usize, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: Vec<Word> = words
            .into_iter()
            .map(|w| w.as_ref().chars().collect())
            .collect();

        let mut counts: BTreeMap<char, usize> = BTreeMap::new();
        for ch in words.iter().flatten() {
            *counts.entry(*ch).or_default() += 1;
        }

        let required_chars: Vec<char> = counts.keys().copied().collect();
        let padding_pool: Vec<char> = counts
            .iter()
            .flat_map(|(&ch, &n)| std::iter::repeat(ch).take(n - 1))
            .collect();

        Self {
            width,
            height,
            words: words.into(),
            required_chars,
            padding_pool,
        }
    }

    /// Check the invariants a generator relies on.
    pub fn validate(&self) -> Result<(), SquaresError> {
        if self.width == 0 || self.height == 0 {
            return Err(SquaresError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.words.is_empty() {
            return Err(SquaresError::NoWords);
        }
        if let Some(index) = self.words.iter().position(|w| w.is_empty()) {
            return Err(SquaresError::EmptyWord { index });
        }

        let area = self.area();
        let required = self.required_chars.len();
        if area < required {
            return Err(SquaresError::GridTooSmall { area, required });
        }
        let padding_cells = area - required;
        if padding_cells > 0 && self.padding_pool.is_empty() {
            return Err(SquaresError::EmptyPaddingPool { padding_cells });
        }
        Ok(())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells in the grid.
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Shared handle to the word list, handed to every generated grid.
    pub fn shared_words(&self) -> Arc<[Word]> {
        Arc::clone(&self.words)
    }

    /// Distinct characters used by the words, in sorted order.
    pub fn required_chars(&self) -> &[char] {
        &self.required_chars
    }

    /// Extra occurrences beyond each character's first use.
    pub fn padding_pool(&self) -> &[char] {
        &self.padding_pool
    }

    /// Cells left over once every required character has been placed.
    pub fn padding_cells(&self) -> usize {
        self.area().saturating_sub(self.required_chars.len())
    }
}

/// Build a validated puzzle.
pub fn build_spec<I, S>(width: usize, height: usize, words: I) -> Result<PuzzleSpec, SquaresError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let spec = PuzzleSpec::from_words(width, height, words);
    spec.validate()?;
    Ok(spec)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_and_padding() {
        let spec = PuzzleSpec::from_words(4, 4, ["SWOT", "PIG", "AND", "GNU"]);

        assert_eq!(
            spec.required_chars(),
            &['A', 'D', 'G', 'I', 'N', 'O', 'P', 'S', 'T', 'U', 'W']
        );
        // G and N each appear twice
        assert_eq!(spec.padding_pool(), &['G', 'N']);
        assert_eq!(spec.padding_cells(), 5);
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn test_padding_counts_repeats_within_a_word() {
        let spec = PuzzleSpec::from_words(3, 3, ["BOO", "OX"]);
        assert_eq!(spec.required_chars(), &['B', 'O', 'X']);
        assert_eq!(spec.padding_pool(), &['O', 'O']);
    }

    #[test]
    fn test_duplicate_words_are_kept() {
        let spec = PuzzleSpec::from_words(2, 2, ["AB", "AB"]);
        assert_eq!(spec.words().len(), 2);
        assert_eq!(spec.padding_pool(), &['A', 'B']);
    }

    #[test]
    fn test_grid_too_small() {
        let err = build_spec(2, 2, ["ABCDE"]).unwrap_err();
        assert_eq!(err, SquaresError::GridTooSmall { area: 4, required: 5 });
    }

    #[test]
    fn test_empty_padding_pool_rejected() {
        let err = build_spec(3, 3, ["ABC"]).unwrap_err();
        assert_eq!(err, SquaresError::EmptyPaddingPool { padding_cells: 6 });
    }

    #[test]
    fn test_exact_fit_without_padding() {
        let spec = build_spec(2, 2, ["ABCD"]).unwrap();
        assert!(spec.padding_pool().is_empty());
        assert_eq!(spec.padding_cells(), 0);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(
            build_spec(0, 3, ["A"]).unwrap_err(),
            SquaresError::InvalidDimensions { width: 0, height: 3 }
        );
        assert_eq!(
            build_spec(2, 2, Vec::<String>::new()).unwrap_err(),
            SquaresError::NoWords
        );
        assert_eq!(
            build_spec(2, 2, ["AB", ""]).unwrap_err(),
            SquaresError::EmptyWord { index: 1 }
        );
    }
}
