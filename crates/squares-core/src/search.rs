//! Word search over a filled grid.
//!
//! A word is present when its letters can be traced through a chain of
//! orthogonally adjacent cells. A path may pass through the same cell more
//! than once.

use crate::grid::{CandidateGrid, Coordinate};

/// True if `word` can be traced through the grid. An empty word never matches.
pub fn contains_word(grid: &CandidateGrid, word: &[char]) -> bool {
    let Some((&first, rest)) = word.split_first() else {
        return false;
    };
    grid.positions_of(first).any(|start| extend(grid, start, rest))
}

/// Depth-first extension of a path ending at `at`; depth is bounded by the
/// word length since no visited set is kept.
fn extend(grid: &CandidateGrid, at: Coordinate, rest: &[char]) -> bool {
    let Some((&next, tail)) = rest.split_first() else {
        return true;
    };
    at.neighbors(grid.width(), grid.height())
        .any(|step| grid.get(step) == Some(next) && extend(grid, step, tail))
}

/// Number of target words found, in list order, before the first miss.
pub fn words_matched(grid: &CandidateGrid) -> usize {
    let mut matched = 0;
    for word in grid.words() {
        let hit = contains_word(grid, word);
        if grid.is_self_test() {
            tracing::trace!(word = %word.iter().collect::<String>(), hit, "self-test word");
        }
        if !hit {
            break;
        }
        matched += 1;
    }
    matched
}

/// Check every target word and record the verdict on the grid.
pub fn evaluate(grid: &mut CandidateGrid) -> bool {
    let found = words_matched(grid) == grid.words().len();
    grid.set_found(found);
    found
}
