//! End-to-end checks of the public API.

use rand::rngs::StdRng;
use rand::SeedableRng;
use squares_core::{
    build_spec, contains_word, evaluate, run_pipeline, CandidateGrid, GridSampler, Pipeline,
    PipelineConfig, PuzzleSpec, SquaresError, Word, SELF_TEST_ROWS,
};
use std::sync::Arc;

#[test]
fn test_self_test_pipeline_terminates() {
    let spec = build_spec(4, 4, ["SWOT", "PIG", "AND", "GNU"]).unwrap();
    let grid = run_pipeline(spec.clone(), 2, 2, true).unwrap();

    assert_eq!(grid.found(), Some(true));
    assert_eq!(grid.width(), 4);
    assert_eq!(grid.height(), 4);
    // a positive verdict holds up on re-evaluation
    for word in spec.words() {
        assert!(contains_word(&grid, word));
    }
}

#[test]
fn test_random_search_finds_easy_square() {
    // Two of the three ways to lay out A, B, C, D in a 2x2 grid keep both
    // pairs orthogonally adjacent, so random generation ends quickly.
    let spec = build_spec(2, 2, ["AB", "CD"]).unwrap();
    let config = PipelineConfig::new(2, 2);
    let outcome = Pipeline::new(spec, config).run().unwrap();

    assert!(outcome.grid.is_found());
    assert!(!outcome.grid.is_self_test());
    assert!(outcome.generated >= 1);
    assert!(outcome.evaluated >= 1);
    assert!(contains_word(&outcome.grid, &['A', 'B']));
    assert!(contains_word(&outcome.grid, &['C', 'D']));
}

#[test]
fn test_fixture_rows_from_spec_example() {
    let words: Arc<[Word]> = ["SWOT", "GNU", "ZEBRA"]
        .iter()
        .map(|w| w.chars().collect())
        .collect();
    let grid = CandidateGrid::from_rows(0, &SELF_TEST_ROWS, words).unwrap();

    assert!(contains_word(&grid, &['S', 'W', 'O', 'T']));
    assert!(contains_word(&grid, &['G', 'N', 'U']));
    assert!(!contains_word(&grid, &['Z', 'E', 'B', 'R', 'A']));
}

#[test]
fn test_sampled_grids_only_fail_on_missing_paths() {
    let spec = build_spec(3, 3, ["CAT", "ACT", "TAT"]).unwrap();
    let sampler = GridSampler::new(&spec);
    let mut rng = StdRng::seed_from_u64(2024);

    for seq in 0..50 {
        let mut grid = sampler.sample(&mut rng, 0, seq).unwrap();
        // single letters are always present in a sampled grid
        for ch in spec.required_chars() {
            assert!(contains_word(&grid, &[*ch]));
        }
        let found = evaluate(&mut grid);
        assert_eq!(grid.found(), Some(found));
    }
}

#[test]
fn test_configuration_errors_surface_at_build() {
    assert_eq!(
        build_spec(2, 2, ["HELLO", "WORLD"]).unwrap_err(),
        SquaresError::GridTooSmall { area: 4, required: 7 }
    );

    let spec = PuzzleSpec::from_words(2, 2, ["HELLO", "WORLD"]);
    assert!(run_pipeline(spec, 1, 1, false).is_err());
}

#[test]
fn test_exact_fit_generates_without_padding() {
    let spec = build_spec(3, 2, ["SQUARE"]).unwrap();
    assert!(spec.padding_pool().is_empty());

    let grid = run_pipeline(spec, 1, 1, false).unwrap();
    let mut cells = grid.cells().to_vec();
    cells.sort_unstable();
    assert_eq!(cells, vec!['A', 'E', 'Q', 'R', 'S', 'U']);
}
