//! Letter-square search engine.
//!
//! Generates random letter grids under a per-puzzle character budget and
//! races a pool of solvers to find one in which every target word can be
//! traced through orthogonally adjacent cells.

mod error;
pub mod grid;
pub mod pipeline;
pub mod puzzle;
pub mod sampler;
pub mod search;

pub use error::SquaresError;
pub use grid::{CandidateGrid, Coordinate, GridReport, SELF_TEST_ROWS};
pub use pipeline::{run_pipeline, Pipeline, PipelineConfig, PipelineControl, PipelineOutcome};
pub use puzzle::{build_spec, PuzzleSpec, Word};
pub use sampler::GridSampler;
pub use search::{contains_word, evaluate};
