//! Generate-and-test pipeline.
//!
//! Generator threads feed random grids into a bounded work queue, solver
//! threads drain it and push evaluated grids into a bounded result queue,
//! and the orchestrator waits on the result queue for the first grid that
//! holds every word. The queues are the only coordination between workers;
//! a full queue blocks its producers.

use crate::grid::CandidateGrid;
use crate::puzzle::PuzzleSpec;
use crate::sampler::GridSampler;
use crate::search;
use crate::SquaresError;
use crossbeam_channel::{Receiver, Sender};
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Number of hardware threads, or 1 if it cannot be determined.
pub fn available_parallelism() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Worker counts and run options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Generator threads; 0 means one per hardware thread
    pub generators: usize,
    /// Solver threads, also the capacity of both queues; 0 means two per hardware thread
    pub solvers: usize,
    /// Inject the known-good fixture grid
    pub self_test: bool,
    /// Pause before every generation cycle
    pub generator_delay: Option<Duration>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new(0, 0).resolved()
    }
}

impl PipelineConfig {
    pub fn new(generators: usize, solvers: usize) -> Self {
        Self {
            generators,
            solvers,
            self_test: false,
            generator_delay: None,
        }
    }

    pub fn with_self_test(mut self, self_test: bool) -> Self {
        self.self_test = self_test;
        self
    }

    pub fn with_generator_delay(mut self, delay: Duration) -> Self {
        self.generator_delay = Some(delay);
        self
    }

    /// Replace zero worker counts with the hardware-based defaults.
    pub fn resolved(mut self) -> Self {
        let cores = available_parallelism();
        if self.generators == 0 {
            self.generators = cores;
        }
        if self.solvers == 0 {
            self.solvers = cores * 2;
        }
        self
    }
}

/// Counters shared by every worker of one run.
#[derive(Debug, Default)]
pub struct PipelineStats {
    generated: AtomicU64,
    evaluated: AtomicU64,
}

impl PipelineStats {
    pub fn generated(&self) -> u64 {
        self.generated.load(Ordering::Relaxed)
    }

    pub fn evaluated(&self) -> u64 {
        self.evaluated.load(Ordering::Relaxed)
    }
}

/// Stop flag and counters handed to each worker.
#[derive(Debug, Clone, Default)]
pub struct PipelineControl {
    stop: Arc<AtomicBool>,
    stats: Arc<PipelineStats>,
}

impl PipelineControl {
    /// Ask every worker to exit at its next loop iteration.
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }

    pub fn stats(&self) -> &PipelineStats {
        &self.stats
    }
}

/// Result of a successful run.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    /// The first grid that held every word
    pub grid: CandidateGrid,
    /// Grids produced by generators (the fixture is not counted)
    pub generated: u64,
    /// Grids given a verdict by solvers
    pub evaluated: u64,
    pub elapsed: Duration,
}

/// Start `count` generator threads publishing onto `work`.
///
/// Each worker tags its grids with its id and a sequence number starting at
/// zero. A worker exits when the run is stopped, when the work queue is
/// disconnected, or when the spec cannot be sampled.
pub fn spawn_generators(
    count: usize,
    spec: Arc<PuzzleSpec>,
    work: Sender<CandidateGrid>,
    delay: Option<Duration>,
    control: &PipelineControl,
) -> Vec<JoinHandle<()>> {
    (0..count)
        .map(|id| {
            let spec = Arc::clone(&spec);
            let work = work.clone();
            let control = control.clone();
            thread::spawn(move || generator_loop(id, &spec, &work, delay, &control))
        })
        .collect()
}

fn generator_loop(
    id: usize,
    spec: &PuzzleSpec,
    work: &Sender<CandidateGrid>,
    delay: Option<Duration>,
    control: &PipelineControl,
) {
    let sampler = GridSampler::new(spec);
    let mut rng = rand::thread_rng();
    tracing::debug!(generator = id, "generator started");

    for sequence in 0u64.. {
        if control.is_stopped() {
            break;
        }
        if let Some(delay) = delay {
            thread::sleep(delay);
        }

        let grid = match sampler.sample(&mut rng, id, sequence) {
            Ok(grid) => grid,
            Err(e) => {
                tracing::error!(generator = id, error = %e, "cannot generate grid");
                break;
            }
        };
        control.stats.generated.fetch_add(1, Ordering::Relaxed);

        if work.send(grid).is_err() {
            break;
        }
    }

    tracing::debug!(generator = id, "generator stopped");
}

/// Start `count` solver threads, each holding its own handle on `work`.
///
/// Each worker evaluates grids until the run is stopped or either queue is
/// disconnected.
pub fn spawn_solvers(
    count: usize,
    work: Receiver<CandidateGrid>,
    results: Sender<CandidateGrid>,
    control: &PipelineControl,
) -> Vec<JoinHandle<()>> {
    (0..count)
        .map(|id| {
            let work = work.clone();
            let results = results.clone();
            let control = control.clone();
            thread::spawn(move || solver_loop(id, &work, &results, &control))
        })
        .collect()
}

fn solver_loop(
    id: usize,
    work: &Receiver<CandidateGrid>,
    results: &Sender<CandidateGrid>,
    control: &PipelineControl,
) {
    // deepest word index this solver has reached so far
    let mut best = 0;
    tracing::debug!(solver = id, "solver started");

    loop {
        if control.is_stopped() {
            break;
        }
        let Ok(mut grid) = work.recv() else {
            break;
        };

        let matched = search::words_matched(&grid);
        let found = matched == grid.words().len();
        grid.set_found(found);
        control.stats.evaluated.fetch_add(1, Ordering::Relaxed);

        if matched > best {
            best = matched;
            tracing::debug!(
                solver = id,
                words = matched,
                owner = grid.owner_id(),
                sequence = grid.sequence(),
                "solver reached a new word depth"
            );
        }
        if grid.is_self_test() {
            tracing::info!(solver = id, found, "evaluated self-test grid\n{}", grid);
        } else {
            tracing::debug!(
                solver = id,
                owner = grid.owner_id(),
                sequence = grid.sequence(),
                found,
                "evaluated grid\n{}",
                grid
            );
        }

        if results.send(grid).is_err() {
            break;
        }
    }

    tracing::debug!(solver = id, "solver stopped");
}

/// Orchestrates one run over a fixed puzzle.
pub struct Pipeline {
    spec: Arc<PuzzleSpec>,
    config: PipelineConfig,
    control: PipelineControl,
}

impl Pipeline {
    pub fn new(spec: PuzzleSpec, config: PipelineConfig) -> Self {
        Self {
            spec: Arc::new(spec),
            config: config.resolved(),
            control: PipelineControl::default(),
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Handle for stopping the run or reading its counters from elsewhere.
    pub fn control(&self) -> PipelineControl {
        self.control.clone()
    }

    /// Run until a grid holding every word is found.
    ///
    /// Workers are not joined on return; they exit on their own once they
    /// observe the stop flag or a disconnected queue.
    pub fn run(self) -> Result<PipelineOutcome, SquaresError> {
        self.spec.validate()?;
        let config = &self.config;
        let fixture = if config.self_test {
            Some(CandidateGrid::self_test_fixture(&self.spec, config.generators)?)
        } else {
            None
        };

        let started = Instant::now();
        tracing::info!(
            generators = config.generators,
            solvers = config.solvers,
            self_test = config.self_test,
            width = self.spec.width(),
            height = self.spec.height(),
            words = self.spec.words().len(),
            "starting pipeline"
        );

        let (work_tx, work_rx) = crossbeam_channel::bounded(config.solvers);
        let (result_tx, result_rx) = crossbeam_channel::bounded(config.solvers);

        spawn_solvers(config.solvers, work_rx, result_tx, &self.control);
        spawn_generators(
            config.generators,
            Arc::clone(&self.spec),
            work_tx.clone(),
            config.generator_delay,
            &self.control,
        );

        if let Some(fixture) = fixture {
            work_tx
                .send(fixture)
                .map_err(|_| SquaresError::PipelineStalled)?;
        }
        drop(work_tx);

        let outcome = loop {
            let Ok(grid) = result_rx.recv() else {
                return Err(SquaresError::PipelineStalled);
            };
            if grid.is_found() {
                self.control.stop();
                let stats = self.control.stats();
                break PipelineOutcome {
                    grid,
                    generated: stats.generated(),
                    evaluated: stats.evaluated(),
                    elapsed: started.elapsed(),
                };
            }
        };

        tracing::info!(
            owner = outcome.grid.owner_id(),
            sequence = outcome.grid.sequence(),
            self_test = outcome.grid.is_self_test(),
            evaluated = outcome.evaluated,
            elapsed_ms = outcome.elapsed.as_millis() as u64,
            "found a valid square"
        );
        Ok(outcome)
    }
}

/// Run with explicit worker counts and return the first valid grid.
pub fn run_pipeline(
    spec: PuzzleSpec,
    generators: usize,
    solvers: usize,
    self_test: bool,
) -> Result<CandidateGrid, SquaresError> {
    let config = PipelineConfig::new(generators, solvers).with_self_test(self_test);
    Pipeline::new(spec, config).run().map(|outcome| outcome.grid)
}
