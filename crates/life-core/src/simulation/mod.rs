pub mod metrics;
#[cfg(test)]
mod tests;

pub use metrics::*;

use metrics::births_and_deaths;

use crate::config::{ConfigError, LifeConfig};
use crate::engine::{self, Automaton};
use crate::error::ContainerError;
use crate::patterns::Pattern;
use crate::world::{self, World};
use crate::world_file::{WorldFile, WorldFileError};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// A running Game of Life session.
///
/// Holds the initial world captured at setup and the current world, which is
/// replaced wholesale by each step.
pub struct Simulation {
    config: LifeConfig,
    initial: World,
    automaton: Automaton,
    generation: usize,
    settled_at: Option<usize>,
    births_last_step: usize,
    deaths_last_step: usize,
}

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    WorldFile(#[from] WorldFileError),
    #[error(transparent)]
    Container(#[from] ContainerError),
    #[error("world is {actual_rows}x{actual_columns}, configuration expects {rows}x{columns}")]
    DimensionMismatch {
        rows: usize,
        columns: usize,
        actual_rows: usize,
        actual_columns: usize,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RunError {
    #[error("sample_every must be positive")]
    InvalidSampleEvery,
    #[error("steps ({actual}) exceed supported maximum ({max})")]
    TooManySteps { max: usize, actual: usize },
}

impl Simulation {
    pub const MAX_RUN_STEPS: usize = 1_000_000;

    /// Start from a uniformly random world sized by `config`.
    pub fn random(config: LifeConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => ChaCha12Rng::seed_from_u64(seed),
            None => ChaCha12Rng::from_os_rng(),
        };
        let world = world::random(config.rows, config.columns, &mut rng);
        Self::from_world(config, world)
    }

    /// Start from a caller-built world, which must match `config`'s dimensions.
    pub fn from_world(config: LifeConfig, world: World) -> Result<Self, SimulationError> {
        config.validate()?;
        Self::with_checked_config(config, world)
    }

    fn with_checked_config(config: LifeConfig, world: World) -> Result<Self, SimulationError> {
        if world.dimensions() != (config.rows, config.columns) {
            return Err(SimulationError::DimensionMismatch {
                rows: config.rows,
                columns: config.columns,
                actual_rows: world.rows(),
                actual_columns: world.columns(),
            });
        }
        Ok(Self {
            config,
            initial: world.clone(),
            automaton: Automaton::new(world),
            generation: 0,
            settled_at: None,
            births_last_step: 0,
            deaths_last_step: 0,
        })
    }

    /// Start from an empty world with `pattern` centred in it.
    pub fn from_pattern(config: LifeConfig, pattern: &Pattern) -> Result<Self, SimulationError> {
        config.validate()?;
        let mut world = world::empty(config.rows, config.columns);
        pattern.place(&mut world, pattern.centered_origin(config.rows, config.columns))?;
        Self::from_world(config, world)
    }

    /// Load a world file. Cell size and dimensions come from the file; speed
    /// and seed from `base`. Only worlds smaller than the 10x10 floor are
    /// rejected; larger sizes and any recorded cell size are kept.
    pub fn load(path: impl AsRef<Path>, base: &LifeConfig) -> Result<Self, SimulationError> {
        let path = path.as_ref();
        let WorldFile { cell_size, world } = WorldFile::read(path)?;
        let config = LifeConfig {
            cell_size,
            rows: world.rows(),
            columns: world.columns(),
            ..base.clone()
        };
        config
            .validate_loaded()
            .map_err(SimulationError::from)
            .and_then(|()| Self::with_checked_config(config, world))
            .inspect_err(|e| {
                warn!(path = %path.display(), error = %e, "rejected world file");
            })
    }

    pub fn config(&self) -> &LifeConfig {
        &self.config
    }

    pub fn initial(&self) -> &World {
        &self.initial
    }

    pub fn current(&self) -> &World {
        self.automaton.world()
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn dimensions(&self) -> (usize, usize) {
        self.current().dimensions()
    }

    /// Changed flag of the latest step, `None` before the first.
    pub fn last_changed(&self) -> Option<bool> {
        self.automaton.changed()
    }

    /// True once any step has reported no change.
    pub fn is_settled(&self) -> bool {
        self.settled_at.is_some()
    }

    pub fn settled_at(&self) -> Option<usize> {
        self.settled_at
    }

    pub fn step_interval(&self) -> Duration {
        self.config.step_interval()
    }

    pub fn set_speed(&mut self, speed: f64) -> Result<(), ConfigError> {
        LifeConfig::validate_speed(speed)?;
        self.config.speed = speed;
        Ok(())
    }

    /// Advance one generation and return whether any cell changed.
    pub fn step(&mut self) -> bool {
        let next = engine::step(self.current());
        let (births, deaths) = births_and_deaths(self.current(), &next.world);
        let changed = self.automaton.apply(next);
        self.generation += 1;
        self.births_last_step = births;
        self.deaths_last_step = deaths;
        if !changed && self.settled_at.is_none() {
            self.settled_at = Some(self.generation);
            info!(generation = self.generation, "world settled");
        }
        changed
    }

    /// Flip one cell of the current world and return its new state. Before the
    /// first step the initial world is edited too.
    pub fn toggle_cell(&mut self, row: isize, column: isize) -> Result<bool, ContainerError> {
        let cell = self.automaton.world_mut().get_mut(row, column)?;
        *cell = !*cell;
        let alive = *cell;
        if self.generation == 0 {
            self.initial.set(row, column, alive)?;
        }
        Ok(alive)
    }

    /// Resize to `rows` x `columns`, keeping overlapping cells and filling new
    /// ones dead. The resized world becomes the new initial world.
    pub fn resize(&mut self, rows: usize, columns: usize) -> Result<(), SimulationError> {
        LifeConfig::validate_dimensions(rows, columns)?;
        let mut world = std::mem::take(&mut self.automaton).into_world();
        world.resize_rows(rows, false);
        world.resize_columns(columns, false);
        self.config.rows = rows;
        self.config.columns = columns;
        self.initial = world.clone();
        self.automaton.reset(world);
        self.generation = 0;
        self.settled_at = None;
        self.births_last_step = 0;
        self.deaths_last_step = 0;
        Ok(())
    }

    pub fn save_current(&self, path: impl AsRef<Path>) -> Result<(), WorldFileError> {
        WorldFile::new(self.config.cell_size, self.current().clone()).write(path)
    }

    pub fn save_initial(&self, path: impl AsRef<Path>) -> Result<(), WorldFileError> {
        WorldFile::new(self.config.cell_size, self.initial.clone()).write(path)
    }

    pub fn run(&mut self, max_steps: usize, sample_every: usize) -> RunSummary {
        self.try_run(max_steps, sample_every)
            .unwrap_or_else(|e| panic!("{e}"))
    }

    /// Step until the world settles or `max_steps` generations have run,
    /// sampling metrics every `sample_every` steps and on the final one.
    pub fn try_run(
        &mut self,
        max_steps: usize,
        sample_every: usize,
    ) -> Result<RunSummary, RunError> {
        if sample_every == 0 {
            return Err(RunError::InvalidSampleEvery);
        }
        if max_steps > Self::MAX_RUN_STEPS {
            return Err(RunError::TooManySteps {
                max: Self::MAX_RUN_STEPS,
                actual: max_steps,
            });
        }
        let mut samples = Vec::new();
        let mut steps = 0;
        let mut settled_at = None;
        while steps < max_steps {
            let changed = self.step();
            steps += 1;
            let last = !changed || steps == max_steps;
            if steps % sample_every == 0 || last {
                samples.push(self.collect_step_metrics(steps));
            }
            if !changed {
                settled_at = Some(self.generation);
                break;
            }
        }
        Ok(RunSummary {
            schema_version: 1,
            steps,
            sample_every,
            final_population: world::population(self.current()),
            settled_at,
            samples,
        })
    }
}
