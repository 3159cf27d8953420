use super::Simulation;
use crate::world::{self, World};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct StepMetrics {
    pub step: usize,
    pub generation: usize,
    pub population: usize,
    pub births: usize,
    pub deaths: usize,
    pub changed: bool,
}

fn default_schema_version() -> u32 {
    1
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunSummary {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub steps: usize,
    pub sample_every: usize,
    pub final_population: usize,
    /// Generation whose step reported no change, if the run ended that way.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settled_at: Option<usize>,
    pub samples: Vec<StepMetrics>,
}

#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PopulationStats {
    pub rows: usize,
    pub columns: usize,
    pub alive: usize,
    pub dead: usize,
    pub generation: usize,
}

/// Cells that became alive and cells that died between two same-sized worlds.
pub(crate) fn births_and_deaths(before: &World, after: &World) -> (usize, usize) {
    debug_assert_eq!(before.dimensions(), after.dimensions());
    before
        .iter()
        .zip(after.iter())
        .fold((0, 0), |(births, deaths), (&was, &is)| match (was, is) {
            (false, true) => (births + 1, deaths),
            (true, false) => (births, deaths + 1),
            _ => (births, deaths),
        })
}

impl Simulation {
    /// `step` counts from the start of the current run; `generation` from setup.
    pub(crate) fn collect_step_metrics(&self, step: usize) -> StepMetrics {
        StepMetrics {
            step,
            generation: self.generation,
            population: world::population(self.current()),
            births: self.births_last_step,
            deaths: self.deaths_last_step,
            changed: self.last_changed().unwrap_or(false),
        }
    }

    pub fn population_stats(&self) -> PopulationStats {
        let (rows, columns) = self.dimensions();
        let alive = world::population(self.current());
        PopulationStats {
            rows,
            columns,
            alive,
            dead: rows * columns - alive,
            generation: self.generation,
        }
    }
}
