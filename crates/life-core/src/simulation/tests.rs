use super::*;
use crate::patterns;
use crate::world::{from_live_cells, population};
use std::path::PathBuf;

fn config(rows: usize, columns: usize) -> LifeConfig {
    LifeConfig {
        rows,
        columns,
        seed: Some(42),
        ..LifeConfig::default()
    }
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("life-sim-{}-{name}.txt", std::process::id()))
}

fn block_world() -> World {
    from_live_cells(10, 10, &[(4, 4), (4, 5), (5, 4), (5, 5)])
}

#[test]
fn random_is_reproducible_with_seed() {
    let a = Simulation::random(config(30, 20)).unwrap();
    let b = Simulation::random(config(30, 20)).unwrap();
    assert_eq!(a.current(), b.current());
    assert_eq!(a.dimensions(), (30, 20));
    assert_eq!(a.initial(), a.current());
}

#[test]
fn random_rejects_invalid_config() {
    let err = Simulation::random(config(5, 20)).err().unwrap();
    assert!(matches!(err, SimulationError::Config(ConfigError::Rows { .. })));
}

#[test]
fn from_world_checks_dimensions() {
    let err = Simulation::from_world(config(10, 12), block_world()).err().unwrap();
    assert!(matches!(
        err,
        SimulationError::DimensionMismatch {
            rows: 10,
            columns: 12,
            actual_rows: 10,
            actual_columns: 10
        }
    ));
}

#[test]
fn still_life_settles_on_first_step() {
    let mut sim = Simulation::from_world(config(10, 10), block_world()).unwrap();
    assert_eq!(sim.last_changed(), None);
    assert!(!sim.is_settled());
    assert!(!sim.step());
    assert!(sim.is_settled());
    assert_eq!(sim.settled_at(), Some(1));
    assert_eq!(sim.current(), &block_world());
}

#[test]
fn step_counts_births_and_deaths_against_previous_world() {
    let blinker = patterns::find("blinker").unwrap();
    let mut sim = Simulation::from_pattern(config(10, 10), blinker).unwrap();
    let before = sim.current().clone();
    assert!(sim.step());
    assert_eq!((sim.births_last_step, sim.deaths_last_step), (2, 2));
    assert_eq!(sim.current(), &crate::engine::step(&before).world);
    assert_eq!(sim.generation(), 1);
}

#[test]
fn stepping_keeps_initial_world() {
    let glider = patterns::find("glider").unwrap();
    let mut sim = Simulation::from_pattern(config(12, 12), glider).unwrap();
    let initial = sim.initial().clone();
    for _ in 0..4 {
        assert!(sim.step());
    }
    assert_eq!(sim.generation(), 4);
    assert_eq!(sim.initial(), &initial);
    assert_ne!(sim.current(), &initial);
    assert_eq!(population(sim.current()), 5);
}

#[test]
fn try_run_stops_when_settled() {
    // A lone cell dies in one step; the empty world then settles.
    let world = from_live_cells(10, 10, &[(3, 3)]);
    let mut sim = Simulation::from_world(config(10, 10), world).unwrap();
    let summary = sim.try_run(100, 10).unwrap();
    assert_eq!(summary.steps, 2);
    assert_eq!(summary.settled_at, Some(2));
    assert_eq!(summary.final_population, 0);
    let last = summary.samples.last().unwrap();
    assert_eq!(last.step, 2);
    assert!(!last.changed);
}

#[test]
fn try_run_samples_on_interval_and_last_step() {
    let blinker = patterns::find("blinker").unwrap();
    let mut sim = Simulation::from_pattern(config(10, 10), blinker).unwrap();
    let summary = sim.try_run(7, 3).unwrap();
    assert_eq!(summary.steps, 7);
    assert_eq!(summary.settled_at, None);
    let steps: Vec<usize> = summary.samples.iter().map(|m| m.step).collect();
    assert_eq!(steps, vec![3, 6, 7]);
    assert!(summary.samples.iter().all(|m| m.births == 2 && m.deaths == 2));
    assert!(summary.samples.iter().all(|m| m.population == 3));
}

#[test]
fn try_run_validates_arguments() {
    let mut sim = Simulation::from_world(config(10, 10), block_world()).unwrap();
    assert_eq!(sim.try_run(10, 0), Err(RunError::InvalidSampleEvery));
    assert!(matches!(
        sim.try_run(Simulation::MAX_RUN_STEPS + 1, 1),
        Err(RunError::TooManySteps { .. })
    ));
    assert_eq!(sim.generation(), 0);
}

#[test]
fn run_summary_serializes_to_json() {
    let mut sim = Simulation::from_world(config(10, 10), block_world()).unwrap();
    let summary = sim.run(5, 1);
    let json = serde_json::to_string(&summary).unwrap();
    let back: RunSummary = serde_json::from_str(&json).unwrap();
    assert_eq!(back, summary);
    assert!(json.contains("\"settled_at\":1"));
}

#[test]
fn save_initial_and_current_differ_after_stepping() {
    let glider = patterns::find("glider").unwrap();
    let mut sim = Simulation::from_pattern(config(10, 10), glider).unwrap();
    sim.step();
    let initial_path = temp_path("initial");
    let current_path = temp_path("current");
    sim.save_initial(&initial_path).unwrap();
    sim.save_current(&current_path).unwrap();

    let initial = Simulation::load(&initial_path, &LifeConfig::default()).unwrap();
    let current = Simulation::load(&current_path, &LifeConfig::default()).unwrap();
    std::fs::remove_file(&initial_path).unwrap();
    std::fs::remove_file(&current_path).unwrap();

    assert_eq!(initial.current(), sim.initial());
    assert_eq!(current.current(), sim.current());
    assert_eq!(current.config().cell_size, sim.config().cell_size);
}

#[test]
fn load_enforces_dimension_floor() {
    let path = temp_path("below-floor");
    WorldFile::new(10, from_live_cells(1, 1, &[(0, 0)]))
        .write(&path)
        .unwrap();
    let err = Simulation::load(&path, &LifeConfig::default()).err().unwrap();
    std::fs::remove_file(&path).unwrap();
    assert!(matches!(
        err,
        SimulationError::Config(ConfigError::WorldTooSmall {
            rows: 1,
            columns: 1,
            ..
        })
    ));
}

#[test]
fn load_accepts_worlds_above_the_entry_limits() {
    let path = temp_path("above-limits");
    WorldFile::new(60, from_live_cells(1200, 10, &[(1100, 4), (1100, 5), (1100, 6)]))
        .write(&path)
        .unwrap();
    let mut sim = Simulation::load(&path, &LifeConfig::default()).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(sim.dimensions(), (1200, 10));
    assert_eq!(sim.config().cell_size, 60);
    sim.set_speed(0.1).unwrap();
    assert!(sim.step());
    assert_eq!(population(sim.current()), 3);
}

#[test]
fn load_takes_cell_size_from_file_and_speed_from_base() {
    let path = temp_path("cell-size");
    WorldFile::new(25, block_world()).write(&path).unwrap();
    let base = LifeConfig {
        speed: 0.2,
        ..LifeConfig::default()
    };
    let sim = Simulation::load(&path, &base).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(sim.config().cell_size, 25);
    assert_eq!(sim.config().speed, 0.2);
    assert_eq!(sim.dimensions(), (10, 10));
}

#[test]
fn load_reports_malformed_file() {
    let path = temp_path("malformed");
    std::fs::write(&path, "size:10\nrows:10\ncols:10\nXXXX\n").unwrap();
    let err = Simulation::load(&path, &LifeConfig::default()).err().unwrap();
    std::fs::remove_file(&path).unwrap();
    assert!(matches!(
        err,
        SimulationError::WorldFile(WorldFileError::RowLength { row: 0, .. })
    ));
}

#[test]
fn resize_keeps_overlap_and_resets_generation() {
    let mut sim = Simulation::from_world(config(10, 10), block_world()).unwrap();
    sim.step();
    sim.resize(12, 10).unwrap();
    assert_eq!(sim.dimensions(), (12, 10));
    assert_eq!((sim.config().rows, sim.config().columns), (12, 10));
    assert_eq!(sim.generation(), 0);
    assert!(!sim.is_settled());
    assert_eq!(population(sim.current()), 4);
    assert_eq!(sim.initial(), sim.current());
    assert!(sim.resize(9, 10).is_err());
    assert_eq!(sim.dimensions(), (12, 10), "failed resize leaves world intact");
}

#[test]
fn toggle_edits_initial_only_before_first_step() {
    let mut sim = Simulation::from_world(config(10, 10), world::empty(10, 10)).unwrap();
    assert!(sim.toggle_cell(-1, -1).unwrap());
    assert!(sim.initial()[(9, 9)]);
    sim.step();
    assert!(sim.toggle_cell(0, 0).unwrap());
    assert!(!sim.initial()[(0, 0)]);
    assert!(sim.toggle_cell(10, 0).is_err());
}

#[test]
fn set_speed_validates() {
    let mut sim = Simulation::from_world(config(10, 10), block_world()).unwrap();
    sim.set_speed(0.5).unwrap();
    assert_eq!(sim.step_interval(), std::time::Duration::from_millis(125));
    assert!(sim.set_speed(2.0).is_err());
    assert_eq!(sim.config().speed, 0.5);
}

#[test]
fn population_stats_count_cells() {
    let sim = Simulation::from_world(config(10, 10), block_world()).unwrap();
    let stats = sim.population_stats();
    assert_eq!(stats.alive, 4);
    assert_eq!(stats.dead, 96);
    assert_eq!(stats.generation, 0);
}
