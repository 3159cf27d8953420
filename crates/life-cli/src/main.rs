//! Terminal front end for life-core.

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use life_core::patterns;
use life_core::world::{self, World};
use life_core::{LifeConfig, RunSummary, Simulation, WorldFile};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::thread;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "life", version, about = "Conway's Game of Life")]
struct Cli {
    /// Log debug events.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a simulation until it settles or the step limit is reached.
    Run(RunArgs),
    /// Print a saved world.
    Show { path: PathBuf },
    /// Write a new random or pattern world file.
    New(NewArgs),
}

#[derive(Args, Debug, Clone)]
struct WorldArgs {
    /// JSON configuration file; flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    rows: Option<usize>,
    #[arg(long)]
    cols: Option<usize>,
    #[arg(long)]
    cell_size: Option<u32>,
    /// Slider position in 0.05..=0.7; seconds between generations is speed cubed.
    #[arg(long)]
    speed: Option<f64>,
    #[arg(long)]
    seed: Option<u64>,
    /// Seed the world with a named pattern instead of random cells.
    #[arg(long, conflicts_with = "world")]
    pattern: Option<String>,
    /// Load the starting world from a world file.
    #[arg(long)]
    world: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct RunArgs {
    #[command(flatten)]
    world: WorldArgs,
    #[arg(long, default_value_t = 1000)]
    steps: usize,
    #[arg(long, default_value_t = 10)]
    sample_every: usize,
    /// Don't draw generations; run as fast as possible.
    #[arg(long, short)]
    quiet: bool,
    /// Wait for Enter between generations (`q` quits).
    #[arg(long)]
    manual: bool,
    #[arg(long)]
    save_current: Option<PathBuf>,
    #[arg(long)]
    save_initial: Option<PathBuf>,
    /// Write the run summary as JSON.
    #[arg(long)]
    summary: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct NewArgs {
    #[command(flatten)]
    world: WorldArgs,
    out: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let subscriber = FmtSubscriber::builder()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Command::Run(args) => run(args),
        Command::Show { path } => show(&path),
        Command::New(args) => new_world(args),
    }
}

/// Merge the JSON file and flag overrides, then clamp into the accepted limits.
fn build_config(args: &WorldArgs) -> Result<LifeConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            LifeConfig::from_json_str(&json)?
        }
        None => LifeConfig::default(),
    };
    if let Some(rows) = args.rows {
        config.rows = rows;
    }
    if let Some(columns) = args.cols {
        config.columns = columns;
    }
    if let Some(cell_size) = args.cell_size {
        config.cell_size = cell_size;
    }
    if let Some(speed) = args.speed {
        config.speed = speed;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    let clamped = config.clamped();
    if clamped != config {
        warn!(
            rows = clamped.rows,
            columns = clamped.columns,
            cell_size = clamped.cell_size,
            speed = clamped.speed,
            "configuration clamped into accepted limits"
        );
    }
    Ok(clamped)
}

fn build_simulation(args: &WorldArgs) -> Result<Simulation> {
    let config = build_config(args)?;
    let sim = match (&args.world, &args.pattern) {
        (Some(path), _) => Simulation::load(path, &config)
            .with_context(|| format!("loading world {}", path.display()))?,
        (None, Some(name)) => {
            let pattern = find_pattern(name)?;
            Simulation::from_pattern(config, pattern)?
        }
        (None, None) => Simulation::random(config)?,
    };
    let (rows, columns) = sim.dimensions();
    info!(rows, columns, "world ready");
    Ok(sim)
}

fn find_pattern(name: &str) -> Result<&'static patterns::Pattern> {
    patterns::find(name).ok_or_else(|| {
        let known: Vec<&str> = patterns::PATTERNS.iter().map(|p| p.name).collect();
        anyhow!("unknown pattern `{name}`; known patterns: {}", known.join(", "))
    })
}

fn run(args: RunArgs) -> Result<()> {
    let mut sim = build_simulation(&args.world)?;
    let summary = if args.quiet && !args.manual {
        sim.try_run(args.steps, args.sample_every)?
    } else {
        animate(&mut sim, &args)?
    };

    match summary.settled_at {
        Some(generation) => info!(generation, "stable configuration reached"),
        None => info!(steps = summary.steps, "step limit reached"),
    }
    info!(population = summary.final_population, "final population");

    if let Some(path) = &args.save_current {
        sim.save_current(path)?;
        info!(path = %path.display(), "saved current world");
    }
    if let Some(path) = &args.save_initial {
        sim.save_initial(path)?;
        info!(path = %path.display(), "saved initial world");
    }
    if let Some(path) = &args.summary {
        let json = serde_json::to_string_pretty(&summary)?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    }
    Ok(())
}

/// Draw each generation, pacing by the configured speed or waiting for Enter.
fn animate(sim: &mut Simulation, args: &RunArgs) -> Result<RunSummary> {
    let stdin = io::stdin();
    let mut input = stdin.lock().lines();
    let mut samples = Vec::new();
    let mut settled_at = None;
    let mut steps = 0;

    if !args.quiet {
        draw(sim.current(), sim.generation())?;
    }
    while steps < args.steps {
        if args.manual {
            match input.next() {
                Some(line) => {
                    if line?.trim() == "q" {
                        break;
                    }
                }
                None => break,
            }
        } else {
            thread::sleep(sim.step_interval());
        }
        let mut one = sim.try_run(1, 1)?;
        steps += 1;
        for sample in &mut one.samples {
            sample.step = steps;
        }
        samples.append(&mut one.samples);
        if !args.quiet {
            draw(sim.current(), sim.generation())?;
        }
        if one.settled_at.is_some() {
            settled_at = one.settled_at;
            break;
        }
    }

    Ok(RunSummary {
        schema_version: 1,
        steps,
        sample_every: 1,
        final_population: world::population(sim.current()),
        settled_at,
        samples,
    })
}

fn render(world: &World) -> String {
    let mut out = String::with_capacity(world.rows() * (world.columns() + 1));
    for row in world.iter_rows() {
        out.extend(row.iter().map(|&alive| if alive { '#' } else { '.' }));
        out.push('\n');
    }
    out
}

fn draw(world: &World, generation: usize) -> Result<()> {
    let mut stdout = io::stdout().lock();
    write!(stdout, "\x1b[2J\x1b[H")?;
    writeln!(
        stdout,
        "generation {generation}  population {}",
        world::population(world)
    )?;
    stdout.write_all(render(world).as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn show(path: &Path) -> Result<()> {
    let file = WorldFile::read(path).with_context(|| format!("reading {}", path.display()))?;
    println!(
        "{}: {}x{} cells of size {}, population {}",
        path.display(),
        file.world.rows(),
        file.world.columns(),
        file.cell_size,
        world::population(&file.world)
    );
    print!("{}", render(&file.world));
    Ok(())
}

fn new_world(args: NewArgs) -> Result<()> {
    let config = build_config(&args.world)?;
    let world = match &args.world.pattern {
        Some(name) => {
            let pattern = find_pattern(name)?;
            let mut world = world::empty(config.rows, config.columns);
            pattern.place(&mut world, pattern.centered_origin(config.rows, config.columns))?;
            world
        }
        None => {
            let mut rng = match config.seed {
                Some(seed) => ChaCha12Rng::seed_from_u64(seed),
                None => ChaCha12Rng::from_os_rng(),
            };
            world::random(config.rows, config.columns, &mut rng)
        }
    };
    WorldFile::new(config.cell_size, world).write(&args.out)?;
    info!(path = %args.out.display(), "wrote world");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_marks_live_cells() {
        let world = world::from_live_cells(2, 3, &[(0, 1), (1, 2)]);
        assert_eq!(render(&world), ".#.\n..#\n");
    }

    #[test]
    fn flags_override_and_clamp() {
        let cli = Cli::parse_from(["life", "run", "--rows", "4", "--cols", "30", "--speed", "0.1"]);
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        let config = build_config(&args.world).unwrap();
        assert_eq!(config.rows, 10);
        assert_eq!(config.columns, 30);
        assert_eq!(config.speed, 0.1);
    }

    #[test]
    fn unknown_pattern_lists_known_ones() {
        let err = find_pattern("spaceship").unwrap_err().to_string();
        assert!(err.contains("glider"));
    }

    #[test]
    fn pattern_conflicts_with_world() {
        let parsed = Cli::try_parse_from(["life", "run", "--pattern", "glider", "--world", "x.txt"]);
        assert!(parsed.is_err());
    }
}
