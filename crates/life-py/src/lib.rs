use life_core::error::size_from_signed;
use life_core::grid::Grid;
use life_core::{ContainerError, LifeConfig, Simulation, SimulationError, WorldFileError};
use pyo3::exceptions::{PyIndexError, PyOSError, PyValueError};
use pyo3::prelude::*;
use std::path::PathBuf;

/// Minimal PyO3 module exposing life-core to Python.
#[pyfunction]
fn version() -> &'static str {
    "0.1.0"
}

fn container_err(e: ContainerError) -> PyErr {
    match e {
        ContainerError::IndexOutOfBounds { .. } => PyIndexError::new_err(e.to_string()),
        _ => PyValueError::new_err(e.to_string()),
    }
}

fn world_file_err(e: WorldFileError) -> PyErr {
    match e {
        WorldFileError::Io { .. } => PyOSError::new_err(e.to_string()),
        _ => PyValueError::new_err(e.to_string()),
    }
}

fn simulation_err(e: SimulationError) -> PyErr {
    match e {
        SimulationError::Container(e) => container_err(e),
        SimulationError::WorldFile(e) => world_file_err(e),
        _ => PyValueError::new_err(e.to_string()),
    }
}

fn index(value: i64) -> PyResult<isize> {
    isize::try_from(value).map_err(|_| PyIndexError::new_err(format!("index {value} out of range")))
}

#[pyclass(name = "Simulation")]
struct PySimulation {
    inner: Simulation,
}

#[pymethods]
impl PySimulation {
    #[new]
    #[pyo3(signature = (rows=50, columns=50, seed=None, cell_size=10, speed=0.4))]
    fn new(rows: i64, columns: i64, seed: Option<u64>, cell_size: u32, speed: f64) -> PyResult<Self> {
        let config = LifeConfig {
            cell_size,
            rows: size_from_signed(rows).map_err(container_err)?,
            columns: size_from_signed(columns).map_err(container_err)?,
            speed,
            seed,
        };
        let inner = Simulation::random(config).map_err(simulation_err)?;
        Ok(Self { inner })
    }

    /// Load a world file; speed comes from the default configuration.
    #[staticmethod]
    fn load(path: PathBuf) -> PyResult<Self> {
        let inner = Simulation::load(&path, &LifeConfig::default()).map_err(simulation_err)?;
        Ok(Self { inner })
    }

    #[staticmethod]
    #[pyo3(signature = (cells, cell_size=10))]
    fn from_cells(cells: Vec<Vec<bool>>, cell_size: u32) -> PyResult<Self> {
        let world = Grid::from_rows(cells).map_err(container_err)?;
        let config = LifeConfig {
            cell_size,
            rows: world.rows(),
            columns: world.columns(),
            ..LifeConfig::default()
        };
        let inner = Simulation::from_world(config, world).map_err(simulation_err)?;
        Ok(Self { inner })
    }

    fn step(&mut self) -> bool {
        self.inner.step()
    }

    /// Run until settled or `max_steps`, returning the summary as JSON.
    #[pyo3(signature = (max_steps, sample_every=1))]
    fn run(&mut self, max_steps: usize, sample_every: usize) -> PyResult<String> {
        let summary = self
            .inner
            .try_run(max_steps, sample_every)
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        serde_json::to_string(&summary).map_err(|e| PyValueError::new_err(e.to_string()))
    }

    fn get(&self, row: i64, column: i64) -> PyResult<bool> {
        self.inner
            .current()
            .get(index(row)?, index(column)?)
            .copied()
            .map_err(container_err)
    }

    fn set(&mut self, row: i64, column: i64, alive: bool) -> PyResult<()> {
        if self.get(row, column)? != alive {
            self.toggle(row, column)?;
        }
        Ok(())
    }

    fn toggle(&mut self, row: i64, column: i64) -> PyResult<bool> {
        self.inner
            .toggle_cell(index(row)?, index(column)?)
            .map_err(container_err)
    }

    fn resize(&mut self, rows: i64, columns: i64) -> PyResult<()> {
        let rows = size_from_signed(rows).map_err(container_err)?;
        let columns = size_from_signed(columns).map_err(container_err)?;
        self.inner.resize(rows, columns).map_err(simulation_err)
    }

    fn set_speed(&mut self, speed: f64) -> PyResult<()> {
        self.inner
            .set_speed(speed)
            .map_err(|e| PyValueError::new_err(e.to_string()))
    }

    fn save_current(&self, path: PathBuf) -> PyResult<()> {
        self.inner.save_current(path).map_err(world_file_err)
    }

    fn save_initial(&self, path: PathBuf) -> PyResult<()> {
        self.inner.save_initial(path).map_err(world_file_err)
    }

    fn cells(&self) -> Vec<Vec<bool>> {
        self.inner.current().iter_rows().map(<[bool]>::to_vec).collect()
    }

    #[getter]
    fn dimensions(&self) -> (usize, usize) {
        self.inner.dimensions()
    }

    #[getter]
    fn generation(&self) -> usize {
        self.inner.generation()
    }

    #[getter]
    fn is_settled(&self) -> bool {
        self.inner.is_settled()
    }

    #[getter]
    fn population(&self) -> usize {
        self.inner.population_stats().alive
    }

    fn __repr__(&self) -> String {
        let (rows, columns) = self.inner.dimensions();
        format!(
            "Simulation(rows={rows}, columns={columns}, generation={})",
            self.inner.generation()
        )
    }
}

#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(version, m)?)?;
    m.add_class::<PySimulation>()?;
    Ok(())
}
