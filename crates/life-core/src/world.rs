use crate::grid::Grid;
use rand::Rng;

/// Cell state of one generation; `true` is alive.
pub type World = Grid<bool>;

/// All-dead world.
pub fn empty(rows: usize, columns: usize) -> World {
    Grid::new(rows, columns, false)
}

/// World where every cell is independently alive with probability 1/2.
pub fn random<R: Rng + ?Sized>(rows: usize, columns: usize, rng: &mut R) -> World {
    let cells = (0..rows * columns).map(|_| rng.random::<bool>()).collect();
    Grid::from_cells(rows, columns, cells)
}

pub fn population(world: &World) -> usize {
    world.iter().filter(|&&alive| alive).count()
}

/// Place live cells at `(row, column)` coordinates, leaving the rest untouched.
///
/// # Panics
///
/// If any coordinate lies outside `rows` x `columns`. Use `Pattern::place`
/// for a checked placement.
pub fn from_live_cells(rows: usize, columns: usize, cells: &[(usize, usize)]) -> World {
    let mut world = empty(rows, columns);
    for &(row, column) in cells {
        world[(row, column)] = true;
    }
    world
}
