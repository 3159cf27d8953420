//! Game of Life transition rule.
//!
//! Birth on exactly 3 live neighbours, survival on 2 or 3, death otherwise.
//! Edges are not wrapped: neighbours outside the grid count as dead. Every
//! step reads only the input world and returns a freshly allocated one.

use crate::grid::Grid;
use crate::world::World;
use rayon::prelude::*;

const OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Live cells among the up-to-8 in-bounds neighbours of `(row, column)`.
pub fn neighbor_count(world: &World, row: usize, column: usize) -> u8 {
    let (rows, columns) = world.dimensions();
    let cells = world.as_slice();
    let mut count = 0;
    for (dr, dc) in OFFSETS {
        let (Some(r), Some(c)) = (row.checked_add_signed(dr), column.checked_add_signed(dc))
        else {
            continue;
        };
        if r < rows && c < columns && cells[r * columns + c] {
            count += 1;
        }
    }
    count
}

pub fn next_state(alive: bool, neighbors: u8) -> bool {
    matches!((alive, neighbors), (true, 2) | (_, 3))
}

/// Result of one transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Generation {
    pub world: World,
    /// True iff at least one cell differs from the input world.
    pub changed: bool,
}

pub fn step(world: &World) -> Generation {
    let (rows, columns) = world.dimensions();
    let mut cells = Vec::with_capacity(rows * columns);
    let mut changed = false;
    for row in 0..rows {
        for column in 0..columns {
            let alive = world[(row, column)];
            let next = next_state(alive, neighbor_count(world, row, column));
            changed |= next != alive;
            cells.push(next);
        }
    }
    Generation {
        world: Grid::from_cells(rows, columns, cells),
        changed,
    }
}

/// Same transition as `step`, with rows computed in parallel.
pub fn step_parallel(world: &World) -> Generation {
    let (rows, columns) = world.dimensions();
    if rows == 0 || columns == 0 {
        return Generation {
            world: world.clone(),
            changed: false,
        };
    }
    let mut cells = vec![false; rows * columns];
    let changed = cells
        .par_chunks_mut(columns)
        .enumerate()
        .map(|(row, out)| {
            let mut row_changed = false;
            for (column, cell) in out.iter_mut().enumerate() {
                let alive = world[(row, column)];
                *cell = next_state(alive, neighbor_count(world, row, column));
                row_changed |= *cell != alive;
            }
            row_changed
        })
        .reduce(|| false, |a, b| a || b);
    Generation {
        world: Grid::from_cells(rows, columns, cells),
        changed,
    }
}

/// Two-state stepping machine: `Idle` until the first step, `Stepped` after.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Automaton {
    Idle { world: World },
    Stepped { world: World, changed: bool },
}

impl Default for Automaton {
    fn default() -> Self {
        Automaton::new(World::default())
    }
}

impl Automaton {
    pub fn new(world: World) -> Self {
        Automaton::Idle { world }
    }

    pub fn world(&self) -> &World {
        match self {
            Automaton::Idle { world } | Automaton::Stepped { world, .. } => world,
        }
    }

    /// Mutable access for edits between steps; the state is left unchanged.
    pub fn world_mut(&mut self) -> &mut World {
        match self {
            Automaton::Idle { world } | Automaton::Stepped { world, .. } => world,
        }
    }

    /// `None` until a step has been computed.
    pub fn changed(&self) -> Option<bool> {
        match self {
            Automaton::Idle { .. } => None,
            Automaton::Stepped { changed, .. } => Some(*changed),
        }
    }

    /// Advance one generation and return the changed flag.
    pub fn advance(&mut self) -> bool {
        self.apply(step(self.world()))
    }

    /// Install a generation computed from the current world.
    pub fn apply(&mut self, generation: Generation) -> bool {
        let Generation { world, changed } = generation;
        *self = Automaton::Stepped { world, changed };
        changed
    }

    /// Return to `Idle` holding `world`.
    pub fn reset(&mut self, world: World) {
        *self = Automaton::Idle { world };
    }

    pub fn into_world(self) -> World {
        match self {
            Automaton::Idle { world } | Automaton::Stepped { world, .. } => world,
        }
    }
}
