use crate::error::{Axis, ContainerError};
use crate::world::World;

/// A named seed, as live-cell offsets from its top-left corner.
#[derive(Debug)]
pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(usize, usize)],
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "glider",
        cells: &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
    },
    Pattern {
        name: "block",
        cells: &[(0, 0), (0, 1), (1, 0), (1, 1)],
    },
    Pattern {
        name: "blinker",
        cells: &[(0, 0), (0, 1), (0, 2)],
    },
    Pattern {
        name: "toad",
        cells: &[(0, 1), (0, 2), (0, 3), (1, 0), (1, 1), (1, 2)],
    },
    Pattern {
        name: "beacon",
        cells: &[(0, 0), (0, 1), (1, 0), (1, 1), (2, 2), (2, 3), (3, 2), (3, 3)],
    },
    Pattern {
        name: "r-pentomino",
        cells: &[(0, 1), (0, 2), (1, 0), (1, 1), (2, 1)],
    },
];

pub fn find(name: &str) -> Option<&'static Pattern> {
    PATTERNS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

impl Pattern {
    /// `(rows, columns)` of the bounding box.
    pub fn extent(&self) -> (usize, usize) {
        self.cells
            .iter()
            .fold((0, 0), |(rows, cols), &(r, c)| (rows.max(r + 1), cols.max(c + 1)))
    }

    /// Set this pattern's cells alive with its corner at `origin`.
    ///
    /// Fails without touching `world` if any cell would land outside it.
    pub fn place(&self, world: &mut World, origin: (usize, usize)) -> Result<(), ContainerError> {
        let (rows, columns) = self.extent();
        let bottom = origin.0 + rows;
        let right = origin.1 + columns;
        if bottom > world.rows() {
            return Err(ContainerError::IndexOutOfBounds {
                axis: Axis::Row,
                index: (bottom - 1) as isize,
                len: world.rows(),
            });
        }
        if right > world.columns() {
            return Err(ContainerError::IndexOutOfBounds {
                axis: Axis::Column,
                index: (right - 1) as isize,
                len: world.columns(),
            });
        }
        for &(r, c) in self.cells {
            world[(origin.0 + r, origin.1 + c)] = true;
        }
        Ok(())
    }

    /// Corner offset that centres the pattern in a `rows` x `columns` world.
    pub fn centered_origin(&self, rows: usize, columns: usize) -> (usize, usize) {
        let (height, width) = self.extent();
        (rows.saturating_sub(height) / 2, columns.saturating_sub(width) / 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::step;
    use crate::world::{empty, population};

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(find("Glider").map(|p| p.name), Some("glider"));
        assert!(find("spaceship").is_none());
    }

    #[test]
    fn place_rejects_overhang_without_partial_writes() {
        let mut world = empty(10, 10);
        let glider = find("glider").unwrap();
        assert!(glider.place(&mut world, (8, 0)).is_err());
        assert!(glider.place(&mut world, (0, 9)).is_err());
        assert_eq!(population(&world), 0);
        glider.place(&mut world, (7, 7)).unwrap();
        assert_eq!(population(&world), 5);
    }

    #[test]
    fn period_two_oscillators_return_after_two_steps() {
        for name in ["blinker", "toad", "beacon"] {
            let pattern = find(name).unwrap();
            let mut world = empty(12, 12);
            pattern.place(&mut world, (4, 4)).unwrap();
            let once = step(&world);
            assert!(once.changed, "{name} should change");
            let twice = step(&once.world);
            assert_eq!(twice.world, world, "{name} should have period 2");
        }
    }

    #[test]
    fn centered_origin_fits() {
        let pentomino = find("r-pentomino").unwrap();
        assert_eq!(pentomino.extent(), (3, 3));
        let origin = pentomino.centered_origin(10, 20);
        assert_eq!(origin, (3, 8));
        let mut world = empty(10, 20);
        assert!(pentomino.place(&mut world, origin).is_ok());
    }
}
