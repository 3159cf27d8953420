//! Plain-text world snapshots.
//!
//! ```text
//! size:10
//! rows:3
//! cols:4
//! OXOO
//! OOXO
//! XXXO
//! ```
//!
//! `X` is alive; any other character is dead. Writers always emit `O` for
//! dead cells. Lines after the last declared row are ignored.

use crate::grid::Grid;
use crate::world::World;
use std::fmt::{self, Write as _};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

pub const ALIVE: char = 'X';
pub const DEAD: char = 'O';

const SIZE_KEY: &str = "size";
const ROWS_KEY: &str = "rows";
const COLS_KEY: &str = "cols";

#[derive(Debug, Error)]
pub enum WorldFileError {
    #[error("cannot access world file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("line {line}: expected {expected}, found end of file")]
    MissingLine { line: usize, expected: String },
    #[error("line {line}: expected `{key}:<integer>`, found `{found}`")]
    BadHeader {
        line: usize,
        key: &'static str,
        found: String,
    },
    #[error("row {row} has {actual} cells, header declares {expected} columns")]
    RowLength {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

/// A world together with the cell size it was saved with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorldFile {
    pub cell_size: u32,
    pub world: World,
}

impl WorldFile {
    pub fn new(cell_size: u32, world: World) -> Self {
        Self { cell_size, world }
    }

    /// Parse the text format. Imposes no floor or ceiling on dimensions.
    pub fn parse(text: &str) -> Result<Self, WorldFileError> {
        let mut lines = text.lines().map(str::trim_end);
        let mut header = |line_no: usize, key: &'static str| -> Result<usize, WorldFileError> {
            let line = lines.next().ok_or_else(|| WorldFileError::MissingLine {
                line: line_no,
                expected: format!("`{key}:` header"),
            })?;
            parse_header(line_no, line, key)
        };
        let cell_size = header(1, SIZE_KEY)?;
        let rows = header(2, ROWS_KEY)?;
        let columns = header(3, COLS_KEY)?;
        let cell_size = u32::try_from(cell_size).map_err(|_| WorldFileError::BadHeader {
            line: 1,
            key: SIZE_KEY,
            found: cell_size.to_string(),
        })?;

        if rows.checked_mul(columns).is_none() {
            return Err(WorldFileError::BadHeader {
                line: 3,
                key: COLS_KEY,
                found: format!("{COLS_KEY}:{columns} (with {rows} rows the grid overflows)"),
            });
        }

        // Cells grow with the lines actually present, not the declared size.
        let mut cells = Vec::new();
        for row in 0..rows {
            let line_no = row + 4;
            let line = lines.next().ok_or_else(|| WorldFileError::MissingLine {
                line: line_no,
                expected: format!("row {row} of {rows}"),
            })?;
            let actual = line.chars().count();
            if actual != columns {
                return Err(WorldFileError::RowLength {
                    row,
                    expected: columns,
                    actual,
                });
            }
            cells.extend(line.chars().map(|ch| ch == ALIVE));
        }
        Ok(Self {
            cell_size,
            world: Grid::from_cells(rows, columns, cells),
        })
    }

    pub fn read(path: impl AsRef<Path>) -> Result<Self, WorldFileError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| WorldFileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file = Self::parse(&text)?;
        debug!(
            path = %path.display(),
            rows = file.world.rows(),
            columns = file.world.columns(),
            "read world file"
        );
        Ok(file)
    }

    pub fn write(&self, path: impl AsRef<Path>) -> Result<(), WorldFileError> {
        let path = path.as_ref();
        fs::write(path, self.to_string()).map_err(|source| WorldFileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "wrote world file");
        Ok(())
    }
}

fn parse_header(line_no: usize, line: &str, key: &'static str) -> Result<usize, WorldFileError> {
    let bad = || WorldFileError::BadHeader {
        line: line_no,
        key,
        found: line.to_string(),
    };
    let value = line
        .strip_prefix(key)
        .and_then(|rest| rest.strip_prefix(':'))
        .ok_or_else(bad)?;
    value.trim().parse().map_err(|_| bad())
}

impl fmt::Display for WorldFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{SIZE_KEY}:{}", self.cell_size)?;
        writeln!(f, "{ROWS_KEY}:{}", self.world.rows())?;
        writeln!(f, "{COLS_KEY}:{}", self.world.columns())?;
        for row in self.world.iter_rows() {
            for &alive in row {
                f.write_char(if alive { ALIVE } else { DEAD })?;
            }
            f.write_char('\n')?;
        }
        Ok(())
    }
}
