use crate::array::GrowableArray;
use crate::error::{resolve_index, Axis, ContainerError};
use std::fmt;
use std::ops::{Index, IndexMut};

/// Row-major 2D container over a `GrowableArray`.
///
/// Cell `(row, column)` lives at `row * columns + column`; the backing array
/// always holds exactly `rows * columns` cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid<T> {
    rows: usize,
    columns: usize,
    cells: GrowableArray<T>,
}

impl<T> Default for Grid<T> {
    fn default() -> Self {
        Self {
            rows: 0,
            columns: 0,
            cells: GrowableArray::new(),
        }
    }
}

/// `rows * columns`, panicking instead of wrapping on overflow.
fn cell_count(rows: usize, columns: usize) -> usize {
    rows.checked_mul(columns)
        .unwrap_or_else(|| panic!("{rows}x{columns} grid overflows usize"))
}

impl<T> Grid<T> {
    /// # Panics
    ///
    /// If `rows * columns` overflows `usize`.
    pub fn new(rows: usize, columns: usize, default: T) -> Self
    where
        T: Clone,
    {
        Self {
            rows,
            columns,
            cells: GrowableArray::with_size(cell_count(rows, columns), default),
        }
    }

    /// Build a grid from a sequence of rows.
    ///
    /// The first row fixes the column count. An input with no rows has no
    /// shape to infer and is rejected as `NotTwoDimensional`; a later row of a
    /// different length is `NotRectangular`.
    pub fn from_rows<I, R>(rows: I) -> Result<Self, ContainerError>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = T>,
    {
        let mut cells = Vec::new();
        let mut columns = None;
        let mut row_count = 0;
        for (row, values) in rows.into_iter().enumerate() {
            let before = cells.len();
            cells.extend(values);
            let actual = cells.len() - before;
            let expected = *columns.get_or_insert(actual);
            if actual != expected {
                return Err(ContainerError::NotRectangular {
                    row,
                    expected,
                    actual,
                });
            }
            row_count += 1;
        }
        let columns = columns.ok_or(ContainerError::NotTwoDimensional)?;
        Ok(Self {
            rows: row_count,
            columns,
            cells: GrowableArray::from(cells),
        })
    }

    pub(crate) fn from_cells(rows: usize, columns: usize, cells: Vec<T>) -> Self {
        debug_assert_eq!(cells.len(), rows * columns, "cell count must match shape");
        Self {
            rows,
            columns,
            cells: GrowableArray::from(cells),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// `(rows, columns)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.columns)
    }

    /// First stage of two-stage addressing: resolve `row` and bind an accessor to it.
    pub fn row(&self, row: isize) -> Result<Row<'_, T>, ContainerError> {
        let row = resolve_index(Axis::Row, row, self.rows)?;
        Ok(Row { grid: self, row })
    }

    pub fn row_mut(&mut self, row: isize) -> Result<RowMut<'_, T>, ContainerError> {
        let row = resolve_index(Axis::Row, row, self.rows)?;
        Ok(RowMut { grid: self, row })
    }

    pub fn get(&self, row: isize, column: isize) -> Result<&T, ContainerError> {
        self.row(row)?.get(column)
    }

    pub fn get_mut(&mut self, row: isize, column: isize) -> Result<&mut T, ContainerError> {
        self.row_mut(row)?.into_mut(column)
    }

    pub fn set(&mut self, row: isize, column: isize, value: T) -> Result<(), ContainerError> {
        self.row_mut(row)?.set(column, value)
    }

    /// Change the row count, keeping rows below `min(old, new)` and filling new rows with `default`.
    ///
    /// # Panics
    ///
    /// If `new_rows * columns` overflows `usize`.
    pub fn resize_rows(&mut self, new_rows: usize, default: T)
    where
        T: Clone,
    {
        // Row-major layout: whole rows sit at the tail, so a plain resize suffices.
        self.cells.resize(cell_count(new_rows, self.columns), default);
        self.rows = new_rows;
    }

    /// Change the column count, keeping columns below `min(old, new)` in every row.
    ///
    /// # Panics
    ///
    /// If `rows * new_columns` overflows `usize`.
    pub fn resize_columns(&mut self, new_columns: usize, default: T)
    where
        T: Clone,
    {
        let columns = self.columns;
        let mut old = std::mem::take(&mut self.cells).into_iter();
        let mut cells = Vec::with_capacity(cell_count(self.rows, new_columns));
        for _ in 0..self.rows {
            let mut row = old.by_ref().take(columns);
            cells.extend(row.by_ref().take(new_columns));
            // Truncated tail of this row.
            row.for_each(drop);
            cells.extend((columns..new_columns).map(|_| default.clone()));
        }
        self.cells = GrowableArray::from(cells);
        self.columns = new_columns;
    }

    pub fn clear(&mut self) {
        self.rows = 0;
        self.columns = 0;
        self.cells.clear();
    }

    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.cells.contains(value)
    }

    /// Row-major iterator over every cell.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.cells.iter()
    }

    /// Iterator over rows as slices.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        // chunks(0) panics; a zero-width grid still has `rows` empty rows.
        (0..self.rows).map(move |row| &self.as_slice()[row * self.columns..(row + 1) * self.columns])
    }

    pub fn as_slice(&self) -> &[T] {
        self.cells.as_slice()
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.cells.as_mut_slice()
    }

    fn offset(&self, row: usize, column: usize) -> usize {
        row * self.columns + column
    }
}

/// Unchecked-by-sign accessor; panics if `(row, column)` is outside the grid.
impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    fn index(&self, (row, column): (usize, usize)) -> &T {
        assert!(
            row < self.rows && column < self.columns,
            "cell ({row}, {column}) outside {}x{} grid",
            self.rows,
            self.columns
        );
        &self.cells.as_slice()[self.offset(row, column)]
    }
}

impl<T> IndexMut<(usize, usize)> for Grid<T> {
    fn index_mut(&mut self, (row, column): (usize, usize)) -> &mut T {
        assert!(
            row < self.rows && column < self.columns,
            "cell ({row}, {column}) outside {}x{} grid",
            self.rows,
            self.columns
        );
        let offset = self.offset(row, column);
        &mut self.cells.as_mut_slice()[offset]
    }
}

impl<T: fmt::Display> fmt::Display for Grid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, row) in self.iter_rows().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "[")?;
            for (j, cell) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{cell}")?;
            }
            write!(f, "]")?;
        }
        write!(f, "]")
    }
}

/// A resolved row of a `Grid`; the second stage resolves the column.
#[derive(Clone, Copy, Debug)]
pub struct Row<'a, T> {
    grid: &'a Grid<T>,
    row: usize,
}

impl<'a, T> Row<'a, T> {
    pub fn index(&self) -> usize {
        self.row
    }

    pub fn get(&self, column: isize) -> Result<&'a T, ContainerError> {
        let column = resolve_index(Axis::Column, column, self.grid.columns)?;
        Ok(&self.grid.cells.as_slice()[self.grid.offset(self.row, column)])
    }

    pub fn as_slice(&self) -> &'a [T] {
        let start = self.grid.offset(self.row, 0);
        &self.grid.cells.as_slice()[start..start + self.grid.columns]
    }
}

/// Mutable counterpart of `Row`.
#[derive(Debug)]
pub struct RowMut<'a, T> {
    grid: &'a mut Grid<T>,
    row: usize,
}

impl<'a, T> RowMut<'a, T> {
    pub fn index(&self) -> usize {
        self.row
    }

    pub fn get(&self, column: isize) -> Result<&T, ContainerError> {
        let column = resolve_index(Axis::Column, column, self.grid.columns)?;
        Ok(&self.grid.cells.as_slice()[self.grid.offset(self.row, column)])
    }

    pub fn set(&mut self, column: isize, value: T) -> Result<(), ContainerError> {
        let column = resolve_index(Axis::Column, column, self.grid.columns)?;
        let offset = self.grid.offset(self.row, column);
        self.grid.cells.as_mut_slice()[offset] = value;
        Ok(())
    }

    fn into_mut(self, column: isize) -> Result<&'a mut T, ContainerError> {
        let column = resolve_index(Axis::Column, column, self.grid.columns)?;
        let grid = self.grid;
        let offset = grid.offset(self.row, column);
        Ok(&mut grid.cells.as_mut_slice()[offset])
    }
}
