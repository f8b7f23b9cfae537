use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum KMapError {
    #[error("unsupported Karnaugh map size {rows}x{cols}")]
    UnsupportedSize { rows: usize, cols: usize },

    #[error("cell ({row}, {col}) is outside the map")]
    OutOfBounds { row: usize, col: usize },

    #[error("cell values must be 0 or 1")]
    NotBinary,
}

/// Binary cell matrix filled in by the interactive Karnaugh map widget.
///
/// Only 2 and 4 rows/columns are supported, matching 2 to 4 variable maps.
/// Rows and columns are laid out in Gray-code order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KMapGrid {
    cells: Vec<Vec<u8>>,
}

const GRAY_2: [&str; 2] = ["0", "1"];
const GRAY_4: [&str; 4] = ["00", "01", "11", "10"];

impl KMapGrid {
    /// An all-zero map.
    ///
    /// # Errors
    ///
    /// Returns `KMapError::UnsupportedSize` unless both sides are 2 or 4.
    pub fn new(rows: usize, cols: usize) -> Result<Self, KMapError> {
        check_size(rows, cols)?;
        Ok(Self {
            cells: vec![vec![0; cols]; rows],
        })
    }

    /// Wraps a matrix received from the presentation layer.
    ///
    /// # Errors
    ///
    /// Returns `KMapError` for ragged or unsupported shapes or non-binary cells.
    pub fn from_cells(cells: Vec<Vec<u8>>) -> Result<Self, KMapError> {
        let rows = cells.len();
        let cols = cells.first().map_or(0, Vec::len);
        if cells.iter().any(|row| row.len() != cols) {
            return Err(KMapError::UnsupportedSize { rows, cols });
        }
        check_size(rows, cols)?;
        if cells.iter().flatten().any(|v| *v > 1) {
            return Err(KMapError::NotBinary);
        }
        Ok(Self { cells })
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    #[must_use]
    pub fn cells(&self) -> &[Vec<u8>] {
        &self.cells
    }

    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Flips a single cell between 0 and 1.
    ///
    /// # Errors
    ///
    /// Returns `KMapError::OutOfBounds` if the cell does not exist.
    pub fn toggle(&mut self, row: usize, col: usize) -> Result<(), KMapError> {
        let cell = self
            .cells
            .get_mut(row)
            .and_then(|r| r.get_mut(col))
            .ok_or(KMapError::OutOfBounds { row, col })?;
        *cell ^= 1;
        Ok(())
    }

    #[must_use]
    pub fn ones(&self) -> usize {
        self.cells.iter().flatten().filter(|v| **v == 1).count()
    }

    #[must_use]
    pub fn row_labels(&self) -> &'static [&'static str] {
        gray_labels(self.rows())
    }

    #[must_use]
    pub fn col_labels(&self) -> &'static [&'static str] {
        gray_labels(self.cols())
    }
}

fn check_size(rows: usize, cols: usize) -> Result<(), KMapError> {
    if matches!(rows, 2 | 4) && matches!(cols, 2 | 4) {
        Ok(())
    } else {
        Err(KMapError::UnsupportedSize { rows, cols })
    }
}

fn gray_labels(len: usize) -> &'static [&'static str] {
    if len == 4 { &GRAY_4[..] } else { &GRAY_2[..] }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_cells() {
        let mut grid = KMapGrid::new(2, 4).unwrap();
        grid.toggle(1, 3).unwrap();
        grid.toggle(0, 0).unwrap();
        grid.toggle(0, 0).unwrap();
        assert_eq!(grid.get(1, 3), Some(1));
        assert_eq!(grid.ones(), 1);
        assert_eq!(
            grid.toggle(2, 0),
            Err(KMapError::OutOfBounds { row: 2, col: 0 })
        );
    }

    #[test]
    fn labels_follow_gray_code() {
        let grid = KMapGrid::new(2, 4).unwrap();
        assert_eq!(grid.row_labels(), ["0", "1"]);
        assert_eq!(grid.col_labels(), ["00", "01", "11", "10"]);
    }

    #[test]
    fn from_cells_rejects_bad_shapes() {
        assert!(KMapGrid::from_cells(vec![vec![0, 1], vec![1]]).is_err());
        assert!(KMapGrid::from_cells(vec![vec![0, 1, 0]; 2]).is_err());
        assert_eq!(
            KMapGrid::from_cells(vec![vec![0, 2], vec![1, 1]]),
            Err(KMapError::NotBinary)
        );
        assert_eq!(KMapGrid::from_cells(vec![vec![1, 1]; 4]).unwrap().ones(), 8);
    }
}
