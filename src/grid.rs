//! Grid metadata and the normalized probability grid.
//!
//! This module defines [`GridMetadata`], the immutable description of the
//! rectangular cell lattice a costmap is built over, and [`ProbabilityGrid`],
//! the row-major normalized matrix produced by the distribution builder.
use glam::DVec2;

use crate::error::{Error, Result};

/// Immutable description of a rectangular grid in world coordinates.
///
/// The lattice has `cols = round(width / resolution)` columns and
/// `rows = round(height / resolution)` rows of square cells with side
/// `resolution`, anchored at `(origin_x, origin_y)`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridMetadata {
    /// Extent along X in world units.
    pub width: f64,
    /// Extent along Y in world units.
    pub height: f64,
    /// Cell size in world units.
    pub resolution: f64,
    /// World X coordinate of the grid origin (cell `(0, 0)` corner).
    pub origin_x: f64,
    /// World Y coordinate of the grid origin.
    pub origin_y: f64,
}

impl GridMetadata {
    /// Creates validated metadata.
    ///
    /// `width`, `height`, and `resolution` must be positive and the lattice
    /// must contain at least one cell in each direction.
    pub fn new(
        width: f64,
        height: f64,
        resolution: f64,
        origin_x: f64,
        origin_y: f64,
    ) -> Result<Self> {
        if width <= 0.0 || height <= 0.0 {
            return Err(Error::InvalidConfig(
                "width and height must be > 0".into(),
            ));
        }
        if resolution <= 0.0 {
            return Err(Error::InvalidConfig("resolution must be > 0".into()));
        }

        let metadata = Self {
            width,
            height,
            resolution,
            origin_x,
            origin_y,
        };
        if metadata.cols() == 0 || metadata.rows() == 0 {
            return Err(Error::InvalidConfig(
                "grid must contain at least one cell in each direction".into(),
            ));
        }

        Ok(metadata)
    }

    /// Number of columns in the lattice.
    pub fn cols(&self) -> usize {
        (self.width / self.resolution).round() as usize
    }

    /// Number of rows in the lattice.
    pub fn rows(&self) -> usize {
        (self.height / self.resolution).round() as usize
    }

    /// Converts a cell index to the world coordinates of its origin corner.
    pub fn cell_to_world(&self, row: usize, col: usize) -> DVec2 {
        DVec2::new(
            col as f64 * self.resolution + self.origin_x,
            row as f64 * self.resolution + self.origin_y,
        )
    }

    /// Converts world coordinates to cell indices by floor division.
    ///
    /// Coordinates outside the grid produce out-of-range indices; bounds are
    /// the caller's responsibility.
    pub fn world_to_cell(&self, x: f64, y: f64) -> (isize, isize) {
        let row = ((y - self.origin_y) / self.resolution).floor() as isize;
        let col = ((x - self.origin_x) / self.resolution).floor() as isize;
        (row, col)
    }
}

/// Normalized probability distribution over a grid's cells.
///
/// Row-major `rows × cols` matrix of non-negative values summing to one.
/// Produced by the costmap's distribution builder; read-only afterwards.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProbabilityGrid {
    metadata: GridMetadata,
    data: Vec<f64>,
}

impl ProbabilityGrid {
    pub(crate) fn new(metadata: GridMetadata, data: Vec<f64>) -> Self {
        debug_assert_eq!(data.len(), metadata.rows() * metadata.cols());
        Self { metadata, data }
    }

    /// Metadata of the lattice this distribution is defined over.
    pub fn metadata(&self) -> &GridMetadata {
        &self.metadata
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.metadata.rows()
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.metadata.cols()
    }

    /// Probability mass of cell `(row, col)`.
    ///
    /// Out-of-range indices are a caller error.
    pub fn value(&self, row: usize, col: usize) -> f64 {
        debug_assert!(row < self.rows() && col < self.cols());
        self.data[row * self.cols() + col]
    }

    /// Probability mass of the cell containing world point `(x, y)`.
    ///
    /// Coordinates outside the grid are a caller error.
    pub fn value_at_world(&self, x: f64, y: f64) -> f64 {
        let (row, col) = self.metadata.world_to_cell(x, y);
        debug_assert!(row >= 0 && col >= 0);
        self.value(row as usize, col as usize)
    }

    /// Raw row-major cell data, for external visualization or serialization.
    pub fn data(&self) -> &[f64] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata() -> GridMetadata {
        GridMetadata::new(4.0, 3.0, 0.5, -2.0, -1.5).expect("valid metadata")
    }

    #[test]
    fn lattice_dimensions_round_from_extent() {
        let m = metadata();
        assert_eq!(m.cols(), 8);
        assert_eq!(m.rows(), 6);
    }

    #[test]
    fn rejects_non_positive_dimensions() {
        assert!(GridMetadata::new(0.0, 1.0, 0.1, 0.0, 0.0).is_err());
        assert!(GridMetadata::new(1.0, -1.0, 0.1, 0.0, 0.0).is_err());
        assert!(GridMetadata::new(1.0, 1.0, 0.0, 0.0, 0.0).is_err());
    }

    #[test]
    fn cell_world_roundtrip() {
        let m = metadata();
        let p = m.cell_to_world(2, 3);
        assert_eq!(p, DVec2::new(-0.5, -0.5));

        let (row, col) = m.world_to_cell(p.x, p.y);
        assert_eq!((row, col), (2, 3));
    }

    #[test]
    fn world_to_cell_floors_inside_cells() {
        let m = metadata();
        let (row, col) = m.world_to_cell(-1.8, -1.3);
        assert_eq!((row, col), (0, 0));
        let (row, col) = m.world_to_cell(-1.1, -0.9);
        assert_eq!((row, col), (1, 1));
    }

    #[test]
    fn grid_indexes_row_major() {
        let m = GridMetadata::new(2.0, 2.0, 1.0, 0.0, 0.0).expect("valid metadata");
        let grid = ProbabilityGrid::new(m, vec![0.1, 0.2, 0.3, 0.4]);
        assert_eq!(grid.value(0, 1), 0.2);
        assert_eq!(grid.value(1, 0), 0.3);
        assert_eq!(grid.value_at_world(1.5, 1.5), 0.4);
        assert_eq!(grid.data().len(), 4);
    }
}
