//! Per-step field data: point- and cell-located value arrays.

use std::collections::HashMap;

use glam::Vec3;

use crate::error::{FescopeError, Result};

/// The name of the point field carrying per-step displacements.
pub const DISPLACEMENT_FIELD: &str = "Displacement";

/// Which component of a multi-component field to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    /// A single component by index.
    Index(usize),
    /// The mean across all components.
    Mean,
}

/// Where a field lives on the mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldLocation {
    /// One row per mesh point.
    Point,
    /// One row per mesh cell.
    Cell,
}

/// A row-major `[len x width]` array of scalars.
///
/// One row per point (or per cell), one column per component - a scalar
/// field has width 1, a 3-D displacement width 3.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldArray {
    values: Vec<f32>,
    width: usize,
}

impl FieldArray {
    /// Creates a field array; the flat value count must be a multiple of
    /// the width.
    pub fn new(values: Vec<f32>, width: usize) -> Result<Self> {
        if width == 0 {
            return Err(FescopeError::InvalidMesh(
                "field width must be at least 1".to_string(),
            ));
        }
        if values.len() % width != 0 {
            return Err(FescopeError::SizeMismatch {
                expected: values.len().div_ceil(width) * width,
                actual: values.len(),
            });
        }
        Ok(Self { values, width })
    }

    /// Creates a width-1 array from plain scalars.
    pub fn scalars(values: Vec<f32>) -> Self {
        Self { values, width: 1 }
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.values.len() / self.width
    }

    /// Returns true if the array has no rows.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the number of components per row.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns one row.
    pub fn row(&self, index: usize) -> &[f32] {
        &self.values[index * self.width..(index + 1) * self.width]
    }

    /// Selects a component (or the mean across components), one scalar per
    /// row.
    ///
    /// An index at or past the width is [`FescopeError::InvalidComponent`].
    pub fn select(&self, component: Component) -> Result<Vec<f32>> {
        match component {
            Component::Index(i) => {
                if i >= self.width {
                    return Err(FescopeError::InvalidComponent {
                        index: i,
                        width: self.width,
                    });
                }
                Ok(self
                    .values
                    .iter()
                    .skip(i)
                    .step_by(self.width)
                    .copied()
                    .collect())
            }
            Component::Mean => {
                let w = self.width as f32;
                Ok(self
                    .values
                    .chunks_exact(self.width)
                    .map(|row| row.iter().sum::<f32>() / w)
                    .collect())
            }
        }
    }

    /// Interprets rows as spatial vectors, padding missing components with
    /// zero (a 2-D displacement becomes (dx, dy, 0)).
    pub fn rows_as_vec3(&self) -> Vec<Vec3> {
        self.values
            .chunks_exact(self.width)
            .map(|row| {
                Vec3::new(
                    row.first().copied().unwrap_or(0.0),
                    row.get(1).copied().unwrap_or(0.0),
                    row.get(2).copied().unwrap_or(0.0),
                )
            })
            .collect()
    }
}

/// One time step's worth of data from the reader.
///
/// Produced fresh per step; the controller reads it and throws it away.
#[derive(Debug, Clone, Default)]
pub struct FieldSample {
    /// Simulation time of this step.
    pub time: f32,
    /// Point-located fields by name.
    pub point_data: HashMap<String, FieldArray>,
    /// Cell-located fields by name.
    pub cell_data: HashMap<String, FieldArray>,
}

impl FieldSample {
    /// Creates an empty sample at the given time.
    pub fn at_time(time: f32) -> Self {
        Self {
            time,
            ..Self::default()
        }
    }

    /// Adds a point-located field (builder style).
    #[must_use]
    pub fn with_point_field(mut self, name: impl Into<String>, array: FieldArray) -> Self {
        self.point_data.insert(name.into(), array);
        self
    }

    /// Adds a cell-located field (builder style).
    #[must_use]
    pub fn with_cell_field(mut self, name: impl Into<String>, array: FieldArray) -> Self {
        self.cell_data.insert(name.into(), array);
        self
    }

    /// Looks up a field, point data first, then cell data.
    pub fn field(&self, name: &str) -> Option<(FieldLocation, &FieldArray)> {
        self.point_data
            .get(name)
            .map(|a| (FieldLocation::Point, a))
            .or_else(|| self.cell_data.get(name).map(|a| (FieldLocation::Cell, a)))
    }
}

/// Name and component width of one catalogued field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInfo {
    /// Field name as the reader reports it.
    pub name: String,
    /// Components per row.
    pub width: usize,
}

/// The scalars catalogue a time-series source exposes: every field name
/// and width, split by location.
#[derive(Debug, Clone, Default)]
pub struct ScalarsInfo {
    /// Point-located fields in reader order.
    pub point_fields: Vec<FieldInfo>,
    /// Cell-located fields in reader order.
    pub cell_fields: Vec<FieldInfo>,
}

impl ScalarsInfo {
    /// Looks up a field, point data first, then cell data.
    pub fn lookup(&self, name: &str) -> Option<(FieldLocation, usize)> {
        self.point_fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| (FieldLocation::Point, f.width))
            .or_else(|| {
                self.cell_fields
                    .iter()
                    .find(|f| f.name == name)
                    .map(|f| (FieldLocation::Cell, f.width))
            })
    }

    /// Returns the first catalogued field, point data first.
    pub fn first(&self) -> Option<(FieldLocation, &FieldInfo)> {
        self.point_fields
            .first()
            .map(|f| (FieldLocation::Point, f))
            .or_else(|| self.cell_fields.first().map(|f| (FieldLocation::Cell, f)))
    }
}
