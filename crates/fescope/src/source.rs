//! Time-series source capability.
//!
//! The core never parses a results file. A source hands it a mesh, an
//! ordered list of step labels, and per-step point/cell data; anything
//! that can do that (an XDMF reader, a solver callback, an in-memory
//! fixture) plugs in here.

use fescope_core::{FescopeError, FieldInfo, FieldSample, Mesh, Result, ScalarsInfo};

/// A discrete time series of field data over one mesh.
pub trait TimeSeriesSource {
    /// Returns the mesh shared by all steps.
    fn mesh(&mut self) -> Result<Mesh>;

    /// Returns the ordered step labels. May be empty.
    fn steps(&mut self) -> Result<Vec<String>>;

    /// Reads one step's data. `index` must be below the step count.
    fn read_data(&mut self, index: usize) -> Result<FieldSample>;

    /// Returns the field catalogue: every field name and width, by location.
    fn scalars_info(&mut self) -> Result<ScalarsInfo>;
}

/// An in-memory time series.
///
/// Serves demos and tests; like a file-backed reader, it derives its field
/// catalogue from the first step's data.
#[derive(Debug, Clone)]
pub struct MemorySeries {
    mesh: Mesh,
    steps: Vec<(String, FieldSample)>,
}

impl MemorySeries {
    /// Creates a series over a mesh with no steps yet.
    pub fn new(mesh: Mesh) -> Self {
        Self {
            mesh,
            steps: Vec::new(),
        }
    }

    /// Appends a step (builder style).
    #[must_use]
    pub fn with_step(mut self, label: impl Into<String>, sample: FieldSample) -> Self {
        self.push_step(label, sample);
        self
    }

    /// Appends a step.
    pub fn push_step(&mut self, label: impl Into<String>, sample: FieldSample) {
        self.steps.push((label.into(), sample));
    }

    /// Returns the number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns true if the series has no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl TimeSeriesSource for MemorySeries {
    fn mesh(&mut self) -> Result<Mesh> {
        Ok(self.mesh.clone())
    }

    fn steps(&mut self) -> Result<Vec<String>> {
        Ok(self.steps.iter().map(|(label, _)| label.clone()).collect())
    }

    fn read_data(&mut self, index: usize) -> Result<FieldSample> {
        self.steps
            .get(index)
            .map(|(_, sample)| sample.clone())
            .ok_or(FescopeError::StepOutOfRange(index))
    }

    fn scalars_info(&mut self) -> Result<ScalarsInfo> {
        let (_, first) = self.steps.first().ok_or(FescopeError::NoData)?;

        // Sorted for a stable catalogue; map iteration order is not.
        let mut point_fields: Vec<FieldInfo> = first
            .point_data
            .iter()
            .map(|(name, array)| FieldInfo {
                name: name.clone(),
                width: array.width(),
            })
            .collect();
        point_fields.sort_by(|a, b| a.name.cmp(&b.name));

        let mut cell_fields: Vec<FieldInfo> = first
            .cell_data
            .iter()
            .map(|(name, array)| FieldInfo {
                name: name.clone(),
                width: array.width(),
            })
            .collect();
        cell_fields.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(ScalarsInfo {
            point_fields,
            cell_fields,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fescope_core::{CellType, FieldArray, Vec3};

    fn triangle_mesh() -> Mesh {
        let points = vec![Vec3::ZERO, Vec3::X, Vec3::Y];
        Mesh::new(points, vec![vec![0, 1, 2]], CellType::Triangle).expect("valid mesh")
    }

    #[test]
    fn test_memory_series_round_trip() {
        let sample = FieldSample::at_time(0.5)
            .with_point_field("U", FieldArray::new(vec![0.0; 9], 3).expect("valid"))
            .with_cell_field("S", FieldArray::scalars(vec![1.0]));
        let mut series = MemorySeries::new(triangle_mesh()).with_step("0.5", sample);

        assert_eq!(series.steps().expect("labels"), vec!["0.5".to_string()]);
        let read = series.read_data(0).expect("in range");
        assert_eq!(read.time, 0.5);
        assert!(read.point_data.contains_key("U"));
    }

    #[test]
    fn test_read_past_end() {
        let mut series = MemorySeries::new(triangle_mesh());
        assert!(matches!(
            series.read_data(3),
            Err(FescopeError::StepOutOfRange(3))
        ));
    }

    #[test]
    fn test_scalars_info_from_first_step() {
        let sample = FieldSample::at_time(0.0)
            .with_point_field("U", FieldArray::new(vec![0.0; 9], 3).expect("valid"))
            .with_point_field("T", FieldArray::scalars(vec![0.0; 3]))
            .with_cell_field("S", FieldArray::new(vec![0.0; 6], 6).expect("valid"));
        let mut series = MemorySeries::new(triangle_mesh()).with_step("0", sample);

        let info = series.scalars_info().expect("non-empty");
        let names: Vec<&str> = info.point_fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["T", "U"]);
        assert_eq!(info.lookup("U").expect("present").1, 3);
        assert_eq!(info.cell_fields[0].width, 6);
    }

    #[test]
    fn test_scalars_info_empty_series() {
        let mut series = MemorySeries::new(triangle_mesh());
        assert!(matches!(series.scalars_info(), Err(FescopeError::NoData)));
    }
}
