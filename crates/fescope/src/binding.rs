//! Field-binding controller.
//!
//! Owns one open results session: the undeformed reference mesh, the step
//! labels, the field catalogue, and the active binding (field, component,
//! step, color range, displacement). Every display change funnels through
//! [`FieldBinder::open`], [`FieldBinder::select_field`] and
//! [`FieldBinder::goto_step`]; a failed transition leaves the binding
//! state exactly as it was.

use fescope_core::field::DISPLACEMENT_FIELD;
use fescope_core::{
    Component, FescopeError, FieldLocation, FieldSample, Mesh, Result, ScalarsInfo, Vec3,
    ViewOptions,
};
use fescope_geometry::{FieldValues, SurfaceLayout};

use crate::legend;
use crate::render::{CameraPreset, RenderTarget};
use crate::source::TimeSeriesSource;

/// Where the controller is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingPhase {
    /// No mesh loaded.
    Empty,
    /// Mesh and catalogue captured; nothing displayed yet.
    Loaded,
    /// A field is bound and primitives have been pushed.
    Bound,
}

/// The scalar currently (or about to be) displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ActiveField {
    name: String,
    location: FieldLocation,
    component: Component,
}

/// The field-binding controller.
///
/// Orchestrates one step display: read the step's data, derive deformed
/// coordinates from the reference mesh, select the active field component,
/// re-project the cached surface layout, and push primitives, color range
/// and legend to the render target.
pub struct FieldBinder<R: RenderTarget> {
    render: R,
    options: ViewOptions,

    source: Option<Box<dyn TimeSeriesSource>>,
    mesh: Option<Mesh>,
    info: ScalarsInfo,
    steps: Vec<String>,

    // Render binding state; committed only after a fully successful pipeline run.
    binding: Option<ActiveField>,
    step: usize,
    color_range: Option<(f32, f32)>,
    displacement: Vec<Vec3>,

    // Resolved connectivity, reused while point/cell counts are unchanged.
    layout: Option<SurfaceLayout>,
}

impl<R: RenderTarget> FieldBinder<R> {
    /// Creates a controller over a render target, with default options.
    pub fn new(render: R) -> Self {
        Self::with_options(render, ViewOptions::default())
    }

    /// Creates a controller with explicit view options.
    pub fn with_options(render: R, options: ViewOptions) -> Self {
        Self {
            render,
            options,
            source: None,
            mesh: None,
            info: ScalarsInfo::default(),
            steps: Vec::new(),
            binding: None,
            step: 0,
            color_range: None,
            displacement: Vec::new(),
            layout: None,
        }
    }

    /// Opens a time series, positioning the step index at the last step.
    pub fn open(&mut self, source: Box<dyn TimeSeriesSource>) -> Result<()> {
        self.open_impl(source, None)
    }

    /// Opens a time series at an explicit step index (clamped into range).
    pub fn open_at(&mut self, source: Box<dyn TimeSeriesSource>, step: usize) -> Result<()> {
        self.open_impl(source, Some(step))
    }

    fn open_impl(
        &mut self,
        mut source: Box<dyn TimeSeriesSource>,
        step: Option<usize>,
    ) -> Result<()> {
        let steps = source.steps()?;
        if steps.is_empty() {
            return Err(FescopeError::NoData);
        }
        let mesh = source.mesh()?;
        let info = source.scalars_info()?;

        let last = steps.len() - 1;
        log::info!(
            "opened time series: {} steps, {} points, {} {} cells",
            steps.len(),
            mesh.num_points(),
            mesh.num_cells(),
            mesh.cell_type().name()
        );

        self.step = step.map_or(last, |s| s.min(last));
        self.source = Some(source);
        self.mesh = Some(mesh);
        self.info = info;
        self.steps = steps;
        self.binding = None;
        self.color_range = None;
        self.displacement.clear();
        self.layout = None;
        Ok(())
    }

    /// Binds a field and component, then displays the current step.
    ///
    /// Looks the name up in point data first, then cell data. The
    /// component index must be below the field's width;
    /// [`Component::Mean`] is always valid.
    pub fn select_field(&mut self, name: &str, component: Component) -> Result<()> {
        if self.mesh.is_none() {
            return Err(FescopeError::NotLoaded);
        }
        let (location, width) = self
            .info
            .lookup(name)
            .ok_or_else(|| FescopeError::UnknownField(name.to_string()))?;
        if let Component::Index(i) = component {
            if i >= width {
                return Err(FescopeError::InvalidComponent { index: i, width });
            }
        }

        let field = ActiveField {
            name: name.to_string(),
            location,
            component,
        };
        self.display_step(self.step, field)
    }

    /// Displays a step, clamping the index into `[0, n_steps - 1]`.
    ///
    /// Before any field was selected, binds the first catalogued field
    /// (point data first) at component 0.
    pub fn goto_step(&mut self, step: isize) -> Result<()> {
        if self.mesh.is_none() {
            return Err(FescopeError::NotLoaded);
        }
        let last = self.steps.len() as isize - 1;
        let k = usize::try_from(step.clamp(0, last)).unwrap_or(0);

        let field = match &self.binding {
            Some(field) => field.clone(),
            None => self.default_field()?,
        };
        self.display_step(k, field)
    }

    /// Orients the render target's camera.
    pub fn set_view(&mut self, preset: CameraPreset) {
        self.render.set_camera_orientation(preset);
    }

    /// Returns the lifecycle phase.
    pub fn phase(&self) -> BindingPhase {
        if self.mesh.is_none() {
            BindingPhase::Empty
        } else if self.color_range.is_none() {
            BindingPhase::Loaded
        } else {
            BindingPhase::Bound
        }
    }

    /// Returns the active field name and component, once bound.
    pub fn active_field(&self) -> Option<(&str, Component)> {
        self.binding
            .as_ref()
            .map(|f| (f.name.as_str(), f.component))
    }

    /// Returns the current step index.
    pub fn step(&self) -> usize {
        self.step
    }

    /// Returns the number of steps (0 while empty).
    pub fn num_steps(&self) -> usize {
        self.steps.len()
    }

    /// Returns the step labels.
    pub fn step_labels(&self) -> &[String] {
        &self.steps
    }

    /// Returns the current color range, once bound.
    pub fn color_range(&self) -> Option<(f32, f32)> {
        self.color_range
    }

    /// Returns the displacement applied at the displayed step.
    pub fn displacement(&self) -> &[Vec3] {
        &self.displacement
    }

    /// Returns the undeformed reference mesh, once loaded.
    pub fn mesh(&self) -> Option<&Mesh> {
        self.mesh.as_ref()
    }

    /// Returns the field catalogue (empty while no mesh is loaded).
    pub fn scalars_info(&self) -> &ScalarsInfo {
        &self.info
    }

    /// Returns the view options.
    pub fn options(&self) -> &ViewOptions {
        &self.options
    }

    /// Replaces the view options. Takes effect on the next display.
    pub fn set_options(&mut self, options: ViewOptions) {
        self.options = options;
    }

    /// Returns the render target.
    pub fn render(&self) -> &R {
        &self.render
    }

    fn default_field(&self) -> Result<ActiveField> {
        let (location, info) = self.info.first().ok_or(FescopeError::NoData)?;
        Ok(ActiveField {
            name: info.name.clone(),
            location,
            component: Component::Index(0),
        })
    }

    /// The step pipeline. Everything fallible runs before the commit at
    /// the bottom, so a failure leaves the previous binding observable.
    fn display_step(&mut self, k: usize, field: ActiveField) -> Result<()> {
        let (Some(source), Some(mesh)) = (self.source.as_mut(), self.mesh.as_ref()) else {
            return Err(FescopeError::NotLoaded);
        };

        let sample = source.read_data(k)?;
        let du = displacement_from(&sample, mesh.num_points())?;
        let coords = if self.options.deformed {
            mesh.displaced(&du)?
        } else {
            mesh.points().to_vec()
        };

        let array = match field.location {
            FieldLocation::Point => sample.point_data.get(&field.name),
            FieldLocation::Cell => sample.cell_data.get(&field.name),
        }
        .ok_or_else(|| FescopeError::UnknownField(field.name.clone()))?;
        let scalars = array.select(field.component)?;
        let expected = match field.location {
            FieldLocation::Point => mesh.num_points(),
            FieldLocation::Cell => mesh.num_cells(),
        };
        if scalars.len() != expected {
            return Err(FescopeError::SizeMismatch {
                expected,
                actual: scalars.len(),
            });
        }

        // Connectivity survives value and displacement changes; only a
        // different mesh rebuilds it.
        let layout = match self.layout.take() {
            Some(layout) if layout.matches(mesh.num_points(), mesh.num_cells()) => layout,
            _ => {
                log::debug!(
                    "resolving surface layout for {} {} cells",
                    mesh.num_cells(),
                    mesh.cell_type().name()
                );
                SurfaceLayout::build(mesh.points(), mesh.cells(), mesh.cell_type())?
            }
        };

        let polygons = layout.project(&coords)?;
        let values = layout.reduce(match field.location {
            FieldLocation::Point => FieldValues::PerPoint(&scalars),
            FieldLocation::Cell => FieldValues::PerCell(&scalars),
        })?;
        let range = value_range(&values);
        let text = legend::legend_text(
            &field.name,
            field.component,
            k,
            range,
            self.options.show_min_max,
        );

        self.render.set_primitives(&polygons, &values, range);
        self.render.set_legend(&text);

        log::debug!(
            "displayed step {k} (t = {}): field '{}', {} primitives, range [{}, {}]",
            sample.time,
            field.name,
            values.len(),
            range.0,
            range.1
        );

        self.layout = Some(layout);
        self.binding = Some(field);
        self.step = k;
        self.color_range = Some(range);
        self.displacement = du;
        Ok(())
    }
}

/// Extracts the per-point displacement from a sample, or zeros when the
/// field is absent.
fn displacement_from(sample: &FieldSample, n_points: usize) -> Result<Vec<Vec3>> {
    match sample.point_data.get(DISPLACEMENT_FIELD) {
        Some(array) => {
            let rows = array.rows_as_vec3();
            if rows.len() != n_points {
                return Err(FescopeError::SizeMismatch {
                    expected: n_points,
                    actual: rows.len(),
                });
            }
            Ok(rows)
        }
        None => {
            log::debug!("step carries no '{DISPLACEMENT_FIELD}' field, assuming zero");
            Ok(vec![Vec3::ZERO; n_points])
        }
    }
}

/// (min, max) over the finite values, or (0, 1) when there are none.
fn value_range(values: &[f32]) -> (f32, f32) {
    let mut min = f32::MAX;
    let mut max = f32::MIN;
    for &v in values {
        if v.is_finite() {
            min = min.min(v);
            max = max.max(v);
        }
    }
    if min > max {
        (0.0, 1.0)
    } else {
        (min, max)
    }
}
