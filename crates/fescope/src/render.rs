//! Render target capability.
//!
//! The core never talks to a concrete rendering backend; it emits calls in
//! this small vocabulary and lets the embedding shell decide what draws
//! them. [`HeadlessTarget`] is the built-in recording implementation used
//! by tests, demos and windowless runs.

use glam::Vec3;

/// Fixed camera orientations, matching the viewer's x/y/z key bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraPreset {
    /// Look down the z axis (the natural 2-D view).
    Xy,
    /// Look down the x axis.
    Yz,
    /// Look down the y axis.
    Xz,
}

/// A backend that can draw color-mapped polygon soups.
pub trait RenderTarget {
    /// Replaces the displayed primitives. `values` holds one scalar per
    /// polygon and `color_range` the (min, max) the color map spans.
    fn set_primitives(&mut self, polygons: &[Vec<Vec3>], values: &[f32], color_range: (f32, f32));

    /// Replaces the legend text.
    fn set_legend(&mut self, text: &str);

    /// Orients the camera to a preset.
    fn set_camera_orientation(&mut self, preset: CameraPreset);
}

/// A render target that records the most recent calls instead of drawing.
#[derive(Debug, Clone, Default)]
pub struct HeadlessTarget {
    /// Last pushed polygons.
    pub polygons: Vec<Vec<Vec3>>,
    /// Last pushed per-polygon values.
    pub values: Vec<f32>,
    /// Last pushed color range.
    pub color_range: (f32, f32),
    /// Last pushed legend text.
    pub legend: String,
    /// Last camera preset, if any was set.
    pub camera: Option<CameraPreset>,
    /// Number of `set_primitives` calls seen.
    pub frames: usize,
}

impl HeadlessTarget {
    /// Creates an empty recording target.
    pub fn new() -> Self {
        Self::default()
    }
}

impl RenderTarget for HeadlessTarget {
    fn set_primitives(&mut self, polygons: &[Vec<Vec3>], values: &[f32], color_range: (f32, f32)) {
        self.polygons = polygons.to_vec();
        self.values = values.to_vec();
        self.color_range = color_range;
        self.frames += 1;
    }

    fn set_legend(&mut self, text: &str) {
        self.legend = text.to_string();
    }

    fn set_camera_orientation(&mut self, preset: CameraPreset) {
        self.camera = Some(preset);
    }
}
