//! End-to-end demo: a hexahedral cantilever bar bending through five
//! load steps, displayed through the headless render target.
//!
//! Run with: cargo run --example cantilever_demo

use fescope::*;

/// A 4x1x1 bar of unit hexahedra: 5 slabs of 4 corners, 4 cells.
fn bar_mesh() -> Result<Mesh> {
    let mut points = Vec::new();
    for slab in 0..5 {
        let x = slab as f32;
        points.push(Vec3::new(x, 0.0, 0.0));
        points.push(Vec3::new(x, 1.0, 0.0));
        points.push(Vec3::new(x, 1.0, 1.0));
        points.push(Vec3::new(x, 0.0, 1.0));
    }
    let cells = (0..4u32)
        .map(|c| {
            let a = 4 * c;
            let b = 4 * (c + 1);
            vec![a, b, b + 1, a + 1, a + 3, b + 3, b + 2, a + 2]
        })
        .collect();
    Mesh::new(points, cells, CellType::Hexahedron)
}

/// One load step: tip deflection grows quadratically along the bar, the
/// "Stress" cell field peaks at the clamped end.
fn step_sample(time: f32) -> FieldSample {
    let mut du = Vec::new();
    let mut s = Vec::new();
    for slab in 0..5 {
        let x = slab as f32;
        let deflection = 0.05 * time * x * x;
        for _ in 0..4 {
            du.extend_from_slice(&[0.0, 0.0, -deflection]);
            s.push(deflection);
        }
    }
    let stress: Vec<f32> = (0..4).map(|c| time * (4 - c) as f32 * 25.0).collect();

    FieldSample::at_time(time)
        .with_point_field(
            DISPLACEMENT_FIELD,
            FieldArray::new(du, 3).expect("20 x 3 array"),
        )
        .with_point_field("Deflection", FieldArray::scalars(s))
        .with_cell_field("Stress", FieldArray::scalars(stress))
}

fn main() -> Result<()> {
    env_logger::init();

    let mut series = MemorySeries::new(bar_mesh()?);
    for k in 0..5 {
        let t = k as f32 / 4.0;
        series.push_step(format!("{t}"), step_sample(t));
    }

    let mut binder = FieldBinder::new(HeadlessTarget::new());
    binder.open(Box::new(series))?;
    binder.set_view(CameraPreset::Xz);
    binder.select_field("Stress", Component::Index(0))?;

    println!(
        "opened: {} steps over {} cells",
        binder.num_steps(),
        binder.mesh().map_or(0, Mesh::num_cells)
    );

    let mut playback = Playback::new();
    playback.play();
    binder.goto_step(0)?;
    for _ in 0..binder.num_steps() {
        let (min, max) = binder.color_range().unwrap_or((0.0, 1.0));
        println!(
            "step {}: {} primitives, stress range [{min:.1}, {max:.1}]",
            binder.step(),
            binder.render().polygons.len(),
        );
        playback.tick(&mut binder)?;
    }

    binder.select_field("Deflection", Component::Index(0))?;
    println!("legend:\n{}", binder.render().legend);
    Ok(())
}
