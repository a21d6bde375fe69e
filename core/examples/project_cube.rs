use vantage_core::prelude::*;

fn main() -> Result<()> {
    let dims @ Dims(w, h) = Dims(640, 480);

    let corners: [Vec3<Model>; 8] = core::array::from_fn(|i| {
        let c = |bit: usize| if i & bit == 0 { -1.0 } else { 1.0 };
        vec3(c(1), c(2), c(4)).to()
    });

    let model: Mat4<Model, World> =
        trs(vec3(0.0, 0.5, 0.0), &Quat::IDENTITY, splat(0.75)).to();
    let viewport = Mat4::identity();

    let mut cam = Camera::default();
    let step = Quat::from_axis_angle(Vec3::Y, degs(30.0))?;

    for frame in 0..4 {
        println!("frame {frame}, camera at {:?}", cam.position.0);
        for (i, corner) in corners.iter().enumerate() {
            let world = model.apply(corner);
            let [x, y] = cam.project(world, &viewport, dims)?.0;
            let visible = (0.0..f64::from(w)).contains(&x)
                && (0.0..f64::from(h)).contains(&y);
            let note = if visible { "" } else { "  offscreen" };
            println!("  corner {i}: ({x:7.2}, {y:7.2}){note}");
        }
        cam.orbit(&step);
    }
    Ok(())
}
