//! Shared inputs for the `vantage-core` benchmarks.

use vantage_core::math::{Mat4, Quat, Vec3, scale, translate, trs, vec3};

/// Returns `n` deterministic, well-conditioned affine transforms.
pub fn transforms(n: usize) -> impl Iterator<Item = Mat4> {
    (0..n).map(|i| {
        let f = i as f64;
        let t = vec3(f.sin(), f.cos(), 0.1 * f);
        let q = Quat::new(1.0, 0.1 * f, -0.05 * f, 0.02 * f)
            .normalize()
            .unwrap_or_default();
        translate(t) * trs(Vec3::default(), &q, vec3(1.0, 2.0, 0.5))
            * scale(vec3(1.0 + 0.01 * f, 1.0, 1.0))
    })
}

/// Returns `n` deterministic points scattered around the origin.
pub fn points(n: usize) -> impl Iterator<Item = Vec3> {
    (0..n).map(|i| {
        let f = i as f64;
        vec3((0.7 * f).sin() * 2.0, (1.3 * f).cos() * 2.0, (0.3 * f).sin())
    })
}
