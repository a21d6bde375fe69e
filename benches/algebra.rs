//! Matrix and quaternion benchmarks.

use divan::{Bencher, black_box, counter::ItemsCount};

use vantage_benches::{points, transforms};
use vantage_core::math::{Apply, Mat4, Quat, Vec3, degs, vec3};

const COUNTS: [usize; 3] = [1, 16, 256];

#[divan::bench]
fn determinant(b: Bencher) {
    let ms: Vec<Mat4> = transforms(64).collect();
    b.counter(ItemsCount::new(ms.len()))
        .bench_local(|| ms.iter().map(|m| m.determinant()).sum::<f64>());
}

#[divan::bench]
fn inverse(b: Bencher) {
    let ms: Vec<Mat4> = transforms(64).collect();
    b.counter(ItemsCount::new(ms.len())).bench_local(|| {
        for m in &ms {
            let _ = black_box(m.inverse());
        }
    });
}

#[divan::bench(args = COUNTS)]
fn product(b: Bencher, n: usize) {
    b.with_inputs(|| transforms(n).collect::<Vec<Mat4>>())
        .input_counter(|ms| ItemsCount::new(ms.len()))
        .bench_local_values(|ms| Mat4::product(ms));
}

#[divan::bench]
fn apply_point(b: Bencher) {
    let m = transforms(8).fold(Mat4::<()>::identity(), |acc, m| acc * m);
    let ps: Vec<Vec3> = points(256).collect();
    b.counter(ItemsCount::new(ps.len())).bench_local(|| {
        for p in &ps {
            black_box(m.apply(p));
        }
    });
}

#[divan::bench]
fn decompose(b: Bencher) {
    let ms: Vec<Mat4> = transforms(64).collect();
    b.counter(ItemsCount::new(ms.len())).bench_local(|| {
        for m in &ms {
            let _ = black_box(m.decompose());
        }
    });
}

#[divan::bench(args = [0.0, 0.5, 1.0])]
fn slerp(b: Bencher, t: f64) {
    let q0 = Quat::IDENTITY;
    let q1 = Quat::from_axis_angle(vec3(1.0, 1.0, 0.0), degs(120.0))
        .unwrap_or_default();
    b.bench(|| black_box(q0).slerp(&black_box(q1), t));
}

fn main() {
    divan::main()
}
