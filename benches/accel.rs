use criterion::{Criterion, black_box, criterion_group, criterion_main};
use nka::accel::Nka;

fn bench_correction(c: &mut Criterion) {
    let n = 10_000;
    let mvec = 10;
    let template = vec![0.0_f64; n];
    let mut accel: Nka<f64, Vec<f64>> = Nka::new(mvec, 0.01, &template);
    let mut out = vec![0.0; n];
    let mut k = 0u64;
    c.bench_function("nka_correction_n10000_m10", |b| {
        b.iter(|| {
            k += 1;
            let t = k as f64;
            let f: Vec<f64> = (0..n).map(|i| ((i as f64) * 0.37 + t).sin() / t).collect();
            accel.correction(black_box(&f), &mut out);
            black_box(&out);
        })
    });
}

criterion_group!(benches, bench_correction);
criterion_main!(benches);
