use criterion::{Criterion, black_box, criterion_group, criterion_main};
use leaven_core::{CalibrationTable, EstimateRequest, RiseTarget};

// Deterministic sweep over and slightly beyond the calibrated envelope.
fn sweep(n: usize) -> Vec<EstimateRequest> {
    (0..n)
        .map(|i| {
            let f = i as f64 / n as f64;
            let rise = if i % 2 == 0 {
                RiseTarget::Percent75
            } else {
                RiseTarget::Percent100
            };
            EstimateRequest::new(62.0 + 16.0 * f, 2.0 + 22.0 * (1.0 - f), rise)
        })
        .collect()
}

pub fn bench_estimate(c: &mut Criterion) {
    let mut g = c.benchmark_group("estimate");
    // Allow quick tweaking without CLI flags (Criterion 0.5):
    //   BENCH_SAMPLE_SIZE=10 BENCH_MEAS_MS=50 cargo bench -p leaven_core --bench estimator
    if let Ok(ss) = std::env::var("BENCH_SAMPLE_SIZE") {
        if let Ok(n) = ss.parse::<usize>() {
            g.sample_size(n.max(10));
        }
    } else {
        g.sample_size(50);
    }
    if let Ok(ms) = std::env::var("BENCH_MEAS_MS")
        && let Ok(ms_u64) = ms.parse::<u64>()
    {
        g.measurement_time(std::time::Duration::from_millis(ms_u64));
    }

    let table = CalibrationTable::standard();
    let reqs = sweep(1024);
    g.bench_function("standard_table_1024", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for r in &reqs {
                acc += table.estimate(black_box(r)).hours;
            }
            black_box(acc)
        })
    });
    g.bench_function("advisories_1024", |b| {
        b.iter(|| {
            let mut n = 0usize;
            for r in &reqs {
                n += table.advisories(black_box(r)).len();
            }
            black_box(n)
        })
    });
    g.finish();
}

criterion_group!(benches, bench_estimate);
criterion_main!(benches);
