use criterion::{black_box, criterion_group, criterion_main, Criterion};
use horoscope::aspects::AspectCalculator;
use horoscope::chart::ChartPositions;

fn bench_calculate_aspects(c: &mut Criterion) {
    let calculator = AspectCalculator::new();

    c.bench_function("calculate_aspects", |b| {
        b.iter(|| calculator.calculate_aspects(black_box(100.0), black_box(218.5)))
    });
}

fn bench_compute_chart_aspects(c: &mut Criterion) {
    let calculator = AspectCalculator::with_orb(8.0);

    let positions = ChartPositions::from_longitudes(
        (0..14).map(|i| (format!("point_{}", i), (i as f64) * 29.5 + 3.0)),
    );

    c.bench_function("compute_chart_aspects", |b| {
        b.iter(|| calculator.compute_aspects(black_box(&positions)))
    });
}

criterion_group!(benches, bench_calculate_aspects, bench_compute_chart_aspects);
criterion_main!(benches);
