use criterion::{black_box, criterion_group, criterion_main, Criterion};
use horoscope::ephemeris::{GeoLocation, MeanMotionEphemeris};
use horoscope::transits::TransitScanner;

fn bench_scan_month(c: &mut Criterion) {
    let scanner = TransitScanner::new(MeanMotionEphemeris).with_step_minutes(15);
    let location = GeoLocation::new(40.7128, -74.0060);

    c.bench_function("scan_month_sun", |b| {
        b.iter(|| {
            scanner.scan(
                black_box(2025),
                black_box(10),
                black_box(location),
                black_box(-5.0),
                black_box("Sun"),
            )
        })
    });

    c.bench_function("scan_month_moon", |b| {
        b.iter(|| scanner.scan(black_box(2025), black_box(10), location, -5.0, black_box("Moon")))
    });
}

criterion_group!(benches, bench_scan_month);
criterion_main!(benches);
