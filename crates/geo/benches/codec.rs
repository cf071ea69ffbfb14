//! Benchmarks for the DIGIPIN codec and geofence.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use digipin_geo::{batch, haversine_distance, is_within_india, Coordinate, DigipinCodec, GridCodec};

fn create_test_coordinates(count: usize) -> Vec<Coordinate> {
    (0..count)
        .map(|i| {
            // Spread points over central India
            let lat = 18.0 + (i as f64 * 0.01) % 8.0;
            let lng = 74.0 + (i as f64 * 0.01) % 8.0;
            Coordinate::new(lat, lng)
        })
        .collect()
}

fn bench_single(c: &mut Criterion) {
    let delhi = Coordinate::new(28.6139, 77.2090);
    let mumbai = Coordinate::new(19.0760, 72.8777);

    c.bench_function("geofence_check", |b| {
        b.iter(|| is_within_india(black_box(delhi.latitude), black_box(delhi.longitude)))
    });

    c.bench_function("encode_single", |b| {
        b.iter(|| GridCodec.encode(black_box(delhi.latitude), black_box(delhi.longitude)))
    });

    c.bench_function("decode_single", |b| b.iter(|| GridCodec.decode(black_box("39J-438-TJC7"))));

    c.bench_function("haversine_single", |b| {
        b.iter(|| haversine_distance(black_box(&delhi), black_box(&mumbai)))
    });
}

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_encode");

    for size in [10, 100, 1000, 10000].iter() {
        let coords = create_test_coordinates(*size);

        group.bench_with_input(BenchmarkId::new("sequential", size), size, |b, _| {
            b.iter(|| {
                black_box(&coords)
                    .iter()
                    .map(|c| GridCodec.encode(c.latitude, c.longitude))
                    .collect::<Vec<_>>()
            })
        });

        group.bench_with_input(BenchmarkId::new("batch", size), size, |b, _| {
            b.iter(|| batch::encode_all(black_box(&coords)))
        });
    }

    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let text: String = create_test_coordinates(1000)
        .iter()
        .map(|c| format!("{},{}\n", c.latitude, c.longitude))
        .collect();

    c.bench_function("parse_batch_input_1000", |b| b.iter(|| batch::parse_batch_input(black_box(&text))));
}

criterion_group!(benches, bench_single, bench_batch, bench_parse);
criterion_main!(benches);
