// crates/regionmap-core/benches/benchmarks.rs
use criterion::{criterion_group, criterion_main, Criterion};
use regionmap_core::geometry::{representative_point, LatLng};
use regionmap_core::labels::{place_labels, LabelCandidate, DEFAULT_MIN_SEPARATION};
use regionmap_core::model::FeatureCollection;
use serde_json::json;
use std::hint::black_box;

/// A `side x side` grid of small square villages.
fn grid_payload(side: usize) -> Vec<u8> {
    let mut features = Vec::with_capacity(side * side);
    for i in 0..side {
        for j in 0..side {
            let lng = 98.5 + j as f64 * 0.012;
            let lat = 1.5 + i as f64 * 0.012;
            features.push(json!({
                "type": "Feature",
                "properties": { "NAMOBJ": format!("Desa {i}-{j}") },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[lng, lat], [lng + 0.01, lat], [lng + 0.01, lat + 0.01], [lng, lat + 0.01], [lng, lat]]]
                }
            }));
        }
    }
    serde_json::to_vec(&json!({ "type": "FeatureCollection", "features": features }))
        .unwrap_or_default()
}

fn bench_parse(c: &mut Criterion) {
    let payload = grid_payload(40);
    c.bench_function("parse 1600 features", |b| {
        b.iter(|| FeatureCollection::from_slice(black_box(&payload)))
    });
}

fn bench_labels(c: &mut Criterion) {
    let collection = match FeatureCollection::from_slice(&grid_payload(40)) {
        Ok(c) => c,
        Err(e) => panic!("bench payload does not parse: {e}"),
    };
    let points: Vec<LatLng> = collection
        .features
        .iter()
        .filter_map(representative_point)
        .collect();

    c.bench_function("representative points", |b| {
        b.iter(|| {
            collection
                .features
                .iter()
                .filter_map(representative_point)
                .count()
        })
    });

    c.bench_function("place labels 1600 candidates", |b| {
        b.iter(|| {
            let candidates = points
                .iter()
                .enumerate()
                .map(|(i, p)| LabelCandidate::new(i, *p));
            place_labels(candidates, black_box(DEFAULT_MIN_SEPARATION)).count()
        })
    });
}

criterion_group!(benches, bench_parse, bench_labels);
criterion_main!(benches);
