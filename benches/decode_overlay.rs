use criterion::{black_box, criterion_group, criterion_main, Criterion};
use road_visualiser::builders::{BuilderRegistry, FeatureBuilder};
use road_visualiser::models::{DataSelection, DataType, MapProps};
use road_visualiser::projection::GeoBounds;
use road_visualiser::protocol::decode;
use road_visualiser::session::MapSession;
use std::fmt::Write;

const RECORDS: usize = 20_000;

/// Oneway segments spread over a grid around London
fn oneway_payload() -> String {
    let mut text = String::from("51.0 -1.0 52.0 0.5\n");
    for i in 0..RECORDS {
        let lat = 51.0 + (i % 200) as f64 * 0.005;
        let lon = -1.0 + (i / 200) as f64 * 0.015;
        let _ = writeln!(text, "s{i} {lat:.5} {lon:.5} {:.5} {:.5}", lat + 0.001, lon + 0.0015);
    }
    text
}

fn junction_payload() -> String {
    let mut text = String::from("51.0 -1.0 52.0 0.5\n");
    for i in 0..RECORDS {
        let lat = 51.0 + (i % 200) as f64 * 0.005;
        let lon = -1.0 + (i / 200) as f64 * 0.015;
        let _ = writeln!(text, "n{i} {lat:.5} {lon:.5} {}", i % 10);
    }
    text
}

fn benchmark_decode_overlay(c: &mut Criterion) {
    let oneway = oneway_payload();
    let junctions = junction_payload();
    let registry = BuilderRegistry::default();
    let bounds = GeoBounds::new(51.0, -1.0, 52.0, 0.5);

    c.bench_function("decode", |b| {
        b.iter(|| decode(black_box(&oneway)));
    });

    // Decoding plus building, per data type
    for (data_type, text) in [(DataType::Oneway, &oneway), (DataType::Junctions, &junctions)] {
        c.bench_function(&format!("build_{data_type}"), |b| {
            b.iter(|| {
                let payload = decode(black_box(text)).ok()?;
                registry.get(data_type).map(|builder| builder.build(&payload.records))
            });
        });
    }

    // What happens when a response arrives
    c.bench_function("full_load", |b| {
        let mut session = MapSession::new(MapProps::default());
        b.iter(|| {
            let pending = session.begin_load(Some(DataSelection::new(DataType::Oneway)), bounds)?;
            Some(session.finish_load(pending, Ok(black_box(oneway.clone()))))
        });
    });
}

criterion_group!(benches, benchmark_decode_overlay);
criterion_main!(benches);
