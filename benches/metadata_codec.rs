// SPDX-License-Identifier: MPL-2.0
use criterion::{criterion_group, criterion_main, Criterion};
use exif_retouch::domain::metadata::{validate_request, CoordinateRational, EditRequest};
use exif_retouch::media::{dump, ExifCodec, MetadataStore, TiffCodec};
use std::hint::black_box;

fn full_request() -> EditRequest {
    EditRequest::new()
        .with("ImageWidth", "6000")
        .with("ImageLength", "4000")
        .with("Make", "Canon")
        .with("Model", "EOS R5")
        .with("DateTime", "2024:06:01 09:15:42")
        .with("GPSLatitudeRef", "N")
        .with("GPSLatitude", "48.8566")
        .with("GPSLongitudeRef", "E")
        .with("GPSLongitude", "2.3522")
}

fn metadata_codec_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("metadata_codec");
    let request = full_request();

    group.bench_function("coordinate_from_decimal", |b| {
        b.iter(|| CoordinateRational::from_decimal(black_box(-151.209_312_5)));
    });

    group.bench_function("validate_request", |b| {
        b.iter(|| validate_request(black_box(&request)));
    });

    let outcomes = validate_request(&request);
    group.bench_function("merge", |b| {
        b.iter(|| {
            let mut store = MetadataStore::new();
            black_box(store.merge(black_box(&outcomes)));
            store
        });
    });

    let mut store = MetadataStore::new();
    store.merge(&outcomes);
    group.bench_function("dump", |b| {
        b.iter(|| dump(black_box(&store)));
    });

    let blob = dump(&store).unwrap();
    group.bench_function("decode", |b| {
        b.iter(|| TiffCodec::default().decode(black_box(&blob)));
    });

    group.finish();
}

criterion_group!(benches, metadata_codec_benchmark);
criterion_main!(benches);
