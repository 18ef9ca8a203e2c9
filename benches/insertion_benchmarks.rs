use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use songspace::{Features, Song, SpatialIndex, validate_index};

fn scattered_songs(count: usize) -> Vec<Song> {
    let mut state: u64 = 0x9e37_79b9_7f4a_7c15;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        (state % 10_000) as f32 / 10_000.0
    };
    (0..count)
        .map(|i| {
            Song::new(format!("song_{i}"), format!("{i:022}"))
                .with_artists([format!("artist_{}", i % 500)])
                .with_year(1921 + (next() * 100.0) as i32)
                .with_duration_ms(180_000)
                .with_features(Features::new(next(), next(), next(), next(), next()))
        })
        .collect()
}

fn ascending_songs(count: usize) -> Vec<Song> {
    (0..count)
        .map(|i| {
            let v = i as f32 / count as f32;
            Song::new(format!("song_{i}"), i.to_string())
                .with_year(1921 + i as i32)
                .with_features(Features::new(v, v, v, v, v))
        })
        .collect()
}

fn bench_insertion(c: &mut Criterion) {
    let mut group = c.benchmark_group("insertion");

    for size in [1_000, 10_000, 100_000].iter() {
        let songs = scattered_songs(*size);
        group.throughput(Throughput::Elements(*size as u64));

        group.bench_with_input(BenchmarkId::new("scattered", size), &songs, |b, songs| {
            b.iter(|| {
                let mut index = SpatialIndex::new();
                for song in songs {
                    index.insert(song.clone()).unwrap();
                }
                black_box(index.height())
            });
        });

        group.bench_with_input(BenchmarkId::new("insert_many", size), &songs, |b, songs| {
            b.iter(|| {
                let mut index = SpatialIndex::new();
                index.insert_many(songs.iter().cloned()).unwrap();
                black_box(index.len())
            });
        });
    }

    group.finish();
}

fn bench_degenerate_insertion(c: &mut Criterion) {
    let mut group = c.benchmark_group("degenerate_insertion");

    for size in [100, 1_000, 5_000].iter() {
        let songs = ascending_songs(*size);
        group.throughput(Throughput::Elements(*size as u64));

        group.bench_with_input(BenchmarkId::new("ascending", size), &songs, |b, songs| {
            b.iter(|| {
                let mut index = SpatialIndex::new();
                for song in songs {
                    index.insert(song.clone()).unwrap();
                }
                black_box(index.height())
            });
        });
    }

    group.finish();
}

fn bench_teardown(c: &mut Criterion) {
    let mut group = c.benchmark_group("teardown");
    let songs = scattered_songs(10_000);
    let mut template = SpatialIndex::new();
    template.insert_many(songs).unwrap();

    group.bench_function("teardown_with_10k", |b| {
        b.iter_batched(
            || template.clone(),
            |mut index| black_box(index.teardown_with(|_, record| drop(record))),
            criterion::BatchSize::LargeInput,
        );
    });

    group.bench_function("drop_10k", |b| {
        b.iter_batched(
            || template.clone(),
            drop,
            criterion::BatchSize::LargeInput,
        );
    });

    group.bench_function("validate_10k", |b| {
        b.iter(|| validate_index(black_box(&template)).unwrap());
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_insertion,
    bench_degenerate_insertion,
    bench_teardown
);
criterion_main!(benches);
