use blf_packer_core::prelude::*;
use blf_packer_core::solver::run_strategy;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

fn generate_pieces(count: usize, min_size: u32, max_size: u32) -> Vec<Piece> {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|i| {
            Piece::new(
                format!("piece_{}", i),
                rng.gen_range(min_size..=max_size),
                rng.gen_range(min_size..=max_size),
            )
        })
        .collect()
}

fn bench_solver(c: &mut Criterion) {
    let mut group = c.benchmark_group("blf_solver");

    for count in [50, 100, 200] {
        let pieces = generate_pieces(count, 16, 64);

        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("solve", count), &pieces, |b, pieces| {
            b.iter(|| {
                let cfg = PackerConfig::default();
                black_box(solve(pieces, 1024, &cfg).unwrap())
            });
        });

        group.bench_with_input(
            BenchmarkId::new("height_desc_only", count),
            &pieces,
            |b, pieces| {
                b.iter(|| {
                    let cfg = PackerConfig::default();
                    black_box(
                        run_strategy(SortStrategy::HeightDesc, pieces, 1024, &cfg).unwrap(),
                    )
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_solver);
criterion_main!(benches);
