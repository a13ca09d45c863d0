use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use toruslife::{Universe, render_universe};

fn make_universe(size: usize) -> Universe {
    let mut universe = Universe::new(size, size).expect("allocate universe");
    for row in 0..size {
        for col in 0..size {
            if (row + col) % 3 == 0 {
                universe.set_alive(row, col, true);
            }
        }
    }
    universe
}

fn bench_evolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("evolve");
    for size in [64, 128, 256] {
        let universe = make_universe(size);

        group.bench_with_input(BenchmarkId::new("diagonal", size), &universe, |b, universe| {
            b.iter_batched(
                || universe.clone(),
                |mut universe| universe.evolve(),
                BatchSize::LargeInput,
            );
        });

        let mut random = Universe::new(size, size).expect("allocate universe");
        random.randomize(size as u64);
        group.bench_with_input(BenchmarkId::new("random", size), &random, |b, universe| {
            b.iter_batched(
                || universe.clone(),
                |mut universe| universe.evolve(),
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let universe = make_universe(256);
    let mut out = Vec::with_capacity(256 * 257 + 1);
    c.bench_function("render_universe", |b| {
        b.iter(|| {
            out.clear();
            render_universe(&mut out, &universe).expect("write to vec");
        })
    });
}

criterion_group!(benches, bench_evolve, bench_render);
criterion_main!(benches);
