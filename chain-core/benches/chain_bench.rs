//! Benchmarks for the chain service
//!
//! Measures append cost and full-chain validation at a few chain lengths.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use chain_core::{ChainService, SystemClock};

fn build_chain(len: usize) -> ChainService<SystemClock> {
    let mut chain = ChainService::new(SystemClock::new());
    for i in 0..len {
        chain.add_block(&format!("transfer #{}", i));
    }
    chain
}

fn bench_append(c: &mut Criterion) {
    c.bench_function("append", |b| {
        let mut chain = ChainService::new(SystemClock::new());
        b.iter(|| chain.add_block(black_box("Alice pays Bob 5")))
    });
}

fn bench_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate_chain");

    for len in [10, 100, 1000] {
        let chain = build_chain(len);
        group.bench_with_input(BenchmarkId::from_parameter(len), &chain, |b, chain| {
            b.iter(|| black_box(chain.validate_chain()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_append, bench_validate);
criterion_main!(benches);
