use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tdpath::*;

/// 2×n のはしごグラフ
fn ladder(n: usize) -> Graph {
    let mut g = Graph::with_vertices(2 * n);
    for i in 0..n as u32 {
        g.add_edge(2 * i, 2 * i + 1);
        if i + 1 < n as u32 {
            g.add_edge(2 * i, 2 * i + 2);
            g.add_edge(2 * i + 1, 2 * i + 3);
        }
    }
    g
}

/// 完全グラフ K_n
fn complete(n: u32) -> Graph {
    let mut g = Graph::with_vertices(n as usize);
    for u in 0..n {
        for v in (u + 1)..n {
            g.add_edge(u, v);
        }
    }
    g
}

fn bench_transfer_ladder(c: &mut Criterion) {
    let g = ladder(16);
    let order = greedy_degree_order(&g);
    let td = build_tree_decomposition(&order, &g);

    c.bench_function("direct transfer ladder 2x16", |b| {
        b.iter(|| transfer_direct(black_box(&td)))
    });
}

fn bench_transfer_k6(c: &mut Criterion) {
    let g = complete(6);
    let order = greedy_degree_order(&g);
    let td = build_tree_decomposition(&order, &g);

    c.bench_function("direct transfer K6", |b| {
        b.iter(|| transfer_direct(black_box(&td)))
    });
}

fn bench_modular_transfer_ladder(c: &mut Criterion) {
    let g = ladder(16);
    let order = greedy_degree_order(&g);
    let td = build_tree_decomposition(&order, &g);

    c.bench_function("modular transfer ladder 2x16", |b| {
        b.iter(|| {
            set_modulus(PRIMES[0]);
            let op = LongestPath::<Polynomial<Zp>>::default();
            transfer(&op, black_box(&td))
        })
    });
}

fn bench_heuristics(c: &mut Criterion) {
    let g = ladder(64);

    c.bench_function("greedy degree order ladder 2x64", |b| {
        b.iter(|| greedy_degree_order(black_box(&g)))
    });
    c.bench_function("greedy fill-in order ladder 2x64", |b| {
        b.iter(|| greedy_fillin_order(black_box(&g)))
    });
}

fn bench_decomposition(c: &mut Criterion) {
    let g = ladder(64);
    let order = greedy_degree_order(&g);

    c.bench_function("build tree decomposition ladder 2x64", |b| {
        b.iter(|| build_tree_decomposition(black_box(&order), black_box(&g)))
    });
}

criterion_group!(
    benches,
    bench_transfer_ladder,
    bench_transfer_k6,
    bench_modular_transfer_ladder,
    bench_heuristics,
    bench_decomposition
);
criterion_main!(benches);
