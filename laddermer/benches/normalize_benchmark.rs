extern crate criterion;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use laddermer::prelude::*;

type Expr = Expression<f64, i32>;

pub fn normalize_benchmark(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("Expression::normalize");
    for sites in [4i32, 8, 16] {
        group.bench_with_input(BenchmarkId::from_parameter(sites), &sites, |bencher, &sites| {
            bencher.iter(|| hubbard_chain(sites));
        });
    }
    group.finish();

    let mut group = criterion.benchmark_group("Expression::reversed_product");
    for length in [4i32, 8, 12] {
        group.bench_with_input(BenchmarkId::from_parameter(length), &length, |bencher, &length| {
            bencher.iter(|| reversed_string(length));
        });
    }
    group.finish();
}

criterion_group!(benches, normalize_benchmark);
criterion_main!(benches);

/// One-band Hubbard chain with hopping and on-site repulsion; spin is
/// encoded in the index sign.
fn hubbard_chain(sites: i32) -> Expr {
    let up = |site: i32| site;
    let dn = |site: i32| -site - 1;
    let mut hamiltonian = Expr::zero();
    for site in 0..sites - 1 {
        for spin in [up, dn] {
            hamiltonian += -1.0 * (c_dag(spin(site)) * c(spin(site + 1))) + Hc;
        }
    }
    for site in 0..sites {
        hamiltonian += 4.0 * (n(up(site)) * n(dn(site)));
    }
    hamiltonian
}

/// Worst-case bubble distance: a fully reversed annihilator/creator
/// string.
fn reversed_string(length: i32) -> Expr {
    let mut product = Expr::constant(1.0);
    for site in 0..length {
        product *= c(site);
    }
    for site in (0..length).rev() {
        product *= c_dag(site);
    }
    product
}
