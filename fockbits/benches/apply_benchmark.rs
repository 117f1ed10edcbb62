extern crate criterion;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use fockbits::{HilbertSpace, LinearOperator};
use laddermer::prelude::*;

type Expr = Expression<f64, i32>;

pub fn apply_benchmark(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("LinearOperator::apply");
    for sites in [8u32, 12, 16] {
        let hamiltonian = heisenberg_chain(sites as i32);
        let space = HilbertSpace::from_expression(&hamiltonian).unwrap();
        let operator = LinearOperator::new(&hamiltonian, &space).unwrap();
        let dim = 1u64 << space.total_bits();
        group.bench_with_input(BenchmarkId::from_parameter(sites), &operator, |bencher, operator| {
            bencher.iter(|| {
                let mut checksum = 0u64;
                for state in 0..dim {
                    checksum = checksum.wrapping_add(operator.apply(state).len() as u64);
                }
                checksum
            });
        });
    }
    group.finish();
}

criterion_group!(benches, apply_benchmark);
criterion_main!(benches);

fn heisenberg_chain(sites: i32) -> Expr {
    let mut hamiltonian = Expr::zero();
    for site in 0..sites - 1 {
        hamiltonian += 0.5
            * (s_p(site) * s_m(site + 1) + s_m(site) * s_p(site + 1))
            + s_z(site) * s_z(site + 1);
    }
    hamiltonian
}
