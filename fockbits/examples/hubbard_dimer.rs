//! Build the two-site Hubbard Hamiltonian symbolically and act with it on
//! a few basis states.

use fockbits::{HilbertSpace, LinearOperator};
use laddermer::prelude::*;

type Expr = Expression<f64, (&'static str, i32)>;

fn main() {
    let hopping = 1.0;
    let repulsion = 4.0;

    let mut hamiltonian = Expr::zero();
    for spin in ["up", "dn"] {
        hamiltonian += -hopping * (c_dag((spin, 0)) * c((spin, 1))) + Hc;
    }
    for site in 0..2 {
        hamiltonian += repulsion * (n(("up", site)) * n(("dn", site)));
    }

    println!("H = {hamiltonian}");

    let space = HilbertSpace::from_expression(&hamiltonian).expect("all modes have default spaces");
    println!("state index width: {} bits", space.total_bits());

    let operator = LinearOperator::new(&hamiltonian, &space).expect("space covers H");

    // Half filling, one up and one dn electron.
    for state in 0..(1u64 << space.total_bits()) {
        if state.count_ones() != 2 {
            continue;
        }
        let image = operator.apply(state);
        if image.is_empty() {
            continue;
        }
        let rendered: Vec<String> = image.iter().map(|(out, amp)| format!("{amp:+.1}|{out}>")).collect();
        println!("H |{state}> = {}", rendered.join(" "));
    }
}
