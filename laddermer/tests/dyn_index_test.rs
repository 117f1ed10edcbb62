use laddermer::dyn_index;
use laddermer::prelude::*;

type Expr = Expression<f64, DynIndex>;

#[test]
fn factories_accept_mixed_atoms() {
    let expression: Expr = c_dag(dyn_index!["up", 1]) * c(dyn_index!["dn", 2]);
    assert_eq!(expression.to_string(), "1*C+(up,1)C(dn,2)");

    let with_real: Expr = s_z(dyn_index![0.5, "site"]);
    assert_eq!(with_real.to_string(), "1*Sz(0.5,site)");
}

#[test]
fn single_atom_conversions() {
    // Bare atoms convert into one-position indices.
    let expression: Expr = a_dag(0) * a(0);
    assert_eq!(expression.to_string(), "1*A+(0)A(0)");
    let expression: Expr = c_dag("up") * c("up");
    assert_eq!(expression.to_string(), "1*C+(up)C(up)");
}

#[test]
fn anticommutator_over_dyn_indices() {
    let index = dyn_index!["up", 1];
    let expression: Expr = c_dag(index.clone()) * c(index.clone()) + c(index.clone()) * c_dag(index);
    assert_eq!(expression, Expr::constant(1.0));
}

#[test]
fn index_length_orders_generators() {
    // ("up") < ("up", 1): shorter indices come first among creators.
    let expression: Expr = c_dag(dyn_index!["up", 1]) * c_dag(dyn_index!["up"]);
    assert_eq!(expression.to_string(), "-1*C+(up)C+(up,1)");
}

#[test]
fn hermitian_marker_over_dyn_indices() {
    let expression: Expr = 2.0 * (c_dag(dyn_index![1, "up"]) * c(dyn_index![2, "dn"]));
    assert_eq!(expression.clone() + Hc, expression.clone() + expression.conj());
    assert_eq!(expression.clone() - Hc, expression.clone() - expression.conj());
}
