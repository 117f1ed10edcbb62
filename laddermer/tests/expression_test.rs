use laddermer::prelude::*;
use laddermer::Complex64;

type Expr = Expression<f64, (&'static str, i32)>;
type CExpr = Expression<Complex64, (&'static str, i32)>;

#[test]
fn constructors_and_printing() {
    assert_eq!(Expr::zero().to_string(), "0");
    assert_eq!(Expr::constant(2.0).to_string(), "2");
    assert_eq!(Expr::constant(1e-100).to_string(), "0");

    let monomial = Monomial::from_generators([
        Generator::fermion(true, ("up", 1)),
        Generator::fermion(false, ("dn", 2)),
    ]);
    assert_eq!(
        Expr::from_term(3.0, monomial.clone()).to_string(),
        "3*C+(up,1)C(dn,2)"
    );
    assert!(Expr::from_term(1e-100, monomial).is_empty());
}

#[test]
fn sums_merge_and_cancel() {
    let expression: Expr = c_dag(("up", 1)) - c(("dn", 2));
    assert_eq!(expression.to_string(), "1*C+(up,1) + -1*C(dn,2)");

    let cancelled = expression.clone() - c_dag(("up", 1));
    assert_eq!(cancelled.to_string(), "-1*C(dn,2)");

    let nothing = expression.clone() - expression;
    assert_eq!(nothing, Expr::zero());
    assert_eq!(nothing.to_string(), "0");
}

#[test]
fn unary_minus_negates_coefficients() {
    let expression: Expr = -c_dag(("up", 1));
    assert_eq!(expression.to_string(), "-1*C+(up,1)");
    assert_eq!(-(-c_dag::<f64, (&'static str, i32)>(("up", 1))), c_dag(("up", 1)));
}

#[test]
fn product_expands_and_normal_orders() {
    // (c+_1 + c_2) * (c+_1 + c_2) = c+_1 c_2 + c_2 c+_1 = anticommutator = 1
    // minus the cross terms that vanish (squares of a single generator).
    let sum: Expr = c_dag(("a", 1)) + c(("a", 1));
    let square = sum.clone() * sum;
    assert_eq!(square, Expr::constant(1.0));
}

#[test]
fn mixed_algebra_product_print() {
    let product: Expr = c_dag(("dn", 0))
        * a(("y", 0))
        * a(("y", 0))
        * s_z_mult(3, ("j", 0));
    assert_eq!(product.to_string(), "1*C+(dn,0)[A(y,0)]^2S1z(j,0)");
}

#[test]
fn iteration_is_in_monomial_order() {
    let expression: Expr = a(("x", 0)) * 3.0 + Expr::constant(5.0) + c_dag(("up", 1)) * c(("up", 1)) + c(("up", 1));
    let monomials: Vec<_> = expression.iter().map(|(m, _)| m.clone()).collect();
    let mut sorted = monomials.clone();
    sorted.sort();
    assert_eq!(monomials, sorted);
    // The constant term comes first.
    assert!(monomials[0].is_identity());
    assert_eq!(expression.constant_term(), 5.0);
}

#[test]
fn equality_is_scalar_tolerant() {
    let left: Expr = c_dag(("up", 1)) * (1.0 / 3.0) * 3.0;
    let right: Expr = c_dag(("up", 1));
    assert_eq!(left, right);
}

#[test]
fn complex_promotion() {
    let real: Expr = 2.0 * c_dag(("up", 1)) * c(("dn", 2));
    let complex: CExpr = real.to_complex();
    assert_eq!(complex.len(), real.len());
    for ((m1, s1), (m2, s2)) in real.iter().zip(complex.iter()) {
        assert_eq!(m1, m2);
        assert_eq!(Complex64::new(*s1, 0.0), *s2);
    }
}

#[test]
fn complex_conjugate_expression() {
    let expression: CExpr = Complex64::new(0.0, 2.0) * (c_dag(("up", 1)) * c(("dn", 2)));
    let conjugate = expression.conj();
    let reversed = Monomial::from_generators([
        Generator::fermion(true, ("dn", 2)),
        Generator::fermion(false, ("up", 1)),
    ]);
    assert_eq!(conjugate.coefficient(&reversed), Some(&Complex64::new(0.0, -2.0)));
    assert_eq!(conjugate.conj(), expression);
}

#[test]
fn integer_coefficients() {
    type IExpr = Expression<i64, i32>;
    let expression: IExpr = c_dag(0) * c(0) * 3_i64 + IExpr::constant(2);
    assert_eq!(expression.to_string(), "2 + 3*C+(0)C(0)");
}

#[test]
fn number_operator_identities() {
    // n^2 = n for fermions.
    let number: Expr = n(("up", 0));
    assert_eq!(number.clone() * number.clone(), number);
}
