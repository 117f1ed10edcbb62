use laddermer::prelude::*;

type Expr = Expression<f64, i32>;

const N_MODES: i32 = 4;

#[test]
fn fermion_canonical_anticommutators() {
    for i in 0..N_MODES {
        for j in 0..N_MODES {
            let anticommutator: Expr = c(i) * c_dag(j) + c_dag(j) * c(i);
            let expected = if i == j { Expr::constant(1.0) } else { Expr::zero() };
            assert_eq!(anticommutator, expected, "{{c_{i}, c+_{j}}}");
        }
    }
}

#[test]
fn fermion_like_operators_anticommute() {
    for i in 0..N_MODES {
        for j in 0..N_MODES {
            let cc: Expr = c(i) * c(j) + c(j) * c(i);
            assert!(cc.is_empty(), "{{c_{i}, c_{j}}} = 0");
            let cdcd: Expr = c_dag(i) * c_dag(j) + c_dag(j) * c_dag(i);
            assert!(cdcd.is_empty(), "{{c+_{i}, c+_{j}}} = 0");
        }
    }
}

#[test]
fn fermion_nilpotency() {
    for i in 0..N_MODES {
        assert!((c::<f64, i32>(i) * c(i)).is_empty());
        assert!((c_dag::<f64, i32>(i) * c_dag(i)).is_empty());
    }
}

#[test]
fn boson_canonical_commutators() {
    for i in 0..N_MODES {
        for j in 0..N_MODES {
            let commutator: Expr = a(i) * a_dag(j) - a_dag(j) * a(i);
            let expected = if i == j { Expr::constant(1.0) } else { Expr::zero() };
            assert_eq!(commutator, expected, "[a_{i}, a+_{j}]");
        }
    }
}

#[test]
fn bosons_of_equal_kind_commute() {
    for i in 0..N_MODES {
        for j in 0..N_MODES {
            let aa: Expr = a(i) * a(j) - a(j) * a(i);
            assert!(aa.is_empty());
            let adad: Expr = a_dag(i) * a_dag(j) - a_dag(j) * a_dag(i);
            assert!(adad.is_empty());
        }
    }
}

#[test]
fn distinct_algebras_commute() {
    let mixed: Expr = a(0) * c_dag(0) - c_dag(0) * a(0);
    assert!(mixed.is_empty());
    let mixed: Expr = s_z(0) * a_dag(0) - a_dag(0) * s_z(0);
    assert!(mixed.is_empty());
}

#[test]
fn spin_half_algebra() {
    for i in 0..N_MODES {
        let plus_minus: Expr = s_p(i) * s_m(i) - s_m(i) * s_p(i);
        assert_eq!(plus_minus, 2.0 * s_z::<f64, i32>(i), "[S+, S-] = 2 Sz");

        let z_plus: Expr = s_z(i) * s_p(i) - s_p(i) * s_z(i);
        assert_eq!(z_plus, s_p::<f64, i32>(i), "[Sz, S+] = S+");

        let z_minus: Expr = s_z(i) * s_m(i) - s_m(i) * s_z(i);
        assert_eq!(z_minus, -s_m::<f64, i32>(i), "[Sz, S-] = -S-");
    }
}

#[test]
fn spin_half_powers_collapse() {
    let i = 0;
    assert!((s_p::<f64, i32>(i) * s_p(i)).is_empty());
    assert!((s_m::<f64, i32>(i) * s_m(i)).is_empty());
    assert_eq!(s_z::<f64, i32>(i) * s_z(i), Expr::constant(0.25));
    // Odd powers keep one bare Sz.
    assert_eq!(
        s_z::<f64, i32>(i) * s_z(i) * s_z(i),
        0.25 * s_z::<f64, i32>(i)
    );
}

#[test]
fn spin_one_algebra() {
    let i = 0;
    let plus_minus: Expr = s_p_mult(3, i) * s_m_mult(3, i) - s_m_mult(3, i) * s_p_mult(3, i);
    assert_eq!(plus_minus, 2.0 * s_z_mult::<f64, i32>(3, i));

    // Ladder operators of a spin 1 vanish at the third power, not before.
    let square: Expr = s_p_mult(3, i) * s_p_mult(3, i);
    assert!(!square.is_empty());
    assert!((square * s_p_mult::<f64, i32>(3, i)).is_empty());

    // Sz of a spin 1 does not collapse.
    let z_square: Expr = s_z_mult(3, i) * s_z_mult(3, i);
    assert_eq!(z_square.len(), 1);
}

#[test]
fn spins_of_distinct_multiplicity_commute() {
    let commutator: Expr = s_p_mult(3, 0) * s_m(0) - s_m(0) * s_p_mult(3, 0);
    assert!(commutator.is_empty());
}

#[test]
fn heisenberg_coupling_is_hermitian() {
    // S_i . S_j written with ladder operators.
    let coupling: ExpressionComplex<i32> = s_x(0) * s_x(1) + s_y(0) * s_y(1)
        + s_z::<laddermer::Complex64, i32>(0) * s_z::<laddermer::Complex64, i32>(1);
    assert_eq!(coupling.conj(), coupling);
}
