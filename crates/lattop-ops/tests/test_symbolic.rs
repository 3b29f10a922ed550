//! Tests for the generic operator accumulator.

use lattop_ops::{FermionOperator, Ladder, OpsError, Pauli, QubitOperator};
use num_complex::Complex64;
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Accumulation and equality
// ---------------------------------------------------------------------------

#[test]
fn identical_terms_merge() {
    let mut op = FermionOperator::hopping(0, 1, 1.0);
    op += FermionOperator::hopping(0, 1, 2.5);
    assert_eq!(op.len(), 1);
    assert_eq!(
        op.coefficient(&[(0, Ladder::Raise), (1, Ladder::Lower)]),
        Complex64::new(3.5, 0.0)
    );
}

#[test]
fn opposite_terms_compare_equal_to_zero() {
    let op = FermionOperator::number(2, 1.0) - FermionOperator::number(2, 1.0);
    // The cancelled term is still stored but ignored by equality.
    assert_eq!(op.len(), 1);
    assert_eq!(op, FermionOperator::zero());
    assert!(op.compressed(0.0).is_empty());
}

#[test]
fn equality_ignores_zero_weight_terms() {
    let a = FermionOperator::number(0, 1.0) + FermionOperator::number(1, 0.0);
    let b = FermionOperator::number(0, 1.0);
    assert_eq!(a, b);
    assert_eq!(b, a);
    assert_ne!(a, FermionOperator::number(0, 1.1));
}

#[test]
fn ladder_order_is_significant() {
    let a: FermionOperator = "0^ 1".parse().unwrap();
    let b: FermionOperator = "1 0^".parse().unwrap();
    assert_ne!(a, b);
}

#[test]
fn parse_error_reports_token() {
    let err = QubitOperator::parse("X0 Q1", 1.0).unwrap_err();
    assert_eq!(
        err,
        OpsError::InvalidAction {
            token: "Q1".into(),
            term: "X0 Q1".into()
        }
    );
}

#[test]
fn empty_string_is_constant_term() {
    let op = QubitOperator::parse("", 3.0).unwrap();
    assert_eq!(op.constant_coefficient(), Complex64::new(3.0, 0.0));
    assert_eq!(op, QubitOperator::scalar(3.0));
}

// ---------------------------------------------------------------------------
// Hermitian conjugation
// ---------------------------------------------------------------------------

#[test]
fn fermion_conjugate_reverses_and_flips() {
    let op = FermionOperator::parse("0^ 1 2^ 3", Complex64::new(1.0, 2.0)).unwrap();
    let expected = FermionOperator::parse("3^ 2 1^ 0", Complex64::new(1.0, -2.0)).unwrap();
    assert_eq!(op.hermitian_conjugated(), expected);
}

#[test]
fn qubit_conjugate_only_conjugates_coefficient() {
    let op = QubitOperator::parse("X0 Y1", Complex64::new(0.0, 1.0)).unwrap();
    let dag = op.hermitian_conjugated();
    assert_eq!(
        dag.coefficient(&[(0, Pauli::X), (1, Pauli::Y)]),
        Complex64::new(0.0, -1.0)
    );
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

#[test]
fn fermion_product_concatenates() {
    let n0 = FermionOperator::number(0, 1.0);
    let n1 = FermionOperator::number(1, 2.0);
    let prod = &n0 * &n1;
    assert_eq!(prod, FermionOperator::parse("0^ 0 1^ 1", 2.0).unwrap());
    assert_eq!(prod.many_body_order(), 4);
}

#[test]
fn pauli_squares_to_identity() {
    let x = QubitOperator::pauli(0, Pauli::X, 1.0);
    assert_eq!(&x * &x, QubitOperator::identity());
}

#[test]
fn pauli_anticommute() {
    let x = QubitOperator::pauli(0, Pauli::X, 1.0);
    let y = QubitOperator::pauli(0, Pauli::Y, 1.0);
    let anti = &x * &y + &y * &x;
    assert_eq!(anti, QubitOperator::zero());
}

// ---------------------------------------------------------------------------
// Serialization
// ---------------------------------------------------------------------------

#[test]
fn json_roundtrip_preserves_terms() {
    let op = FermionOperator::hopping(0, 2, -1.0) + FermionOperator::number(1, 0.5);
    let json = serde_json::to_string(&op).unwrap();
    assert!(json.contains("\"0^ 2\""));
    let back: FermionOperator = serde_json::from_str(&json).unwrap();
    assert_eq!(back, op);
}

#[test]
fn display_lists_terms_in_canonical_order() {
    let op = QubitOperator::parse("Z1", -1.0).unwrap() + QubitOperator::parse("X0", 0.5).unwrap();
    assert_eq!(op.to_string(), "0.5 [X0]\n-1 [Z1]");
    assert_eq!(QubitOperator::zero().to_string(), "0");
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

fn arb_fermion_term() -> impl Strategy<Value = FermionOperator> {
    (
        prop::collection::vec((0_usize..6, any::<bool>()), 0..5),
        -5.0_f64..5.0,
        -5.0_f64..5.0,
    )
        .prop_map(|(actions, re, im)| {
            let actions = actions
                .into_iter()
                .map(|(m, raise)| (m, if raise { Ladder::Raise } else { Ladder::Lower }));
            FermionOperator::term(actions, Complex64::new(re, im))
        })
}

fn arb_fermion_operator() -> impl Strategy<Value = FermionOperator> {
    prop::collection::vec(arb_fermion_term(), 0..6)
        .prop_map(|terms| terms.into_iter().fold(FermionOperator::zero(), |a, t| a + t))
}

proptest! {
    #[test]
    fn conjugation_is_an_involution(op in arb_fermion_operator()) {
        prop_assert_eq!(op.hermitian_conjugated().hermitian_conjugated(), op);
    }

    #[test]
    fn sum_with_conjugate_is_hermitian(op in arb_fermion_operator()) {
        let h = op.clone() + op.hermitian_conjugated();
        prop_assert!(h.is_hermitian());
    }

    #[test]
    fn addition_commutes(a in arb_fermion_operator(), b in arb_fermion_operator()) {
        prop_assert_eq!(a.clone() + b.clone(), b + a);
    }
}
