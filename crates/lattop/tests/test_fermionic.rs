//! Tests for fermionic Hamiltonian assembly.

use lattop::{
    BuildConfig, EdgeConvention, Edge, FermionOperator, Lattice, LatticeModel, LattopError,
    LocalValue, ModeKey, build_fermion, hubbard_interaction,
};
use ndarray::{Array2, array};
use num_complex::Complex64;

fn config() -> BuildConfig {
    BuildConfig::default()
}

fn zeros(n: usize) -> LocalValue {
    LocalValue::Matrix(Array2::zeros((n, n)))
}

// ---------------------------------------------------------------------------
// Spinless chains
// ---------------------------------------------------------------------------

#[test]
fn chain_of_three_sites() {
    let t = 1.5;
    let lat = Lattice::chain(3, t, -t);
    let (ham, ind) = build_fermion(&lat, &config()).unwrap();

    let mut expected = FermionOperator::zero();
    for i in 0..3 {
        expected += FermionOperator::number(i, t);
    }
    for (i, j) in [(0, 1), (1, 2)] {
        expected += FermionOperator::hopping(i, j, -t);
        expected += FermionOperator::hopping(j, i, -t);
    }
    assert_eq!(ham, expected);
    assert_eq!(ham.len(), 7);
    assert!(ham.is_hermitian());
    assert_eq!(ind.len(), 3);
    assert_eq!(*ind.element(2).unwrap(), ModeKey::new(2, 0, 1));

    let int_ham = hubbard_interaction(0.0, &ind).unwrap();
    assert_eq!(int_ham, FermionOperator::zero());
}

#[test]
fn complex_hopping_is_conjugated_on_the_way_back() {
    let t = Complex64::new(0.0, 1.0);
    let lat = Lattice::chain(2, 0.0, t);
    let (ham, _) = build_fermion(&lat, &config()).unwrap();
    let expected = FermionOperator::hopping(0, 1, t) + FermionOperator::hopping(1, 0, t.conj());
    assert_eq!(ham, expected);
    assert!(ham.is_hermitian());
}

#[test]
fn directed_edges_are_added_as_is() {
    let lat = Lattice::chain(2, 0.0, 1.0);
    let cfg = config().with_edges(EdgeConvention::Directed);
    let (ham, _) = build_fermion(&lat, &cfg).unwrap();
    assert_eq!(ham, FermionOperator::hopping(0, 1, 1.0));
    assert!(!ham.is_hermitian());
}

// ---------------------------------------------------------------------------
// Mixed internal dimensions
// ---------------------------------------------------------------------------

#[test]
fn spinless_site_coupled_to_spinful_site() {
    let mut lat = Lattice::new();
    lat.add_site(0, 2.0)
        .add_site(1, LocalValue::identity(2).scaled(3.0));
    lat.add_hopping(&0, &1, array![[1.0, -1.0]]).unwrap();

    let (ham, ind) = build_fermion(&lat, &config()).unwrap();

    let expected: FermionOperator = [
        ("0^ 0", 2.0),
        ("1^ 1", 3.0),
        ("2^ 2", 3.0),
        ("0^ 1", 1.0),
        ("1^ 0", 1.0),
        ("0^ 2", -1.0),
        ("2^ 0", -1.0),
    ]
    .into_iter()
    .map(|(t, c)| FermionOperator::parse(t, c).unwrap())
    .fold(FermionOperator::zero(), |acc, op| acc + op);

    assert_eq!(ham, expected);
    assert_eq!(ham.clone().compressed(0.0).len(), 7);
    assert_eq!(
        ind.elements(),
        &[
            ModeKey::new(0, 0, 1),
            ModeKey::new(1, 0, 2),
            ModeKey::new(1, 1, 2)
        ]
    );
}

#[test]
fn identity_onsite_over_dimensions_one_two_three() {
    let mut lat = Lattice::new();
    lat.add_site("s1", 1.0)
        .add_site("s2", LocalValue::identity(2))
        .add_site("s3", LocalValue::identity(3));

    let (ham, ind) = build_fermion(&lat, &config()).unwrap();

    let expected = (0..6)
        .map(|m| FermionOperator::number(m, 1.0))
        .fold(FermionOperator::zero(), |acc, op| acc + op);
    assert_eq!(ham, expected);
    assert_eq!(ind.len(), 6);

    // Only the spinful and three-level sites carry pair interactions.
    let int_ham = hubbard_interaction(1.0, &ind).unwrap();
    assert_eq!(int_ham.len(), 1 + 3);
}

// ---------------------------------------------------------------------------
// Fermi-Hubbard
// ---------------------------------------------------------------------------

#[test]
fn spinful_square_lattice_matches_fermi_hubbard() {
    let t = 1.0;
    let u = 4.0;
    let hop = LocalValue::identity(2).scaled(-t);
    let lat = Lattice::square(2, 2, zeros(2), hop);

    let (kinetic, ind) = build_fermion(&lat, &config()).unwrap();
    let interaction = hubbard_interaction(u, &ind).unwrap();
    let ham = kinetic + interaction;

    // Sites (0,0), (0,1), (1,0), (1,1) become 0..4; mode = 2 * site + spin.
    let site = |x: usize, y: usize| 2 * x + y;
    let bonds = [
        (site(0, 0), site(1, 0)),
        (site(0, 0), site(0, 1)),
        (site(0, 1), site(1, 1)),
        (site(1, 0), site(1, 1)),
    ];
    let mut expected = FermionOperator::zero();
    for (i, j) in bonds {
        for s in 0..2 {
            expected += FermionOperator::hopping(2 * i + s, 2 * j + s, -t);
            expected += FermionOperator::hopping(2 * j + s, 2 * i + s, -t);
        }
    }
    for i in 0..4 {
        expected += &FermionOperator::number(2 * i, 1.0) * &FermionOperator::number(2 * i + 1, u);
    }

    assert_eq!(ham, expected);
    assert!(ham.is_hermitian());
    assert_eq!(ind.len(), 8);
    assert_eq!(ham.many_body_order(), 4);
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn hopping_shape_must_match_site_dimensions() {
    let mut lat = Lattice::new();
    lat.add_site(0, 0.0).add_site(1, LocalValue::identity(2));
    lat.add_hopping(&0, &1, 1.0).unwrap();

    let err = build_fermion(&lat, &config()).unwrap_err();
    match err {
        LattopError::DimensionMismatch { location, expected, .. } => {
            assert_eq!(location, "bond 0 -> 1");
            assert_eq!(expected, "1x2 matrix");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn non_square_onsite_value_is_rejected() {
    let mut lat = Lattice::new();
    lat.add_site(0, array![[1.0, 0.0]]);
    assert!(matches!(
        build_fermion(&lat, &config()),
        Err(LattopError::DimensionMismatch { .. })
    ));
}

/// A model that forgets to provide a bond value.
struct MissingBond;

impl LatticeModel for MissingBond {
    type Site = char;

    fn sites(&self) -> Vec<char> {
        vec!['a', 'b']
    }

    fn edges(&self) -> Vec<Edge<char>> {
        vec![Edge::new('a', 'b')]
    }

    fn value(&self, i: &char, j: &char) -> Option<LocalValue> {
        (i == j).then(|| LocalValue::real(1.0))
    }
}

#[test]
fn missing_bond_value_is_a_capability_error() {
    let err = build_fermion(&MissingBond, &config()).unwrap_err();
    assert!(matches!(err, LattopError::Capability(_)));
    assert!(err.to_string().contains("'a' -> 'b'"));
}
