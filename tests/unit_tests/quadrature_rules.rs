use elaston::quadrature::{tetrahedron, Quadrature, QuadratureError};
use matrixcompare::assert_scalar_eq;

#[test]
fn tetrahedron_rule_sizes() {
    assert_eq!(tetrahedron::<f64>(1).unwrap().num_points(), 1);
    assert_eq!(tetrahedron::<f64>(2).unwrap().num_points(), 4);
    assert_eq!(tetrahedron::<f64>(3).unwrap().num_points(), 5);
}

#[test]
fn tetrahedron_rule_unavailable_orders() {
    assert_eq!(tetrahedron::<f64>(0), Err(QuadratureError::NoRuleAvailable));
    assert_eq!(tetrahedron::<f64>(4), Err(QuadratureError::NoRuleAvailable));
}

#[test]
fn tetrahedron_weights_sum_to_simplex_volume() {
    // The weights of each rule must sum to the volume 1/6 of the unit simplex
    for order in 1..=3 {
        let (weights, _) = tetrahedron::<f64>(order).unwrap();
        let weight_sum: f64 = weights.iter().sum();
        assert_scalar_eq!(weight_sum, 1.0 / 6.0, comp = abs, tol = 1e-15);
    }
}

#[test]
fn tetrahedron_rules_integrate_monomials_exactly() {
    // Exact monomial integrals over the unit simplex follow from
    //  ∫ x^a y^b z^c dV = a! b! c! / (a + b + c + 3)!
    let rule1 = tetrahedron::<f64>(1).unwrap();
    assert_scalar_eq!(rule1.integrate(|xi| xi.x), 1.0 / 24.0, comp = abs, tol = 1e-15);

    let rule2 = tetrahedron::<f64>(2).unwrap();
    assert_scalar_eq!(rule2.integrate(|xi| xi.x), 1.0 / 24.0, comp = abs, tol = 1e-15);
    assert_scalar_eq!(rule2.integrate(|xi| xi.x * xi.x), 1.0 / 60.0, comp = abs, tol = 1e-15);
    assert_scalar_eq!(rule2.integrate(|xi| xi.x * xi.y), 1.0 / 120.0, comp = abs, tol = 1e-15);

    let rule3 = tetrahedron::<f64>(3).unwrap();
    assert_scalar_eq!(rule3.integrate(|xi| xi.x * xi.x), 1.0 / 60.0, comp = abs, tol = 1e-15);
    assert_scalar_eq!(
        rule3.integrate(|xi| xi.x * xi.x * xi.x),
        1.0 / 120.0,
        comp = abs,
        tol = 1e-15
    );
    assert_scalar_eq!(
        rule3.integrate(|xi| xi.x * xi.y * xi.z),
        1.0 / 720.0,
        comp = abs,
        tol = 1e-15
    );
}
