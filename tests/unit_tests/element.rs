use elaston::{IsoparametricElement, LinearTetrahedronElement};
use matrixcompare::assert_matrix_eq;
use nalgebra::{Matrix1x4, Point3, Vector3};
use proptest::prelude::*;

/// A strategy producing points in the unit-simplex natural domain of the tetrahedron.
fn point_in_unit_simplex() -> impl Strategy<Value = Point3<f64>> {
    (0.0..=1.0, 0.0..=1.0, 0.0..=1.0)
        .prop_map(|(x, y, z)| Point3::new(x, y, z))
        .prop_filter("Point must lie in the unit simplex", |p| p.x + p.y + p.z <= 1.0)
}

#[test]
fn tet4_lagrange_property() {
    // We expect that N_i(x_j) = delta_ij, where x_j are the natural-domain vertices
    let element = LinearTetrahedronElement;
    let vertices = [
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(0.0, 0.0, 1.0),
    ];

    for (i, xi) in vertices.iter().enumerate() {
        let phi = element.evaluate_basis(xi);

        let mut expected = Matrix1x4::<f64>::zeros();
        expected[i] = 1.0;

        assert_matrix_eq!(phi, expected, comp = abs, tol = 1e-12);
    }
}

#[test]
fn tet4_num_nodes() {
    assert_eq!(IsoparametricElement::<f64>::num_nodes(&LinearTetrahedronElement), 4);
}

proptest! {
    #[test]
    fn tet4_partition_of_unity(xi in point_in_unit_simplex()) {
        let phi = LinearTetrahedronElement.evaluate_basis(&xi);
        let phi_sum: f64 = phi.sum();
        prop_assert!((phi_sum - 1.0f64).abs() <= 1e-12);
    }

    #[test]
    fn tet4_partition_of_unity_gradient(xi in point_in_unit_simplex()) {
        // Since the sum of basis functions is 1, the sum of the gradients must be 0
        let grad = LinearTetrahedronElement.gradients(&xi);
        let grad_sum = grad.column_sum();
        assert_matrix_eq!(grad_sum, Vector3::<f64>::zeros(), comp = abs, tol = 1e-12);
    }
}
