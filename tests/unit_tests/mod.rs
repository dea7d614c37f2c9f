use elaston::elasticity::ElasticityElement;
use elaston::materials::LameParameters;
use elaston::quadrature::{self, QuadraturePair3d};
use elaston::{ConstitutiveModel, ElementIndex, LinearTetrahedronElement, NodeIndex};
use nalgebra::{matrix, DVector, DVectorView, Matrix3x4};

mod element;
mod quadrature_rules;
mod state;

pub fn lame_parameters() -> LameParameters<f64> {
    LameParameters {
        mu: 384.0,
        lambda: 577.0,
    }
}

/// Reference positions of the unit-simplex tetrahedron, one column per node.
pub fn unit_tet_reference_positions() -> Matrix3x4<f64> {
    matrix![0.0, 1.0, 0.0, 0.0;
            0.0, 0.0, 1.0, 0.0;
            0.0, 0.0, 0.0, 1.0]
}

/// Reference positions of an arbitrary (positively oriented) tetrahedron.
pub fn skewed_tet_reference_positions() -> Matrix3x4<f64> {
    matrix![2.0, 3.0, 1.0, 3.0;
            0.0, 4.0, 1.0, 1.0;
            1.0, 1.0, 2.0, 4.0]
}

pub type TetElement = ElasticityElement<f64, LinearTetrahedronElement, QuadraturePair3d<f64>>;

pub fn make_tet_element(
    reference_positions: Matrix3x4<f64>,
    model: Box<dyn ConstitutiveModel<f64>>,
    quadrature_order: usize,
) -> TetElement {
    ElasticityElement::new(
        ElementIndex::new(0),
        (0..4).map(NodeIndex::new).collect(),
        1000.0,
        model,
        reference_positions,
        LinearTetrahedronElement,
        quadrature::tetrahedron(quadrature_order).unwrap(),
    )
    .expect("Test element must be constructible")
}

/// Approximates the gradient of `f` with central finite differences of step size `h`.
pub fn approximate_gradient_fd(
    mut f: impl FnMut(DVectorView<f64>) -> f64,
    x: &DVector<f64>,
    h: f64,
) -> DVector<f64> {
    let mut x = x.clone();
    let n = x.len();
    let mut df = DVector::zeros(n);
    for i in 0..n {
        let x_i = x[i];
        x[i] = x_i + h;
        let f_plus = f(DVectorView::from(&x));
        x[i] = x_i - h;
        let f_minus = f(DVectorView::from(&x));
        df[i] = (f_plus - f_minus) / (2.0 * h);
        x[i] = x_i;
    }
    df
}
