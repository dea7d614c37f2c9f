//! Quadrature rules over element natural domains.
//!
//! The [`Quadrature`] trait describes a fixed set of integration points and weights in
//! the natural coordinate space of an element. The tetrahedron rules provided here are
//! defined over the unit simplex, i.e. the domain
//! `{ ξ ∈ R³ : ξ_i >= 0, ξ_1 + ξ_2 + ξ_3 <= 1 }`,
//! so that the weights of each rule sum to `1/6`, the volume of the domain.
use nalgebra::allocator::Allocator;
use nalgebra::{convert, DefaultAllocator, DimName, OPoint, Point3, Scalar, U1, U2, U3};
use num::Zero;
use std::fmt;
use std::ops::{Add, AddAssign, Mul};

use crate::Real;

pub type QuadraturePair<T, D> = (Vec<T>, Vec<OPoint<T, D>>);
pub type QuadraturePair1d<T> = QuadraturePair<T, U1>;
pub type QuadraturePair2d<T> = QuadraturePair<T, U2>;
pub type QuadraturePair3d<T> = QuadraturePair<T, U3>;

/// Errors returned by quadrature rule constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuadratureError {
    /// Indicates that a rule satisfying the given requirements is not available.
    NoRuleAvailable,
}

impl fmt::Display for QuadratureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoRuleAvailable => {
                write!(f, "there is no quadrature rule satisfying the requirements available")
            }
        }
    }
}

impl std::error::Error for QuadratureError {}

/// A quadrature rule consisting of weights and points.
pub trait Quadrature<T, D>
where
    T: Scalar,
    D: DimName,
    DefaultAllocator: Allocator<T, D>,
{
    fn weights(&self) -> &[T];
    fn points(&self) -> &[OPoint<T, D>];

    /// The number of points in the rule.
    fn num_points(&self) -> usize {
        self.weights().len()
    }

    /// Approximates the integral of the given function using this quadrature rule.
    fn integrate<U, Function>(&self, f: Function) -> U
    where
        Function: Fn(&OPoint<T, D>) -> U,
        U: Zero + Mul<T, Output = U> + Add<T, Output = U> + AddAssign<U>,
    {
        let mut integral = U::zero();
        for (w, p) in self.weights().iter().zip(self.points()) {
            integral += f(p) * w.clone();
        }
        integral
    }
}

impl<T, D, A, B> Quadrature<T, D> for (A, B)
where
    T: Scalar,
    D: DimName,
    A: AsRef<[T]>,
    B: AsRef<[OPoint<T, D>]>,
    DefaultAllocator: Allocator<T, D>,
{
    fn weights(&self) -> &[T] {
        self.0.as_ref()
    }

    fn points(&self) -> &[OPoint<T, D>] {
        self.1.as_ref()
    }
}

impl<T, D, X> Quadrature<T, D> for &X
where
    T: Scalar,
    D: DimName,
    X: Quadrature<T, D>,
    DefaultAllocator: Allocator<T, D>,
{
    fn weights(&self) -> &[T] {
        X::weights(self)
    }

    fn points(&self) -> &[OPoint<T, D>] {
        X::points(self)
    }
}

fn convert_rule_from_3d_f64<T>(weights: Vec<f64>, points: Vec<[f64; 3]>) -> QuadraturePair3d<T>
where
    T: Real,
{
    let weights = weights.into_iter().map(convert).collect();
    let points = points.into_iter().map(Point3::from).map(convert).collect();
    (weights, points)
}

/// A Gaussian quadrature rule for the unit-simplex tetrahedron, exact for polynomials
/// of total order up to `order`.
///
/// Rules are available for orders 1 through 3; other orders give
/// [`QuadratureError::NoRuleAvailable`].
pub fn tetrahedron<T: Real>(order: usize) -> Result<QuadraturePair3d<T>, QuadratureError> {
    let (weights, points) = match order {
        1 => (vec![1.0 / 6.0], vec![[0.25, 0.25, 0.25]]),
        2 => {
            // Barycentric permutations of (a, b, b, b) with
            //  a = (5 + 3√5)/20, b = (5 − √5)/20.
            let a = 0.5854101966249685;
            let b = 0.13819660112501052;
            (
                vec![1.0 / 24.0; 4],
                vec![[a, b, b], [b, a, b], [b, b, a], [b, b, b]],
            )
        }
        3 => {
            // Centroid with negative weight plus permutations of (1/2, 1/6, 1/6, 1/6).
            let a = 0.5;
            let b = 1.0 / 6.0;
            (
                vec![-2.0 / 15.0, 3.0 / 40.0, 3.0 / 40.0, 3.0 / 40.0, 3.0 / 40.0],
                vec![[0.25, 0.25, 0.25], [a, b, b], [b, a, b], [b, b, a], [b, b, b]],
            )
        }
        _ => return Err(QuadratureError::NoRuleAvailable),
    };
    Ok(convert_rule_from_3d_f64(weights, points))
}
