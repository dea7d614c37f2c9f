//! Isoparametric shape-function families.
use nalgebra::{DefaultAllocator, DimName, Matrix1x4, Matrix3x4, OMatrix, OPoint, Point3, Scalar, U1, U3, U4, Vector3};
use numeric_literals::replace_float_literals;

use crate::allocators::BiDimAllocator;
use crate::Real;

/// A family of shape functions defined on the natural (reference) domain of an element,
/// with a number of nodes fixed at compile time.
///
/// The shape functions interpolate both geometry and the displacement field, so a single
/// implementation serves to map reference positions, current positions and solution
/// variables through the same basis.
pub trait IsoparametricElement<T>
where
    T: Scalar,
    DefaultAllocator: BiDimAllocator<T, Self::ReferenceDim, Self::NodalDim>,
{
    /// The dimension of the natural coordinate space.
    type ReferenceDim: DimName;
    /// The number of nodes, as a type-level dimension.
    type NodalDim: DimName;

    /// The number of nodes in the element.
    fn num_nodes(&self) -> usize {
        Self::NodalDim::dim()
    }

    /// Evaluates each shape function at the given natural coordinates. The result is a
    /// row vector in which each entry is the value of the corresponding shape function.
    fn evaluate_basis(
        &self,
        reference_coords: &OPoint<T, Self::ReferenceDim>,
    ) -> OMatrix<T, U1, Self::NodalDim>;

    /// Evaluates the gradient of each shape function with respect to the natural
    /// coordinates. The result is a matrix whose columns are the gradients of the
    /// corresponding shape functions.
    fn gradients(
        &self,
        reference_coords: &OPoint<T, Self::ReferenceDim>,
    ) -> OMatrix<T, Self::ReferenceDim, Self::NodalDim>;
}

/// The linear 4-node tetrahedron.
///
/// The natural domain is the unit simplex, with node 0 at the origin and nodes 1-3 at
/// unit distance along each coordinate axis.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct LinearTetrahedronElement;

#[replace_float_literals(T::from_f64(literal).unwrap())]
impl<T> IsoparametricElement<T> for LinearTetrahedronElement
where
    T: Real,
{
    type ReferenceDim = U3;
    type NodalDim = U4;

    #[rustfmt::skip]
    fn evaluate_basis(&self, xi: &Point3<T>) -> Matrix1x4<T> {
        Matrix1x4::from_row_slice(&[
            1.0 - xi.x - xi.y - xi.z,
            xi.x,
            xi.y,
            xi.z,
        ])
    }

    #[rustfmt::skip]
    fn gradients(&self, _reference_coords: &Point3<T>) -> Matrix3x4<T> {
        Matrix3x4::from_columns(&[
            Vector3::new(-1.0, -1.0, -1.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(0.0, 0.0, 1.0),
        ])
    }
}
