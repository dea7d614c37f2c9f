//! The elasticity element: per-element energy, force and residual evaluation.
use itertools::izip;
use log::debug;
use nalgebra::allocator::Allocator;
use nalgebra::{ArrayStorage, DVectorViewMut, DefaultAllocator, DimName, Matrix3, OMatrix, U3};
use std::fmt;

use crate::allocators::BiDimAllocator;
use crate::cache::ElasticityElementCacheEntry;
use crate::element::IsoparametricElement;
use crate::material::ConstitutiveModel;
use crate::quadrature::Quadrature;
use crate::state::FemState;
use crate::{ElementIndex, NodeIndex, Real};

/// Errors produced when constructing an [`ElasticityElement`].
///
/// All element errors are raised at construction; evaluation over a successfully
/// constructed element is pure arithmetic and cannot fail.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ElasticityError {
    /// The number of node indices does not match the node count of the shape-function
    /// family.
    NodeCountMismatch { expected: usize, actual: usize },
    /// The mass density is negative.
    NegativeDensity,
    /// The reference Jacobian determinant is non-positive at the given quadrature
    /// point, meaning the reference geometry is degenerate or inverted.
    DegenerateReferenceElement { quadrature_point: usize },
}

impl fmt::Display for ElasticityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NodeCountMismatch { expected, actual } => {
                write!(
                    f,
                    "expected {} node indices to match the shape function, got {}",
                    expected, actual
                )
            }
            Self::NegativeDensity => {
                write!(f, "mass density must be non-negative")
            }
            Self::DegenerateReferenceElement { quadrature_point } => {
                write!(
                    f,
                    "non-positive reference Jacobian determinant at quadrature point {}",
                    quadrature_point
                )
            }
        }
    }
}

impl std::error::Error for ElasticityError {}

/// A single 3D solid finite element for elasticity problems.
///
/// The element is parameterized at compile time over the scalar type, the
/// shape-function family and the quadrature rule, while the constitutive model is a
/// type-erased, exclusively owned collaborator fixed at construction.
///
/// The reference configuration is immutable: the natural-to-reference Jacobian
/// inverses and the per-quadrature-point reference volumes are computed once in
/// [`new`](ElasticityElement::new) and never change. All time-varying quantities are
/// read from the [`FemState`] passed to each evaluation, and every evaluation
/// recomputes its per-state intermediates from scratch (see
/// [`make_cache_entry`](ElasticityElement::make_cache_entry) for the opt-in caching
/// collaborator).
///
/// Concurrent evaluation of the same element from multiple threads is safe: evaluation
/// takes `&self`, reads only the element's own nodes from the state and writes only to
/// the caller-provided output buffer.
#[derive(Debug)]
pub struct ElasticityElement<T, Shape, Rule>
where
    T: Real,
    Shape: IsoparametricElement<T, ReferenceDim = U3>,
    Rule: Quadrature<T, U3>,
    DefaultAllocator: BiDimAllocator<T, U3, Shape::NodalDim>
        + Allocator<T, U3, U3, Buffer = ArrayStorage<T, 3, 3>>
        + Allocator<T, U3, Buffer = ArrayStorage<T, 3, 1>>,
{
    element_index: ElementIndex,
    node_indices: Vec<NodeIndex>,
    density: T,
    constitutive_model: Box<dyn ConstitutiveModel<T>>,
    shape: Shape,
    quadrature: Rule,
    reference_positions: OMatrix<T, U3, Shape::NodalDim>,
    /// Natural-coordinate basis gradients at each quadrature point.
    basis_gradients: Vec<OMatrix<T, U3, Shape::NodalDim>>,
    /// The inverse reference Jacobian `∂ξ/∂X` at each quadrature point.
    reference_jacobian_inv: Vec<Matrix3<T>>,
    /// The integration measure (quadrature weight × Jacobian determinant) at each
    /// quadrature point.
    reference_volumes: Vec<T>,
}

impl<T, Shape, Rule> ElasticityElement<T, Shape, Rule>
where
    T: Real,
    Shape: IsoparametricElement<T, ReferenceDim = U3>,
    Rule: Quadrature<T, U3>,
    DefaultAllocator: BiDimAllocator<T, U3, Shape::NodalDim>
        + Allocator<T, U3, U3, Buffer = ArrayStorage<T, 3, 3>>
        + Allocator<T, U3, Buffer = ArrayStorage<T, 3, 1>>,
{
    /// Constructs a new elasticity element from immutable reference data.
    ///
    /// `node_indices` defines the local-to-global node mapping; its order determines
    /// both the column order of `reference_positions` and the node-block layout of the
    /// output residual/force vectors.
    pub fn new(
        element_index: ElementIndex,
        node_indices: Vec<NodeIndex>,
        density: T,
        constitutive_model: Box<dyn ConstitutiveModel<T>>,
        reference_positions: OMatrix<T, U3, Shape::NodalDim>,
        shape: Shape,
        quadrature: Rule,
    ) -> Result<Self, ElasticityError> {
        if node_indices.len() != shape.num_nodes() {
            return Err(ElasticityError::NodeCountMismatch {
                expected: shape.num_nodes(),
                actual: node_indices.len(),
            });
        }
        if density < T::zero() {
            return Err(ElasticityError::NegativeDensity);
        }

        let num_points = quadrature.num_points();
        let mut basis_gradients = Vec::with_capacity(num_points);
        let mut reference_jacobian_inv = Vec::with_capacity(num_points);
        let mut reference_volumes = Vec::with_capacity(num_points);

        for (q, (w, xi)) in quadrature.weights().iter().zip(quadrature.points()).enumerate() {
            let grad_ref = shape.gradients(xi);
            // Jacobian of the isoparametric map from natural to reference coordinates
            let jacobian: Matrix3<T> = &reference_positions * grad_ref.transpose();
            let det = jacobian.determinant();
            if det <= T::zero() {
                return Err(ElasticityError::DegenerateReferenceElement { quadrature_point: q });
            }
            let jacobian_inv = jacobian
                .try_inverse()
                .ok_or(ElasticityError::DegenerateReferenceElement { quadrature_point: q })?;
            basis_gradients.push(grad_ref);
            reference_jacobian_inv.push(jacobian_inv);
            reference_volumes.push(det * *w);
        }

        debug!(
            "Constructed elasticity element {} with {} nodes and {} quadrature points",
            element_index,
            node_indices.len(),
            num_points
        );

        Ok(Self {
            element_index,
            node_indices,
            density,
            constitutive_model,
            shape,
            quadrature,
            reference_positions,
            basis_gradients,
            reference_jacobian_inv,
            reference_volumes,
        })
    }

    pub fn element_index(&self) -> ElementIndex {
        self.element_index
    }

    /// The global node indices of this element, in local node order.
    pub fn node_indices(&self) -> &[NodeIndex] {
        &self.node_indices
    }

    /// The mass density in the reference configuration, in kg/m³.
    pub fn density(&self) -> T {
        self.density
    }

    pub fn constitutive_model(&self) -> &dyn ConstitutiveModel<T> {
        self.constitutive_model.as_ref()
    }

    pub fn num_nodes(&self) -> usize {
        self.shape.num_nodes()
    }

    /// The number of quadrature points at which element-wise quantities are evaluated.
    pub fn num_quadrature_points(&self) -> usize {
        self.reference_volumes.len()
    }

    pub fn reference_positions(&self) -> &OMatrix<T, U3, Shape::NodalDim> {
        &self.reference_positions
    }

    /// The integration measure at each quadrature point. To integrate a function f over
    /// the reference domain of the element, sum `f(q) * reference_volumes()[q]` over
    /// all quadrature points q.
    pub fn reference_volumes(&self) -> &[T] {
        &self.reference_volumes
    }

    /// Gathers the current positions of this element's nodes into a 3×N matrix in
    /// local node order.
    ///
    /// # Panics
    ///
    /// Panics if any of the element's node indices is out of bounds for the state.
    fn gather_current_positions(&self, state: &FemState<T>) -> OMatrix<T, U3, Shape::NodalDim> {
        for node in &self.node_indices {
            assert!(
                node.index() < state.num_nodes(),
                "Node index {} out of bounds for state with {} nodes",
                node,
                state.num_nodes()
            );
        }
        let positions = state.positions();
        OMatrix::from_fn_generic(U3::name(), Shape::NodalDim::name(), |i, j| {
            positions[(i, self.node_indices[j].index())]
        })
    }

    /// Computes the deformation gradient at every quadrature point of this element.
    ///
    /// With `X` the 3×N matrix of current nodal positions, `G_q` the natural-coordinate
    /// basis gradients and `∂ξ/∂X` the precomputed inverse reference Jacobian, the
    /// deformation gradient at quadrature point q is
    /// `F_q = (X Gᵀ_q) (∂ξ/∂X)_q = (∂x/∂ξ)(∂ξ/∂X)`.
    pub fn compute_deformation_gradients(&self, state: &FemState<T>) -> Vec<Matrix3<T>> {
        let x = self.gather_current_positions(state);
        izip!(&self.basis_gradients, &self.reference_jacobian_inv)
            .map(|(grad_ref, dxi_dx)| (&x * grad_ref.transpose()) * dxi_dx)
            .collect()
    }

    /// Computes the elastic potential energy stored in this element, in J.
    ///
    /// This is a pure function of the state: `Σ_q ψ(F_q) vol_q`.
    pub fn compute_elastic_energy(&self, state: &FemState<T>) -> T {
        let x = self.gather_current_positions(state);
        let mut energy = T::zero();
        for (grad_ref, dxi_dx, vol) in izip!(
            &self.basis_gradients,
            &self.reference_jacobian_inv,
            &self.reference_volumes
        ) {
            let def_grad = (&x * grad_ref.transpose()) * dxi_dx;
            energy += self.constitutive_model.energy_density(&def_grad) * *vol;
        }
        energy
    }

    /// Computes the elastic forces on the nodes of this element.
    ///
    /// The output is ordered in node blocks of 3, so that entries `3i..3i+3` hold the
    /// force on the i-th local node. The force is the negative gradient of
    /// [`compute_elastic_energy`](Self::compute_elastic_energy) with respect to the
    /// nodal positions:
    /// `f_a = −Σ_q P(F_q) (∂N_a/∂X)_q vol_q`.
    ///
    /// # Panics
    ///
    /// Panics if the output buffer does not have length `3 * num_nodes()`.
    #[allow(non_snake_case)]
    pub fn compute_elastic_forces_into(&self, state: &FemState<T>, mut forces: DVectorViewMut<T>) {
        assert_eq!(forces.len(), 3 * self.num_nodes(), "Output vector dimension mismatch");
        forces.fill(T::zero());

        let x = self.gather_current_positions(state);
        for (grad_ref, dxi_dx, vol) in izip!(
            &self.basis_gradients,
            &self.reference_jacobian_inv,
            &self.reference_volumes
        ) {
            let def_grad = (&x * grad_ref.transpose()) * dxi_dx;
            let stress = self.constitutive_model.first_piola_stress(&def_grad);
            // ∂N_a/∂X = (∂ξ/∂X)ᵀ ∂N_a/∂ξ, mapped through the same inverse Jacobian as
            // the deformation gradient
            let grad_phys = dxi_dx.transpose() * grad_ref;
            for (a, grad_a) in grad_phys.column_iter().enumerate() {
                let contribution = (&stress * grad_a) * *vol;
                let mut block = forces.fixed_rows_mut::<3>(3 * a);
                block -= contribution;
            }
        }
    }

    /// Computes the element residual, i.e. the negated elastic forces, evaluated at the
    /// given state.
    ///
    /// The residual of node a is `+∂E/∂x_a`; it vanishes at mechanical equilibrium
    /// under the element's elastic forces alone.
    ///
    /// # Panics
    ///
    /// Panics if the output buffer does not have length `3 * num_nodes()`.
    pub fn compute_residual_into(&self, state: &FemState<T>, mut residual: DVectorViewMut<T>) {
        self.compute_elastic_forces_into(state, DVectorViewMut::from(&mut residual));
        residual.neg_mut();
    }

    /// Creates a cache entry compatible with this element, sized to its
    /// quadrature-point count and tagged with its constitutive-model type.
    pub fn make_cache_entry(&self) -> ElasticityElementCacheEntry<T> {
        ElasticityElementCacheEntry::new(
            self.element_index,
            self.constitutive_model.model_tag(),
            self.num_quadrature_points(),
        )
    }

    /// Refreshes the deformation gradients held by the cache entry if they are stale
    /// with respect to the given state.
    ///
    /// # Panics
    ///
    /// Panics if the entry belongs to a different element or was created for a
    /// different constitutive-model type.
    pub fn update_cache_entry(&self, state: &FemState<T>, entry: &mut ElasticityElementCacheEntry<T>) {
        assert_eq!(
            entry.element_index(),
            self.element_index,
            "Cache entry belongs to a different element"
        );
        assert!(
            entry.is_compatible_with(self.constitutive_model.as_ref()),
            "Cache entry was created for a different constitutive-model type"
        );
        if entry.is_stale(state) {
            entry.store(state.generation(), self.compute_deformation_gradients(state));
        }
    }
}
