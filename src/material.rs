//! The constitutive-model contract consumed by elasticity elements.
use nalgebra::Matrix3;
use std::any::TypeId;
use std::fmt::Debug;

/// A hyperelastic material law, mapping a deformation gradient to an elastic energy
/// density and a first Piola-Kirchhoff stress tensor.
///
/// Both operations must be pure functions of the deformation gradient, and the stress
/// must be the gradient of the energy density with respect to the deformation gradient.
/// A *normalized* model additionally satisfies `ψ(I) = 0` and `P(I) = 0`, so that the
/// undeformed configuration carries no energy and no stress.
///
/// The trait is object safe: an [`ElasticityElement`](crate::ElasticityElement) owns its
/// model as a `Box<dyn ConstitutiveModel<T>>`, fixed at construction. Implementations
/// carry their own parameters (e.g. Lamé coefficients).
///
/// The element performs no validity check on the deformation gradients it passes in;
/// models that are undefined for degenerate or inverted gradients must be guarded by
/// the caller.
pub trait ConstitutiveModel<T>: Debug {
    /// The elastic energy density `ψ(F)`, in J/m³.
    fn energy_density(&self, deformation_gradient: &Matrix3<T>) -> T;

    /// The first Piola-Kirchhoff stress tensor `P(F) = ∂ψ/∂F`, in Pa.
    fn first_piola_stress(&self, deformation_gradient: &Matrix3<T>) -> Matrix3<T>;

    /// A tag identifying the concrete model type, used to verify that cache entries are
    /// only ever paired with the model that produced them.
    fn model_tag(&self) -> ModelTag;
}

/// A runtime tag identifying a concrete constitutive-model type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ModelTag(TypeId);

impl ModelTag {
    pub fn of<Model: 'static>() -> Self {
        Self(TypeId::of::<Model>())
    }
}
