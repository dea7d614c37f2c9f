//! Opaque per-element cache entries for per-state intermediate quantities.
use nalgebra::Matrix3;

use crate::material::{ConstitutiveModel, ModelTag};
use crate::state::FemState;
use crate::{ElementIndex, Real};

/// A cache entry holding the deformation gradients of a single element, stamped with
/// the generation of the state they were computed from.
///
/// Entries are created through
/// [`ElasticityElement::make_cache_entry`](crate::ElasticityElement::make_cache_entry),
/// which sizes them to the element's quadrature-point count and tags them with the
/// element's constitutive-model type. An entry must only ever be updated by the element
/// that created it; the tag makes a pairing with a different model type a detectable
/// error rather than silent corruption.
///
/// TODO: Let the energy/force evaluation paths consult an up-to-date cache entry
/// instead of unconditionally recomputing deformation gradients.
#[derive(Debug, Clone, PartialEq)]
pub struct ElasticityElementCacheEntry<T: Real> {
    element_index: ElementIndex,
    model_tag: ModelTag,
    state_generation: Option<u64>,
    deformation_gradients: Vec<Matrix3<T>>,
}

impl<T> ElasticityElementCacheEntry<T>
where
    T: Real,
{
    pub(crate) fn new(
        element_index: ElementIndex,
        model_tag: ModelTag,
        num_quadrature_points: usize,
    ) -> Self {
        Self {
            element_index,
            model_tag,
            state_generation: None,
            deformation_gradients: vec![Matrix3::identity(); num_quadrature_points],
        }
    }

    pub fn element_index(&self) -> ElementIndex {
        self.element_index
    }

    pub fn num_quadrature_points(&self) -> usize {
        self.deformation_gradients.len()
    }

    /// The cached deformation gradients, one per quadrature point.
    ///
    /// Meaningful only after the entry has been updated at least once; a freshly
    /// created entry holds identity gradients and no generation stamp.
    pub fn deformation_gradients(&self) -> &[Matrix3<T>] {
        &self.deformation_gradients
    }

    /// Whether this entry was produced by a model of the same concrete type.
    pub fn is_compatible_with(&self, model: &dyn ConstitutiveModel<T>) -> bool {
        self.model_tag == model.model_tag()
    }

    /// Whether the cached quantities do not reflect the given state.
    pub fn is_stale(&self, state: &FemState<T>) -> bool {
        self.state_generation != Some(state.generation())
    }

    pub(crate) fn store(&mut self, state_generation: u64, deformation_gradients: Vec<Matrix3<T>>) {
        assert_eq!(
            deformation_gradients.len(),
            self.deformation_gradients.len(),
            "Number of quadrature points cannot change"
        );
        self.deformation_gradients = deformation_gradients;
        self.state_generation = Some(state_generation);
    }
}
