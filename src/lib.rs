//! `elaston` — element-local elasticity computations for 3D solid finite elements.
//!
//! The central type is [`ElasticityElement`](crate::elasticity::ElasticityElement), which
//! combines an isoparametric shape-function family, a quadrature rule and an owned
//! constitutive model into an evaluator for the elastic potential energy and the nodal
//! force/residual vector of a single element. Current nodal positions are supplied
//! externally through a [`FemState`](crate::state::FemState); the element itself is
//! immutable after construction.
use nalgebra::RealField;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod allocators;
pub mod cache;
pub mod elasticity;
pub mod element;
pub mod material;
pub mod materials;
pub mod quadrature;
pub mod state;

pub use cache::ElasticityElementCacheEntry;
pub use elasticity::{ElasticityElement, ElasticityError};
pub use element::{IsoparametricElement, LinearTetrahedronElement};
pub use material::{ConstitutiveModel, ModelTag};
pub use state::FemState;

pub extern crate nalgebra;

/// Trait alias for real scalar types usable in element computations.
pub trait Real: RealField + Copy {}

impl<T: RealField + Copy> Real for T {}

/// The global index of an element.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementIndex(usize);

impl ElementIndex {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for ElementIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The global index of a node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeIndex(usize);

impl NodeIndex {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
