//! External state holding the time-varying nodal quantities.
use nalgebra::{Matrix3xX, Scalar, Vector3};

use crate::NodeIndex;

/// The current configuration of all nodes, shared by every element of a model.
///
/// Positions and velocities are stored column-wise, one 3-vector per global node.
/// Elements only ever read from the state; all mutation goes through methods that bump
/// the [`generation`](FemState::generation) counter, so that cache entries computed
/// from an older configuration can be recognized as stale.
#[derive(Debug, Clone, PartialEq)]
pub struct FemState<T: Scalar> {
    positions: Matrix3xX<T>,
    velocities: Matrix3xX<T>,
    generation: u64,
}

impl<T> FemState<T>
where
    T: Scalar,
{
    /// Creates a state with the given positions and velocities.
    ///
    /// # Panics
    ///
    /// Panics if the position and velocity matrices do not have the same number of
    /// columns.
    pub fn new(positions: Matrix3xX<T>, velocities: Matrix3xX<T>) -> Self {
        assert_eq!(
            positions.ncols(),
            velocities.ncols(),
            "Positions and velocities must have the same number of nodes"
        );
        Self {
            positions,
            velocities,
            generation: 0,
        }
    }

    /// The number of nodes in the state.
    pub fn num_nodes(&self) -> usize {
        self.positions.ncols()
    }

    /// A counter incremented by every mutation of the state.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn positions(&self) -> &Matrix3xX<T> {
        &self.positions
    }

    pub fn velocities(&self) -> &Matrix3xX<T> {
        &self.velocities
    }

    /// The current position of the given node.
    ///
    /// # Panics
    ///
    /// Panics if the node index is out of bounds.
    pub fn position(&self, node: NodeIndex) -> Vector3<T> {
        self.positions.column(node.index()).into_owned()
    }

    /// Replaces the nodal positions.
    ///
    /// # Panics
    ///
    /// Panics if the number of nodes changes.
    pub fn set_positions(&mut self, positions: Matrix3xX<T>) {
        assert_eq!(positions.ncols(), self.num_nodes(), "Number of nodes cannot change");
        self.positions = positions;
        self.generation += 1;
    }

    /// Replaces the nodal velocities.
    ///
    /// # Panics
    ///
    /// Panics if the number of nodes changes.
    pub fn set_velocities(&mut self, velocities: Matrix3xX<T>) {
        assert_eq!(velocities.ncols(), self.num_nodes(), "Number of nodes cannot change");
        self.velocities = velocities;
        self.generation += 1;
    }

    /// Mutates the nodal positions in place through the provided closure.
    pub fn update_positions(&mut self, f: impl FnOnce(&mut Matrix3xX<T>)) {
        f(&mut self.positions);
        self.generation += 1;
    }
}

impl<T> FemState<T>
where
    T: Scalar + num::Zero,
{
    /// Creates a state with the given positions and zero velocities.
    pub fn from_positions(positions: Matrix3xX<T>) -> Self {
        let velocities = Matrix3xX::zeros(positions.ncols());
        Self::new(positions, velocities)
    }
}
