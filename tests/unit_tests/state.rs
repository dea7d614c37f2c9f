use elaston::{FemState, NodeIndex};
use matrixcompare::assert_matrix_eq;
use nalgebra::{Matrix3xX, Vector3};

fn example_positions() -> Matrix3xX<f64> {
    Matrix3xX::from_columns(&[
        Vector3::new(0.0, 0.0, 0.0),
        Vector3::new(1.0, 0.0, 0.0),
        Vector3::new(0.0, 1.0, 0.0),
    ])
}

#[test]
fn from_positions_gives_zero_velocities() {
    let state = FemState::from_positions(example_positions());
    assert_eq!(state.num_nodes(), 3);
    assert_matrix_eq!(*state.velocities(), Matrix3xX::<f64>::zeros(3));
}

#[test]
fn position_looks_up_single_node() {
    let state = FemState::from_positions(example_positions());
    assert_eq!(state.position(NodeIndex::new(1)), Vector3::new(1.0, 0.0, 0.0));
}

#[test]
fn mutation_bumps_generation() {
    let mut state = FemState::from_positions(example_positions());
    assert_eq!(state.generation(), 0);

    state.set_positions(example_positions());
    assert_eq!(state.generation(), 1);

    state.set_velocities(Matrix3xX::zeros(3));
    assert_eq!(state.generation(), 2);

    state.update_positions(|positions| {
        positions[(0, 0)] = 0.5;
    });
    assert_eq!(state.generation(), 3);
    assert_eq!(state.position(NodeIndex::new(0)).x, 0.5);
}

#[test]
#[should_panic(expected = "same number of nodes")]
fn new_rejects_mismatched_node_counts() {
    let _ = FemState::new(example_positions(), Matrix3xX::zeros(2));
}

#[test]
#[should_panic(expected = "Number of nodes cannot change")]
fn set_positions_rejects_changed_node_count() {
    let mut state = FemState::from_positions(example_positions());
    state.set_positions(Matrix3xX::zeros(4));
}
