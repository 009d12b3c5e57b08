use std::f32::consts::FRAC_PI_2;

use ember::{
    PrimitiveTemplate, RuntimeConfig, Scene, Transform,
    cgmath::{Matrix4, SquareMatrix, Vector3},
};

use crate::common::test_utils::{apply, assert_matrix_eq, assert_vec3_eq, init_logger, origin_of};

mod common;

#[test]
fn should_be_identity_by_default() {
    assert_matrix_eq(Transform::default().to_matrix(), Matrix4::identity());

    let mut scene = Scene::new(&RuntimeConfig {
        node_capacity: 4,
        vertex_arena_bytes: 4096,
        element_arena_bytes: 1024,
        ..Default::default()
    });
    let cube = PrimitiveTemplate::debug_cube().into_shared();
    let id = scene.instantiate(&cube).unwrap();
    assert_matrix_eq(scene.instance_transform(id).unwrap(), Matrix4::identity());
}

#[test]
fn should_scale_and_rotate_before_translating() {
    let transform = Transform {
        position: Vector3::new(10.0, 0.0, 0.0),
        scale: Vector3::new(2.0, 1.0, 1.0),
        rotation: Vector3::new(0.0, 0.0, FRAC_PI_2),
    };
    // x is stretched to 2, turned onto +y, then moved
    assert_vec3_eq(
        apply(transform.to_matrix(), Vector3::new(1.0, 0.0, 0.0)),
        Vector3::new(10.0, 2.0, 0.0),
    );
}

#[test]
fn should_apply_euler_x_before_z() {
    let transform = Transform {
        rotation: Vector3::new(FRAC_PI_2, 0.0, FRAC_PI_2),
        ..Default::default()
    };
    // Rx takes +y to +z, Rz leaves +z alone
    assert_vec3_eq(
        apply(transform.to_matrix(), Vector3::new(0.0, 1.0, 0.0)),
        Vector3::new(0.0, 0.0, 1.0),
    );
    // Rx leaves +x alone, Rz takes +x to +y
    assert_vec3_eq(
        apply(transform.to_matrix(), Vector3::new(1.0, 0.0, 0.0)),
        Vector3::new(0.0, 1.0, 0.0),
    );
}

#[test]
fn should_share_parent_contribution_between_cubes() {
    init_logger();
    let mut scene = Scene::new(&RuntimeConfig {
        node_capacity: 1024,
        vertex_arena_bytes: 1 << 16,
        element_arena_bytes: 1 << 14,
        ..Default::default()
    });
    let node = scene.add_node().unwrap();
    {
        let node = scene.node_mut(node).unwrap();
        node.transform.position = Vector3::new(0.0, 0.0, -0.5);
        node.transform.scale = Vector3::new(0.75, 0.75, 0.75);
    }

    let cube = PrimitiveTemplate::debug_cube().into_shared();
    let first = scene.instantiate(&cube).unwrap();
    let second = scene.instantiate(&cube).unwrap();
    scene.instance_mut(first).unwrap().transform.position = Vector3::new(1.75, 0.0, 0.0);
    scene.instance_mut(second).unwrap().transform.rotation = Vector3::new(0.0, -0.25, 0.0);
    scene.set_instance_parent(first, Some(node)).unwrap();
    scene.set_instance_parent(second, Some(node)).unwrap();

    let node_world = scene.nodes.get_transform(node).unwrap();
    for id in [first, second] {
        let local = scene.batch.instance(id).unwrap().transform.to_matrix();
        assert_matrix_eq(scene.instance_transform(id).unwrap(), node_world * local);
    }

    assert_vec3_eq(
        origin_of(scene.instance_transform(first).unwrap()),
        Vector3::new(1.3125, 0.0, -0.5),
    );
    assert_vec3_eq(
        origin_of(scene.instance_transform(second).unwrap()),
        Vector3::new(0.0, 0.0, -0.5),
    );

    // moving the shared node moves both cubes
    scene.node_mut(node).unwrap().transform.position.y = 3.0;
    for id in [first, second] {
        assert!((origin_of(scene.instance_transform(id).unwrap()).y - 3.0).abs() < 1e-5);
    }
}

#[test]
fn should_ignore_parent_after_it_is_released() {
    let mut scene = Scene::default();
    let node = scene.add_node().unwrap();
    scene.node_mut(node).unwrap().transform.position.x = 4.0;
    let tri = PrimitiveTemplate::debug_cube().into_shared();
    let id = scene.instantiate(&tri).unwrap();
    scene.set_instance_parent(id, Some(node)).unwrap();
    assert_vec3_eq(
        origin_of(scene.instance_transform(id).unwrap()),
        Vector3::new(4.0, 0.0, 0.0),
    );

    scene.nodes.release_node(node).unwrap();
    assert_matrix_eq(scene.instance_transform(id).unwrap(), Matrix4::identity());
    assert!(scene.set_instance_parent(id, Some(node)).is_err());
}

#[test]
fn should_pack_normal_matrix_for_upload() {
    let mut scene = Scene::default();
    let cube = PrimitiveTemplate::debug_cube().into_shared();
    let id = scene.instantiate(&cube).unwrap();
    scene.instance_mut(id).unwrap().transform.scale = Vector3::new(2.0, 1.0, 1.0);

    let raw = scene.batch.instance(id).unwrap().to_raw(&scene.nodes).unwrap();
    assert_eq!(raw.model[0][0], 2.0);
    assert!((raw.normal[0][0] - 0.5).abs() < 1e-6);
    assert_eq!(raw.handedness, 1.0);
}
