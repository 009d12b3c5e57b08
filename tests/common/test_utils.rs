#![allow(dead_code)]

use std::path::PathBuf;

use ember::cgmath::{Matrix4, Vector3, Vector4};

const EPSILON: f32 = 1e-5;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn assert_matrix_eq(actual: Matrix4<f32>, expected: Matrix4<f32>) {
    let actual: [[f32; 4]; 4] = actual.into();
    let expected: [[f32; 4]; 4] = expected.into();
    for (col, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        for row in 0..4 {
            assert!(
                (a[row] - e[row]).abs() < EPSILON,
                "matrix mismatch at column {}, row {}: {:?} != {:?}",
                col,
                row,
                actual,
                expected
            );
        }
    }
}

pub fn assert_vec3_eq(actual: Vector3<f32>, expected: Vector3<f32>) {
    assert!(
        (actual.x - expected.x).abs() < EPSILON
            && (actual.y - expected.y).abs() < EPSILON
            && (actual.z - expected.z).abs() < EPSILON,
        "{:?} != {:?}",
        actual,
        expected
    );
}

/// Where `matrix` moves the origin to.
pub fn origin_of(matrix: Matrix4<f32>) -> Vector3<f32> {
    (matrix * Vector4::new(0.0, 0.0, 0.0, 1.0)).truncate()
}

pub fn apply(matrix: Matrix4<f32>, point: Vector3<f32>) -> Vector3<f32> {
    (matrix * point.extend(1.0)).truncate()
}

/// Decodes little-endian `u32` indices without assuming the arena is aligned.
pub fn read_indices(bytes: &[u8]) -> Vec<u32> {
    bytes
        .chunks_exact(4)
        .map(|chunk| u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect()
}
