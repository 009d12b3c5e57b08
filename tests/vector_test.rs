use ember::{EmberError, data_structures::vector::GrowVec};

mod common;

#[test]
fn should_start_empty_with_requested_capacity() {
    let vec: GrowVec<u64> = GrowVec::with_capacity(4);
    assert!(vec.is_empty());
    assert_eq!(vec.len(), 0);
    assert_eq!(vec.capacity(), 4);
}

#[test]
fn should_return_index_of_pushed_slot() {
    let mut vec = GrowVec::with_capacity(2);
    assert_eq!(vec.push("a"), 0);
    assert_eq!(vec.push("b"), 1);
    assert_eq!(*vec.get(1).unwrap(), "b");
}

#[test]
fn should_keep_values_by_index_across_growth() {
    common::test_utils::init_logger();
    let mut vec = GrowVec::with_capacity(2);
    let indices: Vec<usize> = (0..9u32).map(|i| vec.push(i * 10)).collect();

    // 2 -> 4 -> 8 -> 16
    assert_eq!(vec.capacity(), 16);
    assert_eq!(vec.len(), 9);
    for (i, index) in indices.into_iter().enumerate() {
        assert_eq!(*vec.get(index).unwrap(), i as u32 * 10);
    }
}

#[test]
fn should_grow_from_zero_capacity() {
    let mut vec = GrowVec::with_capacity(0);
    vec.push(1u8);
    assert_eq!(vec.capacity(), 1);
    vec.push(2u8);
    assert_eq!(vec.capacity(), 2);
    assert_eq!(vec.as_slice(), &[1, 2]);
}

#[test]
fn should_fail_out_of_range_reads() {
    let mut vec = GrowVec::with_capacity(4);
    vec.push(1.0f32);
    assert_eq!(
        vec.get(1).unwrap_err(),
        EmberError::OutOfRange { index: 1, len: 1 }
    );
    assert!(matches!(
        vec.get_mut(7),
        Err(EmberError::OutOfRange { index: 7, len: 1 })
    ));
}

#[test]
fn should_mutate_through_index() {
    let mut vec = GrowVec::with_capacity(1);
    let idx = vec.push(String::from("node"));
    vec.push(String::from("forces growth"));
    vec.get_mut(idx).unwrap().push_str("-renamed");
    assert_eq!(vec.get(idx).unwrap(), "node-renamed");
    assert_eq!(vec.iter().count(), 2);
}
