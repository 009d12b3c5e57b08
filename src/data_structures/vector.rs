//! Growable contiguous storage with explicit capacity doubling.
//!
//! `GrowVec` backs both the node pool and the batch handler's instance list.
//! Growth reallocates the backing storage, so callers keep the index returned
//! by [`GrowVec::push`] and resolve it again at the point of use.

use std::slice;

use log::debug;

use crate::error::{EmberError, Result};

#[derive(Clone, Debug)]
pub struct GrowVec<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T> GrowVec<T> {
    pub fn with_capacity(initial_capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(initial_capacity),
            capacity: initial_capacity,
        }
    }

    /// Appends `value` and returns its index.
    ///
    /// A full vector doubles its capacity first (an empty one grows to 1).
    /// References obtained before the push do not survive it, but indices do.
    pub fn push(&mut self, value: T) -> usize {
        if self.items.len() == self.capacity {
            let new_capacity = (self.capacity * 2).max(1);
            self.items.reserve_exact(new_capacity - self.items.len());
            debug!(
                "GrowVec<{}> grew from {} to {} slots",
                std::any::type_name::<T>(),
                self.capacity,
                new_capacity
            );
            self.capacity = new_capacity;
        }
        self.items.push(value);
        self.items.len() - 1
    }

    pub fn get(&self, index: usize) -> Result<&T> {
        let len = self.items.len();
        self.items
            .get(index)
            .ok_or(EmberError::OutOfRange { index, len })
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        let len = self.items.len();
        self.items
            .get_mut(index)
            .ok_or(EmberError::OutOfRange { index, len })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Logical capacity. Only ever changes by doubling.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T> Default for GrowVec<T> {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl<'a, T> IntoIterator for &'a GrowVec<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
