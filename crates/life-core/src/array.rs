use crate::error::{resolve_index, Axis, ContainerError};
use std::fmt;

/// One-dimensional array whose length only changes through explicit growth.
///
/// Indices are signed: `-1` addresses the last element, `-len` the first.
/// There is no spare capacity; `len()` is the number of slots.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrowableArray<T> {
    items: Vec<T>,
}

impl<T> Default for GrowableArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> GrowableArray<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// `size` slots, each a clone of `default`.
    pub fn with_size(size: usize, default: T) -> Self
    where
        T: Clone,
    {
        Self {
            items: vec![default; size],
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: isize) -> Result<&T, ContainerError> {
        let index = resolve_index(Axis::Element, index, self.items.len())?;
        Ok(&self.items[index])
    }

    pub fn get_mut(&mut self, index: isize) -> Result<&mut T, ContainerError> {
        let index = resolve_index(Axis::Element, index, self.items.len())?;
        Ok(&mut self.items[index])
    }

    pub fn set(&mut self, index: isize, value: T) -> Result<(), ContainerError> {
        *self.get_mut(index)? = value;
        Ok(())
    }

    pub fn append(&mut self, value: T) {
        self.items.push(value);
    }

    /// Truncate or extend to `new_size`. Elements below `min(old, new)` are kept;
    /// new slots are clones of `default`.
    pub fn resize(&mut self, new_size: usize, default: T)
    where
        T: Clone,
    {
        self.items.resize(new_size, default);
    }

    /// Remove the element at `index`, shifting later elements down by one.
    pub fn delete(&mut self, index: isize) -> Result<T, ContainerError> {
        let index = resolve_index(Axis::Element, index, self.items.len())?;
        Ok(self.items.remove(index))
    }

    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.items.iter().any(|item| item == value)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Forward iterator; call `.rev()` on it for reverse order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.items
    }
}

impl<T> From<Vec<T>> for GrowableArray<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T: Clone> From<&[T]> for GrowableArray<T> {
    fn from(items: &[T]) -> Self {
        Self {
            items: items.to_vec(),
        }
    }
}

impl<T> FromIterator<T> for GrowableArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> IntoIterator for GrowableArray<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a GrowableArray<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: fmt::Display> fmt::Display for GrowableArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{item}")?;
        }
        write!(f, "]")
    }
}
