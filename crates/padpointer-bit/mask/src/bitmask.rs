use std::marker::PhantomData;

use crate::Bitable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bitmask<T: Bitable>(pub u64, PhantomData<T>);

impl<T: Bitable> Default for Bitmask<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Bitable> Bitmask<T> {
    /// Create a new bitmask from a slice of values.
    pub fn new(values: &[T]) -> Self {
        let mut bits = 0;
        for value in values {
            bits |= value.bit();
        }
        Self(bits, PhantomData)
    }

    /// Create an empty bitmask.
    pub const fn empty() -> Self {
        Self(0, PhantomData)
    }

    /// Create a new bitmask from raw bits.
    pub const fn from_value(value: u64) -> Self {
        Self(value, PhantomData)
    }

    /// Raw bits of the mask.
    #[inline]
    pub const fn bits(&self) -> u64 {
        self.0
    }

    /// Check if the bitmask contains a specific value.
    #[inline]
    pub fn contains(&self, bit: T) -> bool {
        (self.0 & bit.bit()) != 0
    }

    /// Insert a value to the bitmask.
    #[inline]
    pub fn insert(&mut self, bit: T) {
        self.0 |= bit.bit();
    }

    /// Remove a value from the bitmask.
    #[inline]
    pub fn remove(&mut self, bit: T) {
        self.0 &= !bit.bit();
    }

    /// Insert or remove a value depending on `on`.
    #[inline]
    pub fn set(&mut self, bit: T, on: bool) {
        if on {
            self.insert(bit);
        } else {
            self.remove(bit);
        }
    }

    /// Check if the bitmask is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Values present in `self` and absent from `other`.
    #[inline]
    pub fn difference(&self, other: &Bitmask<T>) -> Bitmask<T> {
        Self(self.0 & !other.0, PhantomData)
    }

    /// Check if the bitmask is subset of another bitmask.
    #[inline]
    pub fn is_subset(&self, other: &Bitmask<T>) -> bool {
        self.0 & other.0 == self.0
    }

    /// Check if the bitmask is superset of another bitmask.
    #[inline]
    pub fn is_superset(&self, other: &Bitmask<T>) -> bool {
        other.is_subset(self)
    }

    /// Count the number of bits set in the bitmask.
    #[inline]
    pub fn count(&self) -> u32 {
        self.0.count_ones()
    }
}
