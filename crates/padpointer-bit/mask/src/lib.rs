mod bitmask;

pub use bitmask::Bitmask;

/// A fieldless enum whose variants map onto distinct bits of a `u64`.
pub trait Bitable: Sized {
    fn bit(&self) -> u64;
    fn index(&self) -> u32;
}
