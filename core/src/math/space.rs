//! Tag types for coordinate spaces.
//!
//! Vectors and matrices carry a zero-sized type parameter naming the space
//! they live in (vectors) or map between (matrices). Values in different
//! spaces cannot be mixed without an explicit transformation, or an
//! explicit retagging with `to()`.

use core::fmt::{self, Debug, Formatter};
use core::marker::PhantomData;

/// Tag type for real vector spaces (Euclidean spaces) of dimension `DIM`.
/// For example, the type `Real<3>` corresponds to ℝ³.
///
/// The `Basis` parameter distinguishes between different coordinate
/// systems of the same dimension, such as world and view space.
pub struct Real<const DIM: usize, Basis = ()>(PhantomData<Basis>);

impl<const DIM: usize, B> Copy for Real<DIM, B> {}

impl<const DIM: usize, B> Clone for Real<DIM, B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<const DIM: usize, B> Default for Real<DIM, B> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

impl<const DIM: usize, B> PartialEq for Real<DIM, B> {
    fn eq(&self, _: &Self) -> bool {
        true
    }
}

impl<const DIM: usize, B: Debug + Default> Debug for Real<DIM, B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "ℝ{}<{:?}>", DIM, B::default())
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;

    use super::*;

    #[derive(Debug, Default)]
    struct Foo;

    #[test]
    fn real_debug() {
        assert_eq!(format!("{:?}", Real::<3>::default()), "ℝ3<()>");
        assert_eq!(format!("{:?}", Real::<2, Foo>::default()), "ℝ2<Foo>");
    }
}
