use std::marker::PhantomData;

/// Index reported by a valueless variant.
pub const NPOS: usize = usize::MAX;

/// Type-level index of the first alternative.
pub struct Z(());

/// Type-level successor: the alternative after `N`.
pub struct S<N>(PhantomData<N>);

/// Runtime value of a type-level index.
pub trait Nat {
    const USIZE: usize;
}

impl Nat for Z {
    const USIZE: usize = 0;
}

impl<N: Nat> Nat for S<N> {
    const USIZE: usize = 1 + N::USIZE;
}

pub type I0 = Z;
pub type I1 = S<I0>;
pub type I2 = S<I1>;
pub type I3 = S<I2>;
pub type I4 = S<I3>;
pub type I5 = S<I4>;
pub type I6 = S<I5>;
pub type I7 = S<I6>;
