use std::fmt;
use std::hash::{Hash, Hasher};

use crate::index::{S, Z};

/// Uninhabited terminator of an alternative list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum End {}

/// One cell of an alternative list: either the value living at this
/// position, or a value living further down the list.
///
/// The derived ordering (`Head` before `Tail`) is what makes a variant with
/// a lower active index sort before one with a higher active index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Sum<T, L> {
    Head(T),
    Tail(L),
}

#[macro_export]
macro_rules! Alts {
    [] => {$crate::sum::End};
    [$t:ty $(, $ts:ty)* $(,)?] => {$crate::sum::Sum<$t, $crate::Alts![$($ts),*]>};
}

/// A closed, ordered list of alternatives.
pub trait AltList: Sized {
    const LEN: usize;

    /// Position of the live alternative, counted from the front.
    fn live_index(&self) -> usize;
}

impl AltList for End {
    const LEN: usize = 0;

    fn live_index(&self) -> usize {
        match *self {}
    }
}

impl<T, L: AltList> AltList for Sum<T, L> {
    const LEN: usize = 1 + L::LEN;

    fn live_index(&self) -> usize {
        match self {
            Sum::Head(_) => 0,
            Sum::Tail(rest) => 1 + rest.live_index(),
        }
    }
}

/// Keys an alternative by its type. The index `I` is inferred, and the
/// inference is unique exactly when `T` occurs once in the list; a
/// duplicated type makes every type-keyed operation a compile-time
/// ambiguity, while position-keyed operations ([`Nth`]) keep working.
pub trait Select<T, I>: AltList {
    fn inject(value: T) -> Self;
    fn live_ref(&self) -> Option<&T>;
    fn live_mut(&mut self) -> Option<&mut T>;
    fn extract(self) -> Result<T, Self>;
}

impl<T, L: AltList> Select<T, Z> for Sum<T, L> {
    fn inject(value: T) -> Self {
        Sum::Head(value)
    }

    fn live_ref(&self) -> Option<&T> {
        match self {
            Sum::Head(value) => Some(value),
            Sum::Tail(_) => None,
        }
    }

    fn live_mut(&mut self) -> Option<&mut T> {
        match self {
            Sum::Head(value) => Some(value),
            Sum::Tail(_) => None,
        }
    }

    fn extract(self) -> Result<T, Self> {
        match self {
            Sum::Head(value) => Ok(value),
            other => Err(other),
        }
    }
}

impl<T, H, L, I> Select<T, S<I>> for Sum<H, L>
where
    L: Select<T, I>,
{
    fn inject(value: T) -> Self {
        Sum::Tail(L::inject(value))
    }

    fn live_ref(&self) -> Option<&T> {
        match self {
            Sum::Head(_) => None,
            Sum::Tail(rest) => rest.live_ref(),
        }
    }

    fn live_mut(&mut self) -> Option<&mut T> {
        match self {
            Sum::Head(_) => None,
            Sum::Tail(rest) => rest.live_mut(),
        }
    }

    fn extract(self) -> Result<T, Self> {
        match self {
            Sum::Head(value) => Err(Sum::Head(value)),
            Sum::Tail(rest) => rest.extract().map_err(Sum::Tail),
        }
    }
}

/// Keys an alternative by its position.
pub trait Nth<I>: AltList {
    type Alt;

    fn inject_nth(value: Self::Alt) -> Self;
    fn nth_ref(&self) -> Option<&Self::Alt>;
    fn nth_mut(&mut self) -> Option<&mut Self::Alt>;
    fn extract_nth(self) -> Result<Self::Alt, Self>;
}

impl<T, L: AltList> Nth<Z> for Sum<T, L> {
    type Alt = T;

    fn inject_nth(value: T) -> Self {
        Sum::Head(value)
    }

    fn nth_ref(&self) -> Option<&T> {
        match self {
            Sum::Head(value) => Some(value),
            Sum::Tail(_) => None,
        }
    }

    fn nth_mut(&mut self) -> Option<&mut T> {
        match self {
            Sum::Head(value) => Some(value),
            Sum::Tail(_) => None,
        }
    }

    fn extract_nth(self) -> Result<T, Self> {
        match self {
            Sum::Head(value) => Ok(value),
            other => Err(other),
        }
    }
}

impl<H, L, I> Nth<S<I>> for Sum<H, L>
where
    L: Nth<I>,
{
    type Alt = L::Alt;

    fn inject_nth(value: L::Alt) -> Self {
        Sum::Tail(L::inject_nth(value))
    }

    fn nth_ref(&self) -> Option<&L::Alt> {
        match self {
            Sum::Head(_) => None,
            Sum::Tail(rest) => rest.nth_ref(),
        }
    }

    fn nth_mut(&mut self) -> Option<&mut L::Alt> {
        match self {
            Sum::Head(_) => None,
            Sum::Tail(rest) => rest.nth_mut(),
        }
    }

    fn extract_nth(self) -> Result<L::Alt, Self> {
        match self {
            Sum::Head(value) => Err(Sum::Head(value)),
            Sum::Tail(rest) => rest.extract_nth().map_err(Sum::Tail),
        }
    }
}

/// Default-constructs the first alternative.
pub trait FirstDefault: AltList {
    fn first_default() -> Self;
}

impl<T: Default, L: AltList> FirstDefault for Sum<T, L> {
    fn first_default() -> Self {
        Sum::Head(T::default())
    }
}

/// In-place clone when both sides hold the same position. Returns `false`
/// on a position mismatch instead of reconstructing, so the caller can
/// stage the replacement first.
pub trait CloneLive: Clone {
    fn clone_live_from(&mut self, source: &Self) -> bool;
}

impl CloneLive for End {
    fn clone_live_from(&mut self, _source: &Self) -> bool {
        match *self {}
    }
}

impl<T: Clone, L: CloneLive> CloneLive for Sum<T, L> {
    fn clone_live_from(&mut self, source: &Self) -> bool {
        match (self, source) {
            (Sum::Head(dst), Sum::Head(src)) => {
                dst.clone_from(src);
                true
            }
            (Sum::Tail(dst), Sum::Tail(src)) => dst.clone_live_from(src),
            _ => false,
        }
    }
}

/// Hashes only the live value; the variant wrapper mixes in the index.
pub trait HashLive {
    fn hash_live<Hs: Hasher>(&self, state: &mut Hs);
}

impl HashLive for End {
    fn hash_live<Hs: Hasher>(&self, _state: &mut Hs) {
        match *self {}
    }
}

impl<T: Hash, L: HashLive> HashLive for Sum<T, L> {
    fn hash_live<Hs: Hasher>(&self, state: &mut Hs) {
        match self {
            Sum::Head(value) => value.hash(state),
            Sum::Tail(rest) => rest.hash_live(state),
        }
    }
}

/// Borrows the live value as `dyn Debug` for diagnostics.
pub trait DebugLive {
    fn debug_live(&self) -> &dyn fmt::Debug;
}

impl DebugLive for End {
    fn debug_live(&self) -> &dyn fmt::Debug {
        match *self {}
    }
}

impl<T: fmt::Debug, L: DebugLive> DebugLive for Sum<T, L> {
    fn debug_live(&self) -> &dyn fmt::Debug {
        match self {
            Sum::Head(value) => value,
            Sum::Tail(rest) => rest.debug_live(),
        }
    }
}

#[cfg(test)]
mod test {
    extern crate static_assertions as sa;
    use super::*;
    use crate::index::{I0, I1, I2};

    sa::assert_type_eq_all!(Alts![], End);
    sa::assert_type_eq_all!(Alts![i32], Sum<i32, End>);
    sa::assert_type_eq_all!(Alts![i32, u8], Sum<i32, Sum<u8, End>>);
    sa::const_assert_eq!(<Alts![i32, u8, String]>::LEN, 3);
    sa::assert_impl_all!(Alts![i32, String]: CloneLive, HashLive, DebugLive);

    #[test]
    fn live_index_counts_from_front() {
        let a: Alts![i32, char, String] = Sum::Head(1);
        let b: Alts![i32, char, String] = Sum::Tail(Sum::Head('x'));
        let c: Alts![i32, char, String] = Sum::Tail(Sum::Tail(Sum::Head("s".into())));
        assert_eq!(a.live_index(), 0);
        assert_eq!(b.live_index(), 1);
        assert_eq!(c.live_index(), 2);
    }

    type IS = Alts![i32, String];

    #[test]
    fn select_round_trip() {
        let cell: IS = Select::inject(String::from("hi"));
        assert_eq!(cell.live_index(), 1);
        let s = <IS as Select<String, I1>>::live_ref(&cell);
        assert_eq!(s.map(String::as_str), Some("hi"));
        let back = <IS as Select<String, I1>>::extract(cell);
        assert_eq!(back.ok().as_deref(), Some("hi"));
    }

    #[test]
    fn extract_miss_returns_cell_unchanged() {
        let cell: IS = Select::inject(7);
        let cell = match <IS as Select<String, I1>>::extract(cell) {
            Err(cell) => cell,
            Ok(_) => panic!("extract of a dead alternative must miss"),
        };
        assert_eq!(<IS as Select<i32, I0>>::live_ref(&cell), Some(&7));
    }

    #[test]
    fn nth_addresses_duplicates() {
        let low: Alts![i32, i32] = <Alts![i32, i32] as Nth<I0>>::inject_nth(1);
        let high: Alts![i32, i32] = <Alts![i32, i32] as Nth<I1>>::inject_nth(2);
        assert_eq!(low.live_index(), 0);
        assert_eq!(high.live_index(), 1);
        assert_eq!(<Alts![i32, i32] as Nth<I1>>::nth_ref(&high), Some(&2));
        assert_eq!(<Alts![i32, i32] as Nth<I0>>::nth_ref(&high), None);
    }

    #[test]
    fn head_sorts_before_tail() {
        let a: Alts![i32, i32] = <Alts![i32, i32] as Nth<I0>>::inject_nth(9);
        let b: Alts![i32, i32] = <Alts![i32, i32] as Nth<I1>>::inject_nth(0);
        assert!(a < b);
    }

    #[test]
    fn clone_live_reports_mismatch() {
        let mut dst: IS = Select::inject(1);
        let same: IS = Select::inject(2);
        let other: IS = Select::inject(String::from("x"));
        assert!(dst.clone_live_from(&same));
        assert_eq!(<IS as Select<i32, I0>>::live_ref(&dst), Some(&2));
        assert!(!dst.clone_live_from(&other));
        assert_eq!(<IS as Select<i32, I0>>::live_ref(&dst), Some(&2));
    }

    #[test]
    fn first_default_is_index_zero() {
        let cell: IS = FirstDefault::first_default();
        assert_eq!(cell.live_index(), 0);
        assert_eq!(<IS as Select<i32, I0>>::live_ref(&cell), Some(&0));
    }

    #[allow(dead_code)]
    fn nth_alt_types() {
        sa::assert_type_eq_all!(<Alts![i32, char, String] as Nth<I2>>::Alt, String);
        sa::assert_type_eq_all!(<Alts![i32, char, String] as Nth<I0>>::Alt, i32);
    }
}
