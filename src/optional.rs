use std::fmt;

use crate::error::AccessError;
use crate::index::{I0, I1};
use crate::sum::{End, Sum};
use crate::variant::Variant;

/// Placeholder alternative standing for "no value". Also usable as a
/// regular alternative in any variant that needs an empty state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Empty;

// Spelled out rather than written with Alts![]: derives reject type
// macros in field position.
type Backing<T> = Variant<Sum<Empty, Sum<T, End>>>;

/// A maybe-value built as a two-alternative variant: `Empty` at position 0,
/// the payload at position 1. Alternatives are addressed by position
/// throughout, so `Optional<Empty>` works too.
///
/// Unlike a raw [`Variant`], an `Optional` is never valueless: every
/// mutation it exposes either keeps the payload or lands on `Empty`.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Optional<T> {
    inner: Backing<T>,
}

impl<T> Optional<T> {
    pub fn new() -> Self {
        Optional {
            inner: Variant::with::<I0>(Empty),
        }
    }

    pub fn some(value: T) -> Self {
        Optional {
            inner: Variant::with::<I1>(value),
        }
    }

    pub fn is_some(&self) -> bool {
        self.inner.index() == 1
    }

    pub fn is_none(&self) -> bool {
        !self.is_some()
    }

    pub fn get(&self) -> Result<&T, AccessError> {
        self.inner.get_at::<I1>()
    }

    pub fn get_mut(&mut self) -> Result<&mut T, AccessError> {
        self.inner.get_at_mut::<I1>()
    }

    pub fn get_if(&self) -> Option<&T> {
        self.inner.get_if_at::<I1>()
    }

    pub fn get_if_mut(&mut self) -> Option<&mut T> {
        self.inner.get_if_at_mut::<I1>()
    }

    /// Stores `value`, overwriting an existing payload in place.
    pub fn set(&mut self, value: T) {
        if let Some(live) = self.inner.get_if_at_mut::<I1>() {
            *live = value;
            return;
        }
        self.inner.emplace_at::<I1>(value);
    }

    /// Fallible store with the strong guarantee: on `Err` the optional is
    /// unchanged, empty stays empty and a payload stays intact.
    pub fn try_set<E, F>(&mut self, build: F) -> Result<(), E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        let staged = build()?;
        self.set(staged);
        Ok(())
    }

    /// Replaces whatever is held with `value` and returns a reference to it.
    pub fn emplace(&mut self, value: T) -> &mut T {
        self.inner.emplace_at::<I1>(value)
    }

    /// Drops the payload, if any, and lands on `Empty`.
    pub fn reset(&mut self) {
        self.inner.emplace_at::<I0>(Empty);
    }

    /// Moves the payload out, leaving the optional empty.
    pub fn take(&mut self) -> Option<T> {
        let value = self.inner.take_alt_at::<I1>().ok();
        if value.is_some() {
            self.inner.emplace_at::<I0>(Empty);
        }
        value
    }

    pub fn as_option(&self) -> Option<&T> {
        self.get_if()
    }

    pub fn into_option(self) -> Option<T> {
        match self.inner.into_live() {
            Some(Sum::Tail(Sum::Head(value))) => Some(value),
            _ => None,
        }
    }

    pub fn value_or(self, default: T) -> T {
        self.into_option().unwrap_or(default)
    }
}

impl<T> Default for Optional<T> {
    fn default() -> Self {
        Optional::new()
    }
}

impl<T: Clone> Clone for Optional<T> {
    fn clone(&self) -> Self {
        Optional {
            inner: self.inner.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.inner.clone_from(&source.inner);
    }
}

impl<T> From<T> for Optional<T> {
    fn from(value: T) -> Self {
        Optional::some(value)
    }
}

impl<T> From<Option<T>> for Optional<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Optional::some(value),
            None => Optional::new(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Optional<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get_if() {
            Some(value) => f.debug_tuple("Optional").field(value).finish(),
            None => f.write_str("Optional(empty)"),
        }
    }
}

#[cfg(test)]
mod test {
    extern crate static_assertions as sa;
    use super::*;
    use std::cell::Cell;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};
    use std::rc::Rc;

    sa::assert_impl_all!(Optional<String>: Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default);
    sa::assert_impl_all!(Empty: Copy, Ord, Hash, Default);
    sa::assert_type_eq_all!(Backing<i32>, Variant<crate::Alts![Empty, i32]>);

    struct Tracked(Rc<Cell<usize>>);

    impl Drop for Tracked {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn default_is_empty() {
        let opt: Optional<i32> = Optional::default();
        assert!(opt.is_none());
        assert!(!opt.is_some());
        assert_eq!(opt.get(), Err(AccessError::BadAlternativeAccess));
        assert_eq!(opt.get_if(), None);
    }

    #[test]
    fn some_holds_the_payload() {
        let opt = Optional::some(String::from("hello"));
        assert!(opt.is_some());
        assert_eq!(opt.get().map(String::as_str), Ok("hello"));
        assert_eq!(opt.as_option().map(String::as_str), Some("hello"));
    }

    #[test]
    fn set_engages_and_overwrites() {
        let mut opt: Optional<i32> = Optional::new();
        opt.set(1);
        assert_eq!(opt.get(), Ok(&1));
        opt.set(2);
        assert_eq!(opt.get(), Ok(&2));
    }

    #[test]
    fn emplace_returns_reference() {
        let mut opt: Optional<String> = Optional::new();
        opt.emplace(String::from("hi")).push('!');
        assert_eq!(opt.get().map(String::as_str), Ok("hi!"));
    }

    #[test]
    fn reset_drops_the_payload_exactly_once() {
        let drops = Rc::new(Cell::new(0));
        let mut opt = Optional::some(Tracked(drops.clone()));
        opt.reset();
        assert!(opt.is_none());
        assert_eq!(drops.get(), 1);
        // Resetting an empty optional is a no-op.
        opt.reset();
        assert_eq!(drops.get(), 1);
        drop(opt);
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn take_moves_the_payload_out() {
        let mut opt = Optional::some(String::from("gone"));
        assert_eq!(opt.take().as_deref(), Some("gone"));
        assert!(opt.is_none());
        assert_eq!(opt.take(), None);
    }

    #[test]
    fn try_set_failure_leaves_the_optional_unchanged() {
        let mut opt = Optional::some(7);
        assert_eq!(opt.try_set(|| Err::<i32, &str>("boom")).err(), Some("boom"));
        assert_eq!(opt.get(), Ok(&7));

        let mut empty: Optional<i32> = Optional::new();
        assert_eq!(empty.try_set(|| Err::<i32, &str>("boom")).err(), Some("boom"));
        assert!(empty.is_none());

        assert_eq!(empty.try_set(|| Ok::<i32, &str>(5)), Ok(()));
        assert_eq!(empty.get(), Ok(&5));
    }

    #[test]
    fn option_conversions_round_trip() {
        let opt: Optional<i32> = Some(3).into();
        assert_eq!(opt.into_option(), Some(3));
        let opt: Optional<i32> = None.into();
        assert_eq!(opt.into_option(), None);
        let opt: Optional<i32> = 4.into();
        assert_eq!(opt.value_or(0), 4);
        let empty: Optional<i32> = Optional::new();
        assert_eq!(empty.value_or(9), 9);
    }

    #[test]
    fn empty_sorts_before_engaged() {
        let none: Optional<i32> = Optional::new();
        let low = Optional::some(i32::MIN);
        let high = Optional::some(i32::MAX);
        assert!(none < low);
        assert!(low < high);
        assert_eq!(none, Optional::new());
    }

    #[test]
    fn equal_optionals_hash_equal() {
        let a = Optional::some(String::from("x"));
        let b = a.clone();
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        let none: Optional<String> = Optional::new();
        assert_ne!(hash_of(&a), hash_of(&none));
    }

    #[test]
    fn payload_may_be_the_empty_type_itself() {
        let mut opt: Optional<Empty> = Optional::new();
        assert!(opt.is_none());
        opt.set(Empty);
        assert!(opt.is_some());
        assert_eq!(opt.get(), Ok(&Empty));
        opt.reset();
        assert!(opt.is_none());
    }

    #[test]
    fn debug_distinguishes_empty_from_engaged() {
        let opt = Optional::some(5);
        assert_eq!(format!("{:?}", opt), "Optional(5)");
        let none: Optional<i32> = Optional::new();
        assert_eq!(format!("{:?}", none), "Optional(empty)");
    }
}
