use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::AccessError;
use crate::index::NPOS;
use crate::sum::{AltList, CloneLive, DebugLive, FirstDefault, HashLive, Nth, Select};

/// A tagged union over the closed alternative list `C` (built with
/// [`Alts!`](crate::Alts)).
///
/// At every observable point the variant either holds exactly one live
/// alternative, or it is *valueless*: the state left behind when an
/// alternative-changing mutation failed after the old value was already
/// destroyed. `index()` reports the live position, or [`NPOS`] when
/// valueless.
///
/// Alternatives are addressed two ways: by type (`get`, `set`, `emplace`),
/// where the position is inferred and must be unambiguous, and by position
/// (`get_at`, `emplace_at` with an index type such as
/// [`I1`](crate::index::I1)), which also works for duplicated types.
///
/// Reference alternatives (`&T`) hold only the binding, never the referent;
/// replacing the value rebinds.
#[derive(PartialEq, Eq, PartialOrd, Ord)]
pub struct Variant<C> {
    slot: Option<C>,
}

impl<C: AltList> Variant<C> {
    /// Number of alternatives in the list.
    pub const LEN: usize = C::LEN;

    /// Constructs the alternative whose type matches `value`.
    pub fn new<T, I>(value: T) -> Self
    where
        C: Select<T, I>,
    {
        Variant {
            slot: Some(C::inject(value)),
        }
    }

    /// Constructs the alternative at position `I`.
    pub fn with<I>(value: C::Alt) -> Self
    where
        C: Nth<I>,
    {
        Variant {
            slot: Some(C::inject_nth(value)),
        }
    }

    /// Builds the alternative at position `I` fallibly. On `Err` no variant
    /// comes into existence; the builder's error propagates unchanged.
    pub fn try_with<I, E, F>(build: F) -> Result<Self, E>
    where
        C: Nth<I>,
        F: FnOnce() -> Result<C::Alt, E>,
    {
        Ok(Variant {
            slot: Some(C::inject_nth(build()?)),
        })
    }

    /// Position of the live alternative, or [`NPOS`] when valueless.
    pub fn index(&self) -> usize {
        self.slot.as_ref().map_or(NPOS, AltList::live_index)
    }

    pub fn is_valueless(&self) -> bool {
        self.slot.is_none()
    }

    /// Whether the alternative of type `T` is currently live. Never fails;
    /// `false` covers both a different live alternative and valueless.
    pub fn holds<T, I>(&self) -> bool
    where
        C: Select<T, I>,
    {
        self.get_if::<T, I>().is_some()
    }

    pub fn get<T, I>(&self) -> Result<&T, AccessError>
    where
        C: Select<T, I>,
    {
        self.get_if::<T, I>().ok_or(AccessError::BadAlternativeAccess)
    }

    pub fn get_mut<T, I>(&mut self) -> Result<&mut T, AccessError>
    where
        C: Select<T, I>,
    {
        self.get_if_mut::<T, I>()
            .ok_or(AccessError::BadAlternativeAccess)
    }

    /// Non-failing accessor: `None` instead of an error.
    pub fn get_if<T, I>(&self) -> Option<&T>
    where
        C: Select<T, I>,
    {
        self.slot.as_ref().and_then(|live| live.live_ref())
    }

    pub fn get_if_mut<T, I>(&mut self) -> Option<&mut T>
    where
        C: Select<T, I>,
    {
        self.slot.as_mut().and_then(|live| live.live_mut())
    }

    pub fn get_at<I>(&self) -> Result<&C::Alt, AccessError>
    where
        C: Nth<I>,
    {
        self.get_if_at::<I>().ok_or(AccessError::BadAlternativeAccess)
    }

    pub fn get_at_mut<I>(&mut self) -> Result<&mut C::Alt, AccessError>
    where
        C: Nth<I>,
    {
        self.get_if_at_mut::<I>()
            .ok_or(AccessError::BadAlternativeAccess)
    }

    pub fn get_if_at<I>(&self) -> Option<&C::Alt>
    where
        C: Nth<I>,
    {
        self.slot.as_ref().and_then(|live| live.nth_ref())
    }

    pub fn get_if_at_mut<I>(&mut self) -> Option<&mut C::Alt>
    where
        C: Nth<I>,
    {
        self.slot.as_mut().and_then(|live| live.nth_mut())
    }

    /// Assignment from a bare value. If the matching alternative is already
    /// live it is overwritten in place; otherwise the old alternative is
    /// replaced and dropped exactly once.
    pub fn set<T, I>(&mut self, value: T)
    where
        C: Select<T, I>,
    {
        if let Some(live) = self.slot.as_mut().and_then(|live| live.live_mut()) {
            *live = value;
            return;
        }
        self.slot = Some(C::inject(value));
    }

    /// Fallible assignment with the strong guarantee: the replacement is
    /// fully built while the old value stays live, so on `Err` the variant
    /// is unchanged.
    pub fn try_set<T, I, E, F>(&mut self, build: F) -> Result<(), E>
    where
        C: Select<T, I>,
        F: FnOnce() -> Result<T, E>,
    {
        let staged = build()?;
        self.set(staged);
        Ok(())
    }

    /// Installs `value` as the live alternative of type `T`, dropping
    /// whatever was live before, and returns a reference to it.
    pub fn emplace<T, I>(&mut self, value: T) -> &mut T
    where
        C: Select<T, I>,
    {
        self.install(value)
    }

    /// Installs `value` at position `I`; the position form works for
    /// duplicated alternative types.
    pub fn emplace_at<I>(&mut self, value: C::Alt) -> &mut C::Alt
    where
        C: Nth<I>,
    {
        self.install_at::<I>(value)
    }

    /// Fallible emplacement. The old value is destroyed *before* the builder
    /// runs, so a failed build leaves the variant valueless. This is the
    /// documented asymmetry with [`try_set`](Variant::try_set), which keeps
    /// the old value on failure.
    pub fn try_emplace<T, I, E, F>(&mut self, build: F) -> Result<&mut T, E>
    where
        C: Select<T, I>,
        F: FnOnce() -> Result<T, E>,
    {
        self.slot = None;
        Ok(self.install(build()?))
    }

    pub fn try_emplace_at<I, E, F>(&mut self, build: F) -> Result<&mut C::Alt, E>
    where
        C: Nth<I>,
        F: FnOnce() -> Result<C::Alt, E>,
    {
        self.slot = None;
        Ok(self.install_at::<I>(build()?))
    }

    /// Moves the whole variant out, leaving this one valueless. This is the
    /// crate's move policy: a moved-from variant reports `NPOS` rather than
    /// still claiming its old alternative.
    pub fn take(&mut self) -> Self {
        Variant {
            slot: self.slot.take(),
        }
    }

    /// Moves the live value of type `T` out, leaving the variant valueless.
    /// If `T` is not live the variant is untouched.
    pub fn take_alt<T, I>(&mut self) -> Result<T, AccessError>
    where
        C: Select<T, I>,
    {
        match self.slot.take() {
            Some(live) => match live.extract() {
                Ok(value) => Ok(value),
                Err(other) => {
                    self.slot = Some(other);
                    Err(AccessError::BadAlternativeAccess)
                }
            },
            None => Err(AccessError::BadAlternativeAccess),
        }
    }

    pub fn take_alt_at<I>(&mut self) -> Result<C::Alt, AccessError>
    where
        C: Nth<I>,
    {
        match self.slot.take() {
            Some(live) => match live.extract_nth() {
                Ok(value) => Ok(value),
                Err(other) => {
                    self.slot = Some(other);
                    Err(AccessError::BadAlternativeAccess)
                }
            },
            None => Err(AccessError::BadAlternativeAccess),
        }
    }

    /// Exchanges contents, for every index combination including valueless
    /// on either side.
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(&mut self.slot, &mut other.slot);
    }

    pub(crate) fn live(&self) -> Option<&C> {
        self.slot.as_ref()
    }

    pub(crate) fn live_mut_slot(&mut self) -> Option<&mut C> {
        self.slot.as_mut()
    }

    pub(crate) fn into_live(self) -> Option<C> {
        self.slot
    }

    pub(crate) fn from_live(slot: Option<C>) -> Self {
        Variant { slot }
    }

    fn install<T, I>(&mut self, value: T) -> &mut T
    where
        C: Select<T, I>,
    {
        self.slot = Some(C::inject(value));
        match self.slot.as_mut().and_then(|live| live.live_mut()) {
            Some(live) => live,
            // inject made this exact position live
            None => unreachable!(),
        }
    }

    fn install_at<I>(&mut self, value: C::Alt) -> &mut C::Alt
    where
        C: Nth<I>,
    {
        self.slot = Some(C::inject_nth(value));
        match self.slot.as_mut().and_then(|live| live.nth_mut()) {
            Some(live) => live,
            None => unreachable!(),
        }
    }
}

/// Default-constructs alternative 0. Absent when alternative 0 has no
/// `Default`, and absent for the empty list.
impl<C: FirstDefault> Default for Variant<C> {
    fn default() -> Self {
        Variant {
            slot: Some(C::first_default()),
        }
    }
}

impl<C: AltList + CloneLive> Clone for Variant<C> {
    fn clone(&self) -> Self {
        Variant {
            slot: self.slot.clone(),
        }
    }

    /// The assignment rules: a valueless source empties the target; the
    /// same live position clone-assigns in place through the alternative's
    /// own `clone_from`; differing positions stage the replacement fully
    /// before the old value is dropped.
    fn clone_from(&mut self, source: &Self) {
        let src = match &source.slot {
            Some(src) => src,
            None => {
                self.slot = None;
                return;
            }
        };
        if let Some(dst) = self.slot.as_mut() {
            if dst.clone_live_from(src) {
                return;
            }
        }
        self.slot = Some(src.clone());
    }
}

/// Writes the active index (NPOS when valueless), then the live value's
/// hash, so equal variants hash equal across alternative sets.
impl<C: AltList + HashLive> Hash for Variant<C> {
    fn hash<Hs: Hasher>(&self, state: &mut Hs) {
        state.write_usize(self.index());
        if let Some(live) = &self.slot {
            live.hash_live(state);
        }
    }
}

impl<C: AltList + DebugLive> fmt::Debug for Variant<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.slot {
            Some(live) => f
                .debug_struct("Variant")
                .field("index", &self.index())
                .field("value", live.debug_live())
                .finish(),
            None => f.write_str("Variant(valueless)"),
        }
    }
}
