use std::marker::PhantomData;

use crate::error::AccessError;
use crate::sum::{AltList, End, Sum};
use crate::variant::Variant;

/// One arm of a visitation: consumes the visitor and the value it was
/// dispatched to. A visitor covers an alternative list by implementing this
/// for every alternative, with one common `Output`.
pub trait Visitor<T> {
    type Output;

    fn call(self, value: T) -> Self::Output;
}

/// Two-argument arm used by [`visit2`].
pub trait Visitor2<A, B> {
    type Output;

    fn call2(self, first: A, second: B) -> Self::Output;
}

/// Dispatches a visitor to the live alternative. Implemented for owned,
/// shared and mutable views of an alternative list, so one visitor type can
/// serve `visit`, `visit_mut` and `into_visit` by covering the matching
/// receiver types.
pub trait Visit<V, R> {
    fn dispatch(self, visitor: V) -> R;
}

impl<V, R> Visit<V, R> for End {
    fn dispatch(self, _visitor: V) -> R {
        match self {}
    }
}

impl<'a, V, R> Visit<V, R> for &'a End {
    fn dispatch(self, _visitor: V) -> R {
        match *self {}
    }
}

impl<'a, V, R> Visit<V, R> for &'a mut End {
    fn dispatch(self, _visitor: V) -> R {
        match *self {}
    }
}

impl<T, L, V, R> Visit<V, R> for Sum<T, L>
where
    V: Visitor<T, Output = R>,
    L: Visit<V, R>,
{
    fn dispatch(self, visitor: V) -> R {
        match self {
            Sum::Head(value) => visitor.call(value),
            Sum::Tail(rest) => rest.dispatch(visitor),
        }
    }
}

impl<'a, T, L, V, R> Visit<V, R> for &'a Sum<T, L>
where
    V: Visitor<&'a T, Output = R>,
    &'a L: Visit<V, R>,
{
    fn dispatch(self, visitor: V) -> R {
        match self {
            Sum::Head(value) => visitor.call(value),
            Sum::Tail(rest) => rest.dispatch(visitor),
        }
    }
}

impl<'a, T, L, V, R> Visit<V, R> for &'a mut Sum<T, L>
where
    V: Visitor<&'a mut T, Output = R>,
    &'a mut L: Visit<V, R>,
{
    fn dispatch(self, visitor: V) -> R {
        match self {
            Sum::Head(value) => visitor.call(value),
            Sum::Tail(rest) => rest.dispatch(visitor),
        }
    }
}

impl<C: AltList> Variant<C> {
    /// Runs the visitor arm matching the live alternative by shared
    /// reference. Fails with [`AccessError::ValuelessVisit`] instead of
    /// dispatching when the variant is valueless.
    pub fn visit<'a, V, R>(&'a self, visitor: V) -> Result<R, AccessError>
    where
        &'a C: Visit<V, R>,
    {
        match self.live() {
            Some(live) => Ok(live.dispatch(visitor)),
            None => Err(AccessError::ValuelessVisit),
        }
    }

    pub fn visit_mut<'a, V, R>(&'a mut self, visitor: V) -> Result<R, AccessError>
    where
        &'a mut C: Visit<V, R>,
    {
        match self.live_mut_slot() {
            Some(live) => Ok(live.dispatch(visitor)),
            None => Err(AccessError::ValuelessVisit),
        }
    }

    /// Consuming visitation: the live value is moved into the arm.
    pub fn into_visit<V, R>(self, visitor: V) -> Result<R, AccessError>
    where
        C: Visit<V, R>,
    {
        match self.into_live() {
            Some(live) => Ok(live.dispatch(visitor)),
            None => Err(AccessError::ValuelessVisit),
        }
    }
}

/// First stage of a two-variant dispatch: pins the first live value, then
/// visits the second list.
pub struct PairFirst<'a, V, C2, R> {
    visitor: V,
    second: &'a C2,
    _out: PhantomData<R>,
}

impl<'a, A, V, C2, R> Visitor<&'a A> for PairFirst<'a, V, C2, R>
where
    &'a C2: Visit<PairSecond<'a, V, A>, R>,
{
    type Output = R;

    fn call(self, value: &'a A) -> R {
        self.second.dispatch(PairSecond {
            visitor: self.visitor,
            first: value,
        })
    }
}

/// Second stage: both live values are known, hand them to the caller's
/// [`Visitor2`].
pub struct PairSecond<'a, V, A> {
    visitor: V,
    first: &'a A,
}

impl<'a, A, B, V> Visitor<&'a B> for PairSecond<'a, V, A>
where
    V: Visitor2<&'a A, &'a B>,
{
    type Output = V::Output;

    fn call(self, value: &'a B) -> V::Output {
        self.visitor.call2(self.first, value)
    }
}

/// Visits the cross product of two variants' alternatives by shared
/// reference. The visitor implements [`Visitor2`] for every pair of
/// alternatives. Either argument being valueless fails the whole call
/// before any arm runs.
///
/// For more than two variants, nest: make one argument a variant whose
/// alternatives are themselves variants, or fold pairwise with an arm
/// output that is again a variant.
pub fn visit2<'a, C1, C2, V, R>(
    first: &'a Variant<C1>,
    second: &'a Variant<C2>,
    visitor: V,
) -> Result<R, AccessError>
where
    C1: AltList,
    C2: AltList,
    &'a C1: Visit<PairFirst<'a, V, C2, R>, R>,
{
    let a = first.live().ok_or(AccessError::ValuelessVisit)?;
    let b = second.live().ok_or(AccessError::ValuelessVisit)?;
    Ok(a.dispatch(PairFirst {
        visitor,
        second: b,
        _out: PhantomData,
    }))
}

/// Builds an ad-hoc visitor from non-capturing arms, one per alternative
/// type. The leading lifetime binds the arms' reference parameters; the
/// declared type is the common output of every arm.
///
/// ```
/// use tagsum::{lambda_visitor, Alts, Variant};
///
/// let v: Variant<Alts![i32, String]> = Variant::new(7);
/// let text = v.visit(lambda_visitor! {
///     <'v> -> String;
///     |x: &'v i32| x.to_string(),
///     |s: &'v String| s.clone(),
/// });
/// assert_eq!(text.as_deref(), Ok("7"));
/// ```
#[macro_export]
macro_rules! lambda_visitor {
    (<$lt:lifetime> -> $out:ty; $(|$arg:ident : $ty:ty| $body:expr),+ $(,)?) => {{
        struct Arms;
        $(
            impl<$lt> $crate::visit::Visitor<$ty> for Arms {
                type Output = $out;

                fn call(self, $arg: $ty) -> $out {
                    $body
                }
            }
        )+
        Arms
    }};
    (-> $out:ty; $(|$arg:ident : $ty:ty| $body:expr),+ $(,)?) => {{
        struct Arms;
        $(
            impl $crate::visit::Visitor<$ty> for Arms {
                type Output = $out;

                fn call(self, $arg: $ty) -> $out {
                    $body
                }
            }
        )+
        Arms
    }};
}
