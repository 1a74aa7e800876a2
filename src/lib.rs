//! Tagged unions over a closed, ordered list of alternatives.
//!
//! A [`Variant`] always knows which alternative is live, supports in-place
//! assignment and emplacement, and models failed mutations honestly: a
//! fallible emplacement that errors out leaves the variant *valueless*
//! (reporting [`NPOS`]), while fallible assignment keeps the old value. See
//! the method docs on [`Variant`] for the exact guarantees.
//!
//! ```
//! use tagsum::{Alts, Variant};
//!
//! let mut v: Variant<Alts![i32, String]> = Variant::new(1);
//! v.set(String::from("two"));
//! assert_eq!(v.index(), 1);
//! assert_eq!(v.get::<String, _>().map(String::as_str), Ok("two"));
//! ```
//!
//! Alternatives can be addressed by type (unique types only) or by position
//! (always, including duplicated types), visited with single- or
//! two-variant visitors, and compared, ordered and hashed as values.
//! [`Optional`] packages the common two-state case.

pub mod error;
pub mod index;
pub mod optional;
#[cfg(feature = "serde")]
pub mod ser;
pub mod sum;
pub mod variant;
pub mod visit;

pub use crate::error::AccessError;
pub use crate::index::NPOS;
pub use crate::optional::{Empty, Optional};
pub use crate::variant::Variant;
pub use crate::visit::{visit2, Visit, Visitor, Visitor2};
