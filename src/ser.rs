//! Serde support. A variant travels as an `(index, value)` pair so the
//! active alternative survives the round trip even when types repeat in the
//! list; an optional travels as a plain nullable value. A valueless variant
//! refuses to serialize.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, Deserialize, DeserializeSeed, Deserializer, SeqAccess};
use serde::ser::{self, Serialize, SerializeTuple, Serializer};

use crate::optional::{Empty, Optional};
use crate::sum::{AltList, End, Sum};
use crate::variant::Variant;

/// Serializes the live value of an alternative list.
pub trait AltSerialize {
    fn serialize_alt<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error>;
}

impl AltSerialize for End {
    fn serialize_alt<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
        match *self {}
    }
}

impl<T: Serialize, L: AltSerialize> AltSerialize for Sum<T, L> {
    fn serialize_alt<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Sum::Head(value) => value.serialize(serializer),
            Sum::Tail(rest) => rest.serialize_alt(serializer),
        }
    }
}

/// Deserializes the alternative at runtime position `index`.
pub trait AltDeserialize<'de>: Sized {
    fn deserialize_alt<D: Deserializer<'de>>(index: u64, deserializer: D)
        -> Result<Self, D::Error>;
}

impl<'de> AltDeserialize<'de> for End {
    fn deserialize_alt<D: Deserializer<'de>>(
        index: u64,
        _deserializer: D,
    ) -> Result<Self, D::Error> {
        Err(de::Error::custom(format_args!(
            "variant index {} out of range",
            index
        )))
    }
}

impl<'de, T, L> AltDeserialize<'de> for Sum<T, L>
where
    T: Deserialize<'de>,
    L: AltDeserialize<'de>,
{
    fn deserialize_alt<D: Deserializer<'de>>(
        index: u64,
        deserializer: D,
    ) -> Result<Self, D::Error> {
        if index == 0 {
            T::deserialize(deserializer).map(Sum::Head)
        } else {
            L::deserialize_alt(index - 1, deserializer).map(Sum::Tail)
        }
    }
}

struct LiveValue<'a, C>(&'a C);

impl<'a, C: AltSerialize> Serialize for LiveValue<'a, C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize_alt(serializer)
    }
}

impl<C: AltList + AltSerialize> Serialize for Variant<C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let live = self
            .live()
            .ok_or_else(|| ser::Error::custom("cannot serialize a valueless variant"))?;
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&(live.live_index() as u64))?;
        tuple.serialize_element(&LiveValue(live))?;
        tuple.end()
    }
}

struct AltSeed<C> {
    index: u64,
    _list: PhantomData<C>,
}

impl<'de, C: AltDeserialize<'de>> DeserializeSeed<'de> for AltSeed<C> {
    type Value = C;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<C, D::Error> {
        C::deserialize_alt(self.index, deserializer)
    }
}

struct VariantVisitor<C>(PhantomData<C>);

impl<'de, C: AltList + AltDeserialize<'de>> de::Visitor<'de> for VariantVisitor<C> {
    type Value = Variant<C>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a (variant index, value) pair")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Variant<C>, A::Error> {
        let index: u64 = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;
        if index >= C::LEN as u64 {
            return Err(de::Error::custom(format_args!(
                "variant index {} out of range for {} alternatives",
                index,
                C::LEN
            )));
        }
        let live = seq
            .next_element_seed(AltSeed {
                index,
                _list: PhantomData::<C>,
            })?
            .ok_or_else(|| de::Error::invalid_length(1, &self))?;
        Ok(Variant::from_live(Some(live)))
    }
}

impl<'de, C: AltList + AltDeserialize<'de>> Deserialize<'de> for Variant<C> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_tuple(2, VariantVisitor(PhantomData))
    }
}

impl Serialize for Empty {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_unit()
    }
}

struct EmptyVisitor;

impl<'de> de::Visitor<'de> for EmptyVisitor {
    type Value = Empty;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unit")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Empty, E> {
        Ok(Empty)
    }
}

impl<'de> Deserialize<'de> for Empty {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_unit(EmptyVisitor)
    }
}

impl<T: Serialize> Serialize for Optional<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_option().serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Optional<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Optional::from)
    }
}
