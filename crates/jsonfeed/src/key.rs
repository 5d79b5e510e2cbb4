use alloc::{string::String, vec::Vec};
use core::fmt;

use crate::parser::Frame;

/// The slot in a container under which the next completed value is stored.
///
/// Objects use [`Key::Name`], arrays use [`Key::Index`]. A sequence of keys
/// taken from the open-container stack (see [`path_of`]) locates an emitted
/// value within its top-level document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// An object member name.
    Name(String),
    /// A zero-based array position.
    Index(usize),
}

impl Key {
    /// Returns the array index, if this is an [`Key::Index`].
    #[must_use]
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Key::Index(i) => Some(*i),
            Key::Name(_) => None,
        }
    }

    /// Returns the member name, if this is a [`Key::Name`].
    #[must_use]
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Key::Name(n) => Some(n),
            Key::Index(_) => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Name(n) => write!(f, "{n:?}"),
            Key::Index(i) => write!(f, "{i}"),
        }
    }
}

/// Collects the keys of every open container, outermost first.
///
/// Containers that have not yet seen a key (an object directly after `{`)
/// contribute nothing.
///
/// ```
/// use jsonfeed::{Decoder, Frame, Value, path, path_of};
///
/// let mut paths = Vec::new();
/// let mut decoder = Decoder::new(|_: &Value, stack: &[Frame]| paths.push(path_of(stack)));
/// decoder.write(r#"{"a":[true]}"#).unwrap();
/// drop(decoder);
/// assert_eq!(paths, vec![path!["a", 0], path!["a"], path![]]);
/// ```
#[must_use]
pub fn path_of(stack: &[Frame]) -> Vec<Key> {
    stack.iter().filter_map(|frame| frame.key.clone()).collect()
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Self::Name(s.into())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Self::Name(s)
    }
}

impl From<usize> for Key {
    fn from(i: usize) -> Self {
        Self::Index(i)
    }
}

#[doc(hidden)]
pub trait KeyFrom<T> {
    fn from_key(value: T) -> Key;
}

macro_rules! impl_integer_as_key {
    ($($t:ty),+) => {
        $(
            impl KeyFrom<$t> for Key {
                fn from_key(value: $t) -> Self {
                    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                    Key::Index(value as usize)
                }
            }
        )+
    };
}
impl_integer_as_key!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl KeyFrom<&str> for Key {
    fn from_key(value: &str) -> Self {
        Key::Name(value.into())
    }
}

impl KeyFrom<String> for Key {
    fn from_key(value: String) -> Self {
        Key::Name(value)
    }
}

// A `Vec<Key>` serializes as e.g. `["foo", 0, "bar"]` rather than the default
// tagged representation.
#[cfg(any(test, feature = "serde"))]
mod serde_impls {
    use alloc::string::String;
    use core::fmt;

    use serde::{
        Deserialize, Deserializer, Serialize, Serializer,
        de::{Error, Unexpected, Visitor},
    };

    use super::Key;

    impl Serialize for Key {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match self {
                Key::Name(n) => serializer.serialize_str(n),
                Key::Index(i) => serializer.serialize_u64(*i as u64),
            }
        }
    }

    struct KeyVisitor;

    impl Visitor<'_> for KeyVisitor {
        type Value = Key;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or unsigned integer")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(Key::Name(value.into()))
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(Key::Name(value))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            usize::try_from(value)
                .map(Key::Index)
                .map_err(|_| E::invalid_value(Unexpected::Unsigned(value), &self))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            usize::try_from(value)
                .map(Key::Index)
                .map_err(|_| E::invalid_value(Unexpected::Signed(value), &self))
        }
    }

    impl<'de> Deserialize<'de> for Key {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(KeyVisitor)
        }
    }
}
