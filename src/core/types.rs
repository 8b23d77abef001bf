use core::fmt;
use core::borrow::Borrow;
use alloc::{ vec::Vec, string::String, borrow::Cow };


/// Type identifiers as they appear on the wire.
pub mod id {
    pub const END:        u8 = 0x00;
    pub const BYTE:       u8 = 0x01;
    pub const SHORT:      u8 = 0x02;
    pub const INT:        u8 = 0x03;
    pub const LONG:       u8 = 0x04;
    pub const FLOAT:      u8 = 0x05;
    pub const DOUBLE:     u8 = 0x06;
    pub const BYTE_ARRAY: u8 = 0x07;
    pub const STRING:     u8 = 0x08;
    pub const LIST:       u8 = 0x09;
    pub const COMPOUND:   u8 = 0x0a;
    pub const INT_ARRAY:  u8 = 0x0b;
}

/// Tag kind.
///
/// `End` is the compound terminator. It never appears as the kind of a value,
/// but it is a legal element kind for an empty list.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde1", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Kind {
    End = id::END,
    Byte = id::BYTE,
    Short = id::SHORT,
    Int = id::INT,
    Long = id::LONG,
    Float = id::FLOAT,
    Double = id::DOUBLE,
    ByteArray = id::BYTE_ARRAY,
    String = id::STRING,
    List = id::LIST,
    Compound = id::COMPOUND,
    IntArray = id::INT_ARRAY,
}

/// How many bytes a value of some kind takes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Size {
    /// Exactly this many bytes.
    Fixed(usize),
    /// A length field of this many bytes, followed by the elements.
    Prefixed(usize),
    /// Children until the sentinel.
    Terminated,
}

macro_rules! lookup {
    (
        static $name:ident = [$ty:ty ; $size:expr];
        $( $( $namespace:ident :: $token:ident )|* => $val:expr ,)*
        _ => $default:expr $(,)?
    ) => (
        static $name: [$ty; $size] = {
            let default: $ty = $default;
            let mut table = [default; $size];

            $(
                let val: $ty = $val;
                $(
                    table[$namespace :: $token as usize] = val;
                )*
            )*

            table
        };
    )
}

lookup! {
    static KINDS = [Option<Kind>; 256];

    id::END => Some(Kind::End),
    id::BYTE => Some(Kind::Byte),
    id::SHORT => Some(Kind::Short),
    id::INT => Some(Kind::Int),
    id::LONG => Some(Kind::Long),
    id::FLOAT => Some(Kind::Float),
    id::DOUBLE => Some(Kind::Double),
    id::BYTE_ARRAY => Some(Kind::ByteArray),
    id::STRING => Some(Kind::String),
    id::LIST => Some(Kind::List),
    id::COMPOUND => Some(Kind::Compound),
    id::INT_ARRAY => Some(Kind::IntArray),
    _ => None
}

impl Kind {
    #[inline]
    pub fn from_id(id: u8) -> Option<Kind> {
        KINDS[id as usize]
    }

    #[inline]
    pub const fn id(self) -> u8 {
        self as u8
    }

    pub const fn size(self) -> Size {
        match self {
            Kind::End => Size::Fixed(0),
            Kind::Byte => Size::Fixed(1),
            Kind::Short => Size::Fixed(2),
            Kind::Int | Kind::Float => Size::Fixed(4),
            Kind::Long | Kind::Double => Size::Fixed(8),
            Kind::String => Size::Prefixed(2),
            Kind::ByteArray | Kind::IntArray => Size::Prefixed(4),
            // element id, then count
            Kind::List => Size::Prefixed(5),
            Kind::Compound => Size::Terminated,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Kind::End => "end",
            Kind::Byte => "byte",
            Kind::Short => "short",
            Kind::Int => "int",
            Kind::Long => "long",
            Kind::Float => "float",
            Kind::Double => "double",
            Kind::ByteArray => "byte array",
            Kind::String => "string",
            Kind::List => "list",
            Kind::Compound => "compound",
            Kind::IntArray => "int array",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Text as stored in the payload.
///
/// Names and string values keep the exact bytes that were read, so a payload
/// with malformed UTF-8 still encodes back to the same bytes.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Text(Vec<u8>);

impl Text {
    #[inline]
    pub const fn new() -> Text {
        Text(Vec::new())
    }

    #[inline]
    pub fn from_bytes(buf: Vec<u8>) -> Text {
        Text(buf)
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the text if it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        core::str::from_utf8(&self.0).ok()
    }

    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }

    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Text {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.as_str() {
            Some(s) => fmt::Debug::fmt(s, f),
            None => f.debug_tuple("Text").field(&self.0).finish()
        }
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.to_string_lossy(), f)
    }
}

impl From<&str> for Text {
    fn from(s: &str) -> Text {
        Text(s.as_bytes().to_vec())
    }
}

impl From<String> for Text {
    fn from(s: String) -> Text {
        Text(s.into_bytes())
    }
}

impl From<Vec<u8>> for Text {
    fn from(buf: Vec<u8>) -> Text {
        Text(buf)
    }
}

impl AsRef<[u8]> for Text {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Borrow<[u8]> for Text {
    fn borrow(&self) -> &[u8] {
        &self.0
    }
}

impl PartialEq<str> for Text {
    fn eq(&self, other: &str) -> bool {
        self.0 == other.as_bytes()
    }
}

impl PartialEq<&str> for Text {
    fn eq(&self, other: &&str) -> bool {
        self.0 == other.as_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_roundtrip() {
        for id in 0..=u8::MAX {
            match Kind::from_id(id) {
                Some(kind) => {
                    assert!(id <= id::INT_ARRAY);
                    assert_eq!(kind.id(), id);
                },
                None => assert!(id > id::INT_ARRAY)
            }
        }
    }

    #[test]
    fn test_sizes() {
        assert_eq!(Kind::Long.size(), Size::Fixed(8));
        assert_eq!(Kind::String.size(), Size::Prefixed(2));
        assert_eq!(Kind::IntArray.size(), Size::Prefixed(4));
        assert_eq!(Kind::Compound.size(), Size::Terminated);
    }

    #[test]
    fn test_text_bytes() {
        let text = Text::from(vec![0x66, 0x6f, 0xff]);
        assert_eq!(text.as_str(), None);
        assert_eq!(text.to_string_lossy(), "fo\u{fffd}");
        assert_eq!(Text::from("abc"), "abc");
        assert_eq!(Text::from("\u{00fc}").len(), 2);
    }
}
