//! Serde support for the tag tree.
//!
//! Text serializes as a string when it is valid UTF-8 and as bytes otherwise.
//! Lists are checked against their declared kind on the way in.

use core::fmt;
use alloc::{ vec::Vec, string::String };
use serde::{ Serialize, Serializer, Deserialize, Deserializer };
use serde::de::{ self, Visitor, SeqAccess };
use crate::core::types::{ Kind, Text };
use crate::core::tag::{ Value, List };
use crate::error::TypeMismatch;


#[derive(Deserialize)]
pub(crate) struct RawList {
    kind: Kind,
    elements: Vec<Value>,
}

impl TryFrom<RawList> for List {
    type Error = TypeMismatch;

    fn try_from(raw: RawList) -> Result<List, TypeMismatch> {
        List::from_values(raw.kind, raw.elements)
    }
}

impl Serialize for Text {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_str() {
            Some(s) => serializer.serialize_str(s),
            None => serializer.serialize_bytes(self.as_bytes())
        }
    }
}

struct TextVisitor;

impl<'de> Visitor<'de> for TextVisitor {
    type Value = Text;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a string or byte sequence")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Text, E> {
        Ok(Text::from(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Text, E> {
        Ok(Text::from(v))
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<Text, E> {
        Ok(Text::from_bytes(v.to_vec()))
    }

    fn visit_byte_buf<E: de::Error>(self, v: Vec<u8>) -> Result<Text, E> {
        Ok(Text::from_bytes(v))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Text, A::Error> {
        let mut buf = Vec::with_capacity(core::cmp::min(seq.size_hint().unwrap_or(0), 4096));
        while let Some(byte) = seq.next_element::<u8>()? {
            buf.push(byte);
        }
        Ok(Text::from_bytes(buf))
    }
}

impl<'de> Deserialize<'de> for Text {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Text, D::Error> {
        deserializer.deserialize_any(TextVisitor)
    }
}
