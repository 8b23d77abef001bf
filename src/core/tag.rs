//! The tag tree.
//!
//! A [`Tag`] is a named [`Value`]. Names only exist where the format stores
//! them: on the root and on compound children. List elements are bare
//! [`Value`]s, since the list header already records their kind.

use alloc::vec::{ self, Vec };
use core::slice;
use crate::core::types::{ Kind, Text };
use crate::error::TypeMismatch;


/// A tag payload.
///
/// Equality is structural: floats compare by their bits, so a NaN payload
/// equals itself and `0.0` differs from `-0.0`.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde1", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<u8>),
    String(Text),
    List(List),
    Compound(Compound),
    IntArray(Vec<i32>),
}

/// A named value.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde1", derive(serde::Serialize, serde::Deserialize))]
pub struct Tag {
    pub name: Text,
    pub value: Value,
}

/// A homogeneous sequence of unnamed values.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde1", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde1", serde(try_from = "crate::serde::RawList"))]
pub struct List {
    kind: Kind,
    elements: Vec<Value>,
}

/// An ordered sequence of named tags.
///
/// Duplicate names are allowed and kept; lookups by name see the first match.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde1", derive(serde::Serialize, serde::Deserialize))]
pub struct Compound(Vec<Tag>);

impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Byte(a), Value::Byte(b)) => a == b,
            (Value::Short(a), Value::Short(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Long(a), Value::Long(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Double(a), Value::Double(b)) => a.to_bits() == b.to_bits(),
            (Value::ByteArray(a), Value::ByteArray(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Compound(a), Value::Compound(b)) => a == b,
            (Value::IntArray(a), Value::IntArray(b)) => a == b,
            _ => false
        }
    }
}

impl Eq for Value {}

macro_rules! copy_accessors {
    ( $( $variant:ident => $name:ident : $t:ty ),* $( , )? ) => {
        $(
            #[inline]
            pub fn $name(&self) -> Result<$t, TypeMismatch> {
                match self {
                    Value::$variant(v) => Ok(*v),
                    _ => Err(TypeMismatch::new(Kind::$variant, self.kind()))
                }
            }
        )*
    }
}

macro_rules! ref_accessors {
    ( $( $variant:ident => $name:ident : $t:ty , $name_mut:ident : $t_mut:ty );* $( ; )? ) => {
        $(
            #[inline]
            pub fn $name(&self) -> Result<$t, TypeMismatch> {
                match self {
                    Value::$variant(v) => Ok(v),
                    _ => Err(TypeMismatch::new(Kind::$variant, self.kind()))
                }
            }

            #[inline]
            pub fn $name_mut(&mut self) -> Result<$t_mut, TypeMismatch> {
                match self {
                    Value::$variant(v) => Ok(v),
                    _ => Err(TypeMismatch::new(Kind::$variant, self.kind()))
                }
            }
        )*
    }
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Byte(_) => Kind::Byte,
            Value::Short(_) => Kind::Short,
            Value::Int(_) => Kind::Int,
            Value::Long(_) => Kind::Long,
            Value::Float(_) => Kind::Float,
            Value::Double(_) => Kind::Double,
            Value::ByteArray(_) => Kind::ByteArray,
            Value::String(_) => Kind::String,
            Value::List(_) => Kind::List,
            Value::Compound(_) => Kind::Compound,
            Value::IntArray(_) => Kind::IntArray,
        }
    }

    copy_accessors! {
        Byte => as_byte: i8,
        Short => as_short: i16,
        Int => as_int: i32,
        Long => as_long: i64,
        Float => as_float: f32,
        Double => as_double: f64,
    }

    ref_accessors! {
        ByteArray => as_byte_array: &[u8], as_byte_array_mut: &mut Vec<u8>;
        String => as_string: &Text, as_string_mut: &mut Text;
        List => as_list: &List, as_list_mut: &mut List;
        Compound => as_compound: &Compound, as_compound_mut: &mut Compound;
        IntArray => as_int_array: &[i32], as_int_array_mut: &mut Vec<i32>;
    }
}

macro_rules! delegate {
    ( mut $( $name:ident -> $t:ty ),* $( , )? ) => {
        $(
            #[inline]
            pub fn $name(&mut self) -> Result<$t, TypeMismatch> {
                self.value.$name()
            }
        )*
    };
    ( $( $name:ident -> $t:ty ),* $( , )? ) => {
        $(
            #[inline]
            pub fn $name(&self) -> Result<$t, TypeMismatch> {
                self.value.$name()
            }
        )*
    };
}

impl Tag {
    pub fn new<N, V>(name: N, value: V) -> Tag
    where
        N: Into<Text>,
        V: Into<Value>
    {
        Tag { name: name.into(), value: value.into() }
    }

    #[inline]
    pub fn kind(&self) -> Kind {
        self.value.kind()
    }

    #[inline]
    pub fn into_value(self) -> Value {
        self.value
    }

    delegate! {
        as_byte -> i8,
        as_short -> i16,
        as_int -> i32,
        as_long -> i64,
        as_float -> f32,
        as_double -> f64,
        as_byte_array -> &[u8],
        as_string -> &Text,
        as_list -> &List,
        as_compound -> &Compound,
        as_int_array -> &[i32],
    }

    delegate! {
        mut
        as_byte_array_mut -> &mut Vec<u8>,
        as_string_mut -> &mut Text,
        as_list_mut -> &mut List,
        as_compound_mut -> &mut Compound,
        as_int_array_mut -> &mut Vec<i32>,
    }
}

impl List {
    pub fn new(kind: Kind) -> List {
        List { kind, elements: Vec::new() }
    }

    /// Builds a list, checking every element against `kind`.
    pub fn from_values(kind: Kind, elements: Vec<Value>) -> Result<List, TypeMismatch> {
        if let Some(v) = elements.iter().find(|v| v.kind() != kind) {
            return Err(TypeMismatch::new(kind, v.kind()));
        }
        Ok(List { kind, elements })
    }

    /// Every element of `elements` must already be of `kind`.
    pub(crate) fn from_decoded(kind: Kind, elements: Vec<Value>) -> List {
        debug_assert!(elements.iter().all(|v| v.kind() == kind));
        List { kind, elements }
    }

    /// The declared element kind.
    #[inline]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn push<V: Into<Value>>(&mut self, value: V) -> Result<(), TypeMismatch> {
        let value = value.into();
        if value.kind() != self.kind {
            return Err(TypeMismatch::new(self.kind, value.kind()));
        }
        self.elements.push(value);
        Ok(())
    }

    /// Replaces the element at `index`, returning the old one.
    ///
    /// Returns `Ok(None)` and leaves the list alone if `index` is out of
    /// bounds.
    pub fn set<V: Into<Value>>(&mut self, index: usize, value: V)
        -> Result<Option<Value>, TypeMismatch>
    {
        let value = value.into();
        if value.kind() != self.kind {
            return Err(TypeMismatch::new(self.kind, value.kind()));
        }
        Ok(self.elements.get_mut(index).map(|slot| core::mem::replace(slot, value)))
    }

    /// Removes the element at `index`, shifting the rest down.
    pub fn remove(&mut self, index: usize) -> Option<Value> {
        if index < self.elements.len() {
            Some(self.elements.remove(index))
        } else {
            None
        }
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.elements.get(index)
    }

    /// Mutable access to an element.
    ///
    /// Replacing the element with one of another kind is caught when the
    /// list is encoded.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Value> {
        self.elements.get_mut(index)
    }

    #[inline]
    pub fn as_slice(&self) -> &[Value] {
        &self.elements
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, Value> {
        self.elements.iter()
    }

    #[inline]
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, Value> {
        self.elements.iter_mut()
    }

    #[inline]
    pub fn into_values(self) -> Vec<Value> {
        self.elements
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Value;
    type IntoIter = slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl IntoIterator for List {
    type Item = Value;
    type IntoIter = vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

impl Compound {
    #[inline]
    pub const fn new() -> Compound {
        Compound(Vec::new())
    }

    #[inline]
    pub fn with_capacity(n: usize) -> Compound {
        Compound(Vec::with_capacity(n))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First child with the given name.
    pub fn get<N: AsRef<[u8]>>(&self, name: N) -> Option<&Tag> {
        let name = name.as_ref();
        self.0.iter().find(|tag| tag.name.as_bytes() == name)
    }

    pub fn get_mut<N: AsRef<[u8]>>(&mut self, name: N) -> Option<&mut Tag> {
        let name = name.as_ref();
        self.0.iter_mut().find(|tag| tag.name.as_bytes() == name)
    }

    pub fn contains<N: AsRef<[u8]>>(&self, name: N) -> bool {
        self.get(name).is_some()
    }

    /// Appends a child. An existing child with the same name is kept.
    pub fn insert<N, V>(&mut self, name: N, value: V)
    where
        N: Into<Text>,
        V: Into<Value>
    {
        self.0.push(Tag::new(name, value));
    }

    #[inline]
    pub fn push(&mut self, tag: Tag) {
        self.0.push(tag);
    }

    /// Removes the first child with the given name.
    pub fn remove<N: AsRef<[u8]>>(&mut self, name: N) -> Option<Tag> {
        let name = name.as_ref();
        let pos = self.0.iter().position(|tag| tag.name.as_bytes() == name)?;
        Some(self.0.remove(pos))
    }

    #[inline]
    pub fn tags(&self) -> &[Tag] {
        &self.0
    }

    /// The children in order; they can be reordered or replaced freely.
    #[inline]
    pub fn tags_mut(&mut self) -> &mut Vec<Tag> {
        &mut self.0
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, Tag> {
        self.0.iter()
    }

    #[inline]
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, Tag> {
        self.0.iter_mut()
    }

    #[inline]
    pub fn into_tags(self) -> Vec<Tag> {
        self.0
    }
}

impl From<Vec<Tag>> for Compound {
    fn from(tags: Vec<Tag>) -> Compound {
        Compound(tags)
    }
}

impl FromIterator<Tag> for Compound {
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Compound {
        Compound(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Compound {
    type Item = &'a Tag;
    type IntoIter = slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Compound {
    type Item = Tag;
    type IntoIter = vec::IntoIter<Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

macro_rules! value_from {
    ( $( $t:ty => $variant:ident ),* $( , )? ) => {
        $(
            impl From<$t> for Value {
                #[inline]
                fn from(v: $t) -> Value {
                    Value::$variant(v)
                }
            }
        )*
    }
}

value_from! {
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    Vec<u8> => ByteArray,
    Text => String,
    List => List,
    Compound => Compound,
    Vec<i32> => IntArray,
}

impl From<&str> for Value {
    fn from(s: &str) -> Value {
        Value::String(s.into())
    }
}

impl From<alloc::string::String> for Value {
    fn from(s: alloc::string::String) -> Value {
        Value::String(s.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessor_mismatch() {
        let tag = Tag::new("level", 3i32);
        assert_eq!(tag.as_int(), Ok(3));
        assert_eq!(tag.as_long(), Err(TypeMismatch { expected: Kind::Long, found: Kind::Int }));
        assert!(tag.as_compound().is_err());
    }

    #[test]
    fn test_accessor_mut() {
        let mut tag = Tag::new("data", vec![1u8, 2, 3]);
        tag.as_byte_array_mut().unwrap()[1] = 9;
        assert_eq!(tag.as_byte_array().unwrap(), &[1, 9, 3]);
        assert!(tag.as_int_array_mut().is_err());
    }

    #[test]
    fn test_list_kind_is_fixed() {
        let mut list = List::new(Kind::Float);
        list.push(1.5f32).unwrap();
        assert_eq!(list.push(1i32), Err(TypeMismatch { expected: Kind::Float, found: Kind::Int }));
        assert_eq!(list.set(0, 2.5f32), Ok(Some(Value::Float(1.5))));
        assert!(list.set(0, "x").is_err());
        assert_eq!(list.len(), 1);

        assert_eq!(list.set(3, 4.0f32), Ok(None));
        assert_eq!(list.remove(3), None);
        assert_eq!(list.len(), 1);
        assert_eq!(list.remove(0), Some(Value::Float(2.5)));
        assert!(list.is_empty());

        let mut empty = List::new(Kind::End);
        assert!(empty.push(0i8).is_err());
        assert_eq!(empty.kind(), Kind::End);

        assert!(List::from_values(Kind::Int, vec![Value::Int(1), Value::Short(2)]).is_err());
    }

    #[test]
    fn test_compound_first_match() {
        let mut c = Compound::new();
        c.insert("a", 1i32);
        c.insert("b", 2i32);
        c.insert("a", 3i32);

        assert_eq!(c.len(), 3);
        assert_eq!(c.get("a").unwrap().as_int(), Ok(1));
        assert!(c.get("missing").is_none());

        c.get_mut("a").unwrap().value = Value::from("one");
        assert_eq!(c.get("a").unwrap().as_string().unwrap(), "one");

        let removed = c.remove("a").unwrap();
        assert_eq!(removed.as_string().unwrap(), "one");
        assert_eq!(c.get("a").unwrap().as_int(), Ok(3));

        let names: Vec<_> = c.iter().map(|tag| tag.name.clone()).collect();
        assert_eq!(names, vec![Text::from("b"), Text::from("a")]);
    }

    #[test]
    fn test_float_eq_by_bits() {
        let nan = Value::Float(f32::from_bits(0x7fc0_0001));
        assert_eq!(nan, nan.clone());
        assert_ne!(nan, Value::Float(f32::from_bits(0x7fc0_0002)));
        assert_eq!(Value::Double(f64::NAN), Value::Double(f64::NAN));
        assert_ne!(Value::Double(0.0), Value::Double(-0.0));
        assert_ne!(Value::Float(1.0), Value::Double(1.0));

        let tag = Tag::new("f", f32::from_bits(0xffc0_0003));
        assert_eq!(tag, tag.clone());
    }

    #[test]
    fn test_structural_eq() {
        let a = Tag::new("test", Compound::from(vec![Tag::new("test", 3i32)]));
        let b = Tag::new("test", Compound::from(vec![Tag::new("test", 3i32)]));
        assert_eq!(a, b);
        assert_ne!(a, Tag::new("other", Compound::from(vec![Tag::new("test", 3i32)])));
    }
}
