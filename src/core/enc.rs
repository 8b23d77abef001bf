use alloc::vec::Vec;
use alloc::collections::TryReserveError;
use crate::core::types::{ Kind, Text };
use crate::core::tag::{ Tag, Value, List, Compound };
pub use crate::error::EncodeError as Error;


pub trait Write {
    #[cfg(feature = "use_std")]
    type Error: std::error::Error + 'static;

    #[cfg(not(feature = "use_std"))]
    type Error: core::fmt::Display + core::fmt::Debug;

    fn push(&mut self, input: &[u8]) -> Result<(), Self::Error>;
}

impl<W: Write + ?Sized> Write for &'_ mut W {
    type Error = W::Error;

    #[inline]
    fn push(&mut self, input: &[u8]) -> Result<(), Self::Error> {
        (**self).push(input)
    }
}

/// Growable in-memory sink.
pub struct BufWriter(Vec<u8>);

impl BufWriter {
    pub fn new(buf: Vec<u8>) -> BufWriter {
        BufWriter(buf)
    }

    pub fn buffer(&self) -> &[u8] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }
}

impl Write for BufWriter {
    type Error = TryReserveError;

    #[inline]
    fn push(&mut self, input: &[u8]) -> Result<(), Self::Error> {
        self.0.try_reserve(input.len())?;
        self.0.extend_from_slice(input);
        Ok(())
    }
}

pub trait Encode {
    fn encode<W: Write>(&self, writer: &mut W) -> Result<(), Error<W::Error>>;
}

#[inline]
fn push_u16_len<W: Write>(name: &'static str, len: usize, writer: &mut W)
    -> Result<(), Error<W::Error>>
{
    let len = u16::try_from(len).map_err(|_| Error::length_overflow(name, len))?;
    writer.push(&len.to_le_bytes())?;
    Ok(())
}

#[inline]
fn push_i32_len<W: Write>(name: &'static str, len: usize, writer: &mut W)
    -> Result<(), Error<W::Error>>
{
    let len = i32::try_from(len).map_err(|_| Error::length_overflow(name, len))?;
    writer.push(&len.to_le_bytes())?;
    Ok(())
}

fn push_text<W: Write>(name: &'static str, text: &Text, writer: &mut W)
    -> Result<(), Error<W::Error>>
{
    push_u16_len(name, text.len(), writer)?;
    writer.push(text.as_bytes())?;
    Ok(())
}

impl Encode for Kind {
    #[inline]
    fn encode<W: Write>(&self, writer: &mut W) -> Result<(), Error<W::Error>> {
        writer.push(&[self.id()])?;
        Ok(())
    }
}

/// Type id, name, then value.
impl Encode for Tag {
    fn encode<W: Write>(&self, writer: &mut W) -> Result<(), Error<W::Error>> {
        self.kind().encode(writer)?;
        push_text("name", &self.name, writer)?;
        self.value.encode(writer)
    }
}

/// Value bytes only, as stored in a list.
impl Encode for Value {
    fn encode<W: Write>(&self, writer: &mut W) -> Result<(), Error<W::Error>> {
        match self {
            Value::Byte(v) => writer.push(&v.to_le_bytes())?,
            Value::Short(v) => writer.push(&v.to_le_bytes())?,
            Value::Int(v) => writer.push(&v.to_le_bytes())?,
            Value::Long(v) => writer.push(&v.to_le_bytes())?,
            Value::Float(v) => writer.push(&v.to_le_bytes())?,
            Value::Double(v) => writer.push(&v.to_le_bytes())?,
            Value::ByteArray(v) => {
                push_i32_len("byte array", v.len(), writer)?;
                writer.push(v)?;
            },
            Value::String(v) => push_text("string", v, writer)?,
            Value::List(v) => v.encode(writer)?,
            Value::Compound(v) => v.encode(writer)?,
            Value::IntArray(v) => {
                push_i32_len("int array", v.len(), writer)?;
                for n in v.iter() {
                    writer.push(&n.to_le_bytes())?;
                }
            }
        }
        Ok(())
    }
}

impl Encode for List {
    fn encode<W: Write>(&self, writer: &mut W) -> Result<(), Error<W::Error>> {
        let kind = self.kind();
        kind.encode(writer)?;
        push_i32_len("list", self.len(), writer)?;
        for value in self.iter() {
            if value.kind() != kind {
                return Err(Error::list_mismatch(kind, value.kind()));
            }
            value.encode(writer)?;
        }
        Ok(())
    }
}

impl Encode for Compound {
    fn encode<W: Write>(&self, writer: &mut W) -> Result<(), Error<W::Error>> {
        for tag in self.iter() {
            tag.encode(writer)?;
        }
        Kind::End.encode(writer)
    }
}

#[test]
#[cfg(feature = "use_std")]
fn test_encoded() -> anyhow::Result<()> {
    use alloc::string::String;

    fn hex(input: &[u8]) -> String {
        let mut buf = String::from("0x");
        data_encoding::HEXLOWER.encode_append(input, &mut buf);
        buf
    }

    let mut buf = BufWriter::new(Vec::new());

    macro_rules! test {
        ( $( $input:expr , $expected:expr );* $( ; )? ) => {
            $(
                {
                    buf.0.clear();
                    ($input).encode(&mut buf)?;
                    let output = hex(&buf.0);
                    assert_eq!(output, $expected, "{:?}", stringify!($input));
                }
            )*
        }
    }

    let mut floats = List::new(Kind::Float);
    floats.push(1.0f32)?;
    floats.push(-2.5f32)?;

    let mut nested = Compound::new();
    nested.insert("a", 1i8);
    nested.insert("a", 2i8);

    test!{
        Value::Byte(-1), "0xff";
        Value::Short(0x0102), "0x0201";
        Value::Int(1), "0x01000000";
        Value::Int(-2), "0xfeffffff";
        Value::Long(0x0102030405060708), "0x0807060504030201";
        Value::Float(1.0), "0x0000803f";
        Value::Double(-4.1), "0x66666666666610c0";
        Value::ByteArray(Vec::new()), "0x00000000";
        Value::ByteArray(vec![1, 2, 3]), "0x03000000010203";
        Value::from(""), "0x0000";
        Value::from("IETF"), "0x040049455446";
        Value::from("\u{00fc}"), "0x0200c3bc";
        Value::IntArray(vec![1, -1]), "0x0200000001000000ffffffff";

        Tag::new("", Compound::new()), "0x0a000000";
        Tag::new("x", 7i32), "0x0301007807000000";
        Tag::new("test", List::new(Kind::Float)), "0x090400746573740500000000";
        Tag::new("", List::new(Kind::End)), "0x0900000000000000";
        Value::List(floats), "0x05020000000000803f000020c0";
        Value::Compound(nested), "0x0101006101010100610200";
    }

    Ok(())
}
