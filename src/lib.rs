//! Little-endian NBT, as found in Bedrock save files.
//!
//! ```
//! use lenbt::{ Tag, Compound };
//!
//! let mut root = Compound::new();
//! root.insert("LevelName", "My World");
//! root.insert("SpawnY", 64i32);
//! let tag = Tag::new("", root);
//!
//! let buf = lenbt::encode(&tag).unwrap();
//! assert_eq!(lenbt::decode(&buf).unwrap(), tag);
//! ```

#![cfg_attr(not(feature = "use_std"), no_std)]

extern crate alloc;

mod error;
mod util;
pub mod core;
pub mod header;

#[cfg(feature = "use_std")]
pub mod io;

#[cfg(feature = "serde1")]
mod serde;

use ::core::convert::Infallible;
use alloc::vec::Vec;
use alloc::collections::TryReserveError;
use crate::core::dec::{ Decoder, Decode, SliceReader };
use crate::core::enc::{ BufWriter, Encode };

pub use error::{ DecodeError, EncodeError, TypeMismatch };
pub use crate::core::{ Tag, Value, List, Compound, Kind, Text };
pub use header::HeaderKind;


/// Decodes one root tag spanning all of `buf`.
pub fn decode(buf: &[u8]) -> Result<Tag, DecodeError<Infallible>> {
    let mut decoder = Decoder::new(SliceReader::new(buf));
    let tag = Tag::decode(&mut decoder)?;
    let len = finish(decoder)?;
    log::trace!("decoded {} tag {:?} from {} bytes", tag.kind(), tag.name, len);
    Ok(tag)
}

/// Decodes an unnamed root value of a known kind spanning all of `buf`.
///
/// The payload has no type id and no name, like a list element.
pub fn decode_value(buf: &[u8], kind: Kind) -> Result<Value, DecodeError<Infallible>> {
    let mut decoder = Decoder::new(SliceReader::new(buf));
    let value = decoder.read_value(kind)?;
    let len = finish(decoder)?;
    log::trace!("decoded unnamed {} from {} bytes", kind, len);
    Ok(value)
}

/// Rejects input left after the root.
fn finish(decoder: Decoder<SliceReader<'_>>) -> Result<usize, DecodeError<Infallible>> {
    let offset = decoder.offset();
    let remaining = decoder.into_inner().remaining().len();
    if remaining != 0 {
        return Err(DecodeError::trailing_bytes(offset, remaining));
    }
    Ok(offset)
}

pub fn encode(tag: &Tag) -> Result<Vec<u8>, EncodeError<TryReserveError>> {
    let mut writer = BufWriter::new(Vec::new());
    tag.encode(&mut writer)?;
    let buf = writer.into_inner();
    log::trace!("encoded {} tag {:?} into {} bytes", tag.kind(), tag.name, buf.len());
    Ok(buf)
}

/// Encodes a value without type id or name, the form [`decode_value`] reads.
pub fn encode_value(value: &Value) -> Result<Vec<u8>, EncodeError<TryReserveError>> {
    let mut writer = BufWriter::new(Vec::new());
    value.encode(&mut writer)?;
    let buf = writer.into_inner();
    log::trace!("encoded unnamed {} into {} bytes", value.kind(), buf.len());
    Ok(buf)
}

/// Decodes a buffer that starts with an 8-byte header.
pub fn decode_with_header(buf: &[u8]) -> Result<(HeaderKind, Tag), DecodeError<Infallible>> {
    split_header(buf, decode)
}

/// [`decode_value`] behind an 8-byte header.
pub fn decode_value_with_header(buf: &[u8], kind: Kind)
    -> Result<(HeaderKind, Value), DecodeError<Infallible>>
{
    split_header(buf, |payload| decode_value(payload, kind))
}

fn split_header<T, F>(buf: &[u8], f: F) -> Result<(HeaderKind, T), DecodeError<Infallible>>
where F: FnOnce(&[u8]) -> Result<T, DecodeError<Infallible>>
{
    let (header, payload) = header::split(buf)?;
    let output = f(payload).map_err(|err| shift(err, header::HEADER_LEN))?;
    Ok((header.kind, output))
}

/// Encodes `tag`, behind a header unless `kind` is [`HeaderKind::NONE`].
pub fn encode_with_header(tag: &Tag, kind: HeaderKind)
    -> Result<Vec<u8>, EncodeError<TryReserveError>>
{
    prepend_header(kind, encode(tag)?)
}

/// [`encode_value`] behind a header unless `kind` is [`HeaderKind::NONE`].
pub fn encode_value_with_header(value: &Value, kind: HeaderKind)
    -> Result<Vec<u8>, EncodeError<TryReserveError>>
{
    prepend_header(kind, encode_value(value)?)
}

fn prepend_header(kind: HeaderKind, payload: Vec<u8>)
    -> Result<Vec<u8>, EncodeError<TryReserveError>>
{
    if kind.is_none() {
        return Ok(payload);
    }
    let mut writer = BufWriter::new(Vec::new());
    header::prepend(kind, &payload, &mut writer)?;
    Ok(writer.into_inner())
}

/// Makes payload offsets relative to the whole buffer.
pub(crate) fn shift<E>(err: DecodeError<E>, by: usize) -> DecodeError<E> {
    match err {
        DecodeError::Eof { name, offset, expect } =>
            DecodeError::Eof { name, offset: offset + by, expect },
        DecodeError::UnknownKind { offset, found } =>
            DecodeError::UnknownKind { offset: offset + by, found },
        DecodeError::UnexpectedEnd { offset } =>
            DecodeError::UnexpectedEnd { offset: offset + by },
        DecodeError::NegativeLength { name, offset, found } =>
            DecodeError::NegativeLength { name, offset: offset + by, found },
        DecodeError::DepthOverflow { name, offset } =>
            DecodeError::DepthOverflow { name, offset: offset + by },
        DecodeError::TrailingBytes { offset, remaining } =>
            DecodeError::TrailingBytes { offset: offset + by, remaining },
        err => err
    }
}
