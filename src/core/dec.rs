use core::cmp;
use core::convert::Infallible;
use alloc::vec::Vec;
use crate::core::types::{ Kind, Text };
use crate::core::tag::{ Tag, Value, List, Compound };
use crate::util::DepthGuard;
pub use crate::error::DecodeError as Error;


/// Nesting limit used by [`SliceReader::new`].
pub const DEFAULT_DEPTH_LIMIT: usize = 512;

/// Upper bound on what a length prefix may pre-allocate, in bytes.
const CAP_LIMIT: usize = 16 * 1024;

pub trait Read {
    #[cfg(feature = "use_std")]
    type Error: std::error::Error + 'static;

    #[cfg(not(feature = "use_std"))]
    type Error: core::fmt::Display + core::fmt::Debug;

    /// Returns buffered input, up to `want` bytes.
    ///
    /// Returning fewer bytes than wanted is allowed; an empty buffer means
    /// the input is exhausted.
    fn fill(&mut self, want: usize) -> Result<&[u8], Self::Error>;

    fn advance(&mut self, n: usize);

    /// Enters one level of nesting. Returns `false` to refuse.
    #[inline]
    fn step_in(&mut self) -> bool {
        true
    }

    #[inline]
    fn step_out(&mut self) {}
}

impl<R: Read + ?Sized> Read for &'_ mut R {
    type Error = R::Error;

    #[inline]
    fn fill(&mut self, want: usize) -> Result<&[u8], Self::Error> {
        (**self).fill(want)
    }

    #[inline]
    fn advance(&mut self, n: usize) {
        (**self).advance(n)
    }

    #[inline]
    fn step_in(&mut self) -> bool {
        (**self).step_in()
    }

    #[inline]
    fn step_out(&mut self) {
        (**self).step_out()
    }
}

pub struct SliceReader<'a> {
    buf: &'a [u8],
    limit: usize
}

impl SliceReader<'_> {
    pub fn new(buf: &[u8]) -> SliceReader<'_> {
        SliceReader::with_limit(buf, DEFAULT_DEPTH_LIMIT)
    }

    /// Reader that refuses lists and compounds nested deeper than `limit`.
    pub fn with_limit(buf: &[u8], limit: usize) -> SliceReader<'_> {
        SliceReader { buf, limit }
    }

    /// Unread input.
    #[inline]
    pub fn remaining(&self) -> &[u8] {
        self.buf
    }
}

impl Read for SliceReader<'_> {
    type Error = Infallible;

    #[inline]
    fn fill(&mut self, want: usize) -> Result<&[u8], Self::Error> {
        let len = cmp::min(self.buf.len(), want);
        Ok(&self.buf[..len])
    }

    #[inline]
    fn advance(&mut self, n: usize) {
        let len = cmp::min(self.buf.len(), n);
        self.buf = &self.buf[len..];
    }

    #[inline]
    fn step_in(&mut self) -> bool {
        if let Some(limit) = self.limit.checked_sub(1) {
            self.limit = limit;
            true
        } else {
            false
        }
    }

    #[inline]
    fn step_out(&mut self) {
        self.limit += 1;
    }
}

/// Recursive-descent reader over a [`Read`] source.
///
/// Tracks the absolute offset so errors can point at the failing field.
pub struct Decoder<R> {
    reader: R,
    offset: usize
}

pub trait Decode: Sized {
    fn decode<R: Read>(decoder: &mut Decoder<R>) -> Result<Self, Error<R::Error>>;
}

impl<R: Read> Decoder<R> {
    pub fn new(reader: R) -> Decoder<R> {
        Decoder { reader, offset: 0 }
    }

    /// Bytes consumed so far.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    fn pull_exact(&mut self, name: &'static str, buf: &mut [u8]) -> Result<(), Error<R::Error>> {
        let start = self.offset;
        let mut pos = 0;

        while pos < buf.len() {
            let want = buf.len() - pos;
            let n = {
                let readbuf = self.reader.fill(want).map_err(Error::read)?;
                let n = cmp::min(readbuf.len(), want);
                buf[pos..][..n].copy_from_slice(&readbuf[..n]);
                n
            };
            if n == 0 {
                return Err(Error::eof(name, start, buf.len()));
            }
            self.reader.advance(n);
            self.offset += n;
            pos += n;
        }

        Ok(())
    }

    #[inline]
    fn pull<const N: usize>(&mut self, name: &'static str) -> Result<[u8; N], Error<R::Error>> {
        let mut buf = [0; N];
        self.pull_exact(name, &mut buf)?;
        Ok(buf)
    }

    fn pull_bytes(&mut self, name: &'static str, len: usize) -> Result<Vec<u8>, Error<R::Error>> {
        let start = self.offset;
        let mut buf = Vec::with_capacity(cmp::min(len, CAP_LIMIT));
        let mut left = len;

        while left != 0 {
            let n = {
                let readbuf = self.reader.fill(left).map_err(Error::read)?;
                let n = cmp::min(readbuf.len(), left);
                buf.extend_from_slice(&readbuf[..n]);
                n
            };
            if n == 0 {
                return Err(Error::eof(name, start, len));
            }
            self.reader.advance(n);
            self.offset += n;
            left -= n;
        }

        Ok(buf)
    }

    /// Reads an `i32` length prefix, rejecting negative values.
    fn pull_len(&mut self, name: &'static str) -> Result<usize, Error<R::Error>> {
        let offset = self.offset;
        let len = i32::from_le_bytes(self.pull(name)?);
        usize::try_from(len).map_err(|_| Error::negative_length(name, offset, len))
    }

    fn pull_text(&mut self, name: &'static str) -> Result<Text, Error<R::Error>> {
        let len = u16::from_le_bytes(self.pull(name)?);
        let buf = self.pull_bytes(name, len.into())?;
        Ok(Text::from_bytes(buf))
    }

    fn pull_kind(&mut self) -> Result<Kind, Error<R::Error>> {
        let offset = self.offset;
        let [id] = self.pull::<1>("type id")?;
        Kind::from_id(id).ok_or_else(|| Error::unknown_kind(offset, id))
    }

    /// Reads one named tag.
    ///
    /// Returns `None` on the compound sentinel.
    pub fn read_tag(&mut self) -> Result<Option<Tag>, Error<R::Error>> {
        let offset = self.offset;
        let kind = self.pull_kind()?;
        if kind == Kind::End {
            return Ok(None);
        }
        let name = self.pull_text("name")?;
        let value = self.read_value_at(kind, offset)?;
        Ok(Some(Tag { name, value }))
    }

    /// Reads an unnamed value whose kind is already known.
    pub fn read_value(&mut self, kind: Kind) -> Result<Value, Error<R::Error>> {
        let offset = self.offset;
        self.read_value_at(kind, offset)
    }

    fn read_value_at(&mut self, kind: Kind, offset: usize) -> Result<Value, Error<R::Error>> {
        let value = match kind {
            Kind::End => return Err(Error::unexpected_end(offset)),
            Kind::Byte => Value::Byte(i8::from_le_bytes(self.pull("byte")?)),
            Kind::Short => Value::Short(i16::from_le_bytes(self.pull("short")?)),
            Kind::Int => Value::Int(i32::from_le_bytes(self.pull("int")?)),
            Kind::Long => Value::Long(i64::from_le_bytes(self.pull("long")?)),
            Kind::Float => Value::Float(f32::from_le_bytes(self.pull("float")?)),
            Kind::Double => Value::Double(f64::from_le_bytes(self.pull("double")?)),
            Kind::ByteArray => {
                let len = self.pull_len("byte array")?;
                Value::ByteArray(self.pull_bytes("byte array", len)?)
            },
            Kind::String => Value::String(self.pull_text("string")?),
            Kind::List => Value::List(self.read_list(offset)?),
            Kind::Compound => Value::Compound(self.read_compound(offset)?),
            Kind::IntArray => {
                let len = self.pull_len("int array")?;
                let mut buf = Vec::with_capacity(cmp::min(len, CAP_LIMIT / 4));
                for _ in 0..len {
                    buf.push(i32::from_le_bytes(self.pull("int array")?));
                }
                Value::IntArray(buf)
            }
        };
        Ok(value)
    }

    fn read_list(&mut self, offset: usize) -> Result<List, Error<R::Error>> {
        let mut guard = DepthGuard::enter(self)
            .ok_or_else(|| Error::depth_overflow("list", offset))?;
        let this = guard.get_mut();

        let kind_offset = this.offset;
        let kind = this.pull_kind()?;
        let len = this.pull_len("list")?;
        if kind == Kind::End && len != 0 {
            return Err(Error::unexpected_end(kind_offset));
        }

        let mut elements = Vec::with_capacity(cmp::min(len, CAP_LIMIT / 8));
        for _ in 0..len {
            elements.push(this.read_value(kind)?);
        }
        Ok(List::from_decoded(kind, elements))
    }

    fn read_compound(&mut self, offset: usize) -> Result<Compound, Error<R::Error>> {
        let mut guard = DepthGuard::enter(self)
            .ok_or_else(|| Error::depth_overflow("compound", offset))?;
        let this = guard.get_mut();

        let mut compound = Compound::new();
        while let Some(tag) = this.read_tag()? {
            compound.push(tag);
        }
        Ok(compound)
    }
}

impl Decode for Tag {
    /// Reads a named tag; the sentinel is an error here.
    fn decode<R: Read>(decoder: &mut Decoder<R>) -> Result<Self, Error<R::Error>> {
        let offset = decoder.offset();
        decoder.read_tag()?
            .ok_or_else(|| Error::unexpected_end(offset))
    }
}
