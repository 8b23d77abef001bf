//! Reading and writing through `std::io`.
//!
//! Output is always encoded in full before anything is written, so a tree
//! that fails to encode never leaves a partial payload behind.

use std::{ fmt, fs };
use std::io;
use std::path::Path;
use std::convert::Infallible;
use std::collections::TryReserveError;
use crate::core::enc;
use crate::core::{ Tag, Value, Kind };
use crate::header::HeaderKind;
use crate::error::{ DecodeError, EncodeError };


#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    Io(io::Error),
    Decode(DecodeError<Infallible>),
    Encode(EncodeError<io::Error>),
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}

impl From<DecodeError<Infallible>> for Error {
    fn from(err: DecodeError<Infallible>) -> Error {
        Error::Decode(err)
    }
}

impl From<EncodeError<io::Error>> for Error {
    fn from(err: EncodeError<io::Error>) -> Error {
        Error::Encode(err)
    }
}

impl From<EncodeError<TryReserveError>> for Error {
    fn from(err: EncodeError<TryReserveError>) -> Error {
        match err {
            EncodeError::Write(err) => Error::Io(io::Error::new(io::ErrorKind::OutOfMemory, err)),
            EncodeError::LengthOverflow { name, found } =>
                Error::Encode(EncodeError::length_overflow(name, found)),
            EncodeError::ListMismatch { expected, found } =>
                Error::Encode(EncodeError::list_mismatch(expected, found)),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "io failed: {}", err),
            Error::Decode(err) => write!(f, "decode failed: {}", err),
            Error::Encode(err) => write!(f, "encode failed: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Decode(err) => Some(err),
            Error::Encode(err) => Some(err),
        }
    }
}

struct IoWrite<W>(W);

impl<W: io::Write> enc::Write for IoWrite<W> {
    type Error = io::Error;

    #[inline]
    fn push(&mut self, input: &[u8]) -> Result<(), Self::Error> {
        self.0.write_all(input)
    }
}

fn read_all<R: io::Read>(mut reader: R) -> Result<Vec<u8>, Error> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    log::debug!("read {} bytes", buf.len());
    Ok(buf)
}

/// Reads `reader` to its end and decodes it.
///
/// With `header` set, the first 8 bytes are a header; otherwise the kind
/// returned is [`HeaderKind::NONE`].
pub fn from_reader<R: io::Read>(reader: R, header: bool) -> Result<(HeaderKind, Tag), Error> {
    let buf = read_all(reader)?;
    let output = if header {
        crate::decode_with_header(&buf)?
    } else {
        (HeaderKind::NONE, crate::decode(&buf)?)
    };
    Ok(output)
}

/// Like [`from_reader`], for an unnamed root of the given kind.
pub fn from_reader_value<R: io::Read>(reader: R, kind: Kind, header: bool)
    -> Result<(HeaderKind, Value), Error>
{
    let buf = read_all(reader)?;
    let output = if header {
        crate::decode_value_with_header(&buf, kind)?
    } else {
        (HeaderKind::NONE, crate::decode_value(&buf, kind)?)
    };
    Ok(output)
}

pub fn read_file<P: AsRef<Path>>(path: P, header: bool) -> Result<(HeaderKind, Tag), Error> {
    let path = path.as_ref();
    log::debug!("reading {}", path.display());
    from_reader(io::BufReader::new(fs::File::open(path)?), header)
}

pub fn read_file_value<P: AsRef<Path>>(path: P, kind: Kind, header: bool)
    -> Result<(HeaderKind, Value), Error>
{
    let path = path.as_ref();
    log::debug!("reading unnamed {} from {}", kind, path.display());
    from_reader_value(io::BufReader::new(fs::File::open(path)?), kind, header)
}

fn write_all<W: io::Write>(writer: W, buf: &[u8]) -> Result<(), Error> {
    let mut writer = IoWrite(writer);
    enc::Write::push(&mut writer, buf)?;
    log::debug!("wrote {} bytes", buf.len());
    Ok(())
}

/// Encodes `tag` into `writer`, behind a header unless `kind` is
/// [`HeaderKind::NONE`].
///
/// Nothing is written if the tag fails to encode.
pub fn to_writer<W: io::Write>(writer: W, tag: &Tag, kind: HeaderKind) -> Result<(), Error> {
    let buf = crate::encode_with_header(tag, kind)?;
    write_all(writer, &buf)
}

/// Like [`to_writer`], for an unnamed root.
pub fn to_writer_value<W: io::Write>(writer: W, value: &Value, kind: HeaderKind) -> Result<(), Error> {
    let buf = crate::encode_value_with_header(value, kind)?;
    write_all(writer, &buf)
}

fn replace_file(path: &Path, buf: &[u8]) -> Result<(), Error> {
    log::debug!("writing {}", path.display());
    let mut writer = io::BufWriter::new(fs::File::create(path)?);
    write_all(&mut writer, buf)?;
    io::Write::flush(&mut writer)?;
    Ok(())
}

/// Encodes `tag` and replaces the file at `path` with it.
///
/// The file is only opened once encoding has succeeded.
pub fn write_file<P: AsRef<Path>>(path: P, tag: &Tag, kind: HeaderKind) -> Result<(), Error> {
    let buf = crate::encode_with_header(tag, kind)?;
    replace_file(path.as_ref(), &buf)
}

pub fn write_file_value<P: AsRef<Path>>(path: P, value: &Value, kind: HeaderKind) -> Result<(), Error> {
    let buf = crate::encode_value_with_header(value, kind)?;
    replace_file(path.as_ref(), &buf)
}
