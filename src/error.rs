use core::fmt;
use crate::core::types::Kind;


/// Static String
pub type StaticStr = &'static str;

#[derive(Debug)]
#[non_exhaustive]
pub enum DecodeError<E> {
    Read(E),
    /// The input ended before a field was complete.
    Eof {
        name: StaticStr,
        offset: usize,
        expect: usize
    },
    UnknownKind {
        offset: usize,
        found: u8
    },
    /// A sentinel or `End` element where a value was required.
    UnexpectedEnd {
        offset: usize
    },
    NegativeLength {
        name: StaticStr,
        offset: usize,
        found: i32
    },
    DepthOverflow {
        name: StaticStr,
        offset: usize
    },
    TrailingBytes {
        offset: usize,
        remaining: usize
    },
    HeaderLength {
        expect: u32,
        found: usize
    },
}

impl<E> DecodeError<E> {
    #[cold]
    pub(crate) fn read(err: E) -> DecodeError<E> {
        DecodeError::Read(err)
    }

    #[cold]
    pub(crate) fn eof(name: StaticStr, offset: usize, expect: usize) -> DecodeError<E> {
        DecodeError::Eof { name, offset, expect }
    }

    #[cold]
    pub(crate) fn unknown_kind(offset: usize, found: u8) -> DecodeError<E> {
        DecodeError::UnknownKind { offset, found }
    }

    #[cold]
    pub(crate) fn unexpected_end(offset: usize) -> DecodeError<E> {
        DecodeError::UnexpectedEnd { offset }
    }

    #[cold]
    pub(crate) fn negative_length(name: StaticStr, offset: usize, found: i32) -> DecodeError<E> {
        DecodeError::NegativeLength { name, offset, found }
    }

    #[cold]
    pub(crate) fn depth_overflow(name: StaticStr, offset: usize) -> DecodeError<E> {
        DecodeError::DepthOverflow { name, offset }
    }

    #[cold]
    pub(crate) fn trailing_bytes(offset: usize, remaining: usize) -> DecodeError<E> {
        DecodeError::TrailingBytes { offset, remaining }
    }

    #[cold]
    pub(crate) fn header_length(expect: u32, found: usize) -> DecodeError<E> {
        DecodeError::HeaderLength { expect, found }
    }

    /// Byte offset the error refers to, if any.
    pub fn offset(&self) -> Option<usize> {
        match self {
            DecodeError::Eof { offset, .. }
                | DecodeError::UnknownKind { offset, .. }
                | DecodeError::UnexpectedEnd { offset }
                | DecodeError::NegativeLength { offset, .. }
                | DecodeError::DepthOverflow { offset, .. }
                | DecodeError::TrailingBytes { offset, .. } => Some(*offset),
            DecodeError::Read(_) | DecodeError::HeaderLength { .. } => None
        }
    }
}

impl<E: fmt::Display> fmt::Display for DecodeError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DecodeError::Read(err) => write!(f, "read failed: {}", err),
            DecodeError::Eof { name, offset, expect } =>
                write!(f, "unexpected end of input at offset {}: {} needs {} bytes", offset, name, expect),
            DecodeError::UnknownKind { offset, found } =>
                write!(f, "unknown type id {:#04x} at offset {}", found, offset),
            DecodeError::UnexpectedEnd { offset } =>
                write!(f, "end tag where a value was expected at offset {}", offset),
            DecodeError::NegativeLength { name, offset, found } =>
                write!(f, "negative {} length {} at offset {}", name, found, offset),
            DecodeError::DepthOverflow { name, offset } =>
                write!(f, "{} nested too deeply at offset {}", name, offset),
            DecodeError::TrailingBytes { offset, remaining } =>
                write!(f, "{} trailing bytes after the root tag at offset {}", remaining, offset),
            DecodeError::HeaderLength { expect, found } =>
                write!(f, "header declares {} payload bytes, found {}", expect, found),
        }
    }
}

#[cfg(feature = "use_std")]
impl<E: std::error::Error + 'static> std::error::Error for DecodeError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DecodeError::Read(err) => Some(err),
            _ => None
        }
    }
}

#[non_exhaustive]
pub enum EncodeError<E> {
    Write(E),
    /// A length does not fit its field.
    LengthOverflow {
        name: StaticStr,
        found: usize
    },
    /// A list element does not have the list's declared kind.
    ListMismatch {
        expected: Kind,
        found: Kind
    },
}

impl<E> From<E> for EncodeError<E> {
    fn from(err: E) -> EncodeError<E> {
        EncodeError::Write(err)
    }
}

impl<E> EncodeError<E> {
    #[cold]
    pub(crate) fn length_overflow(name: StaticStr, found: usize) -> EncodeError<E> {
        EncodeError::LengthOverflow { name, found }
    }

    #[cold]
    pub(crate) fn list_mismatch(expected: Kind, found: Kind) -> EncodeError<E> {
        EncodeError::ListMismatch { expected, found }
    }
}

#[cfg(feature = "use_std")]
impl<E: std::error::Error + 'static> std::error::Error for EncodeError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EncodeError::Write(err) => Some(err),
            _ => None
        }
    }
}

impl<E: fmt::Debug> fmt::Debug for EncodeError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EncodeError::Write(err) => fmt::Debug::fmt(err, f),
            EncodeError::LengthOverflow { name, found } => f.debug_struct("LengthOverflow")
                .field("name", name)
                .field("found", found)
                .finish(),
            EncodeError::ListMismatch { expected, found } => f.debug_struct("ListMismatch")
                .field("expected", expected)
                .field("found", found)
                .finish()
        }
    }
}

impl<E: fmt::Display> fmt::Display for EncodeError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EncodeError::Write(err) => fmt::Display::fmt(err, f),
            EncodeError::LengthOverflow { name, found } =>
                write!(f, "{} length {} does not fit its length field", name, found),
            EncodeError::ListMismatch { expected, found } =>
                write!(f, "list of {} holds a {} element", expected, found)
        }
    }
}

/// A value was viewed as a kind it does not have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeMismatch {
    pub expected: Kind,
    pub found: Kind
}

impl TypeMismatch {
    #[cold]
    pub(crate) fn new(expected: Kind, found: Kind) -> TypeMismatch {
        TypeMismatch { expected, found }
    }
}

impl fmt::Display for TypeMismatch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "expected {}, found {}", self.expected, self.found)
    }
}

#[cfg(feature = "use_std")]
impl std::error::Error for TypeMismatch {}
