//! The optional 8-byte file header.
//!
//! ```text
//! header = kind:i32 ~ length:u32 ~ payload:u8{length}
//! ```

use core::convert::Infallible;
use crate::core::enc;
use crate::error::{ DecodeError, EncodeError };


pub const HEADER_LEN: usize = 8;

/// Header kind identifier.
///
/// Unknown values are kept as-is so they survive a rewrite.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde1", derive(serde::Serialize, serde::Deserialize))]
pub struct HeaderKind(pub i32);

impl HeaderKind {
    /// Reserved: the payload has no header.
    pub const NONE: HeaderKind = HeaderKind(-1);
    pub const LEVEL_DAT: HeaderKind = HeaderKind(8);

    #[inline]
    pub fn is_none(self) -> bool {
        self == HeaderKind::NONE
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Header {
    pub kind: HeaderKind,
    pub length: u32,
}

/// Splits a header off `buf`.
///
/// The declared length must match the rest of the buffer exactly.
pub fn split(buf: &[u8]) -> Result<(Header, &[u8]), DecodeError<Infallible>> {
    if buf.len() < HEADER_LEN {
        return Err(DecodeError::eof("header", 0, HEADER_LEN));
    }
    let (head, payload) = buf.split_at(HEADER_LEN);
    let mut kind = [0; 4];
    let mut length = [0; 4];
    kind.copy_from_slice(&head[..4]);
    length.copy_from_slice(&head[4..]);

    let header = Header {
        kind: HeaderKind(i32::from_le_bytes(kind)),
        length: u32::from_le_bytes(length)
    };
    if usize::try_from(header.length).ok() != Some(payload.len()) {
        return Err(DecodeError::header_length(header.length, payload.len()));
    }

    log::debug!("header kind {} with {} payload bytes", header.kind.0, header.length);
    Ok((header, payload))
}

/// Writes `payload` behind a header of the given kind.
///
/// [`HeaderKind::NONE`] writes the payload alone.
pub fn prepend<W: enc::Write>(kind: HeaderKind, payload: &[u8], writer: &mut W)
    -> Result<(), EncodeError<W::Error>>
{
    if !kind.is_none() {
        let length = u32::try_from(payload.len())
            .map_err(|_| EncodeError::length_overflow("payload", payload.len()))?;
        writer.push(&kind.0.to_le_bytes())?;
        writer.push(&length.to_le_bytes())?;
        log::debug!("header kind {} with {} payload bytes", kind.0, length);
    }
    writer.push(payload)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::enc::BufWriter;

    #[test]
    fn test_split_prepend() {
        let payload = [0x0a, 0x00, 0x00, 0x00];
        let mut writer = BufWriter::new(Vec::new());
        prepend(HeaderKind::LEVEL_DAT, &payload, &mut writer).unwrap();
        let buf = writer.into_inner();
        assert_eq!(buf, [8, 0, 0, 0, 4, 0, 0, 0, 0x0a, 0, 0, 0]);

        let (header, rest) = split(&buf).unwrap();
        assert_eq!(header, Header { kind: HeaderKind::LEVEL_DAT, length: 4 });
        assert_eq!(rest, payload);
    }

    #[test]
    fn test_prepend_none() {
        let mut writer = BufWriter::new(Vec::new());
        prepend(HeaderKind::NONE, &[1, 2], &mut writer).unwrap();
        assert_eq!(writer.into_inner(), [1, 2]);
    }

    #[test]
    fn test_split_rejects() {
        assert!(matches!(split(&[8, 0, 0]), Err(DecodeError::Eof { name: "header", .. })));
        assert!(matches!(
            split(&[8, 0, 0, 0, 5, 0, 0, 0, 1]),
            Err(DecodeError::HeaderLength { expect: 5, found: 1 })
        ));
    }
}
