use std::convert::Infallible;
use lenbt::{ Tag, Value, List, Compound, Kind, DecodeError, HeaderKind };
use lenbt::core::dec::{ self, Decode, Decoder, SliceReader };


/// Hands out one byte per fill.
struct ByteReader<'a> {
    buf: &'a [u8]
}

impl dec::Read for ByteReader<'_> {
    type Error = Infallible;

    #[inline]
    fn fill(&mut self, want: usize) -> Result<&[u8], Self::Error> {
        let len = core::cmp::min(self.buf.len(), core::cmp::min(want, 1));
        Ok(&self.buf[..len])
    }

    #[inline]
    fn advance(&mut self, n: usize) {
        let len = core::cmp::min(self.buf.len(), n);
        self.buf = &self.buf[len..];
    }
}

fn sample() -> Tag {
    let mut abilities = Compound::new();
    abilities.insert("flying", 0i8);
    abilities.insert("walkSpeed", 0.1f32);

    let mut version = List::new(Kind::Int);
    for n in [1i32, 20, 30] {
        version.push(n).unwrap();
    }

    let mut root = Compound::new();
    root.insert("LevelName", "Bedrock level");
    root.insert("RandomSeed", -4_372_119_066_402_180_316i64);
    root.insert("abilities", abilities);
    root.insert("lastOpenedWithVersion", version);
    root.insert("data", vec![0u8, 1, 2, 255]);
    root.insert("heights", vec![64i32, -64, 320]);
    Tag::new("", root)
}

#[test]
fn test_decode_short_reads() -> anyhow::Result<()> {
    let tag = sample();
    let buf = lenbt::encode(&tag)?;

    let mut decoder = Decoder::new(ByteReader { buf: &buf });
    let output = Tag::decode(&mut decoder)?;
    assert_eq!(output, tag);
    assert_eq!(decoder.offset(), buf.len());

    Ok(())
}

#[test]
fn test_decode_empty_list() -> anyhow::Result<()> {
    let buf = [0x09, 0x04, 0x00, 0x74, 0x65, 0x73, 0x74, 0x05, 0x00, 0x00, 0x00, 0x00];
    let tag = lenbt::decode(&buf)?;

    assert_eq!(tag.name, "test");
    let list = tag.as_list()?;
    assert_eq!(list.kind(), Kind::Float);
    assert!(list.is_empty());

    assert_eq!(lenbt::encode(&tag)?, buf);
    Ok(())
}

#[test]
fn test_decode_end_list() -> anyhow::Result<()> {
    let tag = lenbt::decode(&[0x09, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00])?;
    assert_eq!(tag.as_list()?.kind(), Kind::End);

    let err = lenbt::decode(&[0x09, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00]).unwrap_err();
    assert!(matches!(err, DecodeError::UnexpectedEnd { offset: 3 }), "{:?}", err);
    Ok(())
}

#[test]
fn test_decode_rejects() {
    macro_rules! test {
        ( $( $input:expr => $expected:pat ),* $( , )? ) => {
            $(
                let err = lenbt::decode(&$input).unwrap_err();
                assert!(matches!(err, $expected), "{:?}: {:?}", stringify!($input), err);
            )*
        }
    }

    test!{
        [] => DecodeError::Eof { name: "type id", offset: 0, expect: 1 },
        [0x00] => DecodeError::UnexpectedEnd { offset: 0 },
        [0xff] => DecodeError::UnknownKind { offset: 0, found: 0xff },
        [0x0a, 0x00, 0x00, 0x0c] => DecodeError::UnknownKind { offset: 3, found: 0x0c },
        [0x03, 0x00, 0x00, 0x01, 0x00] => DecodeError::Eof { name: "int", offset: 3, expect: 4 },
        [0x08, 0x05, 0x00, 0x61] => DecodeError::Eof { name: "name", offset: 3, expect: 5 },
        [0x07, 0x00, 0x00, 0xff, 0xff, 0xff, 0xff] =>
            DecodeError::NegativeLength { name: "byte array", offset: 3, found: -1 },
        [0x09, 0x00, 0x00, 0x03, 0x00, 0x00, 0x00, 0x80] =>
            DecodeError::NegativeLength { name: "list", offset: 4, found: i32::MIN },
        [0x0a, 0x00, 0x00, 0x00, 0xff] => DecodeError::TrailingBytes { offset: 4, remaining: 1 },
        [0x0a, 0x00, 0x00, 0x01, 0x01, 0x00, 0x61, 0x05] => DecodeError::Eof { .. },
    }
}

#[test]
fn test_decode_huge_length() {
    // claims i32::MAX bytes but carries none
    let err = lenbt::decode(&[0x07, 0x00, 0x00, 0xff, 0xff, 0xff, 0x7f]).unwrap_err();
    assert!(matches!(err, DecodeError::Eof { name: "byte array", offset: 7, expect: 0x7fff_ffff }));

    let err = lenbt::decode(&[0x0b, 0x00, 0x00, 0xff, 0xff, 0xff, 0x7f, 0x01]).unwrap_err();
    assert!(matches!(err, DecodeError::Eof { name: "int array", .. }));
}

#[test]
fn test_decode_depth_limit() {
    let buf = [
        0x0a, 0x00, 0x00,
        0x0a, 0x01, 0x00, 0x61,
        0x0a, 0x01, 0x00, 0x62,
        0x00, 0x00, 0x00
    ];

    let mut decoder = Decoder::new(SliceReader::with_limit(&buf, 2));
    let err = Tag::decode(&mut decoder).unwrap_err();
    assert!(matches!(err, DecodeError::DepthOverflow { name: "compound", offset: 7 }), "{:?}", err);

    let mut decoder = Decoder::new(SliceReader::with_limit(&buf, 3));
    let tag = Tag::decode(&mut decoder).unwrap();
    assert_eq!(tag.as_compound().unwrap().get("a").unwrap().kind(), Kind::Compound);

    // nested lists, each holding one list
    let mut buf = vec![0x09, 0x00, 0x00];
    for _ in 0..600 {
        buf.extend_from_slice(&[0x09, 0x01, 0x00, 0x00, 0x00]);
    }
    let err = lenbt::decode(&buf).unwrap_err();
    assert!(matches!(err, DecodeError::DepthOverflow { name: "list", .. }), "{:?}", err);
}

#[test]
fn test_decode_duplicate_names() -> anyhow::Result<()> {
    let buf = [
        0x0a, 0x00, 0x00,
        0x01, 0x01, 0x00, 0x61, 0x01,
        0x01, 0x01, 0x00, 0x61, 0x02,
        0x00
    ];
    let tag = lenbt::decode(&buf)?;
    let root = tag.as_compound()?;
    assert_eq!(root.len(), 2);
    assert_eq!(root.get("a").map(Tag::as_byte), Some(Ok(1)));
    assert_eq!(root.tags()[1].value, Value::Byte(2));

    assert_eq!(lenbt::encode(&tag)?, buf);
    Ok(())
}

#[test]
fn test_decode_raw_text() -> anyhow::Result<()> {
    // string value that is not UTF-8
    let buf = [0x08, 0x01, 0x00, 0x6b, 0x02, 0x00, 0xc3, 0x28];
    let tag = lenbt::decode(&buf)?;
    assert_eq!(tag.as_string()?.as_bytes(), [0xc3, 0x28]);
    assert_eq!(tag.as_string()?.as_str(), None);
    assert_eq!(lenbt::encode(&tag)?, buf);
    Ok(())
}

#[test]
fn test_decode_with_header() -> anyhow::Result<()> {
    let buf = [0x08, 0x00, 0x00, 0x00, 0x04, 0x00, 0x00, 0x00, 0x0a, 0x00, 0x00, 0x00];
    let (kind, tag) = lenbt::decode_with_header(&buf)?;
    assert_eq!(kind, HeaderKind::LEVEL_DAT);
    assert_eq!(tag, Tag::new("", Compound::new()));

    let err = lenbt::decode_with_header(&[0x08, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0xff]).unwrap_err();
    assert!(matches!(err, DecodeError::UnknownKind { offset: 8, found: 0xff }), "{:?}", err);

    let err = lenbt::decode_with_header(&buf[..11]).unwrap_err();
    assert!(matches!(err, DecodeError::HeaderLength { expect: 4, found: 3 }), "{:?}", err);
    Ok(())
}

#[test]
fn test_decode_unnamed_root() -> anyhow::Result<()> {
    // compound with no type id or name: { a: 5b }
    let buf = [0x01, 0x01, 0x00, 0x61, 0x05, 0x00];
    let value = lenbt::decode_value(&buf, Kind::Compound)?;
    assert_eq!(value.as_compound()?.get("a").map(Tag::as_byte), Some(Ok(5)));
    assert_eq!(lenbt::encode_value(&value)?, buf);

    let buf = [0x03, 0x02, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00];
    let value = lenbt::decode_value(&buf, Kind::List)?;
    let list = value.as_list()?;
    assert_eq!(list.kind(), Kind::Int);
    assert_eq!(list.as_slice(), [Value::Int(1), Value::Int(2)]);
    assert_eq!(lenbt::encode_value(&value)?, buf);

    let mut headed = vec![0x08, 0x00, 0x00, 0x00, 0x0d, 0x00, 0x00, 0x00];
    headed.extend_from_slice(&buf);
    assert_eq!(lenbt::decode_value_with_header(&headed, Kind::List)?, (HeaderKind::LEVEL_DAT, value.clone()));
    assert_eq!(lenbt::encode_value_with_header(&value, HeaderKind::LEVEL_DAT)?, headed);

    Ok(())
}

#[test]
fn test_decode_unnamed_rejects() {
    let err = lenbt::decode_value(&[0x00, 0xff], Kind::Compound).unwrap_err();
    assert!(matches!(err, DecodeError::TrailingBytes { offset: 1, remaining: 1 }), "{:?}", err);

    let err = lenbt::decode_value(&[0x00], Kind::End).unwrap_err();
    assert!(matches!(err, DecodeError::UnexpectedEnd { offset: 0 }), "{:?}", err);

    let err = lenbt::decode_value(&[0x01, 0x00], Kind::Int).unwrap_err();
    assert!(matches!(err, DecodeError::Eof { name: "int", offset: 0, expect: 4 }), "{:?}", err);

    let buf = [0x08, 0x00, 0x00, 0x00, 0x05, 0x00, 0x00, 0x00, 0x0c, 0x00, 0x00, 0x00, 0x00];
    let err = lenbt::decode_value_with_header(&buf, Kind::List).unwrap_err();
    assert!(matches!(err, DecodeError::UnknownKind { offset: 8, found: 0x0c }), "{:?}", err);
}
