#![no_main]

use libfuzzer_sys::fuzz_target;
use lenbt::Kind;

fuzz_target!(|data: &[u8]| {
    // anything that decodes must encode back to the same bytes
    if let Ok(tag) = lenbt::decode(data) {
        let buf = lenbt::encode(&tag).unwrap();
        assert_eq!(buf, data);
        assert_eq!(lenbt::decode(&buf).unwrap(), tag);
    }

    if let Ok(value) = lenbt::decode_value(data, Kind::Compound) {
        assert_eq!(lenbt::encode_value(&value).unwrap(), data);
    }

    let _ = lenbt::decode_with_header(data);
});
