#![no_main]

use commonware_bencode::{decode, decode_cfg, encode, Config};
use libfuzzer_sys::fuzz_target;

fn fuzz(data: &[u8]) {
    // Arbitrary input must never panic
    let mut lenient = data;
    let Ok(value) = decode(&mut lenient) else {
        return;
    };
    let consumed = data.len() - lenient.len();

    // Re-encoding never writes more than was read (keys may have been reordered)
    let mut encoded = Vec::new();
    let written = encode(&mut encoded, &value).expect("failed to encode a decoded value");
    assert_eq!(written, consumed);

    // Input accepted by the strict config is already canonical
    let mut strict = data;
    if decode_cfg(&mut strict, &Config::canonical()).is_ok() {
        assert_eq!(strict.len(), lenient.len());
        assert_eq!(&encoded[..], &data[..consumed]);
    }
}

fuzz_target!(|data: &[u8]| {
    fuzz(data);
});
