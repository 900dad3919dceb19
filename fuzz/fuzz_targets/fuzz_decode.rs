#![no_main]

use libfuzzer_sys::fuzz_target;
use pcore::Data;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must never panic, only fail to decode
    let Ok(decoded) = Data::from_wire_bytes(data) else {
        return;
    };

    // Channels with an empty metadata message decode but cannot be written back
    let Ok(bytes) = decoded.to_wire_bytes() else {
        return;
    };
    let again = Data::from_wire_bytes(&bytes).expect("re-encoded document must decode");
    assert_eq!(decoded, again, "wire round trip mismatch");
});
