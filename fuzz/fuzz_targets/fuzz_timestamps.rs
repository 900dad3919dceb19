#![no_main]

use libfuzzer_sys::fuzz_target;
use pcore::{decode_timestamps, encode_timestamps, find_block_boundaries};

fuzz_target!(|data: &[u8]| {
    let timestamps: Vec<u64> = data
        .chunks_exact(8)
        .map(|c| u64::from_le_bytes(c.try_into().unwrap()))
        .collect();

    let boundaries = find_block_boundaries(&timestamps);

    // Segmenter output is well formed for any input
    if timestamps.is_empty() {
        assert!(boundaries.is_empty());
    } else {
        assert_eq!(boundaries[0], 0);
        assert!(boundaries.windows(2).all(|w| w[0] < w[1]));
        assert!(*boundaries.last().unwrap() < timestamps.len());
    }

    // Arbitrary series may be decreasing or too sparse, which must fail cleanly
    let Ok(container) = encode_timestamps(&timestamps, &boundaries) else {
        return;
    };
    let mut lengths: Vec<usize> = boundaries.windows(2).map(|w| w[1] - w[0]).collect();
    if let Some(&last) = boundaries.last() {
        lengths.push(timestamps.len() - last);
    }
    let decoded = decode_timestamps(&container, &lengths).expect("encoded container must decode");
    assert_eq!(decoded, timestamps);
});
