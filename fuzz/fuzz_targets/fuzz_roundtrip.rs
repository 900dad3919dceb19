#![no_main]

use libfuzzer_sys::fuzz_target;
use pcore::{
    AbsoluteBlock, AbsoluteTimestampsContainer, ChannelMetadata, Color, Data, DataForm, Header, PpgMetaData, Sensor,
    SensorType,
};

fuzz_target!(|data: &[u8]| {
    // Chunks are (ts_delta: u16, value: i32) tuples
    let mut ts = 1_700_000_000_000u64;
    let mut timestamps = Vec::new();
    let mut values = Vec::new();
    for chunk in data.chunks_exact(6) {
        ts += u64::from(u16::from_le_bytes([chunk[0], chunk[1]]));
        timestamps.push(ts);
        values.push(i32::from_le_bytes([chunk[2], chunk[3], chunk[4], chunk[5]]));
    }

    let metadata = ChannelMetadata::Ppg(PpgMetaData::with_color(Color::Green));
    let sensor = Sensor::from_absolute(
        SensorType::Ppg,
        vec![(metadata, AbsoluteBlock::new(values.clone()))],
        AbsoluteTimestampsContainer::new(timestamps.clone()),
    )
    .expect("non-decreasing timestamps with u16 gaps must encode");

    // Property 1: both forms agree with the input
    assert_eq!(sensor.absolute_timestamps().timestamps(), &timestamps[..]);
    assert_eq!(sensor.channels()[0].absolute_block().values(), &values[..]);

    // Property 2: every interior block holds at least two samples
    let blocks = sensor.channels()[0].differential_blocks();
    if let Some((_, interior)) = blocks.split_last() {
        assert!(interior.iter().all(|b| b.len() >= 2), "short interior block");
    }

    // Property 3: wire round trip is lossless
    let doc = Data::new(Header::default(), vec![sensor]);
    let bytes = doc.to_wire_bytes().unwrap();
    let decoded = Data::from_wire_bytes(&bytes).unwrap();
    assert_eq!(decoded.sensors, doc.sensors, "wire round trip mismatch");

    // Property 4: JSON round trip in both forms is lossless
    for form in [DataForm::Absolute, DataForm::Differential] {
        let json = doc.to_json_string(form, false).unwrap();
        let parsed = Data::from_json_str(&json).unwrap();
        assert_eq!(parsed.sensors, doc.sensors, "JSON round trip mismatch");
    }
});
