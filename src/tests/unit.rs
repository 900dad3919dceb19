use crate::segment::{boundaries_to_lengths, validate_boundaries};
use crate::wire::{ProtobufAccMetaData, ProtobufChannel, ProtobufDifferentialBlock, ProtobufPpgMetaData, ProtobufSensor};
use crate::{
    decode_blocks, decode_timestamps, encode_blocks, encode_timestamps, find_block_boundaries, AbsoluteBlock,
    AbsoluteTimestampsContainer, AccMetaData, Channel, ChannelMetadata, Color, Coordinate, Data, DataForm,
    DifferentialBlock, DifferentialTimestampsContainer, Error, JsonChannel, Norm, PpgMetaData, Sensor, SensorType,
    Version,
};

const SCENARIO_TS: [u64; 5] = [0, 100, 200, 100_300, 100_400];
const SCENARIO_VALUES: [i32; 5] = [10, 12, 13, 20, 21];

fn green() -> ChannelMetadata {
    ChannelMetadata::Ppg(PpgMetaData::with_color(Color::Green))
}

fn scenario_sensor() -> Sensor {
    Sensor::from_absolute(
        SensorType::Ppg,
        vec![(green(), AbsoluteBlock::new(SCENARIO_VALUES.to_vec()))],
        AbsoluteTimestampsContainer::new(SCENARIO_TS.to_vec()),
    )
    .unwrap()
}

fn blocks(raw: &[&[i32]]) -> Vec<DifferentialBlock> {
    raw.iter().map(|b| DifferentialBlock::new(b.to_vec())).collect()
}

// ============================================================================
// Segmenter
// ============================================================================

#[test]
fn test_segment_empty() {
    assert!(find_block_boundaries(&[]).is_empty());
}

#[test]
fn test_segment_single_sample() {
    assert_eq!(find_block_boundaries(&[1_700_000_000_000]), vec![0]);
}

#[test]
fn test_segment_two_samples() {
    assert_eq!(find_block_boundaries(&[0, 40]), vec![0]);
}

#[test]
fn test_segment_constant_interval() {
    let ts: Vec<u64> = (0..100).map(|i| 1_000 + i * 40).collect();
    assert_eq!(find_block_boundaries(&ts), vec![0]);
}

#[test]
fn test_segment_scenario() {
    assert_eq!(find_block_boundaries(&SCENARIO_TS), vec![0, 3]);
}

#[test]
fn test_segment_reference_taken_after_boundary() {
    // 100, 100, 300, 500, 100: the 300 opens a block whose reference is 500
    let ts = [0, 100, 200, 500, 1000, 1100];
    assert_eq!(find_block_boundaries(&ts), vec![0, 3, 5]);
}

#[test]
fn test_segment_consecutive_changes() {
    // Differences 100, 200, 300: the block opened at 2 takes 300 as reference
    assert_eq!(find_block_boundaries(&[0, 100, 300, 600]), vec![0, 2]);
}

#[test]
fn test_segment_trailing_single_sample() {
    assert_eq!(find_block_boundaries(&[0, 10, 20, 30, 45]), vec![0, 4]);
}

#[test]
fn test_segment_duplicate_timestamps() {
    // Zero interval is a valid interval
    assert_eq!(find_block_boundaries(&[5, 5, 5, 6, 7]), vec![0, 3]);
}

#[test]
fn test_validate_boundaries() {
    assert!(validate_boundaries(&[], 0));
    assert!(!validate_boundaries(&[0], 0));
    assert!(!validate_boundaries(&[], 3));
    assert!(validate_boundaries(&[0], 3));
    assert!(validate_boundaries(&[0, 1, 2], 3));
    assert!(!validate_boundaries(&[1], 3));
    assert!(!validate_boundaries(&[0, 2, 2], 3));
    assert!(!validate_boundaries(&[0, 3], 3));
}

#[test]
fn test_boundaries_to_lengths() {
    assert_eq!(boundaries_to_lengths(&[0, 3], 5), vec![3, 2]);
    assert_eq!(boundaries_to_lengths(&[0], 1), vec![1]);
    assert_eq!(boundaries_to_lengths(&[0, 4], 5), vec![4, 1]);
    assert!(boundaries_to_lengths(&[], 0).is_empty());
}

// ============================================================================
// Value block codec
// ============================================================================

#[test]
fn test_encode_blocks_empty() {
    assert!(encode_blocks(&[], &[]).unwrap().is_empty());
    assert!(decode_blocks(&[]).is_empty());
}

#[test]
fn test_encode_blocks_single_value() {
    let b = encode_blocks(&[42], &[0]).unwrap();
    assert_eq!(b, blocks(&[&[42]]));
    assert_eq!(decode_blocks(&b), vec![42]);
}

#[test]
fn test_encode_blocks_one_boundary() {
    let b = encode_blocks(&[5, 7, 4, 4], &[0]).unwrap();
    assert_eq!(b, blocks(&[&[5, 2, -3, 0]]));
}

#[test]
fn test_encode_blocks_scenario() {
    let b = encode_blocks(&SCENARIO_VALUES, &[0, 3]).unwrap();
    assert_eq!(b, blocks(&[&[10, 2, 1], &[20, 1]]));
    assert_eq!(decode_blocks(&b), SCENARIO_VALUES);
}

#[test]
fn test_encode_blocks_trailing_single_sample() {
    let b = encode_blocks(&[1, 2, 3, 9], &[0, 3]).unwrap();
    assert_eq!(b, blocks(&[&[1, 1, 1], &[9]]));
    assert_eq!(decode_blocks(&b), vec![1, 2, 3, 9]);
}

#[test]
fn test_encode_blocks_every_sample_a_block() {
    let values = [3, -1, 8];
    let b = encode_blocks(&values, &[0, 1, 2]).unwrap();
    assert_eq!(b, blocks(&[&[3], &[-1], &[8]]));
    assert_eq!(decode_blocks(&b), values);
}

#[test]
fn test_encode_blocks_extreme_values() {
    let values = [i32::MAX, i32::MIN, i32::MAX, 0, i32::MIN];
    let b = encode_blocks(&values, &[0, 2]).unwrap();
    assert_eq!(decode_blocks(&b), values);
}

#[test]
fn test_encode_blocks_invalid_boundaries() {
    assert!(matches!(
        encode_blocks(&[1, 2, 3], &[]),
        Err(Error::InvalidBoundaries { len: 3, .. })
    ));
    assert!(matches!(
        encode_blocks(&[1, 2, 3], &[1]),
        Err(Error::InvalidBoundaries { .. })
    ));
    assert!(matches!(
        encode_blocks(&[1, 2, 3], &[0, 5]),
        Err(Error::InvalidBoundaries { .. })
    ));
    assert!(matches!(encode_blocks(&[], &[0]), Err(Error::InvalidBoundaries { .. })));
}

#[test]
fn test_decode_blocks_each_block_has_own_anchor() {
    // Second anchor is absolute, not relative to the first block
    assert_eq!(decode_blocks(&blocks(&[&[100, 1], &[7, -2]])), vec![100, 101, 7, 5]);
}

// ============================================================================
// Timestamp codec
// ============================================================================

#[test]
fn test_encode_timestamps_empty() {
    let c = encode_timestamps(&[], &[]).unwrap();
    assert_eq!(c, DifferentialTimestampsContainer::default());
    assert_eq!(c.first_timestamp_ms, 0);
    assert!(decode_timestamps(&c, &[]).unwrap().is_empty());
}

#[test]
fn test_encode_timestamps_single_sample() {
    let c = encode_timestamps(&[1_234], &[0]).unwrap();
    assert_eq!(c, DifferentialTimestampsContainer::new(1_234, vec![0], vec![0]));
    assert_eq!(decode_timestamps(&c, &[1]).unwrap(), vec![1_234]);
}

#[test]
fn test_encode_timestamps_one_block() {
    let ts = [1_000, 1_040, 1_080, 1_120];
    let c = encode_timestamps(&ts, &[0]).unwrap();
    assert_eq!(c, DifferentialTimestampsContainer::new(1_000, vec![0], vec![40]));
    assert_eq!(decode_timestamps(&c, &[4]).unwrap(), ts);
}

#[test]
fn test_encode_timestamps_scenario() {
    let c = encode_timestamps(&SCENARIO_TS, &[0, 3]).unwrap();
    assert_eq!(c.first_timestamp_ms, 0);
    assert_eq!(c.block_intervals_ms, vec![0, 100_300]);
    assert_eq!(c.timestamps_intervals_ms, vec![100, 100]);
    assert_eq!(decode_timestamps(&c, &[3, 2]).unwrap(), SCENARIO_TS);
}

#[test]
fn test_encode_timestamps_interior_blocks() {
    let ts = [0, 100, 200, 500, 1000, 1100];
    let boundaries = find_block_boundaries(&ts);
    let c = encode_timestamps(&ts, &boundaries).unwrap();
    assert_eq!(c.block_intervals_ms, vec![0, 500, 600]);
    assert_eq!(c.timestamps_intervals_ms, vec![100, 500, 0]);
    let lengths = boundaries_to_lengths(&boundaries, ts.len());
    assert_eq!(decode_timestamps(&c, &lengths).unwrap(), ts);
}

#[test]
fn test_encode_timestamps_trailing_single_sample_interval_zero() {
    let ts = [0, 10, 20, 30, 45];
    let c = encode_timestamps(&ts, &[0, 4]).unwrap();
    assert_eq!(c.block_intervals_ms, vec![0, 45]);
    assert_eq!(c.timestamps_intervals_ms, vec![10, 0]);
    assert_eq!(decode_timestamps(&c, &[4, 1]).unwrap(), ts);
}

#[test]
fn test_encode_timestamps_large_epoch() {
    let base = 1_700_000_000_000u64;
    let ts: Vec<u64> = (0..10).map(|i| base + i * 8).chain((0..5).map(|i| base + 60_000 + i * 20)).collect();
    let boundaries = find_block_boundaries(&ts);
    assert_eq!(boundaries, vec![0, 10]);
    let c = encode_timestamps(&ts, &boundaries).unwrap();
    assert_eq!(c.first_timestamp_ms, base);
    assert_eq!(decode_timestamps(&c, &[10, 5]).unwrap(), ts);
}

#[test]
fn test_encode_timestamps_non_monotonic() {
    let ts = [100, 50];
    assert!(matches!(
        encode_timestamps(&ts, &[0]),
        Err(Error::NonMonotonicTimestamps { index: 1 })
    ));
}

#[test]
fn test_encode_timestamps_interval_overflow() {
    let ts = [0, u64::from(u32::MAX) + 1];
    assert!(matches!(
        encode_timestamps(&ts, &[0]),
        Err(Error::IntervalOverflow { index: 0, .. })
    ));
}

#[test]
fn test_decode_timestamps_block_count_mismatch() {
    let c = DifferentialTimestampsContainer::new(0, vec![0, 100], vec![10, 10]);
    assert!(matches!(
        decode_timestamps(&c, &[3]),
        Err(Error::BlockCountMismatch {
            timestamp_blocks: 2,
            value_blocks: 1
        })
    ));
}

#[test]
fn test_decode_timestamps_malformed_container() {
    let c = DifferentialTimestampsContainer::new(0, vec![0], vec![10, 10]);
    assert!(matches!(
        decode_timestamps(&c, &[1, 1]),
        Err(Error::MalformedTimestamps { .. })
    ));
}

#[test]
fn test_decode_timestamps_overflow() {
    let c = DifferentialTimestampsContainer::new(u64::MAX - 5, vec![0], vec![10]);
    assert!(matches!(decode_timestamps(&c, &[2]), Err(Error::TimestampOverflow)));
}

// ============================================================================
// Channel
// ============================================================================

#[test]
fn test_channel_from_absolute_matches_from_differential() {
    let abs = Channel::from_absolute(green(), AbsoluteBlock::new(SCENARIO_VALUES.to_vec()), &[0, 3]).unwrap();
    let diff = Channel::from_differential(green(), abs.differential_blocks().to_vec()).unwrap();
    assert_eq!(abs, diff);
    assert_eq!(diff.absolute_block().values(), SCENARIO_VALUES);
    assert_eq!(abs.block_lengths(), vec![3, 2]);
    assert_eq!(abs.len(), 5);
}

#[test]
fn test_channel_equality_includes_metadata() {
    let a = Channel::from_differential(green(), blocks(&[&[1, 1]])).unwrap();
    let red = ChannelMetadata::Ppg(PpgMetaData::with_color(Color::Red));
    let b = Channel::from_differential(red, blocks(&[&[1, 1]])).unwrap();
    assert_ne!(a, b);
}

#[test]
fn test_channel_empty() {
    let c = Channel::from_absolute(green(), AbsoluteBlock::default(), &[]).unwrap();
    assert!(c.is_empty());
    assert!(c.differential_blocks().is_empty());
}

#[test]
fn test_channel_to_wire_requires_metadata() {
    let unset = Channel::from_differential(ChannelMetadata::Unset, blocks(&[&[1]])).unwrap();
    assert!(matches!(unset.to_wire(), Err(Error::InvalidMetadataState)));

    let empty_acc = ChannelMetadata::Acc(AccMetaData::default());
    let empty_acc = Channel::from_differential(empty_acc, blocks(&[&[1]])).unwrap();
    assert!(matches!(empty_acc.to_wire(), Err(Error::InvalidMetadataState)));
}

#[test]
fn test_channel_rejects_empty_block() {
    assert!(matches!(
        Channel::from_differential(green(), blocks(&[&[5, 1], &[]])),
        Err(Error::EmptyBlock { block: 1 })
    ));

    let msg = ProtobufChannel {
        differential_blocks: vec![ProtobufDifferentialBlock { differential_values: vec![] }],
        acc_metadata: None,
        ppg_metadata: Some(PpgMetaData::with_color(Color::Blue).to_wire()),
    };
    assert!(matches!(Channel::from_wire(&msg), Err(Error::EmptyBlock { block: 0 })));
}

#[test]
fn test_channel_json_forms() {
    let c = Channel::from_absolute(green(), AbsoluteBlock::new(SCENARIO_VALUES.to_vec()), &[0, 3]).unwrap();

    let abs = c.to_json(DataForm::Absolute);
    assert!(abs.differential_blocks.is_none());
    assert_eq!(Channel::from_json_absolute(&abs, &[0, 3]).unwrap(), c);

    let diff = c.to_json(DataForm::Differential);
    assert!(diff.absolute_block.is_none());
    assert_eq!(diff.ppg_metadata, Some(PpgMetaData::with_color(Color::Green)));
    assert_eq!(Channel::from_json_differential(&diff).unwrap(), c);

    assert!(matches!(
        Channel::from_json_differential(&abs),
        Err(Error::MissingField("differential_blocks"))
    ));
    assert!(matches!(
        Channel::from_json_absolute(&JsonChannel::default(), &[]),
        Err(Error::MissingField("absolute_block"))
    ));
}

#[test]
fn test_channel_wire_roundtrip() {
    let acc = ChannelMetadata::Acc(AccMetaData::with_coordinate(Coordinate::Y));
    let c = Channel::from_differential(acc, blocks(&[&[-4, 1, 1], &[0]])).unwrap();
    let msg = c.to_wire().unwrap();
    assert!(msg.acc_metadata.is_some());
    assert!(msg.ppg_metadata.is_none());
    assert_eq!(Channel::from_wire(&msg).unwrap(), c);
}

#[test]
fn test_channel_from_wire_both_metadata_set() {
    let msg = ProtobufChannel {
        differential_blocks: vec![ProtobufDifferentialBlock {
            differential_values: vec![1],
        }],
        acc_metadata: Some(ProtobufAccMetaData { coordinate: 1, norm: 0 }),
        ppg_metadata: Some(ProtobufPpgMetaData {
            color: 2,
            wavelength_nm: 0,
        }),
    };
    assert!(matches!(Channel::from_wire(&msg), Err(Error::InvalidMetadataState)));
}

#[test]
fn test_channel_from_wire_empty_slot_ignored() {
    let msg = ProtobufChannel {
        differential_blocks: vec![],
        acc_metadata: Some(ProtobufAccMetaData::default()),
        ppg_metadata: Some(ProtobufPpgMetaData {
            color: 0,
            wavelength_nm: 530,
        }),
    };
    let c = Channel::from_wire(&msg).unwrap();
    assert_eq!(*c.metadata(), ChannelMetadata::Ppg(PpgMetaData::with_wavelength(530)));
}

#[test]
fn test_channel_from_wire_unknown_enum() {
    let msg = ProtobufChannel {
        differential_blocks: vec![],
        acc_metadata: None,
        ppg_metadata: Some(ProtobufPpgMetaData {
            color: 99,
            wavelength_nm: 0,
        }),
    };
    assert!(matches!(
        Channel::from_wire(&msg),
        Err(Error::UnknownEnumValue { field: "color", value: 99 })
    ));
}

// ============================================================================
// Sensor
// ============================================================================

#[test]
fn test_sensor_scenario() {
    let sensor = scenario_sensor();
    assert_eq!(sensor.find_blocks_idxs(), vec![0, 3]);

    let c = &sensor.channels()[0];
    assert_eq!(c.differential_blocks(), blocks(&[&[10, 2, 1], &[20, 1]]).as_slice());

    let ts = sensor.differential_timestamps();
    assert_eq!(ts.first_timestamp_ms, 0);
    assert_eq!(ts.block_intervals_ms, vec![0, 100_300]);
    assert_eq!(ts.timestamps_intervals_ms, vec![100, 100]);

    assert_eq!(sensor.first_timestamp(), 0);
    assert_eq!(sensor.last_timestamp(), 100_400);
    assert_eq!(sensor.duration(), 100_400);
}

#[test]
fn test_sensor_differential_roundtrip() {
    let sensor = scenario_sensor();
    let rebuilt = Sensor::from_differential(
        sensor.sensor_type(),
        sensor.channels().to_vec(),
        sensor.differential_timestamps().clone(),
    )
    .unwrap();
    assert_eq!(rebuilt, sensor);
    assert_eq!(rebuilt.absolute_timestamps().timestamps(), SCENARIO_TS);
    assert_eq!(rebuilt.channels()[0].absolute_block().values(), SCENARIO_VALUES);
}

#[test]
fn test_sensor_duration_with_offset_start() {
    let base = 1_700_000_000_000u64;
    let ts: Vec<u64> = SCENARIO_TS.iter().map(|t| t + base).collect();
    let sensor = Sensor::from_absolute(
        SensorType::Ppg,
        vec![(green(), AbsoluteBlock::new(SCENARIO_VALUES.to_vec()))],
        AbsoluteTimestampsContainer::new(ts),
    )
    .unwrap();
    assert_eq!(sensor.first_timestamp(), base);
    assert_eq!(sensor.last_timestamp(), base + 100_400);
    assert_eq!(sensor.duration(), 100_400);
}

#[test]
fn test_sensor_duration_trailing_single_sample() {
    let sensor = Sensor::from_absolute(
        SensorType::Acc,
        vec![(
            ChannelMetadata::Acc(AccMetaData::with_coordinate(Coordinate::X)),
            AbsoluteBlock::new(vec![1, 2, 3, 4, 5]),
        )],
        AbsoluteTimestampsContainer::new(vec![0, 10, 20, 30, 45]),
    )
    .unwrap();
    assert_eq!(sensor.last_timestamp(), 45);
    assert_eq!(sensor.duration(), 45);
}

#[test]
fn test_sensor_empty() {
    let sensor = Sensor::from_absolute(
        SensorType::None,
        vec![(ChannelMetadata::Unset, AbsoluteBlock::default())],
        AbsoluteTimestampsContainer::default(),
    )
    .unwrap();
    assert!(sensor.find_blocks_idxs().is_empty());
    assert_eq!(*sensor.differential_timestamps(), DifferentialTimestampsContainer::default());
    assert_eq!(sensor.duration(), 0);
}

#[test]
fn test_sensor_single_sample() {
    let sensor = Sensor::from_absolute(
        SensorType::Ppg,
        vec![(green(), AbsoluteBlock::new(vec![77]))],
        AbsoluteTimestampsContainer::new(vec![5_000]),
    )
    .unwrap();
    assert_eq!(sensor.find_blocks_idxs(), vec![0]);
    assert_eq!(
        *sensor.differential_timestamps(),
        DifferentialTimestampsContainer::new(5_000, vec![0], vec![0])
    );
    assert_eq!(sensor.channels()[0].differential_blocks(), blocks(&[&[77]]).as_slice());
    assert_eq!(sensor.last_timestamp(), 5_000);
}

#[test]
fn test_sensor_channels_share_boundaries() {
    let ts = AbsoluteTimestampsContainer::new(vec![0, 20, 40, 60, 100, 140]);
    let x = ChannelMetadata::Acc(AccMetaData::with_coordinate(Coordinate::X));
    let y = ChannelMetadata::Acc(AccMetaData::with_coordinate(Coordinate::Y));
    let sensor = Sensor::from_absolute(
        SensorType::Acc,
        vec![
            (x, AbsoluteBlock::new(vec![1, 2, 3, 4, 5, 6])),
            (y, AbsoluteBlock::new(vec![-1, -1, -1, 0, 0, 9])),
        ],
        ts,
    )
    .unwrap();
    assert_eq!(sensor.channels()[0].block_lengths(), vec![4, 2]);
    assert_eq!(sensor.channels()[1].block_lengths(), vec![4, 2]);
}

#[test]
fn test_sensor_channel_length_mismatch() {
    let result = Sensor::from_absolute(
        SensorType::Ppg,
        vec![(green(), AbsoluteBlock::new(vec![1, 2]))],
        AbsoluteTimestampsContainer::new(vec![0, 10, 20]),
    );
    assert!(matches!(
        result,
        Err(Error::ChannelLengthMismatch {
            channel: 0,
            expected: 3,
            actual: 2
        })
    ));
}

#[test]
fn test_sensor_block_shape_mismatch() {
    let a = Channel::from_differential(green(), blocks(&[&[1, 1, 1], &[5, 1]])).unwrap();
    let b = Channel::from_differential(green(), blocks(&[&[1, 1], &[5, 1, 1]])).unwrap();
    let ts = DifferentialTimestampsContainer::new(0, vec![0, 100], vec![10, 10]);
    assert!(matches!(
        Sensor::from_differential(SensorType::Ppg, vec![a, b], ts),
        Err(Error::BlockShapeMismatch { channel: 1 })
    ));
}

#[test]
fn test_sensor_wire_roundtrip() {
    let sensor = scenario_sensor();
    let msg = sensor.to_wire().unwrap();
    assert_eq!(msg.sensor_type, 1);
    assert_eq!(Sensor::from_wire(&msg).unwrap(), sensor);
}

#[test]
fn test_sensor_from_wire_unknown_type() {
    let msg = ProtobufSensor {
        channels: vec![],
        differential_timestamps_container: None,
        sensor_type: 7,
    };
    assert!(matches!(
        Sensor::from_wire(&msg),
        Err(Error::UnknownEnumValue {
            field: "sensor_type",
            value: 7
        })
    ));
}

// ============================================================================
// Document
// ============================================================================

const ABSOLUTE_DOC: &str = r#"{
    "header": {
        "version": { "major": 1, "minor": 2, "patch": 3 },
        "time_zone_offset_min": 60,
        "data_form": "DATA_FORM_ABSOLUTE"
    },
    "raw": {
        "sensors": [
            {
                "sensor_type": "SENSOR_TYPE_PPG",
                "channels": [
                    {
                        "ppg_metadata": { "color": "COLOR_GREEN" },
                        "absolute_block": { "absolute_values": [10, 12, 13, 20, 21] }
                    },
                    {
                        "ppg_metadata": { "wavelength_nm": 940 },
                        "absolute_block": { "absolute_values": [-3, -3, -2, 0, 4] }
                    }
                ],
                "absolute_timestamps_container": { "unix_timestamps_ms": [0, 100, 200, 100300, 100400] }
            },
            {
                "sensor_type": "SENSOR_TYPE_ACC",
                "channels": [
                    {
                        "acc_metadata": { "coordinate": "COORDINATE_Z" },
                        "absolute_block": { "absolute_values": [1000, 998, 1003] }
                    },
                    {
                        "acc_metadata": { "norm": "NORM_EUCLIDEAN_DIFFERENCES_NORM" },
                        "absolute_block": { "absolute_values": [0, 5, 5] }
                    }
                ],
                "absolute_timestamps_container": { "unix_timestamps_ms": [1700000000000, 1700000000040, 1700000000080] }
            }
        ]
    }
}"#;

#[test]
fn test_document_json_wire_json_roundtrip() {
    let data = Data::from_json_str(ABSOLUTE_DOC).unwrap();
    assert_eq!(data.sensors.len(), 2);
    assert_eq!(data.header.version, Version { major: 1, minor: 2, patch: 3 });

    let bytes = data.to_wire_bytes().unwrap();
    let reloaded = Data::from_wire_bytes(&bytes).unwrap();
    assert_eq!(reloaded.header.data_form, DataForm::Differential);
    assert_eq!(reloaded.header.time_zone_offset_min, 60);
    assert_eq!(reloaded.sensors, data.sensors);

    let out = reloaded.to_json_string(DataForm::Absolute, false).unwrap();
    let input: serde_json::Value = serde_json::from_str(ABSOLUTE_DOC).unwrap();
    let output: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(input, output);
}

#[test]
fn test_document_wire_bytes_stable() {
    let data = Data::from_json_str(ABSOLUTE_DOC).unwrap();
    let bytes = data.to_wire_bytes().unwrap();
    let again = Data::from_wire_bytes(&bytes).unwrap().to_wire_bytes().unwrap();
    assert_eq!(bytes, again);
}

#[test]
fn test_document_differential_json() {
    let data = Data::from_json_str(ABSOLUTE_DOC).unwrap();
    let out = data.to_json_string(DataForm::Differential, true).unwrap();
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();

    assert_eq!(json["header"]["data_form"], "DATA_FORM_DIFFERENTIAL");
    let sensor = &json["raw"]["sensors"][0];
    assert_eq!(sensor["sensor_type"], "SENSOR_TYPE_PPG");
    assert!(sensor.get("absolute_timestamps_container").is_none());
    assert_eq!(
        sensor["differential_timestamps_container"],
        serde_json::json!({
            "first_timestamp_ms": 0,
            "block_intervals_ms": [0, 100300],
            "timestamps_intervals_ms": [100, 100]
        })
    );
    assert_eq!(
        sensor["channels"][0]["differential_blocks"],
        serde_json::json!([{ "differential_values": [10, 2, 1] }, { "differential_values": [20, 1] }])
    );

    let reloaded = Data::from_json_str(&out).unwrap();
    assert_eq!(reloaded.sensors, data.sensors);
}

#[test]
fn test_document_missing_timestamps() {
    let doc = r#"{ "raw": { "sensors": [ { "sensor_type": "SENSOR_TYPE_PPG", "channels": [] } ] } }"#;
    assert!(matches!(
        Data::from_json_str(doc),
        Err(Error::MissingField("timestamps_container"))
    ));
}

#[test]
fn test_document_missing_channel_values() {
    let doc = r#"{ "raw": { "sensors": [ {
        "sensor_type": "SENSOR_TYPE_PPG",
        "channels": [ { "ppg_metadata": { "color": "COLOR_RED" } } ],
        "absolute_timestamps_container": { "unix_timestamps_ms": [1] }
    } ] } }"#;
    assert!(matches!(Data::from_json_str(doc), Err(Error::MissingField("absolute_block"))));
}

#[test]
fn test_document_without_metadata_cannot_be_written() {
    let doc = r#"{ "raw": { "sensors": [ {
        "sensor_type": "SENSOR_TYPE_NONE",
        "channels": [ { "absolute_block": { "absolute_values": [1, 2] } } ],
        "absolute_timestamps_container": { "unix_timestamps_ms": [1, 2] }
    } ] } }"#;
    let data = Data::from_json_str(doc).unwrap();
    assert!(data.to_json_string(DataForm::Absolute, false).is_ok());
    assert!(matches!(data.to_wire_bytes(), Err(Error::InvalidMetadataState)));
}

#[test]
fn test_document_malformed_wire() {
    assert!(matches!(Data::from_wire_bytes(&[0xff, 0xff, 0xff]), Err(Error::WireDecode(_))));
}

#[test]
fn test_document_empty_wire() {
    let data = Data::from_wire_bytes(&[]).unwrap();
    assert!(data.sensors.is_empty());
    assert_eq!(data.header.version, Version::default());
    assert_eq!(data.header.data_form, DataForm::Differential);
}

#[test]
fn test_document_empty_differential_block() {
    let doc = r#"{
        "header": { "data_form": "DATA_FORM_DIFFERENTIAL" },
        "raw": { "sensors": [ {
            "sensor_type": "SENSOR_TYPE_PPG",
            "channels": [ {
                "ppg_metadata": { "color": "COLOR_RED" },
                "differential_blocks": [ { "differential_values": [5, 1] }, { "differential_values": [] } ]
            } ],
            "differential_timestamps_container": {
                "first_timestamp_ms": 0,
                "block_intervals_ms": [0, 100],
                "timestamps_intervals_ms": [10, 0]
            }
        } ] }
    }"#;
    assert!(matches!(Data::from_json_str(doc), Err(Error::EmptyBlock { block: 1 })));
}

#[test]
fn test_document_zero_wavelength_is_unset() {
    let doc = r#"{ "raw": { "sensors": [ {
        "sensor_type": "SENSOR_TYPE_PPG",
        "channels": [ {
            "ppg_metadata": { "color": "COLOR_GREEN", "wavelength_nm": 0 },
            "absolute_block": { "absolute_values": [7, 8] }
        } ],
        "absolute_timestamps_container": { "unix_timestamps_ms": [0, 40] }
    } ] } }"#;
    let data = Data::from_json_str(doc).unwrap();
    let metadata = data.sensors[0].channels()[0].metadata();
    assert_eq!(metadata.ppg(), Some(&PpgMetaData::with_color(Color::Green)));

    let reloaded = Data::from_wire_bytes(&data.to_wire_bytes().unwrap()).unwrap();
    assert_eq!(reloaded.sensors, data.sensors);
    assert_eq!(
        data.to_json_string(DataForm::Absolute, false).unwrap(),
        reloaded.to_json_string(DataForm::Absolute, false).unwrap()
    );

    // A zero wavelength alone leaves the channel without metadata
    let only_zero = doc.replace(r#""color": "COLOR_GREEN", "#, "");
    let data = Data::from_json_str(&only_zero).unwrap();
    assert!(!data.sensors[0].channels()[0].metadata().is_set());
    assert!(matches!(data.to_wire_bytes(), Err(Error::InvalidMetadataState)));
}

#[test]
fn test_ppg_zero_wavelength_not_set() {
    assert!(!PpgMetaData::with_wavelength(0).is_set());
    let zero = PpgMetaData {
        color: None,
        wavelength_nm: Some(0),
    };
    assert!(!zero.is_set());
    assert_eq!(serde_json::to_value(zero).unwrap(), serde_json::json!({}));
    assert!(PpgMetaData::with_wavelength(530).is_set());
}

#[test]
fn test_document_file_roundtrip() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path();
    let data = Data::from_json_str(ABSOLUTE_DOC).unwrap();

    let wire_path = dir.join("recording.pcore");
    data.write_file(&wire_path, DataForm::Absolute).unwrap();
    let from_wire = Data::read_file(&wire_path).unwrap();
    assert_eq!(from_wire.sensors, data.sensors);

    let json_path = dir.join("recording.json");
    from_wire.write_file(&json_path, DataForm::Absolute).unwrap();
    let from_json = Data::read_file(&json_path).unwrap();
    assert_eq!(from_json.sensors, data.sensors);
    assert_eq!(from_json.header.data_form, DataForm::Absolute);
}

#[test]
fn test_metadata_json_names() {
    let ppg = serde_json::to_value(PpgMetaData::with_color(Color::Infrared)).unwrap();
    assert_eq!(ppg, serde_json::json!({ "color": "COLOR_INFRARED" }));
    let acc = serde_json::to_value(AccMetaData::with_norm(Norm::EuclideanDifferencesNorm)).unwrap();
    assert_eq!(acc, serde_json::json!({ "norm": "NORM_EUCLIDEAN_DIFFERENCES_NORM" }));
}
