//! `pcore` - Lossless block-delta codec for wearable sensor recordings
//!
//! Converts PPG and accelerometer recordings between an **absolute** form (one raw
//! value and one millisecond timestamp per sample) and a compact **differential**
//! form (anchor value plus deltas, split into blocks of constant sampling interval).
//! Both forms can be stored as a JSON document; the binary `.pcore` wire format
//! (protobuf) always stores the differential form.
//!
//! # Example
//! ```
//! use pcore::{AbsoluteBlock, AbsoluteTimestampsContainer, ChannelMetadata, Color, PpgMetaData, Sensor, SensorType};
//!
//! let timestamps = AbsoluteTimestampsContainer::new(vec![0, 100, 200, 100_300, 100_400]);
//! let green = ChannelMetadata::Ppg(PpgMetaData::with_color(Color::Green));
//! let values = AbsoluteBlock::new(vec![10, 12, 13, 20, 21]);
//!
//! let sensor = Sensor::from_absolute(SensorType::Ppg, vec![(green, values)], timestamps).unwrap();
//! let blocks = sensor.channels()[0].differential_blocks();
//! assert_eq!(blocks[0].values(), &[10, 2, 1]);
//! assert_eq!(blocks[1].values(), &[20, 1]);
//! assert_eq!(sensor.duration(), 100_400);
//! ```
//!
//! # Blocks
//!
//! A block is a maximal run of samples with one constant inter-sample interval.
//! Boundaries are derived from the timestamps only, and every channel of a sensor
//! is split at the same boundaries.
//!
//! For timestamps `[0, 100, 200, 100300, 100400]` and values `[10, 12, 13, 20, 21]`:
//!
//! | Block | Samples | Value block | Block interval | Sample interval |
//! |-------|---------|-------------|----------------|-----------------|
//! | 0 | 0..3 | `[10, 2, 1]` | 0 | 100 |
//! | 1 | 3..5 | `[20, 1]` | 100300 | 100 |
//!
//! - Value blocks: element 0 is the absolute value, the rest are deltas to the
//!   previous sample (wrapping `i32` arithmetic, so every sequence round-trips).
//! - Block interval: start of this block minus start of the previous one (0 for
//!   the first block).
//! - Sample interval: spacing inside the block. A trailing block with a single
//!   sample stores 0.
//!
//! The timestamp container does not store block lengths; decoding takes them from
//! the channels' value blocks.
//!
//! # Document Layout
//!
//! | JSON key | Wire field | Notes |
//! |----------|------------|-------|
//! | `header.version.{major,minor,patch}` | `ProtobufHeader.version` | |
//! | `header.time_zone_offset_min` | `ProtobufHeader.time_zone_offset_min` | |
//! | `header.data_form` | - | JSON only, form of the sensors |
//! | `raw.sensors[].sensor_type` | `ProtobufSensor.sensor_type` | `SENSOR_TYPE_PPG`, `SENSOR_TYPE_ACC`, `SENSOR_TYPE_NONE` |
//! | `channels[].ppg_metadata` / `acc_metadata` | `ProtobufChannel` fields 3 / 2 | exactly one must be set to write wire bytes |
//! | `channels[].absolute_block.absolute_values` | - | absolute form |
//! | `channels[].differential_blocks[].differential_values` | `ProtobufDifferentialBlock` | differential form |
//! | `absolute_timestamps_container.unix_timestamps_ms` | - | absolute form |
//! | `differential_timestamps_container.*` | `ProtobufDifferentialTimestampContainer` | differential form |

#![allow(clippy::module_name_repetitions)]

mod block;
mod channel;
mod data;
mod error;
mod json;
mod metadata;
mod segment;
mod sensor;
mod timestamps;
pub mod wire;

#[cfg(test)]
mod tests;

// Re-export public API
pub use block::{decode_blocks, encode_blocks, AbsoluteBlock, DifferentialBlock};
pub use channel::Channel;
pub use data::{Data, DataForm, Header, Version};
pub use error::{Error, Result};
pub use json::{JsonChannel, JsonSensor};
pub use metadata::{AccMetaData, ChannelMetadata, Color, Coordinate, Norm, PpgMetaData};
pub use segment::find_block_boundaries;
pub use sensor::{Sensor, SensorType};
pub use timestamps::{decode_timestamps, encode_timestamps, AbsoluteTimestampsContainer, DifferentialTimestampsContainer};
