//! Protobuf wire messages for the persisted `.pcore` format.
//!
//! The wire format only ever carries the differential representation; absolute
//! values and timestamps are derived on load.
//!
//! | Message | Fields |
//! |---------|--------|
//! | `ProtobufData` | 1 `header`, 2 `raw` |
//! | `ProtobufHeader` | 1 `version`, 2 `time_zone_offset_min` (int32) |
//! | `ProtobufVersion` | 1 `major`, 2 `minor`, 3 `patch` (uint32) |
//! | `ProtobufRaw` | 1 `sensors` (repeated) |
//! | `ProtobufSensor` | 1 `channels` (repeated), 2 `differential_timestamps_container`, 3 `sensor_type` |
//! | `ProtobufChannel` | 1 `differential_blocks` (repeated), 2 `acc_metadata`, 3 `ppg_metadata` |
//! | `ProtobufDifferentialBlock` | 1 `differential_values` (packed sint32) |
//! | `ProtobufDifferentialTimestampContainer` | 1 `first_timestamp_ms` (uint64), 2 `block_intervals_ms`, 3 `timestamps_intervals_ms` (packed uint32) |
//! | `ProtobufPpgMetaData` | 1 `color`, 2 `wavelength_nm` (uint32) |
//! | `ProtobufAccMetaData` | 1 `coordinate`, 2 `norm` |
//!
//! Enum value 0 is the "not set" value of every enum.

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtobufData {
    #[prost(message, optional, tag = "1")]
    pub header: Option<ProtobufHeader>,
    #[prost(message, optional, tag = "2")]
    pub raw: Option<ProtobufRaw>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtobufHeader {
    #[prost(message, optional, tag = "1")]
    pub version: Option<ProtobufVersion>,
    #[prost(int32, tag = "2")]
    pub time_zone_offset_min: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtobufVersion {
    #[prost(uint32, tag = "1")]
    pub major: u32,
    #[prost(uint32, tag = "2")]
    pub minor: u32,
    #[prost(uint32, tag = "3")]
    pub patch: u32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtobufRaw {
    #[prost(message, repeated, tag = "1")]
    pub sensors: Vec<ProtobufSensor>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtobufSensor {
    #[prost(message, repeated, tag = "1")]
    pub channels: Vec<ProtobufChannel>,
    #[prost(message, optional, tag = "2")]
    pub differential_timestamps_container: Option<ProtobufDifferentialTimestampContainer>,
    #[prost(enumeration = "ProtobufSensorType", tag = "3")]
    pub sensor_type: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtobufChannel {
    #[prost(message, repeated, tag = "1")]
    pub differential_blocks: Vec<ProtobufDifferentialBlock>,
    #[prost(message, optional, tag = "2")]
    pub acc_metadata: Option<ProtobufAccMetaData>,
    #[prost(message, optional, tag = "3")]
    pub ppg_metadata: Option<ProtobufPpgMetaData>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtobufDifferentialBlock {
    #[prost(sint32, repeated, tag = "1")]
    pub differential_values: Vec<i32>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtobufDifferentialTimestampContainer {
    #[prost(uint64, tag = "1")]
    pub first_timestamp_ms: u64,
    #[prost(uint32, repeated, tag = "2")]
    pub block_intervals_ms: Vec<u32>,
    #[prost(uint32, repeated, tag = "3")]
    pub timestamps_intervals_ms: Vec<u32>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtobufPpgMetaData {
    #[prost(enumeration = "ProtobufColor", tag = "1")]
    pub color: i32,
    #[prost(uint32, tag = "2")]
    pub wavelength_nm: u32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtobufAccMetaData {
    #[prost(enumeration = "ProtobufCoordinate", tag = "1")]
    pub coordinate: i32,
    #[prost(enumeration = "ProtobufNorm", tag = "2")]
    pub norm: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ProtobufSensorType {
    None = 0,
    Ppg = 1,
    Acc = 2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ProtobufColor {
    None = 0,
    Red = 1,
    Green = 2,
    Blue = 3,
    Infrared = 4,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ProtobufCoordinate {
    None = 0,
    X = 1,
    Y = 2,
    Z = 3,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ProtobufNorm {
    None = 0,
    EuclideanDifferencesNorm = 1,
}
