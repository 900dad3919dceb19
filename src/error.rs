//! Error types for pcore encoding and decoding operations.

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Error returned when converting between absolute, differential, JSON or wire forms
#[derive(Debug, Error)]
pub enum Error {
    /// A channel has neither or both metadata variants set
    #[error("exactly one of acc_metadata or ppg_metadata must be set")]
    InvalidMetadataState,

    /// Block boundaries do not describe a valid split of `len` samples
    #[error("invalid block boundaries {boundaries:?} for {len} samples")]
    InvalidBoundaries { boundaries: Vec<usize>, len: usize },

    /// Timestamp at `index` is smaller than its predecessor
    #[error("timestamp at index {index} is before the previous timestamp")]
    NonMonotonicTimestamps { index: usize },

    /// Interval starting at sample `index` does not fit into 32 bits
    #[error("interval {interval} ms at index {index} exceeds u32 range")]
    IntervalOverflow { index: usize, interval: u64 },

    /// Reconstructed timestamp exceeds u64 range
    #[error("reconstructed timestamp overflows u64")]
    TimestampOverflow,

    /// Timestamp container and value blocks disagree on the number of blocks
    #[error("timestamp container has {timestamp_blocks} blocks, values have {value_blocks}")]
    BlockCountMismatch {
        timestamp_blocks: usize,
        value_blocks: usize,
    },

    /// Differential timestamp container has interval vectors of different lengths
    #[error("timestamp container has {block_intervals} block intervals but {timestamp_intervals} sample intervals")]
    MalformedTimestamps {
        block_intervals: usize,
        timestamp_intervals: usize,
    },

    /// Differential block `block` holds no values
    #[error("differential block {block} is empty")]
    EmptyBlock { block: usize },

    /// Channel `channel` is split into blocks differently from channel 0
    #[error("channel {channel} block lengths differ from channel 0")]
    BlockShapeMismatch { channel: usize },

    /// Channel `channel` has a different sample count than the timestamp grid
    #[error("channel {channel} has {actual} samples, expected {expected}")]
    ChannelLengthMismatch {
        channel: usize,
        expected: usize,
        actual: usize,
    },

    /// Wire enum field holds a value outside the known range
    #[error("unknown value {value} for enum field {field}")]
    UnknownEnumValue { field: &'static str, value: i32 },

    /// Structured document lacks a required field
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// Structured document could not be parsed or written
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Wire bytes could not be decoded
    #[error("wire decode error: {0}")]
    WireDecode(#[from] prost::DecodeError),

    /// Reading or writing a recording file failed
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
