//! A sensor: channels sharing one timestamp grid.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::block::AbsoluteBlock;
use crate::channel::Channel;
use crate::error::{Error, Result};
use crate::metadata::ChannelMetadata;
use crate::segment::find_block_boundaries;
use crate::timestamps::{
    decode_timestamps, encode_timestamps, AbsoluteTimestampsContainer, DifferentialTimestampsContainer,
};
use crate::wire::{ProtobufDifferentialTimestampContainer, ProtobufSensor, ProtobufSensorType};

/// Kind of sensor that produced the channels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SensorType {
    #[default]
    #[serde(rename = "SENSOR_TYPE_NONE")]
    None,
    #[serde(rename = "SENSOR_TYPE_PPG")]
    Ppg,
    #[serde(rename = "SENSOR_TYPE_ACC")]
    Acc,
}

impl SensorType {
    fn from_wire(value: i32) -> Result<Self> {
        match ProtobufSensorType::try_from(value) {
            Ok(ProtobufSensorType::None) => Ok(Self::None),
            Ok(ProtobufSensorType::Ppg) => Ok(Self::Ppg),
            Ok(ProtobufSensorType::Acc) => Ok(Self::Acc),
            Err(_) => Err(Error::UnknownEnumValue {
                field: "sensor_type",
                value,
            }),
        }
    }

    fn to_wire(self) -> ProtobufSensorType {
        match self {
            Self::None => ProtobufSensorType::None,
            Self::Ppg => ProtobufSensorType::Ppg,
            Self::Acc => ProtobufSensorType::Acc,
        }
    }
}

impl From<&ProtobufDifferentialTimestampContainer> for DifferentialTimestampsContainer {
    fn from(msg: &ProtobufDifferentialTimestampContainer) -> Self {
        Self::new(
            msg.first_timestamp_ms,
            msg.block_intervals_ms.clone(),
            msg.timestamps_intervals_ms.clone(),
        )
    }
}

impl From<&DifferentialTimestampsContainer> for ProtobufDifferentialTimestampContainer {
    fn from(container: &DifferentialTimestampsContainer) -> Self {
        Self {
            first_timestamp_ms: container.first_timestamp_ms,
            block_intervals_ms: container.block_intervals_ms.clone(),
            timestamps_intervals_ms: container.timestamps_intervals_ms.clone(),
        }
    }
}

/// One sensor with its channels and timestamps in both forms
///
/// All channels have the same number of samples and the same block structure,
/// which is also the block structure of the differential timestamps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sensor {
    sensor_type: SensorType,
    channels: Vec<Channel>,
    absolute_timestamps: AbsoluteTimestampsContainer,
    differential_timestamps: DifferentialTimestampsContainer,
}

impl Sensor {
    /// Build a sensor from absolute timestamps and absolute channel values
    ///
    /// The timestamps are segmented into constant-interval blocks and every
    /// channel is delta-encoded with exactly those block boundaries.
    ///
    /// # Errors
    /// - [`Error::ChannelLengthMismatch`] if a channel's sample count differs from
    ///   the number of timestamps
    /// - any error of [`encode_timestamps`]
    pub fn from_absolute(
        sensor_type: SensorType,
        channels: Vec<(ChannelMetadata, AbsoluteBlock)>,
        timestamps: AbsoluteTimestampsContainer,
    ) -> Result<Self> {
        let boundaries = find_block_boundaries(timestamps.timestamps());
        let differential_timestamps = encode_timestamps(timestamps.timestamps(), &boundaries)?;

        let channels = channels
            .into_iter()
            .enumerate()
            .map(|(i, (metadata, block))| {
                if block.len() != timestamps.len() {
                    warn!("channel {i} has {} values for {} timestamps", block.len(), timestamps.len());
                    return Err(Error::ChannelLengthMismatch {
                        channel: i,
                        expected: timestamps.len(),
                        actual: block.len(),
                    });
                }
                Channel::from_absolute(metadata, block, &boundaries)
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            "sensor {:?} from absolute: {} samples, {} channels, {} blocks",
            sensor_type,
            timestamps.len(),
            channels.len(),
            boundaries.len()
        );
        Ok(Self {
            sensor_type,
            channels,
            absolute_timestamps: timestamps,
            differential_timestamps,
        })
    }

    /// Build a sensor from differential channels and compressed timestamps
    ///
    /// Block lengths are taken from the channels and handed to the timestamp
    /// decoder, so the channels must agree with each other and with the container.
    ///
    /// # Errors
    /// - [`Error::BlockShapeMismatch`] if channels are split into blocks differently
    /// - any error of [`decode_timestamps`]
    pub fn from_differential(
        sensor_type: SensorType,
        channels: Vec<Channel>,
        timestamps: DifferentialTimestampsContainer,
    ) -> Result<Self> {
        let block_lengths = shared_block_lengths(&channels)?;
        let absolute = decode_timestamps(&timestamps, &block_lengths)?;

        debug!(
            "sensor {:?} from differential: {} samples, {} channels, {} blocks",
            sensor_type,
            absolute.len(),
            channels.len(),
            block_lengths.len()
        );
        Ok(Self {
            sensor_type,
            channels,
            absolute_timestamps: AbsoluteTimestampsContainer::new(absolute),
            differential_timestamps: timestamps,
        })
    }

    /// Build a sensor from its wire message
    ///
    /// # Errors
    /// Any error of [`Channel::from_wire`] or [`Sensor::from_differential`], or
    /// [`Error::UnknownEnumValue`] for an unknown sensor type.
    pub fn from_wire(msg: &ProtobufSensor) -> Result<Self> {
        let sensor_type = SensorType::from_wire(msg.sensor_type)?;
        let channels = msg.channels.iter().map(Channel::from_wire).collect::<Result<Vec<_>>>()?;
        let timestamps = msg
            .differential_timestamps_container
            .as_ref()
            .map(DifferentialTimestampsContainer::from)
            .unwrap_or_default();
        Self::from_differential(sensor_type, channels, timestamps)
    }

    /// Convert to the wire message (differential form only)
    ///
    /// # Errors
    /// Returns [`Error::InvalidMetadataState`] if any channel lacks valid metadata.
    pub fn to_wire(&self) -> Result<ProtobufSensor> {
        let channels = self.channels.iter().map(Channel::to_wire).collect::<Result<Vec<_>>>()?;
        Ok(ProtobufSensor {
            channels,
            differential_timestamps_container: Some((&self.differential_timestamps).into()),
            sensor_type: self.sensor_type.to_wire() as i32,
        })
    }

    #[must_use]
    pub fn sensor_type(&self) -> SensorType {
        self.sensor_type
    }

    #[must_use]
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    #[must_use]
    pub fn absolute_timestamps(&self) -> &AbsoluteTimestampsContainer {
        &self.absolute_timestamps
    }

    #[must_use]
    pub fn differential_timestamps(&self) -> &DifferentialTimestampsContainer {
        &self.differential_timestamps
    }

    #[must_use]
    pub fn first_timestamp(&self) -> u64 {
        self.differential_timestamps.first_timestamp_ms
    }

    /// Timestamp of the last sample, computed from the compressed timestamps
    ///
    /// The sample count of the last block is read from channel 0. A sensor without
    /// channels or blocks reports its first timestamp.
    #[must_use]
    pub fn last_timestamp(&self) -> u64 {
        let first = self.first_timestamp();
        let last_block_len = match self.channels.first().and_then(|c| c.differential_blocks().last()) {
            Some(block) => block.len() as u64,
            None => return first,
        };
        let Some(&spacing) = self.differential_timestamps.timestamps_intervals_ms.last() else {
            return first;
        };
        let block_sum: u64 = self
            .differential_timestamps
            .block_intervals_ms
            .iter()
            .map(|&i| u64::from(i))
            .sum();
        first + block_sum + u64::from(spacing) * last_block_len.saturating_sub(1)
    }

    /// Time between first and last sample in milliseconds
    #[must_use]
    pub fn duration(&self) -> u64 {
        self.last_timestamp() - self.first_timestamp()
    }

    /// Block boundaries of this sensor's absolute timestamps
    #[must_use]
    pub fn find_blocks_idxs(&self) -> Vec<usize> {
        find_block_boundaries(self.absolute_timestamps.timestamps())
    }
}

/// Block lengths shared by all channels (empty when there are no channels)
fn shared_block_lengths(channels: &[Channel]) -> Result<Vec<usize>> {
    let Some(first) = channels.first() else {
        return Ok(Vec::new());
    };
    let lengths = first.block_lengths();
    for (i, channel) in channels.iter().enumerate().skip(1) {
        let same = channel.differential_blocks().len() == lengths.len()
            && channel
                .differential_blocks()
                .iter()
                .zip(&lengths)
                .all(|(b, &len)| b.len() == len);
        if !same {
            return Err(Error::BlockShapeMismatch { channel: i });
        }
    }
    Ok(lengths)
}
