//! Structured (JSON) document layout.
//!
//! Sensors can be written in either form; the header's `data_form` tells which.
//! Channel metadata lives under `ppg_metadata` or `acc_metadata`, values under
//! `absolute_block` or `differential_blocks`, timestamps under
//! `absolute_timestamps_container` or `differential_timestamps_container`.

use serde::{Deserialize, Serialize};

use crate::block::{AbsoluteBlock, DifferentialBlock};
use crate::channel::Channel;
use crate::data::{DataForm, Header};
use crate::error::{Error, Result};
use crate::metadata::{AccMetaData, ChannelMetadata, PpgMetaData};
use crate::sensor::{Sensor, SensorType};
use crate::timestamps::{AbsoluteTimestampsContainer, DifferentialTimestampsContainer};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct JsonData {
    #[serde(default)]
    pub header: Header,
    #[serde(default)]
    pub raw: JsonRaw,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct JsonRaw {
    #[serde(default)]
    pub sensors: Vec<JsonSensor>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JsonSensor {
    #[serde(default)]
    pub sensor_type: SensorType,
    #[serde(default)]
    pub channels: Vec<JsonChannel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub absolute_timestamps_container: Option<AbsoluteTimestampsContainer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub differential_timestamps_container: Option<DifferentialTimestampsContainer>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JsonChannel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ppg_metadata: Option<PpgMetaData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acc_metadata: Option<AccMetaData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub absolute_block: Option<AbsoluteBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub differential_blocks: Option<Vec<DifferentialBlock>>,
}

impl JsonChannel {
    fn metadata(&self) -> Result<ChannelMetadata> {
        ChannelMetadata::from_slots(self.acc_metadata, self.ppg_metadata)
    }

    fn absolute_parts(&self) -> Result<(ChannelMetadata, AbsoluteBlock)> {
        let block = self.absolute_block.clone().ok_or(Error::MissingField("absolute_block"))?;
        Ok((self.metadata()?, block))
    }
}

impl Channel {
    /// Build a channel from a structured-document channel carrying absolute values
    ///
    /// # Errors
    /// [`Error::MissingField`] without `absolute_block`, [`Error::InvalidMetadataState`]
    /// for conflicting metadata, or any error of [`Channel::from_absolute`].
    pub fn from_json_absolute(json: &JsonChannel, boundaries: &[usize]) -> Result<Self> {
        let (metadata, block) = json.absolute_parts()?;
        Self::from_absolute(metadata, block, boundaries)
    }

    /// Build a channel from a structured-document channel carrying differential blocks
    ///
    /// # Errors
    /// [`Error::MissingField`] without `differential_blocks`,
    /// [`Error::InvalidMetadataState`] for conflicting metadata, or any error of
    /// [`Channel::from_differential`].
    pub fn from_json_differential(json: &JsonChannel) -> Result<Self> {
        let blocks = json
            .differential_blocks
            .clone()
            .ok_or(Error::MissingField("differential_blocks"))?;
        Self::from_differential(json.metadata()?, blocks)
    }

    /// Structured-document form of this channel
    #[must_use]
    pub fn to_json(&self, form: DataForm) -> JsonChannel {
        let mut json = JsonChannel {
            ppg_metadata: self.metadata().ppg().copied(),
            acc_metadata: self.metadata().acc().copied(),
            ..JsonChannel::default()
        };
        match form {
            DataForm::Absolute => json.absolute_block = Some(self.absolute_block().clone()),
            DataForm::Differential => json.differential_blocks = Some(self.differential_blocks().to_vec()),
        }
        json
    }
}

impl Sensor {
    /// Build a sensor from its structured-document form
    ///
    /// The timestamp container matching `preferred` is used if present, otherwise
    /// the other one. Channels must carry values in the same form.
    ///
    /// # Errors
    /// [`Error::MissingField`] if no timestamp container or a channel's values are
    /// missing, plus any error of [`Sensor::from_absolute`] or
    /// [`Sensor::from_differential`].
    pub fn from_json(json: &JsonSensor, preferred: DataForm) -> Result<Self> {
        let form = match (
            preferred,
            json.absolute_timestamps_container.is_some(),
            json.differential_timestamps_container.is_some(),
        ) {
            (DataForm::Absolute, true, _) | (DataForm::Differential, true, false) => DataForm::Absolute,
            (_, _, true) => DataForm::Differential,
            (_, false, false) => return Err(Error::MissingField("timestamps_container")),
        };

        match form {
            DataForm::Absolute => {
                let channels = json
                    .channels
                    .iter()
                    .map(JsonChannel::absolute_parts)
                    .collect::<Result<Vec<_>>>()?;
                let timestamps = json.absolute_timestamps_container.clone().unwrap_or_default();
                Self::from_absolute(json.sensor_type, channels, timestamps)
            }
            DataForm::Differential => {
                let channels = json
                    .channels
                    .iter()
                    .map(Channel::from_json_differential)
                    .collect::<Result<Vec<_>>>()?;
                let timestamps = json.differential_timestamps_container.clone().unwrap_or_default();
                Self::from_differential(json.sensor_type, channels, timestamps)
            }
        }
    }

    /// Structured-document form of this sensor in the requested form
    #[must_use]
    pub fn to_json(&self, form: DataForm) -> JsonSensor {
        let channels = self.channels().iter().map(|c| c.to_json(form)).collect();
        let mut json = JsonSensor {
            sensor_type: self.sensor_type(),
            channels,
            ..JsonSensor::default()
        };
        match form {
            DataForm::Absolute => json.absolute_timestamps_container = Some(self.absolute_timestamps().clone()),
            DataForm::Differential => {
                json.differential_timestamps_container = Some(self.differential_timestamps().clone());
            }
        }
        json
    }
}
