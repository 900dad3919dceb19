//! Channel metadata.
//!
//! A channel is either a PPG channel (LED color and/or wavelength) or an
//! accelerometer channel (axis and/or norm). The variant is a sum type; the
//! remaining "exactly one set" rule, a variant carrying at least one field, is
//! checked when a channel is written to the wire.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};
use crate::wire::{ProtobufAccMetaData, ProtobufColor, ProtobufCoordinate, ProtobufNorm, ProtobufPpgMetaData};

/// PPG LED color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    #[serde(rename = "COLOR_RED")]
    Red,
    #[serde(rename = "COLOR_GREEN")]
    Green,
    #[serde(rename = "COLOR_BLUE")]
    Blue,
    #[serde(rename = "COLOR_INFRARED")]
    Infrared,
}

/// Accelerometer axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Coordinate {
    #[serde(rename = "COORDINATE_X")]
    X,
    #[serde(rename = "COORDINATE_Y")]
    Y,
    #[serde(rename = "COORDINATE_Z")]
    Z,
}

/// Accelerometer norm channel kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Norm {
    #[serde(rename = "NORM_EUCLIDEAN_DIFFERENCES_NORM")]
    EuclideanDifferencesNorm,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PpgMetaData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    /// A wavelength of 0 is the wire's "not set" and reads as absent
    #[serde(default, skip_serializing_if = "wavelength_unset", deserialize_with = "nonzero_wavelength")]
    pub wavelength_nm: Option<u32>,
}

fn wavelength_unset(wavelength_nm: &Option<u32>) -> bool {
    !matches!(wavelength_nm, Some(nm) if *nm != 0)
}

fn nonzero_wavelength<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Option<u32>, D::Error> {
    Ok(Option::<u32>::deserialize(deserializer)?.filter(|&nm| nm != 0))
}

impl PpgMetaData {
    #[must_use]
    pub fn with_color(color: Color) -> Self {
        Self { color: Some(color), wavelength_nm: None }
    }

    #[must_use]
    pub fn with_wavelength(wavelength_nm: u32) -> Self {
        Self {
            color: None,
            wavelength_nm: (wavelength_nm != 0).then_some(wavelength_nm),
        }
    }

    #[must_use]
    pub fn is_set(&self) -> bool {
        self.color.is_some() || !wavelength_unset(&self.wavelength_nm)
    }

    pub(crate) fn from_wire(msg: &ProtobufPpgMetaData) -> Result<Self> {
        let color = match ProtobufColor::try_from(msg.color) {
            Ok(ProtobufColor::None) => None,
            Ok(ProtobufColor::Red) => Some(Color::Red),
            Ok(ProtobufColor::Green) => Some(Color::Green),
            Ok(ProtobufColor::Blue) => Some(Color::Blue),
            Ok(ProtobufColor::Infrared) => Some(Color::Infrared),
            Err(_) => return Err(Error::UnknownEnumValue { field: "color", value: msg.color }),
        };
        let wavelength_nm = (msg.wavelength_nm != 0).then_some(msg.wavelength_nm);
        Ok(Self { color, wavelength_nm })
    }

    pub(crate) fn to_wire(self) -> ProtobufPpgMetaData {
        let color = match self.color {
            None => ProtobufColor::None,
            Some(Color::Red) => ProtobufColor::Red,
            Some(Color::Green) => ProtobufColor::Green,
            Some(Color::Blue) => ProtobufColor::Blue,
            Some(Color::Infrared) => ProtobufColor::Infrared,
        };
        ProtobufPpgMetaData {
            color: color as i32,
            wavelength_nm: self.wavelength_nm.unwrap_or(0),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccMetaData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinate: Option<Coordinate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub norm: Option<Norm>,
}

impl AccMetaData {
    #[must_use]
    pub fn with_coordinate(coordinate: Coordinate) -> Self {
        Self { coordinate: Some(coordinate), norm: None }
    }

    #[must_use]
    pub fn with_norm(norm: Norm) -> Self {
        Self { coordinate: None, norm: Some(norm) }
    }

    #[must_use]
    pub fn is_set(&self) -> bool {
        self.coordinate.is_some() || self.norm.is_some()
    }

    pub(crate) fn from_wire(msg: &ProtobufAccMetaData) -> Result<Self> {
        let coordinate = match ProtobufCoordinate::try_from(msg.coordinate) {
            Ok(ProtobufCoordinate::None) => None,
            Ok(ProtobufCoordinate::X) => Some(Coordinate::X),
            Ok(ProtobufCoordinate::Y) => Some(Coordinate::Y),
            Ok(ProtobufCoordinate::Z) => Some(Coordinate::Z),
            Err(_) => {
                return Err(Error::UnknownEnumValue {
                    field: "coordinate",
                    value: msg.coordinate,
                })
            }
        };
        let norm = match ProtobufNorm::try_from(msg.norm) {
            Ok(ProtobufNorm::None) => None,
            Ok(ProtobufNorm::EuclideanDifferencesNorm) => Some(Norm::EuclideanDifferencesNorm),
            Err(_) => return Err(Error::UnknownEnumValue { field: "norm", value: msg.norm }),
        };
        Ok(Self { coordinate, norm })
    }

    pub(crate) fn to_wire(self) -> ProtobufAccMetaData {
        let coordinate = match self.coordinate {
            None => ProtobufCoordinate::None,
            Some(Coordinate::X) => ProtobufCoordinate::X,
            Some(Coordinate::Y) => ProtobufCoordinate::Y,
            Some(Coordinate::Z) => ProtobufCoordinate::Z,
        };
        let norm = match self.norm {
            None => ProtobufNorm::None,
            Some(Norm::EuclideanDifferencesNorm) => ProtobufNorm::EuclideanDifferencesNorm,
        };
        ProtobufAccMetaData {
            coordinate: coordinate as i32,
            norm: norm as i32,
        }
    }
}

/// Metadata of one channel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChannelMetadata {
    Acc(AccMetaData),
    Ppg(PpgMetaData),
    /// No metadata, e.g. a channel of a `SENSOR_TYPE_NONE` sensor
    #[default]
    Unset,
}

impl ChannelMetadata {
    /// True when the variant carries at least one metadata field
    #[must_use]
    pub fn is_set(&self) -> bool {
        match self {
            Self::Acc(acc) => acc.is_set(),
            Self::Ppg(ppg) => ppg.is_set(),
            Self::Unset => false,
        }
    }

    /// Build from the two optional metadata slots of a JSON or wire channel
    ///
    /// When both slots are present, the one carrying fields wins.
    ///
    /// # Errors
    /// Returns [`Error::InvalidMetadataState`] if both slots are present and both or
    /// neither of them carry fields.
    pub fn from_slots(acc: Option<AccMetaData>, ppg: Option<PpgMetaData>) -> Result<Self> {
        match (acc, ppg) {
            (Some(acc), Some(ppg)) => match (acc.is_set(), ppg.is_set()) {
                (true, false) => Ok(Self::Acc(acc)),
                (false, true) => Ok(Self::Ppg(ppg)),
                _ => Err(Error::InvalidMetadataState),
            },
            (Some(acc), None) => Ok(Self::Acc(acc)),
            (None, Some(ppg)) => Ok(Self::Ppg(ppg)),
            (None, None) => Ok(Self::Unset),
        }
    }

    #[must_use]
    pub fn acc(&self) -> Option<&AccMetaData> {
        match self {
            Self::Acc(acc) => Some(acc),
            _ => None,
        }
    }

    #[must_use]
    pub fn ppg(&self) -> Option<&PpgMetaData> {
        match self {
            Self::Ppg(ppg) => Some(ppg),
            _ => None,
        }
    }
}
