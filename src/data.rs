//! Top-level recording document: header plus sensors.

use std::fs;
use std::path::Path;

use log::debug;
use prost::Message;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::json::{JsonData, JsonRaw};
use crate::sensor::Sensor;
use crate::wire::{ProtobufData, ProtobufHeader, ProtobufRaw, ProtobufVersion};

/// Representation a structured document carries its sensors in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataForm {
    #[default]
    #[serde(rename = "DATA_FORM_ABSOLUTE")]
    Absolute,
    #[serde(rename = "DATA_FORM_DIFFERENTIAL")]
    Differential,
}

/// Format version of a recording
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    #[serde(default)]
    pub major: u32,
    #[serde(default)]
    pub minor: u32,
    #[serde(default)]
    pub patch: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    #[serde(default)]
    pub version: Version,
    /// Offset of the recording's local time zone from UTC in minutes
    #[serde(default)]
    pub time_zone_offset_min: i32,
    /// Not stored on the wire
    #[serde(default)]
    pub data_form: DataForm,
}

/// A complete recording
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Data {
    pub header: Header,
    pub sensors: Vec<Sensor>,
}

impl Data {
    #[must_use]
    pub fn new(header: Header, sensors: Vec<Sensor>) -> Self {
        Self { header, sensors }
    }

    /// Parse a structured document
    ///
    /// # Errors
    /// Returns [`crate::Error::Json`] for malformed JSON or any error of
    /// [`Sensor::from_json`].
    pub fn from_json_str(s: &str) -> Result<Self> {
        let json: JsonData = serde_json::from_str(s)?;
        let form = json.header.data_form;
        let sensors = json
            .raw
            .sensors
            .iter()
            .map(|s| Sensor::from_json(s, form))
            .collect::<Result<Vec<_>>>()?;
        debug!("loaded {} sensors from json ({:?})", sensors.len(), form);
        Ok(Self {
            header: json.header,
            sensors,
        })
    }

    /// Write as a structured document in `form`
    ///
    /// The emitted header's `data_form` is set to `form`.
    ///
    /// # Errors
    /// Returns [`crate::Error::Json`] if serialization fails.
    pub fn to_json_string(&self, form: DataForm, pretty: bool) -> Result<String> {
        let json = JsonData {
            header: Header {
                data_form: form,
                ..self.header
            },
            raw: JsonRaw {
                sensors: self.sensors.iter().map(|s| s.to_json(form)).collect(),
            },
        };
        let s = if pretty {
            serde_json::to_string_pretty(&json)?
        } else {
            serde_json::to_string(&json)?
        };
        Ok(s)
    }

    /// Build from the wire message; the header reports the differential form
    ///
    /// # Errors
    /// Any error of [`Sensor::from_wire`].
    pub fn from_wire(msg: &ProtobufData) -> Result<Self> {
        let mut header = Header {
            data_form: DataForm::Differential,
            ..Header::default()
        };
        if let Some(h) = &msg.header {
            header.time_zone_offset_min = h.time_zone_offset_min;
            if let Some(v) = &h.version {
                header.version = Version {
                    major: v.major,
                    minor: v.minor,
                    patch: v.patch,
                };
            }
        }
        let sensors = msg
            .raw
            .as_ref()
            .map(|r| r.sensors.iter().map(Sensor::from_wire).collect::<Result<Vec<_>>>())
            .transpose()?
            .unwrap_or_default();
        Ok(Self { header, sensors })
    }

    /// Convert to the wire message
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidMetadataState`] if any channel lacks valid metadata.
    pub fn to_wire(&self) -> Result<ProtobufData> {
        let sensors = self.sensors.iter().map(Sensor::to_wire).collect::<Result<Vec<_>>>()?;
        let Version { major, minor, patch } = self.header.version;
        Ok(ProtobufData {
            header: Some(ProtobufHeader {
                version: Some(ProtobufVersion { major, minor, patch }),
                time_zone_offset_min: self.header.time_zone_offset_min,
            }),
            raw: Some(ProtobufRaw { sensors }),
        })
    }

    /// Decode `.pcore` wire bytes
    ///
    /// # Errors
    /// Returns [`crate::Error::WireDecode`] for malformed bytes or any error of
    /// [`Data::from_wire`].
    pub fn from_wire_bytes(bytes: &[u8]) -> Result<Self> {
        let msg = ProtobufData::decode(bytes)?;
        Self::from_wire(&msg)
    }

    /// Encode to `.pcore` wire bytes
    ///
    /// # Errors
    /// Any error of [`Data::to_wire`].
    pub fn to_wire_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.to_wire()?.encode_to_vec())
    }

    /// Read a recording, as JSON when the extension is `.json`, wire bytes otherwise
    ///
    /// # Errors
    /// Returns [`crate::Error::Io`] if the file cannot be read, or any parse error.
    pub fn read_file(path: &Path) -> Result<Self> {
        if is_json(path) {
            Self::from_json_str(&fs::read_to_string(path)?)
        } else {
            Self::from_wire_bytes(&fs::read(path)?)
        }
    }

    /// Write a recording, as JSON in `form` when the extension is `.json`, wire bytes otherwise
    ///
    /// # Errors
    /// Returns [`crate::Error::Io`] if the file cannot be written, or any
    /// serialization error.
    pub fn write_file(&self, path: &Path, form: DataForm) -> Result<()> {
        if is_json(path) {
            fs::write(path, self.to_json_string(form, false)?)?;
        } else {
            fs::write(path, self.to_wire_bytes()?)?;
        }
        Ok(())
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|e| e.eq_ignore_ascii_case("json"))
}
