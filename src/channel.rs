//! A single sensor signal held in both absolute and differential form.

use log::{trace, warn};

use crate::block::{decode_blocks, encode_blocks, AbsoluteBlock, DifferentialBlock};
use crate::error::{Error, Result};
use crate::metadata::{AccMetaData, ChannelMetadata, PpgMetaData};
use crate::wire::{ProtobufChannel, ProtobufDifferentialBlock};

/// One channel of a sensor
///
/// Both representations are computed at construction and never diverge:
/// `absolute_block` always equals the decoded `differential_blocks`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Channel {
    metadata: ChannelMetadata,
    absolute_block: AbsoluteBlock,
    differential_blocks: Vec<DifferentialBlock>,
}

impl Channel {
    /// Build a channel from absolute values, splitting it at `boundaries`
    ///
    /// # Errors
    /// Returns [`Error::InvalidBoundaries`] if `boundaries` is not a valid split of
    /// the block's values.
    pub fn from_absolute(metadata: ChannelMetadata, absolute_block: AbsoluteBlock, boundaries: &[usize]) -> Result<Self> {
        let differential_blocks = encode_blocks(absolute_block.values(), boundaries)?;
        trace!(
            "channel from absolute: {} values, {} blocks",
            absolute_block.len(),
            differential_blocks.len()
        );
        Ok(Self {
            metadata,
            absolute_block,
            differential_blocks,
        })
    }

    /// Build a channel from delta-encoded blocks
    ///
    /// # Errors
    /// Returns [`Error::EmptyBlock`] if any block has no values.
    pub fn from_differential(metadata: ChannelMetadata, differential_blocks: Vec<DifferentialBlock>) -> Result<Self> {
        if let Some(block) = differential_blocks.iter().position(DifferentialBlock::is_empty) {
            warn!("rejecting empty differential block {block}");
            return Err(Error::EmptyBlock { block });
        }
        let absolute_block = AbsoluteBlock::new(decode_blocks(&differential_blocks));
        Ok(Self {
            metadata,
            absolute_block,
            differential_blocks,
        })
    }

    /// Build a channel from its wire message
    ///
    /// # Errors
    /// - [`Error::InvalidMetadataState`] if both metadata messages carry fields
    /// - [`Error::UnknownEnumValue`] if a metadata enum is out of range
    /// - [`Error::EmptyBlock`] if a differential block has no values
    pub fn from_wire(msg: &ProtobufChannel) -> Result<Self> {
        let acc = msg.acc_metadata.as_ref().map(AccMetaData::from_wire).transpose()?;
        let ppg = msg.ppg_metadata.as_ref().map(PpgMetaData::from_wire).transpose()?;
        let metadata = ChannelMetadata::from_slots(acc, ppg)?;
        let blocks = msg
            .differential_blocks
            .iter()
            .map(|b| DifferentialBlock::new(b.differential_values.clone()))
            .collect();
        Self::from_differential(metadata, blocks)
    }

    /// Convert to the wire message, which carries only the differential form
    ///
    /// # Errors
    /// Returns [`Error::InvalidMetadataState`] unless exactly one metadata variant
    /// is set.
    pub fn to_wire(&self) -> Result<ProtobufChannel> {
        let (acc_metadata, ppg_metadata) = match self.metadata {
            ChannelMetadata::Acc(acc) if acc.is_set() => (Some(acc.to_wire()), None),
            ChannelMetadata::Ppg(ppg) if ppg.is_set() => (None, Some(ppg.to_wire())),
            _ => {
                warn!("refusing to serialize channel without metadata: {:?}", self.metadata);
                return Err(Error::InvalidMetadataState);
            }
        };
        let differential_blocks = self
            .differential_blocks
            .iter()
            .map(|b| ProtobufDifferentialBlock {
                differential_values: b.differential_values.clone(),
            })
            .collect();
        Ok(ProtobufChannel {
            differential_blocks,
            acc_metadata,
            ppg_metadata,
        })
    }

    #[must_use]
    pub fn metadata(&self) -> &ChannelMetadata {
        &self.metadata
    }

    #[must_use]
    pub fn absolute_block(&self) -> &AbsoluteBlock {
        &self.absolute_block
    }

    #[must_use]
    pub fn differential_blocks(&self) -> &[DifferentialBlock] {
        &self.differential_blocks
    }

    /// Number of samples in each differential block
    #[must_use]
    pub fn block_lengths(&self) -> Vec<usize> {
        self.differential_blocks.iter().map(DifferentialBlock::len).collect()
    }

    /// Number of samples
    #[must_use]
    pub fn len(&self) -> usize {
        self.absolute_block.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.absolute_block.is_empty()
    }
}
