//! Timestamp containers and the block timestamp codec.
//!
//! Within a block samples are equally spaced, so a block is fully described by
//! the gap between its start and the previous block's start plus its sample
//! spacing. The number of samples per block is not stored in the container and
//! must be supplied when decoding (it comes from the channels' value blocks).

use log::trace;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::segment::validate_boundaries;

/// One Unix timestamp in milliseconds per sample
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsoluteTimestampsContainer {
    pub unix_timestamps_ms: Vec<u64>,
}

impl AbsoluteTimestampsContainer {
    #[must_use]
    pub fn new(unix_timestamps_ms: Vec<u64>) -> Self {
        Self { unix_timestamps_ms }
    }

    #[must_use]
    pub fn timestamps(&self) -> &[u64] {
        &self.unix_timestamps_ms
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.unix_timestamps_ms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.unix_timestamps_ms.is_empty()
    }
}

impl From<Vec<u64>> for AbsoluteTimestampsContainer {
    fn from(unix_timestamps_ms: Vec<u64>) -> Self {
        Self { unix_timestamps_ms }
    }
}

/// Block-compressed timestamps
///
/// `block_intervals_ms[i]` is the gap between the start of block `i` and the start
/// of block `i - 1` (always 0 for the first block), `timestamps_intervals_ms[i]` is
/// the constant sample spacing inside block `i`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifferentialTimestampsContainer {
    pub first_timestamp_ms: u64,
    pub block_intervals_ms: Vec<u32>,
    pub timestamps_intervals_ms: Vec<u32>,
}

impl DifferentialTimestampsContainer {
    #[must_use]
    pub fn new(first_timestamp_ms: u64, block_intervals_ms: Vec<u32>, timestamps_intervals_ms: Vec<u32>) -> Self {
        Self {
            first_timestamp_ms,
            block_intervals_ms,
            timestamps_intervals_ms,
        }
    }

    /// Number of blocks described by the container
    #[must_use]
    pub fn block_count(&self) -> usize {
        self.timestamps_intervals_ms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timestamps_intervals_ms.is_empty() && self.block_intervals_ms.is_empty()
    }
}

/// `ts[to] - ts[from]` as a 32-bit interval
fn interval(ts: &[u64], from: usize, to: usize) -> Result<u32> {
    let diff = ts[to]
        .checked_sub(ts[from])
        .ok_or(Error::NonMonotonicTimestamps { index: to })?;
    u32::try_from(diff).map_err(|_| Error::IntervalOverflow {
        index: from,
        interval: diff,
    })
}

/// Compress absolute timestamps using the given block boundaries
///
/// The first block always gets a block interval of 0 and the spacing of the first
/// two samples. A trailing block that holds a single sample gets a spacing of 0.
/// With a single boundary the spacing is taken from the first two samples, or 0
/// for a lone sample.
///
/// # Errors
/// - [`Error::InvalidBoundaries`] if `boundaries` is not a valid split of `timestamps`
/// - [`Error::NonMonotonicTimestamps`] if a required difference is negative
/// - [`Error::IntervalOverflow`] if an interval exceeds `u32::MAX` milliseconds
///
/// # Example
/// ```
/// use pcore::encode_timestamps;
///
/// let ts = [0, 100, 200, 100_300, 100_400];
/// let c = encode_timestamps(&ts, &[0, 3]).unwrap();
/// assert_eq!(c.first_timestamp_ms, 0);
/// assert_eq!(c.block_intervals_ms, vec![0, 100_300]);
/// assert_eq!(c.timestamps_intervals_ms, vec![100, 100]);
/// ```
pub fn encode_timestamps(timestamps: &[u64], boundaries: &[usize]) -> Result<DifferentialTimestampsContainer> {
    if !validate_boundaries(boundaries, timestamps.len()) {
        return Err(Error::InvalidBoundaries {
            boundaries: boundaries.to_vec(),
            len: timestamps.len(),
        });
    }

    let n = boundaries.len();
    if n == 0 {
        return Ok(DifferentialTimestampsContainer::default());
    }

    let first = timestamps[0];
    let last_idx = timestamps.len() - 1;
    let first_spacing = if timestamps.len() > 1 { interval(timestamps, 0, 1)? } else { 0 };

    if n == 1 {
        return Ok(DifferentialTimestampsContainer::new(first, vec![0], vec![first_spacing]));
    }

    let mut block_intervals = Vec::with_capacity(n);
    let mut spacings = Vec::with_capacity(n);
    block_intervals.push(0);
    spacings.push(first_spacing);

    for i in 1..n - 1 {
        let (prev, idx) = (boundaries[i - 1], boundaries[i]);
        spacings.push(interval(timestamps, idx, idx + 1)?);
        block_intervals.push(interval(timestamps, prev, idx)?);
    }

    let (prev, idx) = (boundaries[n - 2], boundaries[n - 1]);
    block_intervals.push(interval(timestamps, prev, idx)?);
    spacings.push(if idx == last_idx { 0 } else { interval(timestamps, idx, idx + 1)? });

    trace!("encoded {} timestamps into {} blocks", timestamps.len(), n);
    Ok(DifferentialTimestampsContainer::new(first, block_intervals, spacings))
}

/// Expand a block-compressed container back to absolute timestamps
///
/// `block_lengths[i]` is the number of samples in block `i`; block `i` emits
/// `start_i + j * timestamps_intervals_ms[i]` for `j` in `0..block_lengths[i]`, where
/// `start_i` accumulates `block_intervals_ms` from `first_timestamp_ms`.
///
/// # Errors
/// - [`Error::MalformedTimestamps`] if the two interval vectors differ in length
/// - [`Error::BlockCountMismatch`] if `block_lengths` has a different number of blocks
/// - [`Error::TimestampOverflow`] if a timestamp exceeds `u64::MAX`
pub fn decode_timestamps(container: &DifferentialTimestampsContainer, block_lengths: &[usize]) -> Result<Vec<u64>> {
    let blocks = container.block_count();
    if container.block_intervals_ms.len() != blocks {
        return Err(Error::MalformedTimestamps {
            block_intervals: container.block_intervals_ms.len(),
            timestamp_intervals: blocks,
        });
    }
    if block_lengths.len() != blocks {
        return Err(Error::BlockCountMismatch {
            timestamp_blocks: blocks,
            value_blocks: block_lengths.len(),
        });
    }

    let total = block_lengths.iter().sum();
    let mut timestamps = Vec::with_capacity(total);
    let mut start = container.first_timestamp_ms;

    let intervals = container.block_intervals_ms.iter().zip(&container.timestamps_intervals_ms);
    for ((&block_interval, &spacing), &len) in intervals.zip(block_lengths) {
        start = start
            .checked_add(u64::from(block_interval))
            .ok_or(Error::TimestampOverflow)?;
        let mut ts = start;
        for j in 0..len {
            if j > 0 {
                ts = ts.checked_add(u64::from(spacing)).ok_or(Error::TimestampOverflow)?;
            }
            timestamps.push(ts);
        }
    }

    Ok(timestamps)
}
