//! Sample value blocks and the block delta codec.

use log::trace;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::segment::validate_boundaries;

/// Fully expanded sample values of one channel, in acquisition order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsoluteBlock {
    pub absolute_values: Vec<i32>,
}

impl AbsoluteBlock {
    #[must_use]
    pub fn new(absolute_values: Vec<i32>) -> Self {
        Self { absolute_values }
    }

    #[must_use]
    pub fn values(&self) -> &[i32] {
        &self.absolute_values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.absolute_values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.absolute_values.is_empty()
    }
}

impl From<Vec<i32>> for AbsoluteBlock {
    fn from(absolute_values: Vec<i32>) -> Self {
        Self { absolute_values }
    }
}

/// One delta-encoded block
///
/// Element 0 is the absolute value of the block's first sample, every further
/// element is the difference to the previous sample.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifferentialBlock {
    pub differential_values: Vec<i32>,
}

impl DifferentialBlock {
    #[must_use]
    pub fn new(differential_values: Vec<i32>) -> Self {
        Self { differential_values }
    }

    #[must_use]
    pub fn values(&self) -> &[i32] {
        &self.differential_values
    }

    /// Number of samples covered by this block
    #[must_use]
    pub fn len(&self) -> usize {
        self.differential_values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.differential_values.is_empty()
    }

    /// Delta-encode `values[from..=to]`
    fn encode_range(values: &[i32], from: usize, to: usize) -> Self {
        let mut differential_values = Vec::with_capacity(to - from + 1);
        differential_values.push(values[from]);
        differential_values.extend(values[from..=to].windows(2).map(|w| w[1].wrapping_sub(w[0])));
        Self { differential_values }
    }

    /// Running sum of the block, appended to `out`
    fn decode_into(&self, out: &mut Vec<i32>) {
        let mut sum = 0i32;
        for &delta in &self.differential_values {
            sum = sum.wrapping_add(delta);
            out.push(sum);
        }
    }
}

impl From<Vec<i32>> for DifferentialBlock {
    fn from(differential_values: Vec<i32>) -> Self {
        Self { differential_values }
    }
}

/// Split `values` into delta-encoded blocks starting at `boundaries`
///
/// Each pair of consecutive boundaries `(b[i], b[i + 1])` yields a block covering
/// `b[i]..b[i + 1]`; the last boundary opens a trailing block that runs to the end.
/// A trailing block of one sample holds only that sample's absolute value.
///
/// Deltas use wrapping arithmetic, so any `i32` sequence round-trips through
/// [`decode_blocks`].
///
/// # Errors
/// Returns [`Error::InvalidBoundaries`] unless the boundaries start at 0, strictly
/// increase and stay below `values.len()` (or are empty for empty input).
///
/// # Example
/// ```
/// use pcore::{decode_blocks, encode_blocks};
///
/// let values = [10, 12, 13, 20, 21];
/// let blocks = encode_blocks(&values, &[0, 3]).unwrap();
/// assert_eq!(blocks[0].values(), &[10, 2, 1]);
/// assert_eq!(blocks[1].values(), &[20, 1]);
/// assert_eq!(decode_blocks(&blocks), values);
/// ```
pub fn encode_blocks(values: &[i32], boundaries: &[usize]) -> Result<Vec<DifferentialBlock>> {
    if !validate_boundaries(boundaries, values.len()) {
        return Err(Error::InvalidBoundaries {
            boundaries: boundaries.to_vec(),
            len: values.len(),
        });
    }
    if boundaries.is_empty() {
        return Ok(Vec::new());
    }

    let last = values.len() - 1;
    let mut blocks = Vec::with_capacity(boundaries.len());
    for pair in boundaries.windows(2) {
        blocks.push(DifferentialBlock::encode_range(values, pair[0], pair[1] - 1));
    }
    // Trailing block, also the only block when there is a single boundary
    let from = boundaries[boundaries.len() - 1];
    blocks.push(DifferentialBlock::encode_range(values, from, last));

    trace!("encoded {} values into {} blocks", values.len(), blocks.len());
    Ok(blocks)
}

/// Reconstruct absolute values from delta-encoded blocks
///
/// Every block is decoded independently from its own anchor and the results are
/// concatenated in order.
#[must_use]
pub fn decode_blocks(blocks: &[DifferentialBlock]) -> Vec<i32> {
    let total = blocks.iter().map(DifferentialBlock::len).sum();
    let mut values = Vec::with_capacity(total);
    for block in blocks {
        block.decode_into(&mut values);
    }
    values
}
