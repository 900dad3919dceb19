//! Block segmentation of absolute timestamp sequences.
//!
//! A block is a maximal run of samples sharing one constant inter-sample
//! interval. The segmenter walks the timestamps once and opens a new block
//! wherever the interval stops matching the interval the current block was
//! opened with.

/// Find the start index of every constant-interval block
///
/// The first difference of a block becomes its reference interval. When a later
/// difference `ts[i] - ts[i - 1]` does not match, index `i` starts a new block and
/// the difference after it becomes the new reference. Consequently every block
/// except the trailing one holds at least two samples.
///
/// Returns an empty vector for empty input, otherwise a strictly increasing
/// sequence starting at 0.
///
/// # Example
/// ```
/// use pcore::find_block_boundaries;
///
/// let ts = [0, 100, 200, 100_300, 100_400];
/// assert_eq!(find_block_boundaries(&ts), vec![0, 3]);
/// ```
#[must_use]
pub fn find_block_boundaries(timestamps: &[u64]) -> Vec<usize> {
    if timestamps.is_empty() {
        return Vec::new();
    }

    let mut boundaries = vec![0];
    let mut reference = 0u64;
    let mut new_block = true;

    for (i, pair) in timestamps.windows(2).enumerate() {
        // Only equality matters here, decreasing input is rejected by the encoder
        let diff = pair[1].wrapping_sub(pair[0]);
        if new_block {
            reference = diff;
            new_block = false;
        }
        if diff != reference {
            boundaries.push(i + 1);
            new_block = true;
        }
    }

    boundaries
}

/// Check that `boundaries` splits `len` samples into non-empty blocks
///
/// Empty input must have no boundaries; non-empty input needs boundaries that
/// start at 0, strictly increase and stay below `len`.
pub(crate) fn validate_boundaries(boundaries: &[usize], len: usize) -> bool {
    if len == 0 {
        return boundaries.is_empty();
    }
    boundaries.first() == Some(&0)
        && boundaries.windows(2).all(|w| w[0] < w[1])
        && boundaries.last().is_some_and(|&b| b < len)
}

/// Convert block boundaries into per-block sample counts
#[cfg(test)]
pub(crate) fn boundaries_to_lengths(boundaries: &[usize], len: usize) -> Vec<usize> {
    boundaries
        .iter()
        .zip(boundaries.iter().skip(1).chain(std::iter::once(&len)))
        .map(|(&start, &end)| end - start)
        .collect()
}
