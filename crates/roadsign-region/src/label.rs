//! Two-pass blob labeling
//!
//! Labels the connected foreground regions of a binary mask into a
//! one-channel label image. The causal mask includes the upper diagonals,
//! so pixels touching only at a corner join the same blob.
//!
//! # Algorithm
//!
//! 1. Copy the mask into the label image, normalizing foreground to 255,
//!    and clear the 1-pixel border.
//! 2. First pass, row-major over the interior: look at the causal
//!    neighbors (above-left, above, above-right, left). If none is
//!    labeled, mint a new provisional label. Otherwise take the smallest
//!    resolved label among them and merge every other neighbor's class
//!    into it in the [`EquivalenceTable`].
//! 3. Second pass: replace every provisional label by its resolved label.
//! 4. Compact the table into the list of distinct resolved labels, in
//!    order of first appearance.
//!
//! Label values are bytes. At most [`MAX_LABELS`] provisional labels fit
//! in one frame; foreground pixels that would need a further label stay
//! background.

use crate::blob::Blob;
use crate::error::RegionResult;
use roadsign_core::{BACKGROUND, Channels, FOREGROUND, ImageBuffer};
use tracing::{debug, warn};

/// Maximum number of provisional labels per frame
pub const MAX_LABELS: usize = 254;

const TABLE_SLOTS: usize = 256;

/// Provisional-label to resolved-label mapping
///
/// Slot 0 is background. Every stored value is a resolved label `r` with
/// `slots[r] == r`.
#[derive(Debug, Clone)]
pub struct EquivalenceTable {
    slots: [u8; TABLE_SLOTS],
    next: usize,
}

impl Default for EquivalenceTable {
    fn default() -> Self {
        Self::new()
    }
}

impl EquivalenceTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            slots: [0; TABLE_SLOTS],
            next: 1,
        }
    }

    /// Mint a fresh provisional label, or `None` once [`MAX_LABELS`] are in use
    pub fn mint(&mut self) -> Option<u8> {
        if self.next > MAX_LABELS {
            return None;
        }
        let label = self.next as u8;
        self.slots[self.next] = label;
        self.next += 1;
        Some(label)
    }

    /// Number of provisional labels minted so far
    pub fn minted(&self) -> usize {
        self.next - 1
    }

    /// Get the resolved label of a provisional label
    #[inline]
    pub fn resolve(&self, label: u8) -> u8 {
        self.slots[label as usize]
    }

    /// Rewrite every slot holding `from` to `into`
    pub fn merge(&mut self, from: u8, into: u8) {
        for slot in &mut self.slots[1..self.next] {
            if *slot == from {
                *slot = into;
            }
        }
    }

    /// Distinct resolved labels in order of first appearance
    pub fn compact(&self) -> Vec<u8> {
        let mut seen = [false; TABLE_SLOTS];
        let mut labels = Vec::new();
        for &label in &self.slots[1..self.next] {
            if label != 0 && !seen[label as usize] {
                seen[label as usize] = true;
                labels.push(label);
            }
        }
        labels
    }
}

/// Label the blobs of a binary mask
///
/// # Arguments
///
/// * `src` - One-channel mask; any nonzero sample is foreground
/// * `labels` - One-channel label image of the same size, overwritten
///
/// # Returns
///
/// One [`Blob`] per resolved label with only `label` set; the other fields
/// are zero until [`crate::analyze_blobs`] fills them. An empty vector means
/// the mask has no foreground in its interior.
///
/// # Errors
///
/// Fails on channel or size mismatch; `labels` is untouched on error.
pub fn label_blobs(src: &ImageBuffer, labels: &mut ImageBuffer) -> RegionResult<Vec<Blob>> {
    src.check_geometry(Channels::One, labels, Channels::One)?;

    let w = src.width() as usize;
    let h = src.height() as usize;
    let out = labels.data_mut();

    for (d, &s) in out.iter_mut().zip(src.data()) {
        *d = if s != 0 { FOREGROUND } else { BACKGROUND };
    }
    out[..w].fill(BACKGROUND);
    out[(h - 1) * w..].fill(BACKGROUND);
    for row in out.chunks_exact_mut(w) {
        row[0] = BACKGROUND;
        row[w - 1] = BACKGROUND;
    }

    let mut table = EquivalenceTable::new();
    let mut exhausted = false;

    // First pass
    for y in 1..h.saturating_sub(1) {
        for x in 1..w - 1 {
            let pos = y * w + x;
            if out[pos] == BACKGROUND {
                continue;
            }
            let causal = [out[pos - w - 1], out[pos - w], out[pos - w + 1], out[pos - 1]];

            if causal.iter().all(|&n| n == BACKGROUND) {
                match table.mint() {
                    Some(label) => out[pos] = label,
                    None => {
                        out[pos] = BACKGROUND;
                        if !exhausted {
                            warn!(
                                max_labels = MAX_LABELS,
                                x, y, "label table full, dropping further blobs"
                            );
                            exhausted = true;
                        }
                    }
                }
            } else {
                let lowest = causal
                    .iter()
                    .filter(|&&n| n != BACKGROUND)
                    .map(|&n| table.resolve(n))
                    .fold(u8::MAX, u8::min);
                out[pos] = lowest;

                for n in causal {
                    if n == BACKGROUND {
                        continue;
                    }
                    let root = table.resolve(n);
                    if root != lowest {
                        table.merge(root, lowest);
                    }
                }
            }
        }
    }

    // Second pass
    for y in 1..h.saturating_sub(1) {
        for x in 1..w - 1 {
            let pos = y * w + x;
            if out[pos] != BACKGROUND {
                out[pos] = table.resolve(out[pos]);
            }
        }
    }

    let resolved = table.compact();
    debug!(
        provisional = table.minted(),
        blobs = resolved.len(),
        "labeled blobs"
    );
    Ok(resolved.into_iter().map(Blob::new).collect())
}
