//! Blob measurement
//!
//! Fills in the geometry of labeled blobs from a label image produced by
//! [`crate::label_blobs`]. Only the interior is scanned; the label image
//! border is always background.

use crate::error::RegionResult;
use roadsign_core::{Channels, ImageBuffer, Rect};

/// A labeled foreground region and its metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Blob {
    /// Label value in the label image (1..=254)
    pub label: u8,
    /// Bounding box
    pub bbox: Rect,
    /// Pixel count
    pub area: u32,
    /// Centroid x, rounded mean of member x coordinates
    pub xc: i32,
    /// Centroid y, rounded mean of member y coordinates
    pub yc: i32,
    /// Number of member pixels with at least one 4-neighbor outside the blob
    pub perimeter: u32,
}

impl Blob {
    /// Create an unmeasured blob for `label`
    pub fn new(label: u8) -> Self {
        Self {
            label,
            ..Default::default()
        }
    }

    /// Ratio of perimeter to half the bounding-box perimeter
    ///
    /// Returns `None` for an empty bounding box.
    pub fn perimeter_ratio(&self) -> Option<f32> {
        let half = self.bbox.half_perimeter();
        if half <= 0 {
            None
        } else {
            Some(self.perimeter as f32 / half as f32)
        }
    }
}

/// Running sums for one blob
#[derive(Debug, Clone, Copy)]
struct Accum {
    area: u32,
    sum_x: u64,
    sum_y: u64,
    xmin: i32,
    ymin: i32,
    xmax: i32,
    ymax: i32,
    perimeter: u32,
}

impl Accum {
    fn new() -> Self {
        Self {
            area: 0,
            sum_x: 0,
            sum_y: 0,
            xmin: i32::MAX,
            ymin: i32::MAX,
            xmax: i32::MIN,
            ymax: i32::MIN,
            perimeter: 0,
        }
    }

    fn add(&mut self, x: usize, y: usize, on_edge: bool) {
        let (xi, yi) = (x as i32, y as i32);
        self.area += 1;
        self.sum_x += x as u64;
        self.sum_y += y as u64;
        self.xmin = self.xmin.min(xi);
        self.ymin = self.ymin.min(yi);
        self.xmax = self.xmax.max(xi);
        self.ymax = self.ymax.max(yi);
        if on_edge {
            self.perimeter += 1;
        }
    }

    /// Write the metrics into `blob`. A blob with no pixels keeps a zero box.
    fn store(&self, blob: &mut Blob) {
        blob.area = self.area;
        blob.perimeter = self.perimeter;
        let n = self.area.max(1) as f64;
        blob.xc = (self.sum_x as f64 / n).round() as i32;
        blob.yc = (self.sum_y as f64 / n).round() as i32;
        blob.bbox = if self.area == 0 {
            Rect::default()
        } else {
            Rect::from_extrema(self.xmin, self.ymin, self.xmax, self.ymax)
        };
    }
}

/// Visit every labeled interior pixel as `(x, y, label, on_edge)`.
fn for_each_labeled(labels: &ImageBuffer, mut f: impl FnMut(usize, usize, u8, bool)) {
    let w = labels.width() as usize;
    let h = labels.height() as usize;
    let data = labels.data();

    for y in 1..h.saturating_sub(1) {
        for x in 1..w.saturating_sub(1) {
            let pos = y * w + x;
            let label = data[pos];
            if label == 0 {
                continue;
            }
            let on_edge = data[pos - 1] != label
                || data[pos + 1] != label
                || data[pos - w] != label
                || data[pos + w] != label;
            f(x, y, label, on_edge);
        }
    }
}

/// Measure every blob
///
/// Fills area, centroid, bounding box and perimeter of each entry of
/// `blobs` in one scan of the label image.
///
/// # Errors
///
/// Fails if `labels` is not a one-channel image.
pub fn analyze_blobs(labels: &ImageBuffer, blobs: &mut [Blob]) -> RegionResult<()> {
    labels.check_channels(Channels::One)?;

    let mut index = [usize::MAX; 256];
    for (i, blob) in blobs.iter().enumerate() {
        index[blob.label as usize] = i;
    }
    let mut accums = vec![Accum::new(); blobs.len()];

    for_each_labeled(labels, |x, y, label, on_edge| {
        let i = index[label as usize];
        if i != usize::MAX {
            accums[i].add(x, y, on_edge);
        }
    });

    for (blob, acc) in blobs.iter_mut().zip(&accums) {
        acc.store(blob);
    }
    Ok(())
}

/// Find and measure the largest blob
///
/// Counts the area of every blob, then computes the full metrics of the
/// largest one only. Ties keep the first blob.
///
/// # Returns
///
/// The index of the largest blob, or `None` if `blobs` is empty.
pub fn analyze_largest_blob(labels: &ImageBuffer, blobs: &mut [Blob]) -> RegionResult<Option<usize>> {
    labels.check_channels(Channels::One)?;
    if blobs.is_empty() {
        return Ok(None);
    }

    let w = labels.width() as usize;
    let h = labels.height() as usize;
    let mut areas = [0u32; 256];
    if w >= 3 {
        for row in labels.data().chunks_exact(w).take(h.saturating_sub(1)).skip(1) {
            for &v in &row[1..w - 1] {
                areas[v as usize] += 1;
            }
        }
    }

    let mut largest = 0;
    let mut largest_area = 0;
    for (i, blob) in blobs.iter_mut().enumerate() {
        blob.area = areas[blob.label as usize];
        if blob.area > largest_area {
            largest_area = blob.area;
            largest = i;
        }
    }

    let target = blobs[largest].label;
    let mut acc = Accum::new();
    for_each_labeled(labels, |x, y, label, on_edge| {
        if label == target {
            acc.add(x, y, on_edge);
        }
    });
    acc.store(&mut blobs[largest]);
    Ok(Some(largest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::label_blobs;

    fn labeled(width: u32, height: u32, rows: &[&str]) -> (ImageBuffer, Vec<Blob>) {
        let mut mask = ImageBuffer::new(width, height, Channels::One, 255).unwrap();
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.bytes().enumerate() {
                if c == b'#' {
                    mask.set_pixel(x as u32, y as u32, &[255]).unwrap();
                }
            }
        }
        let mut labels = mask.new_like();
        let blobs = label_blobs(&mask, &mut labels).unwrap();
        (labels, blobs)
    }

    #[test]
    fn test_single_pixel_perimeter() {
        let (labels, mut blobs) = labeled(5, 5, &[".....", ".....", "..#..", ".....", "....."]);
        analyze_blobs(&labels, &mut blobs).unwrap();
        assert_eq!(blobs[0].area, 1);
        assert_eq!(blobs[0].perimeter, 1);
        assert_eq!(blobs[0].bbox, Rect::new(2, 2, 1, 1));
        assert_eq!((blobs[0].xc, blobs[0].yc), (2, 2));
    }

    #[test]
    fn test_square_metrics() {
        let (labels, mut blobs) = labeled(
            8,
            7,
            &[
                "........",
                ".####...",
                ".####...",
                ".####...",
                ".####...",
                "........",
                "........",
            ],
        );
        analyze_blobs(&labels, &mut blobs).unwrap();
        let b = blobs[0];
        assert_eq!(b.area, 16);
        assert_eq!(b.bbox, Rect::new(1, 1, 4, 4));
        // 16 pixels minus the 2x2 core
        assert_eq!(b.perimeter, 12);
        // Mean x = 2.5 rounds up
        assert_eq!((b.xc, b.yc), (3, 3));
        assert_eq!(b.perimeter_ratio(), Some(1.5));
    }

    #[test]
    fn test_largest_blob() {
        let (labels, mut blobs) = labeled(
            10,
            6,
            &[
                "..........",
                ".##..###..",
                ".##..###..",
                ".....###..",
                "..........",
                "..........",
            ],
        );
        assert_eq!(blobs.len(), 2);
        let i = analyze_largest_blob(&labels, &mut blobs).unwrap();
        assert_eq!(i, Some(1));
        assert_eq!(blobs[0].area, 4);
        assert_eq!(blobs[1].area, 9);
        assert_eq!(blobs[1].bbox, Rect::new(5, 1, 3, 3));
        assert_eq!(blobs[1].perimeter, 8);
        // Only the winner gets full metrics
        assert_eq!(blobs[0].bbox, Rect::default());
    }

    #[test]
    fn test_largest_tie_keeps_first() {
        let (labels, mut blobs) = labeled(8, 4, &["........", ".##..##.", ".##..##.", "........"]);
        assert_eq!(analyze_largest_blob(&labels, &mut blobs).unwrap(), Some(0));
    }

    #[test]
    fn test_largest_empty() {
        let labels = ImageBuffer::new(4, 4, Channels::One, 255).unwrap();
        assert_eq!(analyze_largest_blob(&labels, &mut []).unwrap(), None);
    }

    #[test]
    fn test_unmatched_blob_keeps_zero_box() {
        let labels = ImageBuffer::new(4, 4, Channels::One, 255).unwrap();
        let mut blobs = vec![Blob::new(7)];
        analyze_blobs(&labels, &mut blobs).unwrap();
        assert_eq!(blobs[0], Blob::new(7));
        assert_eq!(blobs[0].perimeter_ratio(), None);
    }
}
