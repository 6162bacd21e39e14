//! Shape classification of sign blobs
//!
//! A sign's outline is summarized by a single number, the ratio of its
//! perimeter pixel count to half its bounding-box perimeter:
//!
//! ```text
//! rho = perimeter / (width + height)
//! ```
//!
//! A filled square sits just below 2, a disk a little above; arrows and
//! ring-shaped signs push the ratio higher. Each sign color has a list of
//! calibrated ratio bands checked in order; a ratio in no band is
//! [`SignCategory::Undefined`].
//!
//! # Calibrated bands
//!
//! | color | band | category |
//! |-------|------|----------|
//! | blue  | [2.1, 2.9) | turn left / turn right |
//! | blue  | [2.9, 3.7] | motor vehicles only |
//! | blue  | [4.1, 4.9] | motorway |
//! | red   | [2.0, 2.8) | no entry |
//! | red   | [2.8, 3.6) | stop |
//!
//! The turn direction is read from the centroid: an arrow pointing left
//! has more mass left of the bounding-box midpoint.

use roadsign_region::Blob;

/// Recognized sign category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SignCategory {
    /// No sign recognized
    #[default]
    Undefined,
    /// Mandatory left turn
    TurnLeft,
    /// Mandatory right turn
    TurnRight,
    /// Road reserved for motor vehicles
    MotorVehicleOnly,
    /// Motorway
    Motorway,
    /// No entry
    NoEntry,
    /// Stop
    Stop,
}

/// Sign color being searched for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SignColor {
    /// No color selected
    #[default]
    Undefined,
    /// Blue mandatory and information signs
    Blue,
    /// Red prohibitory signs
    Red,
}

impl SignColor {
    /// The color to search for when this one finds nothing
    ///
    /// Blue and red alternate; an undefined color restarts at blue.
    pub fn toggled(self) -> Self {
        match self {
            SignColor::Blue => SignColor::Red,
            SignColor::Red | SignColor::Undefined => SignColor::Blue,
        }
    }
}

/// What a matching ratio band decides
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandOutcome {
    /// A turn sign; the direction comes from the centroid
    Turn,
    /// A fixed category
    Category(SignCategory),
}

/// A perimeter-ratio interval mapped to a sign category
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassificationBand {
    /// Lower bound, inclusive
    pub min: f32,
    /// Upper bound
    pub max: f32,
    /// Whether `max` itself belongs to the band
    pub max_inclusive: bool,
    /// Category for ratios inside the band
    pub outcome: BandOutcome,
}

impl ClassificationBand {
    /// Band covering `[min, max)`
    pub const fn half_open(min: f32, max: f32, outcome: BandOutcome) -> Self {
        Self {
            min,
            max,
            max_inclusive: false,
            outcome,
        }
    }

    /// Band covering `[min, max]`
    pub const fn closed(min: f32, max: f32, outcome: BandOutcome) -> Self {
        Self {
            min,
            max,
            max_inclusive: true,
            outcome,
        }
    }

    /// Check whether `ratio` falls inside the band.
    pub fn contains(&self, ratio: f32) -> bool {
        if ratio < self.min {
            return false;
        }
        if self.max_inclusive {
            ratio <= self.max
        } else {
            ratio < self.max
        }
    }
}

/// Calibrated bands for blue signs
pub const BLUE_BANDS: [ClassificationBand; 3] = [
    ClassificationBand::half_open(2.1, 2.9, BandOutcome::Turn),
    ClassificationBand::closed(2.9, 3.7, BandOutcome::Category(SignCategory::MotorVehicleOnly)),
    ClassificationBand::closed(4.1, 4.9, BandOutcome::Category(SignCategory::Motorway)),
];

/// Calibrated bands for red signs
pub const RED_BANDS: [ClassificationBand; 2] = [
    ClassificationBand::half_open(2.0, 2.8, BandOutcome::Category(SignCategory::NoEntry)),
    ClassificationBand::half_open(2.8, 3.6, BandOutcome::Category(SignCategory::Stop)),
];

/// Get the calibrated bands for a color (empty for an undefined color).
pub fn default_bands(color: SignColor) -> &'static [ClassificationBand] {
    match color {
        SignColor::Blue => &BLUE_BANDS,
        SignColor::Red => &RED_BANDS,
        SignColor::Undefined => &[],
    }
}

/// Classify a measured blob against a list of bands.
///
/// Bands are tried in order and the first match wins. A blob with an
/// empty bounding box is [`SignCategory::Undefined`].
pub fn classify_blob(blob: &Blob, bands: &[ClassificationBand]) -> SignCategory {
    if blob.bbox.is_empty() {
        return SignCategory::Undefined;
    }
    let Some(ratio) = blob.perimeter_ratio() else {
        return SignCategory::Undefined;
    };

    match bands.iter().find(|band| band.contains(ratio)) {
        Some(band) => match band.outcome {
            BandOutcome::Turn => {
                if blob.xc < blob.bbox.center_x() {
                    SignCategory::TurnLeft
                } else {
                    SignCategory::TurnRight
                }
            }
            BandOutcome::Category(category) => category,
        },
        None => SignCategory::Undefined,
    }
}

/// Classify `blobs[index]` with the calibrated bands for `color`.
///
/// Returns [`SignCategory::Undefined`] for an out-of-range index or an
/// undefined color.
///
/// # Examples
///
/// ```
/// use roadsign_core::Rect;
/// use roadsign_recog::{SignCategory, SignColor, classify_sign};
/// use roadsign_region::Blob;
///
/// let blob = Blob {
///     label: 1,
///     bbox: Rect::new(0, 0, 10, 10),
///     area: 60,
///     xc: 2,
///     yc: 5,
///     perimeter: 54,
/// };
/// assert_eq!(classify_sign(&[blob], 0, SignColor::Blue), SignCategory::TurnLeft);
/// assert_eq!(classify_sign(&[blob], 1, SignColor::Blue), SignCategory::Undefined);
/// ```
pub fn classify_sign(blobs: &[Blob], index: usize, color: SignColor) -> SignCategory {
    match blobs.get(index) {
        Some(blob) => classify_blob(blob, default_bands(color)),
        None => SignCategory::Undefined,
    }
}
