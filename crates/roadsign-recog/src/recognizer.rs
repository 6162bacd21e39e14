//! Per-frame sign recognition
//!
//! [`SignRecognizer`] runs the whole chain on one BGR frame:
//!
//! 1. BGR -> HSV conversion
//! 2. HSV range segmentation with the profile for the requested color
//! 3. Median filtering of the mask
//! 4. Blob labeling and selection of the largest blob
//! 5. Perimeter-ratio classification
//!
//! Scratch images are allocated once for the frame geometry and reused.
//! The color to search for is chosen by the caller; each outcome carries
//! the color to use for the next frame, which flips between blue and red
//! whenever a frame yields no usable blob.

use roadsign_color::{HsvRange, bgr_to_hsv, hsv_segment};
use roadsign_core::{Channels, ImageBuffer};
use roadsign_filter::median_filter;
use roadsign_region::{Blob, MarkOptions, analyze_largest_blob, label_blobs, mark_blob};
use tracing::debug;

use crate::classify::{BLUE_BANDS, ClassificationBand, RED_BANDS, SignCategory, SignColor, classify_blob};
use crate::{RecogError, RecogResult};

/// Default median window side
pub const DEFAULT_MEDIAN_KERNEL: u32 = 7;

/// Default minimum blob area, in pixels, for a sign candidate
pub const DEFAULT_MIN_SIGN_AREA: u32 = 5000;

// =============================================================================
// Options
// =============================================================================

/// Segmentation range and classification bands for one sign color
#[derive(Debug, Clone, PartialEq)]
pub struct ColorProfile {
    /// HSV bounds selecting the sign color
    pub range: HsvRange,
    /// Ratio bands, tried in order
    pub bands: Vec<ClassificationBand>,
}

impl ColorProfile {
    /// Calibrated profile for blue signs
    pub fn blue() -> Self {
        Self {
            range: HsvRange::blue_sign(),
            bands: BLUE_BANDS.to_vec(),
        }
    }

    /// Calibrated profile for red signs
    pub fn red() -> Self {
        Self {
            range: HsvRange::red_sign(),
            bands: RED_BANDS.to_vec(),
        }
    }

    /// Replace the segmentation range
    pub fn with_range(mut self, range: HsvRange) -> Self {
        self.range = range;
        self
    }

    /// Replace the classification bands
    pub fn with_bands(mut self, bands: Vec<ClassificationBand>) -> Self {
        self.bands = bands;
        self
    }
}

/// Options for [`SignRecognizer`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecognizerOptions {
    /// Median filter window side (odd, > 1)
    pub median_kernel: u32,
    /// Largest blobs smaller than this are not signs
    pub min_sign_area: u32,
    /// Profile used when searching for blue signs
    pub blue: ColorProfile,
    /// Profile used when searching for red signs
    pub red: ColorProfile,
    /// Produce an annotated copy of each frame
    pub annotate: bool,
    /// Marking style for annotated frames
    pub mark: MarkOptions,
}

impl Default for RecognizerOptions {
    fn default() -> Self {
        Self {
            median_kernel: DEFAULT_MEDIAN_KERNEL,
            min_sign_area: DEFAULT_MIN_SIGN_AREA,
            blue: ColorProfile::blue(),
            red: ColorProfile::red(),
            annotate: false,
            mark: MarkOptions::default(),
        }
    }
}

impl RecognizerOptions {
    /// Set the median window side
    pub fn with_median_kernel(mut self, kernel: u32) -> Self {
        self.median_kernel = kernel;
        self
    }

    /// Set the minimum sign area
    pub fn with_min_sign_area(mut self, area: u32) -> Self {
        self.min_sign_area = area;
        self
    }

    /// Set the blue profile
    pub fn with_blue(mut self, profile: ColorProfile) -> Self {
        self.blue = profile;
        self
    }

    /// Set the red profile
    pub fn with_red(mut self, profile: ColorProfile) -> Self {
        self.red = profile;
        self
    }

    /// Enable or disable frame annotation
    pub fn with_annotate(mut self, annotate: bool) -> Self {
        self.annotate = annotate;
        self
    }

    /// Set the marking style for annotated frames
    pub fn with_mark(mut self, mark: MarkOptions) -> Self {
        self.mark = mark;
        self
    }

    fn validate(&self) -> RecogResult<()> {
        if self.median_kernel <= 1 || self.median_kernel % 2 == 0 {
            return Err(RecogError::InvalidParameters(format!(
                "median kernel must be odd and > 1, got {}",
                self.median_kernel
            )));
        }
        Ok(())
    }
}

// =============================================================================
// Recognizer
// =============================================================================

/// Result of processing one frame
#[derive(Debug, Clone)]
pub struct FrameOutcome {
    /// Recognized category
    pub category: SignCategory,
    /// Color to search for in the next frame
    pub next_color: SignColor,
    /// Largest blob of the frame, if any
    pub blob: Option<Blob>,
    /// Copy of the frame with the largest blob marked, when annotating
    pub annotated: Option<ImageBuffer>,
}

/// Frame-by-frame sign recognizer
///
/// # Examples
///
/// ```
/// use roadsign_core::ImageBuffer;
/// use roadsign_recog::{RecognizerOptions, SignCategory, SignColor, SignRecognizer};
///
/// let mut recognizer = SignRecognizer::new(64, 48, RecognizerOptions::default()).unwrap();
/// let frame = ImageBuffer::from_bgr_frame(64, 48, &vec![0u8; 64 * 48 * 3]).unwrap();
/// let outcome = recognizer.process_frame(&frame, SignColor::Blue).unwrap();
/// assert_eq!(outcome.category, SignCategory::Undefined);
/// assert_eq!(outcome.next_color, SignColor::Red);
/// ```
#[derive(Debug)]
pub struct SignRecognizer {
    options: RecognizerOptions,
    hsv: ImageBuffer,
    mask: ImageBuffer,
    filtered: ImageBuffer,
    labels: ImageBuffer,
}

impl SignRecognizer {
    /// Create a recognizer for frames of `width` x `height` pixels.
    ///
    /// # Errors
    ///
    /// Fails for a zero dimension or an invalid median kernel.
    pub fn new(width: u32, height: u32, options: RecognizerOptions) -> RecogResult<Self> {
        options.validate()?;
        let hsv = ImageBuffer::new(width, height, Channels::Three, 255)?;
        let mask = ImageBuffer::new(width, height, Channels::One, 255)?;
        Ok(Self {
            options,
            hsv,
            filtered: mask.new_like(),
            labels: mask.new_like(),
            mask,
        })
    }

    /// Get the options
    pub fn options(&self) -> &RecognizerOptions {
        &self.options
    }

    /// Get the frame width
    pub fn width(&self) -> u32 {
        self.hsv.width()
    }

    /// Get the frame height
    pub fn height(&self) -> u32 {
        self.hsv.height()
    }

    /// Get the filtered mask from the last processed frame
    pub fn mask(&self) -> &ImageBuffer {
        &self.filtered
    }

    /// Get the label image from the last processed frame
    pub fn labels(&self) -> &ImageBuffer {
        &self.labels
    }

    /// Process one BGR frame searching for signs of `color`.
    ///
    /// # Errors
    ///
    /// Fails if `frame` is not a 3-channel image of the recognizer's size.
    pub fn process_frame(&mut self, frame: &ImageBuffer, color: SignColor) -> RecogResult<FrameOutcome> {
        frame.check_geometry(Channels::Three, &self.hsv, Channels::Three)?;

        let profile = match color {
            SignColor::Blue => &self.options.blue,
            SignColor::Red => &self.options.red,
            SignColor::Undefined => {
                debug!("no sign color selected, restarting with blue");
                return Ok(FrameOutcome {
                    category: SignCategory::Undefined,
                    next_color: SignColor::Blue,
                    blob: None,
                    annotated: self.annotate(frame, None)?,
                });
            }
        };

        bgr_to_hsv(frame, &mut self.hsv)?;
        hsv_segment(&self.hsv, &mut self.mask, &profile.range)?;
        median_filter(&self.mask, &mut self.filtered, self.options.median_kernel)?;
        let mut blobs = label_blobs(&self.filtered, &mut self.labels)?;
        let largest = analyze_largest_blob(&self.labels, &mut blobs)?;
        let blob = largest.map(|i| blobs[i]);

        let (category, next_color) = match blob {
            Some(b) if b.area >= self.options.min_sign_area => (classify_blob(&b, &profile.bands), color),
            _ => {
                let next = color.toggled();
                debug!(?color, ?next, "no sign candidate, switching color");
                (SignCategory::Undefined, next)
            }
        };

        debug!(
            ?color,
            ?category,
            blobs = blobs.len(),
            area = blob.map_or(0, |b| b.area),
            perimeter = blob.map_or(0, |b| b.perimeter),
            "frame processed"
        );

        Ok(FrameOutcome {
            category,
            next_color,
            blob,
            annotated: self.annotate(frame, blob.as_ref())?,
        })
    }

    fn annotate(&self, frame: &ImageBuffer, blob: Option<&Blob>) -> RecogResult<Option<ImageBuffer>> {
        if !self.options.annotate {
            return Ok(None);
        }
        let mut out = frame.new_like();
        match blob {
            Some(b) => mark_blob(frame, &mut out, b, &self.options.mark)?,
            None => out.copy_from(frame)?,
        }
        Ok(Some(out))
    }
}
