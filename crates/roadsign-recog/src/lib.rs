//! roadsign-recog - Traffic sign classification and recognition
//!
//! - **Classification** ([`classify`]): maps a measured blob to a
//!   [`SignCategory`] using calibrated perimeter-ratio bands per color
//! - **Recognition** ([`recognizer`]): runs conversion, segmentation,
//!   filtering, labeling and classification on whole frames
//!
//! # Quick Start
//!
//! ```no_run
//! use roadsign_core::ImageBuffer;
//! use roadsign_recog::{RecognizerOptions, SignColor, SignRecognizer};
//!
//! let (width, height) = (640, 480);
//! let mut recognizer = SignRecognizer::new(width, height, RecognizerOptions::default()).unwrap();
//! let mut color = SignColor::Blue;
//!
//! # let frames: Vec<Vec<u8>> = Vec::new();
//! for raw in &frames {
//!     let frame = ImageBuffer::from_bgr_frame(width, height, raw).unwrap();
//!     let outcome = recognizer.process_frame(&frame, color).unwrap();
//!     println!("{:?}", outcome.category);
//!     color = outcome.next_color;
//! }
//! ```

pub mod classify;
mod error;
pub mod recognizer;

pub use error::{RecogError, RecogResult};

pub use classify::{
    BLUE_BANDS, BandOutcome, ClassificationBand, RED_BANDS, SignCategory, SignColor, classify_blob,
    classify_sign, default_bands,
};
pub use recognizer::{
    ColorProfile, DEFAULT_MEDIAN_KERNEL, DEFAULT_MIN_SIGN_AREA, FrameOutcome, RecognizerOptions,
    SignRecognizer,
};

// Re-export core for convenience
pub use roadsign_core;
