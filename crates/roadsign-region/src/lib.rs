//! roadsign-region - Blob labeling and measurement
//!
//! - **Labeling** ([`label`]): two-pass labeling of a binary mask with
//!   an online equivalence table
//! - **Measurement** ([`blob`]): area, centroid, bounding box and perimeter
//!   per blob, and selection of the largest blob
//! - **Marking** ([`mark`]): burning blob boxes and centroids into a copy
//!   of a color frame
//!
//! # Example
//!
//! ```
//! use roadsign_core::{Channels, ImageBuffer};
//! use roadsign_region::{analyze_blobs, label_blobs};
//!
//! let mut mask = ImageBuffer::new(8, 8, Channels::One, 255).unwrap();
//! for y in 2..5 {
//!     for x in 2..5 {
//!         mask.set_pixel(x, y, &[255]).unwrap();
//!     }
//! }
//! let mut labels = mask.new_like();
//! let mut blobs = label_blobs(&mask, &mut labels).unwrap();
//! analyze_blobs(&labels, &mut blobs).unwrap();
//! assert_eq!(blobs.len(), 1);
//! assert_eq!(blobs[0].area, 9);
//! assert_eq!((blobs[0].xc, blobs[0].yc), (3, 3));
//! ```

pub mod blob;
pub mod error;
pub mod label;
pub mod mark;

pub use blob::{Blob, analyze_blobs, analyze_largest_blob};
pub use error::{RegionError, RegionResult};
pub use label::{EquivalenceTable, MAX_LABELS, label_blobs};
pub use mark::{MarkOptions, mark_blob, mark_blobs};
