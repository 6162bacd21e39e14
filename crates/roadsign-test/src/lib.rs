//! roadsign-test - Regression test framework for roadsign
//!
//! Every crate's `tests/*_reg.rs` drives its checks through [`RegParams`],
//! which numbers each comparison, records failures instead of panicking on
//! the first one, and reports a summary from [`RegParams::cleanup`].
//!
//! Two modes are supported:
//!
//! - **Compare**: Run every comparison (default)
//! - **Display**: Also write intermediate images to `tests/regout` for
//!   visual inspection
//!
//! # Usage
//!
//! ```ignore
//! use roadsign_test::RegParams;
//!
//! let mut rp = RegParams::new("label");
//! rp.compare_values(2.0, blobs.len() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" or "display"

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // roadsign-test lives at crates/roadsign-test
    format!("{}/../..", manifest_dir)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
