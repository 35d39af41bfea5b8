//! Bundle output
//!
//! - `writer` - framing of file sections inside the bundle
//! - `json` - JSON rendering of the run summary

mod json;
mod writer;

pub use json::print_json;
pub use writer::{BundleWriter, SEPARATOR, file_header, read_error_marker};
