//! Custom request extractors.

mod lenient_json;

pub use lenient_json::{parse_or_default, LenientJson};
