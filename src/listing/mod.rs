//! Upstream listing schema and its caller-facing reshaping.

pub mod format;
pub mod model;

pub use format::{FormattedListing, format_listing, format_listings};
pub use model::{DetailResponse, RawListing, SearchResponse};
