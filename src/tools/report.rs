//! Text rendering of tool outcomes.
//!
//! Every call produces one text block: either a message describing the
//! outcome, or a preamble line followed by pretty-printed listing JSON.

use serde::Serialize;

use crate::api::ApiError;
use crate::listing::FormattedListing;

#[derive(Debug)]
pub enum ToolReport {
    /// A page of suburb search results
    Page {
        label: String,
        listings: Vec<FormattedListing>,
        total: u64,
    },

    /// One listing with full detail
    Single {
        label: String,
        listing: Box<FormattedListing>,
    },

    /// None of the requested suburbs are in the directory
    UnknownSuburbs(Vec<String>),

    /// Smart search found no usable candidate for the address
    NoAddressMatch(String),

    /// An upstream request failed
    Failed(ApiError),
}

impl ToolReport {
    /// Whether the outcome should be flagged as a tool error
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    pub fn render(&self) -> String {
        match self {
            Self::Page {
                label,
                listings,
                total,
            } => format!(
                "Listings for {label} ({} of {total}):\n\n{}",
                listings.len(),
                pretty(listings)
            ),
            Self::Single { label, listing } => {
                format!("Listing for {label}:\n\n{}", pretty(listing))
            }
            Self::UnknownSuburbs(names) => format!("Unknown suburb(s): {}", names.join(", ")),
            Self::NoAddressMatch(address) => {
                format!("No listing found matching address: {address}")
            }
            Self::Failed(err) => err.to_string(),
        }
    }
}

fn pretty<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| format!("<listing data could not be serialized: {e}>"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::{RawListing, format_listing};
    use chrono::Utc;

    #[test]
    fn test_page_preamble_counts() {
        let listings = vec![format_listing(&RawListing::default(), Utc::now()); 20];
        let report = ToolReport::Page {
            label: "Mission Bay".into(),
            listings,
            total: 57,
        };

        let text = report.render();
        assert!(text.starts_with("Listings for Mission Bay (20 of 57):\n\n["));
        assert!(!report.is_error());

        let json_part = text.split_once("\n\n").unwrap().1;
        let parsed: serde_json::Value = serde_json::from_str(json_part).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 20);
    }

    #[test]
    fn test_unknown_suburbs_message() {
        let report = ToolReport::UnknownSuburbs(vec!["Nowhereville".into(), "Atlantis".into()]);
        assert_eq!(report.render(), "Unknown suburb(s): Nowhereville, Atlantis");
    }

    #[test]
    fn test_failure_is_error() {
        let report = ToolReport::Failed(ApiError::EmptyDetail {
            operation: "Failed to fetch listing detail for X1".into(),
        });
        assert!(report.is_error());
        assert_eq!(
            report.render(),
            "Failed to fetch listing detail for X1: response contained no listing"
        );
    }
}
